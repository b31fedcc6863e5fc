// forge-engine: parallel build graph engine core
//
// SPDX-FileCopyrightText: 2026 Forge Engine Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Ambient engine settings types.
//!
//! These are process-level settings (§4.0.2 of the expanded spec), distinct
//! from a [`crate::engine::BuildRequestConfiguration`], which is build-graph
//! identity data and never lives in a settings file.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::logging::LogLevel;

/// Ambient engine settings, loaded from defaults → settings file → env vars
/// → explicit overrides, in that priority order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineSettings {
    /// Maximum number of concurrent parallel request entries / task slots.
    /// Defaults to the host's available parallelism.
    pub max_concurrency: usize,

    /// Console log level (0-5).
    pub console_log_level: LogLevel,

    /// File log level (0-5).
    pub file_log_level: LogLevel,

    /// Optional path to a log file; when unset, only console logging runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,

    /// Suppress all but warnings/errors on the console layer.
    pub critical_only: bool,

    /// Milliseconds a cancelled worker is given to observe cancellation
    /// before the engine escalates and marks its request errored (§5).
    pub builder_shutdown_budget_ms: u64,

    /// Additional filesystem locations searched for resolver manifests,
    /// beyond whatever the host's SDK resolver loader already returns.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sdk_search_paths: Vec<PathBuf>,

    /// Fail a build outright when an SDK reference cannot be resolved,
    /// rather than continuing with the reference unresolved.
    pub fail_on_unresolved_sdk: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            max_concurrency: std::thread::available_parallelism()
                .map(std::num::NonZeroUsize::get)
                .unwrap_or(4),
            console_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: None,
            critical_only: false,
            builder_shutdown_budget_ms: 5_000,
            sdk_search_paths: Vec::new(),
            fail_on_unresolved_sdk: false,
        }
    }
}
