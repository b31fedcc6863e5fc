// forge-engine: parallel build graph engine core
//
// SPDX-FileCopyrightText: 2026 Forge Engine Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Ambient engine settings management.
//!
//! # Settings Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. master forge.toml (exe dir)
//! 3. FORGEINI (semicolon-separated paths)
//! 4. local forge.toml (cwd)
//! 5. --config
//! 6. FORGE_* env vars
//! 7. explicit overrides
//! ```
//!
//! This is process-level configuration only — worker concurrency, logging,
//! SDK resolver search paths. It is distinct from a
//! [`crate::engine::BuildRequestConfiguration`], which is per-build graph
//! identity data (project path, tools version, global properties) living
//! entirely in the Config Cache, never in a settings file.

pub mod loader;
pub mod types;

#[cfg(test)]
mod tests;

use std::path::Path;

use crate::error::Result;

pub use loader::SettingsLoader;
pub use types::EngineSettings;

impl EngineSettings {
    /// Create a new settings builder.
    #[must_use]
    pub fn builder() -> SettingsLoader {
        SettingsLoader::new()
    }

    /// Load settings from a single TOML file (simple API).
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML,
    /// or does not match the `EngineSettings` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load settings from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match
    /// the `EngineSettings` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }
}
