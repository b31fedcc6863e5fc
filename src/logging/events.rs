// forge-engine: parallel build graph engine core
//
// SPDX-FileCopyrightText: 2026 Forge Engine Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Structured build events and the logger sink contract (§6).

use super::{EventContext, LogLevel};

/// A structured build event, as received by a [`LoggerSink`].
///
/// This is the required external contract from §6: the evaluator, task
/// host, and engine all emit through this enum rather than formatting
/// strings directly, so a host can route events to its own transport.
#[derive(Debug, Clone)]
pub enum EngineEvent {
    BuildStarted { context: EventContext },
    BuildFinished { context: EventContext, succeeded: bool },
    ProjectStarted { context: EventContext, project_path: String },
    ProjectFinished { context: EventContext, succeeded: bool },
    TargetStarted { context: EventContext, target_name: String },
    TargetFinished { context: EventContext, target_name: String, succeeded: bool },
    TaskStarted { context: EventContext, task_name: String },
    TaskFinished { context: EventContext, task_name: String, succeeded: bool },
    Message { context: EventContext, importance: LogLevel, text: String },
    Warning { context: EventContext, code: Option<&'static str>, text: String },
    Error { context: EventContext, code: Option<&'static str>, text: String },
    Telemetry { context: EventContext, name: String, properties: Vec<(String, String)> },
}

impl EngineEvent {
    /// The context carried by this event.
    #[must_use]
    pub const fn context(&self) -> EventContext {
        match self {
            Self::BuildStarted { context }
            | Self::BuildFinished { context, .. }
            | Self::ProjectStarted { context, .. }
            | Self::ProjectFinished { context, .. }
            | Self::TargetStarted { context, .. }
            | Self::TargetFinished { context, .. }
            | Self::TaskStarted { context, .. }
            | Self::TaskFinished { context, .. }
            | Self::Message { context, .. }
            | Self::Warning { context, .. }
            | Self::Error { context, .. }
            | Self::Telemetry { context, .. } => *context,
        }
    }
}

/// Receives structured build events from the engine.
///
/// Implementors decide transport (stdout, IPC, aggregation) — out of scope
/// for the core per §1. [`TracingLoggerSink`] is the in-process default.
pub trait LoggerSink: Send + Sync {
    /// Emit one structured event.
    fn emit(&self, event: &EngineEvent);
}

/// Default [`LoggerSink`] that funnels every event through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLoggerSink;

impl LoggerSink for TracingLoggerSink {
    fn emit(&self, event: &EngineEvent) {
        let ctx = event.context();
        match event {
            EngineEvent::BuildStarted { .. } => {
                tracing::info!(submission = ?ctx.submission_id, "build started");
            }
            EngineEvent::BuildFinished { succeeded, .. } => {
                tracing::info!(submission = ?ctx.submission_id, succeeded, "build finished");
            }
            EngineEvent::ProjectStarted { project_path, .. } => {
                tracing::debug!(project = %project_path, "project started");
            }
            EngineEvent::ProjectFinished { succeeded, .. } => {
                tracing::debug!(succeeded, "project finished");
            }
            EngineEvent::TargetStarted { target_name, .. } => {
                tracing::info!(target = %target_name, "target started");
            }
            EngineEvent::TargetFinished {
                target_name,
                succeeded,
                ..
            } => {
                tracing::info!(target = %target_name, succeeded, "target finished");
            }
            EngineEvent::TaskStarted { task_name, .. } => {
                tracing::debug!(task = %task_name, "task started");
            }
            EngineEvent::TaskFinished {
                task_name,
                succeeded,
                ..
            } => {
                tracing::debug!(task = %task_name, succeeded, "task finished");
            }
            EngineEvent::Message {
                importance, text, ..
            } => match importance.to_tracing_level() {
                Some(tracing::Level::ERROR) => tracing::error!("{text}"),
                Some(tracing::Level::WARN) => tracing::warn!("{text}"),
                Some(tracing::Level::DEBUG) => tracing::debug!("{text}"),
                Some(tracing::Level::TRACE) => tracing::trace!("{text}"),
                _ => tracing::info!("{text}"),
            },
            EngineEvent::Warning { code, text, .. } => {
                tracing::warn!(code = ?code, "{text}");
            }
            EngineEvent::Error { code, text, .. } => {
                tracing::error!(code = ?code, "{text}");
            }
            EngineEvent::Telemetry {
                name, properties, ..
            } => {
                tracing::trace!(event = %name, properties = ?properties, "telemetry");
            }
        }
    }
}
