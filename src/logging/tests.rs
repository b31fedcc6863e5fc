// forge-engine: parallel build graph engine core
//
// SPDX-FileCopyrightText: 2026 Forge Engine Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{EngineEvent, EventContext, LogConfig, LogLevel, LoggerSink, TracingLoggerSink};

#[test]
fn test_log_level_from_u8() {
    assert_eq!(LogLevel::from_u8(0), Some(LogLevel::OFF));
    assert_eq!(LogLevel::from_u8(5), Some(LogLevel::TRACE));
    assert_eq!(LogLevel::from_u8(6), None);
}

#[test]
fn test_log_level_filter_string() {
    assert_eq!(LogLevel::ERROR.to_filter_string(), "error");
    assert_eq!(LogLevel::TRACE.to_filter_string(), "trace");
}

#[test]
fn test_critical_only_forces_warn_regardless_of_console_level() {
    let config = LogConfig::default()
        .with_console_level(LogLevel::TRACE)
        .with_critical_only(true);
    assert_eq!(config.effective_console_filter(), "warn");
}

#[test]
fn test_non_critical_uses_console_level() {
    let config = LogConfig::default().with_console_level(LogLevel::DEBUG);
    assert_eq!(config.effective_console_filter(), "debug");
}

#[test]
fn test_event_context_derivation_preserves_ancestors() {
    let ctx = EventContext::for_submission(1)
        .with_project(2, 3)
        .with_target(4)
        .with_task(5);
    assert_eq!(ctx.submission_id, Some(1));
    assert_eq!(ctx.project_instance_id, Some(2));
    assert_eq!(ctx.project_context_id, Some(3));
    assert_eq!(ctx.target_id, Some(4));
    assert_eq!(ctx.task_id, Some(5));
}

#[test]
fn test_tracing_sink_does_not_panic_on_every_variant() {
    let sink = TracingLoggerSink;
    let ctx = EventContext::for_submission(1);
    sink.emit(&EngineEvent::BuildStarted { context: ctx });
    sink.emit(&EngineEvent::TargetStarted {
        context: ctx,
        target_name: "Build".to_string(),
    });
    sink.emit(&EngineEvent::Warning {
        context: ctx,
        code: Some("FE4241"),
        text: "resolved version differs".to_string(),
    });
}
