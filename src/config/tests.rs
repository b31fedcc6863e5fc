// forge-engine: parallel build graph engine core
//
// SPDX-FileCopyrightText: 2026 Forge Engine Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use super::EngineSettings;
use crate::logging::LogLevel;

#[test]
fn test_default_settings() {
    let settings = EngineSettings::default();
    assert!(settings.max_concurrency >= 1);
    assert_eq!(settings.console_log_level, LogLevel::INFO);
    assert!(!settings.critical_only);
    assert_eq!(settings.builder_shutdown_budget_ms, 5_000);
}

#[test]
fn test_parse_overrides_defaults() {
    let settings = EngineSettings::parse(
        r#"
        max_concurrency = 2
        critical_only = true
        "#,
    )
    .expect("valid toml");
    assert_eq!(settings.max_concurrency, 2);
    assert!(settings.critical_only);
    // untouched fields keep their defaults
    assert_eq!(settings.console_log_level, LogLevel::INFO);
}

#[test]
fn test_env_prefix_overrides_file() {
    // SAFETY: test runs single-threaded w.r.t. this env var via serial access
    // through the process-wide env; no other test reads FORGE_MAX_CONCURRENCY.
    unsafe {
        std::env::set_var("FORGE_MAX_CONCURRENCY", "7");
    }
    let settings = EngineSettings::builder()
        .add_toml_str("max_concurrency = 2")
        .with_env_prefix("FORGE")
        .build()
        .expect("build settings");
    unsafe {
        std::env::remove_var("FORGE_MAX_CONCURRENCY");
    }
    assert_eq!(settings.max_concurrency, 7);
}

#[test]
fn test_deny_unknown_fields_rejects_typos() {
    let result = EngineSettings::parse("max_concurency = 2");
    assert!(result.is_err());
}
