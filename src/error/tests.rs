// forge-engine: parallel build graph engine core
//
// SPDX-FileCopyrightText: 2026 Forge Engine Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{ConfigError, EngineError, ForgeError, ForgeResult};

#[test]
fn test_config_error_display() {
    let err = ConfigError::MissingKey {
        section: "global".to_string(),
        key: "prefix".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "missing required settings key 'prefix' in section '[global]'"
    );
}

#[test]
fn test_unknown_configuration_display() {
    let err = EngineError::UnknownConfiguration(42);
    assert_eq!(err.to_string(), "unknown configuration id 42");
}

#[test]
fn test_forge_error_size() {
    // ForgeError should be reasonably small: all variants box their payload.
    let size = std::mem::size_of::<ForgeError>();
    assert!(size <= 24, "ForgeError is {size} bytes, expected <= 24");
}

#[test]
fn test_forge_result_size() {
    let size = std::mem::size_of::<ForgeResult<()>>();
    assert!(size <= 24, "ForgeResult<()> is {size} bytes, expected <= 24");
}
