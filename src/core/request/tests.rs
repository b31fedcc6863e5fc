// forge-engine: parallel build graph engine core
//
// SPDX-FileCopyrightText: 2026 Forge Engine Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use super::*;

#[test]
fn test_identity_key_case_insensitive_path() {
    let mut props = BTreeMap::new();
    props.insert("Config".to_string(), "Release".to_string());
    let a = BuildRequestConfiguration::new("/Foo/Bar.proj", "Current", props.clone());
    let b = BuildRequestConfiguration::new("/foo/bar.proj", "Current", props);
    assert_eq!(a.identity_key(), b.identity_key());
}

#[test]
fn test_identity_key_differs_on_properties() {
    let mut props_a = BTreeMap::new();
    props_a.insert("Config".to_string(), "Release".to_string());
    let mut props_b = BTreeMap::new();
    props_b.insert("Config".to_string(), "Debug".to_string());
    let a = BuildRequestConfiguration::new("/foo.proj", "Current", props_a);
    let b = BuildRequestConfiguration::new("/foo.proj", "Current", props_b);
    assert_ne!(a.identity_key(), b.identity_key());
}

#[test]
fn test_target_code_satisfies_dependents() {
    assert!(TargetCode::Success.satisfies_dependents());
    assert!(TargetCode::Skipped.satisfies_dependents());
    assert!(!TargetCode::Failure.satisfies_dependents());
}

#[test]
fn test_build_result_default_is_success() {
    let result = BuildResult::new(1);
    assert!(result.is_success());
}
