// forge-engine: parallel build graph engine core
//
// SPDX-FileCopyrightText: 2026 Forge Engine Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use super::*;
use crate::core::scope::EvaluationScope;
use std::thread::sleep;
use std::time::Duration;

fn touch(dir: &tempfile::TempDir, name: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, b"x").unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn test_output_newer_than_input_is_up_to_date() {
    let dir = tempfile::tempdir().unwrap();
    let input = touch(&dir, "in.txt");
    sleep(Duration::from_millis(20));
    let output = touch(&dir, "out.txt");
    let scope = EvaluationScope::new();
    assert!(is_up_to_date(&scope, &[input], &[output]));
}

#[test]
fn test_output_older_than_input_is_not_up_to_date() {
    let dir = tempfile::tempdir().unwrap();
    let output = touch(&dir, "out.txt");
    sleep(Duration::from_millis(20));
    let input = touch(&dir, "in.txt");
    let scope = EvaluationScope::new();
    assert!(!is_up_to_date(&scope, &[input], &[output]));
}

#[test]
fn test_missing_output_is_not_up_to_date() {
    let dir = tempfile::tempdir().unwrap();
    let input = touch(&dir, "in.txt");
    let missing = dir.path().join("missing.txt").to_string_lossy().into_owned();
    let scope = EvaluationScope::new();
    assert!(!is_up_to_date(&scope, &[input], &[missing]));
}

#[test]
fn test_empty_inputs_or_outputs_is_not_up_to_date() {
    let dir = tempfile::tempdir().unwrap();
    let output = touch(&dir, "out.txt");
    let scope = EvaluationScope::new();
    assert!(!is_up_to_date(&scope, &[], &[output.clone()]));
    assert!(!is_up_to_date(&scope, &["".to_string()], &[output]));
}

#[test]
fn test_properties_are_expanded_before_resolving_paths() {
    let dir = tempfile::tempdir().unwrap();
    let input = touch(&dir, "in.txt");
    sleep(Duration::from_millis(20));
    let output = touch(&dir, "out.txt");
    let mut scope = EvaluationScope::new();
    scope.set_property("Out", output);
    assert!(is_up_to_date(&scope, &[input], &["$(Out)".to_string()]));
}
