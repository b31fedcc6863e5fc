// forge-engine: parallel build graph engine core
//
// SPDX-FileCopyrightText: 2026 Forge Engine Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use super::*;

fn scope_with_prop(name: &str, value: &str) -> EvaluationScope {
    let mut scope = EvaluationScope::new();
    scope.set_property(name, value);
    scope
}

#[test]
fn test_evaluate_property_reference() {
    let scope = scope_with_prop("Config", "Release");
    assert_eq!(scope.evaluate("build-$(Config)"), "build-Release");
}

#[test]
fn test_evaluate_unknown_property_expands_to_empty() {
    let scope = EvaluationScope::new();
    assert_eq!(scope.evaluate("$(Missing)"), "");
}

#[test]
fn test_evaluate_item_reference_joins_with_semicolon() {
    let mut scope = EvaluationScope::new();
    scope.set_items(
        "Compile",
        vec![TaskItem::from_spec("a.rs"), TaskItem::from_spec("b.rs")],
    );
    assert_eq!(scope.evaluate("@(Compile)"), "a.rs;b.rs");
}

#[test]
fn test_as_sole_item_reference() {
    let mut scope = EvaluationScope::new();
    scope.set_items("Compile", vec![TaskItem::from_spec("a.rs")]);
    assert!(scope.as_sole_item_reference("@(Compile)").is_some());
    assert!(scope.as_sole_item_reference("prefix @(Compile)").is_none());
}

#[test]
fn test_split_semicolon_list_unescapes_after_split() {
    let parts = split_semicolon_list("a%3Bb;c");
    assert_eq!(parts, vec!["a;b".to_string(), "c".to_string()]);
}

#[test]
fn test_condition_equality() {
    let scope = EvaluationScope::new();
    assert!(!scope.evaluate_condition("'0'=='1'"));
    assert!(scope.evaluate_condition("'0'=='0'"));
    assert!(scope.evaluate_condition("'0'!='1'"));
}

#[test]
fn test_condition_with_property_expansion() {
    let scope = scope_with_prop("Os", "linux");
    assert!(scope.evaluate_condition("'$(Os)'=='linux'"));
}

#[test]
fn test_condition_empty_is_true() {
    let scope = EvaluationScope::new();
    assert!(scope.evaluate_condition(""));
    assert!(scope.evaluate_condition("   "));
}

#[test]
fn test_condition_and_or() {
    let scope = EvaluationScope::new();
    assert!(scope.evaluate_condition("'a'=='a' and 'b'=='b'"));
    assert!(!scope.evaluate_condition("'a'=='a' and 'b'=='c'"));
    assert!(scope.evaluate_condition("'a'=='x' or 'b'=='b'"));
}
