// forge-engine: parallel build graph engine core
//
// SPDX-FileCopyrightText: 2026 Forge Engine Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::BTreeMap;

use super::*;
use crate::core::item::TaskItem;
use crate::core::target_def::SourceLocation;
use crate::task_host::schema::{ParameterSchema, TaskSchema};

fn raw_map(entries: &[(&str, &str)]) -> BTreeMap<String, (String, SourceLocation)> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), (v.to_string(), SourceLocation::default())))
        .collect()
}

#[test]
fn test_empty_evaluation_leaves_parameter_unset() {
    let schema = TaskSchema::new().with_parameter(ParameterSchema::new("Name", ParameterKind::String));
    let raw = raw_map(&[("Name", "$(Missing)")]);
    let outcome = bind_parameters("T", &schema, &raw, &EvaluationScope::new()).unwrap();
    assert!(!outcome.values.contains_key("Name"));
}

#[test]
fn test_missing_required_parameter_errors() {
    let schema = TaskSchema::new().with_parameter(ParameterSchema::new("Name", ParameterKind::String).required());
    let raw = BTreeMap::new();
    let err = bind_parameters("T", &schema, &raw, &EvaluationScope::new()).unwrap_err();
    assert!(matches!(err, ProjectFileError::MissingRequiredParameter { .. }));
}

#[test]
fn test_unknown_supplied_parameter_is_observed_not_fatal() {
    let schema = TaskSchema::new();
    let raw = raw_map(&[("Bogus", "value")]);
    let outcome = bind_parameters("T", &schema, &raw, &EvaluationScope::new()).unwrap();
    assert_eq!(outcome.unknown_parameters, vec!["Bogus".to_string()]);
}

#[test]
fn test_array_splits_on_semicolon_with_escape() {
    let schema = TaskSchema::new().with_parameter(ParameterSchema::new("Names", ParameterKind::StringArray));
    let raw = raw_map(&[("Names", "a%3Bb;c")]);
    let outcome = bind_parameters("T", &schema, &raw, &EvaluationScope::new()).unwrap();
    match &outcome.values["Names"] {
        ParameterValue::StringArray(items) => assert_eq!(items, &vec!["a;b".to_string(), "c".to_string()]),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_sole_item_reference_multiple_items_is_error() {
    let mut scope = EvaluationScope::new();
    scope.set_items("Compile", vec![TaskItem::from_spec("a"), TaskItem::from_spec("b")]);
    let schema = TaskSchema::new().with_parameter(ParameterSchema::new("Item", ParameterKind::TaskItem));
    let raw = raw_map(&[("Item", "@(Compile)")]);
    let err = bind_parameters("T", &schema, &raw, &scope).unwrap_err();
    assert!(matches!(err, ProjectFileError::MultipleItemsForScalar { count: 2, .. }));
}

#[test]
fn test_sole_item_reference_single_item_binds() {
    let mut scope = EvaluationScope::new();
    scope.set_items("Compile", vec![TaskItem::from_spec("a")]);
    let schema = TaskSchema::new().with_parameter(ParameterSchema::new("Item", ParameterKind::TaskItem));
    let raw = raw_map(&[("Item", "@(Compile)")]);
    let outcome = bind_parameters("T", &schema, &raw, &scope).unwrap();
    assert!(matches!(outcome.values["Item"], ParameterValue::Item(_)));
}

#[test]
fn test_bool_and_int_scalars() {
    let schema = TaskSchema::new()
        .with_parameter(ParameterSchema::new("Flag", ParameterKind::Bool))
        .with_parameter(ParameterSchema::new("Count", ParameterKind::Int));
    let raw = raw_map(&[("Flag", "true"), ("Count", "42")]);
    let outcome = bind_parameters("T", &schema, &raw, &EvaluationScope::new()).unwrap();
    assert_eq!(outcome.values["Flag"], ParameterValue::Bool(true));
    assert_eq!(outcome.values["Count"], ParameterValue::Int(42));
}

#[test]
fn test_unsupported_bool_value_errors() {
    let schema = TaskSchema::new().with_parameter(ParameterSchema::new("Flag", ParameterKind::Bool));
    let raw = raw_map(&[("Flag", "maybe")]);
    let err = bind_parameters("T", &schema, &raw, &EvaluationScope::new()).unwrap_err();
    assert!(matches!(err, ProjectFileError::UnsupportedParameterType { .. }));
}
