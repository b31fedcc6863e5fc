// forge-engine: parallel build graph engine core
//
// SPDX-FileCopyrightText: 2026 Forge Engine Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use super::*;

#[test]
fn test_kind_classification() {
    assert!(ParameterKind::StringArray.is_array());
    assert!(!ParameterKind::String.is_array());
    assert!(ParameterKind::TaskItem.is_task_item());
    assert!(ParameterKind::TaskItemArray.is_task_item());
    assert!(!ParameterKind::Int.is_task_item());
}

#[test]
fn test_schema_lookup() {
    let schema = TaskSchema::new()
        .with_parameter(ParameterSchema::new("Sources", ParameterKind::TaskItemArray).required())
        .with_output_parameter("Output");

    assert!(schema.find("Sources").unwrap().required);
    assert!(schema.find("Missing").is_none());
    assert!(schema.declares_output("Output"));
    assert!(!schema.declares_output("Other"));
}
