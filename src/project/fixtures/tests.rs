// forge-engine: parallel build graph engine core
//
// SPDX-FileCopyrightText: 2026 Forge Engine Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use super::*;
use crate::core::target_def::ProjectTarget;

#[test]
fn test_builder_round_trips_properties_items_targets() {
    let instance = ProjectInstanceBuilder::new("fixture.proj")
        .with_property("Config", "Release")
        .with_items("Compile", vec![TaskItem::from_spec("a.rs")])
        .with_target(ProjectTarget::new("Build"))
        .build();

    assert_eq!(instance.project_path, "fixture.proj");
    assert_eq!(instance.properties.get("Config").map(String::as_str), Some("Release"));
    assert_eq!(instance.items.get("Compile").map(Vec::len), Some(1));
    assert!(instance.target("Build").is_some());
    assert!(instance.target("Missing").is_none());
}

#[test]
fn test_fixed_evaluator_returns_registered_project() {
    let evaluator = FixedProjectEvaluator::new().with_project(ProjectInstanceBuilder::new("a.proj").build());
    let config = crate::core::request::BuildRequestConfiguration::new("a.proj", "current", BTreeMap::new());
    let project = evaluator.create_project_instance(&config).unwrap();
    assert_eq!(project.project_path, "a.proj");
}

#[test]
fn test_fixed_evaluator_errors_for_unregistered_path() {
    let evaluator = FixedProjectEvaluator::new();
    let config = crate::core::request::BuildRequestConfiguration::new("missing.proj", "current", BTreeMap::new());
    assert!(evaluator.create_project_instance(&config).is_err());
}
