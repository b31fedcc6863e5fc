// forge-engine: parallel build graph engine core
//
// SPDX-FileCopyrightText: 2026 Forge Engine Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use super::*;
use crate::core::target_def::ProjectTarget;
use crate::project::ProjectInstanceBuilder;

#[test]
fn test_depends_on_is_a_prerequisite() {
    let project = ProjectInstanceBuilder::new("p")
        .with_target(ProjectTarget::new("A").with_depends_on(["B"]))
        .with_target(ProjectTarget::new("B"))
        .build();
    assert_eq!(prerequisites(&project, "A"), vec!["B".to_string()]);
}

#[test]
fn test_before_targets_declared_on_other_target_becomes_prerequisite() {
    let project = ProjectInstanceBuilder::new("p")
        .with_target(ProjectTarget::new("A"))
        .with_target(ProjectTarget::new("B").with_before_targets(["A"]))
        .build();
    assert_eq!(prerequisites(&project, "A"), vec!["B".to_string()]);
}

#[test]
fn test_after_targets_is_a_prerequisite_of_the_declaring_target() {
    let project = ProjectInstanceBuilder::new("p")
        .with_target(ProjectTarget::new("A").with_after_targets(["B"]))
        .with_target(ProjectTarget::new("B"))
        .build();
    assert_eq!(prerequisites(&project, "A"), vec!["B".to_string()]);
}

#[test]
fn test_dependents_to_run_after() {
    let project = ProjectInstanceBuilder::new("p")
        .with_target(ProjectTarget::new("A"))
        .with_target(ProjectTarget::new("B").with_after_targets(["A"]))
        .build();
    assert_eq!(dependents_to_run_after(&project, "A"), vec!["B".to_string()]);
}

#[test]
fn test_missing_before_after_targets_are_silently_ignored() {
    let project = ProjectInstanceBuilder::new("p")
        .with_target(ProjectTarget::new("A").with_depends_on(["Ghost"]))
        .build();
    assert!(prerequisites(&project, "A").is_empty());
}
