// forge-engine: parallel build graph engine core
//
// SPDX-FileCopyrightText: 2026 Forge Engine Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use super::*;
use crate::core::item::TaskItem;

#[test]
fn test_initial_scope_seeds_properties_and_items() {
    let instance = ProjectInstanceBuilder::new("fixture.proj")
        .with_property("Config", "Release")
        .with_items("Compile", vec![TaskItem::from_spec("a.rs"), TaskItem::from_spec("b.rs")])
        .build();

    let scope = instance.initial_scope();
    assert_eq!(scope.property("Config"), Some("Release"));
    assert_eq!(scope.items_named("Compile").map(<[_]>::len), Some(2));
}

#[test]
fn test_target_lookup() {
    let instance = ProjectInstanceBuilder::new("fixture.proj")
        .with_target(crate::core::target_def::ProjectTarget::new("Build"))
        .build();

    assert_eq!(instance.target("Build").unwrap().name, "Build");
    assert!(instance.target("Clean").is_none());
}
