// forge-engine: parallel build graph engine core
//
// SPDX-FileCopyrightText: 2026 Forge Engine Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use super::*;

#[test]
fn test_stringify_scalar_and_array() {
    assert_eq!(ParameterValue::Bool(true).stringify(), "true");
    assert_eq!(
        ParameterValue::StringArray(vec!["a".into(), "b".into()]).stringify(),
        "a;b"
    );
}

#[test]
fn test_as_items_scalar_string_wraps_in_one_item() {
    let items = ParameterValue::String("hello".into()).as_items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].item_spec, "hello");
}

#[test]
fn test_as_items_array_preserves_count() {
    let items = ParameterValue::ItemArray(vec![TaskItem::from_spec("a"), TaskItem::from_spec("b")]).as_items();
    assert_eq!(items.len(), 2);
}
