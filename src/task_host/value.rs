// forge-engine: parallel build graph engine core
//
// SPDX-FileCopyrightText: 2026 Forge Engine Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! A bound parameter value, post-conversion (§4.4 binding rule 2).

use crate::core::item::TaskItem;

#[derive(Debug, Clone, PartialEq)]
pub enum ParameterValue {
    Bool(bool),
    Int(i64),
    String(String),
    Item(TaskItem),
    BoolArray(Vec<bool>),
    IntArray(Vec<i64>),
    StringArray(Vec<String>),
    ItemArray(Vec<TaskItem>),
}

impl ParameterValue {
    /// Stringified form used for property output harvesting: scalars
    /// render directly, arrays join with `;` (§4.4 output harvesting).
    #[must_use]
    pub fn stringify(&self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::Int(i) => i.to_string(),
            Self::String(s) => s.clone(),
            Self::Item(item) => item.item_spec.clone(),
            Self::BoolArray(items) => items.iter().map(bool::to_string).collect::<Vec<_>>().join(";"),
            Self::IntArray(items) => items.iter().map(i64::to_string).collect::<Vec<_>>().join(";"),
            Self::StringArray(items) => items.join(";"),
            Self::ItemArray(items) => items
                .iter()
                .map(|i| i.item_spec.as_str())
                .collect::<Vec<_>>()
                .join(";"),
        }
    }

    /// The items this value contributes to an item-list output: one item
    /// per array element (preserving metadata for task items), one item
    /// for a scalar string/bool/int using its stringified value as the
    /// `itemSpec`, and the item itself for a scalar `ITaskItem` (§4.4).
    #[must_use]
    pub fn as_items(&self) -> Vec<TaskItem> {
        match self {
            Self::Item(item) => vec![item.clone()],
            Self::ItemArray(items) => items.clone(),
            Self::BoolArray(items) => items.iter().map(|b| TaskItem::from_spec(b.to_string())).collect(),
            Self::IntArray(items) => items.iter().map(|i| TaskItem::from_spec(i.to_string())).collect(),
            Self::StringArray(items) => items.iter().map(TaskItem::from_spec).collect(),
            Self::Bool(_) | Self::Int(_) | Self::String(_) => vec![TaskItem::from_spec(self.stringify())],
        }
    }
}

#[cfg(test)]
mod tests;
