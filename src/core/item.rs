// forge-engine: parallel build graph engine core
//
// SPDX-FileCopyrightText: 2026 Forge Engine Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! [`TaskItem`]: the unit of item-list data flowing between targets and tasks.

use std::collections::BTreeMap;
use std::path::Path;

/// An item: an `itemSpec` string plus a metadata map, with a fixed set of
/// built-in metadata derived from `itemSpec` on construction (§3).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TaskItem {
    pub item_spec: String,
    pub metadata: BTreeMap<String, String>,
}

/// Names of the built-in, derived metadata keys.
pub mod builtin_metadata {
    pub const FULL_PATH: &str = "FullPath";
    pub const FILENAME: &str = "Filename";
    pub const EXTENSION: &str = "Extension";
    pub const RELATIVE_DIR: &str = "RelativeDir";
    pub const DIRECTORY: &str = "Directory";
}

impl TaskItem {
    /// Creates an item, computing built-in metadata from `item_spec`.
    ///
    /// Explicit entries in `metadata` are preserved; built-ins are only
    /// filled in where absent, so a task can still override them.
    #[must_use]
    pub fn new(item_spec: impl Into<String>, metadata: BTreeMap<String, String>) -> Self {
        let item_spec = item_spec.into();
        let mut full = derive_builtin_metadata(&item_spec);
        for (k, v) in metadata {
            full.insert(k, v);
        }
        Self {
            item_spec,
            metadata: full,
        }
    }

    /// Creates an item with no extra metadata beyond the built-ins.
    #[must_use]
    pub fn from_spec(item_spec: impl Into<String>) -> Self {
        Self::new(item_spec, BTreeMap::new())
    }

    #[must_use]
    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }
}

fn derive_builtin_metadata(item_spec: &str) -> BTreeMap<String, String> {
    let mut metadata = BTreeMap::new();
    let path = Path::new(item_spec);

    metadata.insert(builtin_metadata::FULL_PATH.to_string(), item_spec.to_string());

    let filename = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    metadata.insert(builtin_metadata::FILENAME.to_string(), filename);

    let extension = path
        .extension()
        .map(|s| format!(".{}", s.to_string_lossy()))
        .unwrap_or_default();
    metadata.insert(builtin_metadata::EXTENSION.to_string(), extension);

    let directory = path
        .parent()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_default();
    metadata.insert(builtin_metadata::DIRECTORY.to_string(), directory.clone());
    metadata.insert(builtin_metadata::RELATIVE_DIR.to_string(), directory);

    metadata
}
