// forge-engine: parallel build graph engine core
//
// SPDX-FileCopyrightText: 2026 Forge Engine Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Results Cache (§4.2): per-configuration target results, keyed so that
//! [`ResultsCache::get`] only returns a hit when every requested target is
//! covered — a target this cache has never seen is indistinguishable from
//! one that was silently dropped by `skipNonexistentTargets`, which is the
//! point: callers must not treat "not here" as "skipped".

use std::collections::BTreeMap;

use tokio::sync::Mutex;

use crate::core::request::{BuildResult, ConfigurationId, OverallResult, TargetCode, TargetResult};

/// Per-configuration store of completed target results.
pub struct ResultsCache {
    entries: Mutex<BTreeMap<ConfigurationId, BTreeMap<String, TargetResult>>>,
}

impl ResultsCache {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(BTreeMap::new()),
        }
    }

    /// Commits a request's per-target results under `configuration_id`,
    /// merging with whatever was already cached for it.
    pub async fn put(&self, configuration_id: ConfigurationId, targets: BTreeMap<String, TargetResult>) {
        let mut entries = self.entries.lock().await;
        entries.entry(configuration_id).or_default().extend(targets);
    }

    /// Returns a [`BuildResult`] for `requested` only if every named target
    /// already has a cached result for `configuration_id`. A single missing
    /// target fails the whole lookup: partial coverage is not a cache hit.
    pub async fn get(&self, configuration_id: ConfigurationId, requested: &[String]) -> Option<BuildResult> {
        let entries = self.entries.lock().await;
        let per_config = entries.get(&configuration_id)?;

        let mut per_target = BTreeMap::new();
        for name in requested {
            per_target.insert(name.clone(), per_config.get(name)?.clone());
        }

        let overall = if per_target.values().any(|r| matches!(r.code, TargetCode::Failure)) {
            OverallResult::Failure
        } else {
            OverallResult::Success
        };

        let mut result = BuildResult::new(0);
        result.per_target_results = per_target;
        result.overall_result = overall;
        Some(result)
    }
}

impl Default for ResultsCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
