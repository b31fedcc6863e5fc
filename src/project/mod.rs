// forge-engine: parallel build graph engine core
//
// SPDX-FileCopyrightText: 2026 Forge Engine Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! The project evaluator's external contract (§1, §6), and the
//! [`ProjectInstance`] data shape it hands the core.
//!
//! ```text
//!  ProjectEvaluator (external, out of scope)
//!        |
//!        v  create_project_instance(config) — idempotent
//!  ProjectInstance
//!    properties, items, targets[name -> ProjectTarget]
//!        |
//!        v
//!  Target Builder / Task Execution Host consume it read-only;
//!  a per-build EvaluationScope (seeded from it) accumulates
//!  harvested task outputs as the build proceeds.
//! ```

pub mod fixtures;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::core::request::BuildRequestConfiguration;
use crate::core::scope::EvaluationScope;
use crate::core::target_def::ProjectTarget;
use crate::error::Result;

pub use fixtures::{FixedProjectEvaluator, ProjectInstanceBuilder};

/// A fully evaluated project: properties, items, and target definitions,
/// as the (external) evaluator hands it to the core (§1).
#[derive(Debug, Clone)]
pub struct ProjectInstance {
    pub project_path: String,
    pub properties: BTreeMap<String, String>,
    pub items: BTreeMap<String, Vec<crate::core::item::TaskItem>>,
    pub targets: BTreeMap<String, ProjectTarget>,
}

impl ProjectInstance {
    /// A fresh [`EvaluationScope`] seeded from this instance's initial
    /// properties and items. The Target Builder mutates a clone of this as
    /// the build proceeds and task outputs are harvested.
    #[must_use]
    pub fn initial_scope(&self) -> EvaluationScope {
        let mut scope = EvaluationScope::new();
        for (name, value) in &self.properties {
            scope.set_property(name, value);
        }
        for (name, items) in &self.items {
            scope.set_items(name, items.clone());
        }
        scope
    }

    #[must_use]
    pub fn target(&self, name: &str) -> Option<&ProjectTarget> {
        self.targets.get(name)
    }
}

/// External contract (§6): supplies a [`ProjectInstance`] for a build
/// configuration. `create_project_instance` must be idempotent — repeated
/// calls for the same configuration return an equivalent instance without
/// re-running the (potentially expensive) evaluation.
pub trait ProjectEvaluator: Send + Sync {
    /// Evaluates (or returns a cached evaluation of) the project named by
    /// `config.project_path` under `config.global_properties`.
    fn create_project_instance(
        &self,
        config: &BuildRequestConfiguration,
    ) -> Result<Arc<ProjectInstance>>;
}
