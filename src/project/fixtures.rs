// forge-engine: parallel build graph engine core
//
// SPDX-FileCopyrightText: 2026 Forge Engine Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Hand-constructs [`ProjectInstance`] values without a project-file parser.
//!
//! The evaluator is out of scope; tests and the demo CLI still need a way
//! to stand up a project graph, so this builder plays the evaluator's role
//! for fixtures: build up properties, items, and targets, then call
//! [`ProjectInstanceBuilder::build`].

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::core::item::TaskItem;
use crate::core::request::BuildRequestConfiguration;
use crate::core::target_def::ProjectTarget;
use crate::error::Result;

use super::{ProjectEvaluator, ProjectInstance};

#[derive(Debug, Default)]
pub struct ProjectInstanceBuilder {
    project_path: String,
    properties: BTreeMap<String, String>,
    items: BTreeMap<String, Vec<TaskItem>>,
    targets: BTreeMap<String, ProjectTarget>,
}

impl ProjectInstanceBuilder {
    #[must_use]
    pub fn new(project_path: impl Into<String>) -> Self {
        Self {
            project_path: project_path.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_items(mut self, name: impl Into<String>, items: Vec<TaskItem>) -> Self {
        self.items.insert(name.into(), items);
        self
    }

    #[must_use]
    pub fn with_target(mut self, target: ProjectTarget) -> Self {
        self.targets.insert(target.name.clone(), target);
        self
    }

    #[must_use]
    pub fn build(self) -> ProjectInstance {
        ProjectInstance {
            project_path: self.project_path,
            properties: self.properties,
            items: self.items,
            targets: self.targets,
        }
    }
}

/// A fixed-function [`ProjectEvaluator`]: holds pre-built [`ProjectInstance`]
/// values keyed by project path and hands them back verbatim. Stands in for
/// the (external, out of scope) evaluator in tests and the demo front end.
#[derive(Debug, Default)]
pub struct FixedProjectEvaluator {
    projects: BTreeMap<String, Arc<ProjectInstance>>,
}

impl FixedProjectEvaluator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_project(mut self, project: ProjectInstance) -> Self {
        self.projects.insert(project.project_path.clone(), Arc::new(project));
        self
    }
}

impl ProjectEvaluator for FixedProjectEvaluator {
    fn create_project_instance(&self, config: &BuildRequestConfiguration) -> Result<Arc<ProjectInstance>> {
        self.projects
            .get(&config.project_path)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no fixture project registered for path '{}'", config.project_path))
    }
}

#[cfg(test)]
mod tests;
