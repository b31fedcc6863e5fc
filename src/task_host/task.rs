// forge-engine: parallel build graph engine core
//
// SPDX-FileCopyrightText: 2026 Forge Engine Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! The task execution contract (§6's "task factory" external collaborator)
//! and registry.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use crate::error::{ForgeResult, ProjectFileError};

use super::schema::TaskSchema;
use super::value::ParameterValue;

/// One concrete task invocation, as a host-supplied factory produces it
/// (§1, §6). Constructed immediately before execution and dropped
/// immediately after output harvest (§3 lifecycles).
pub trait Task: Send {
    fn schema(&self) -> TaskSchema;

    /// Binds the converted parameter map onto the task instance.
    fn set_parameters(&mut self, values: BTreeMap<String, ParameterValue>);

    /// Runs the task. `Ok(false)` is a reported failure (not an error);
    /// `Err` models `Execute()` throwing, which propagates to the engine.
    fn execute(&mut self) -> ForgeResult<bool>;

    /// Reads back one output parameter's current value, if declared.
    fn output(&self, parameter: &str) -> Option<ParameterValue>;
}

/// Produces a fresh [`Task`] instance per invocation (§3: "task instances
/// are constructed immediately before execution").
pub type TaskFactory = Arc<dyn Fn() -> Box<dyn Task> + Send + Sync>;

/// Maps task name to factory, honoring `UsingTask` assembly overrides
/// (§4.4 "Task lookup").
#[derive(Default, Clone)]
pub struct TaskFactoryRegistry {
    factories: std::collections::HashMap<String, TaskFactory>,
    using_task_assemblies: std::collections::HashMap<String, String>,
}

impl TaskFactoryRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, factory: TaskFactory) {
        self.factories.insert(name.into(), factory);
    }

    /// Records a `UsingTask` directive binding `name` to an assembly path.
    pub fn using_task(&mut self, name: impl Into<String>, assembly_path: impl Into<String>) {
        self.using_task_assemblies.insert(name.into(), assembly_path.into());
    }

    /// Looks up a task by name.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectFileError::UsingTaskAssemblyNotFound`] if a
    /// `UsingTask` override names an assembly absent from disk.
    pub fn find(&self, name: &str) -> Result<Option<Box<dyn Task>>, ProjectFileError> {
        if let Some(assembly_path) = self.using_task_assemblies.get(name)
            && !Path::new(assembly_path).exists()
        {
            return Err(ProjectFileError::UsingTaskAssemblyNotFound {
                task: name.to_string(),
                assembly_path: assembly_path.clone(),
            });
        }
        Ok(self.factories.get(name).map(|factory| factory()))
    }
}
