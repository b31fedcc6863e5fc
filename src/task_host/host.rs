// forge-engine: parallel build graph engine core
//
// SPDX-FileCopyrightText: 2026 Forge Engine Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! The Task Execution Host orchestrator: `FindTask -> SetTaskParameters ->
//! Execute -> GatherTaskOutputs* -> CleanupForTask` (§4.4).
//!
//! `InitializeForTask`/`InitializeForBatch` have no counterpart here: this
//! core does not batch task instances across items, so every invocation is
//! its own batch of one.

use crate::core::scope::EvaluationScope;
use crate::core::target_def::{TaskInstance, TaskOutputTarget};
use crate::error::{ForgeResult, ProjectFileError, TaskError};

use super::binder::bind_parameters;
use super::task::TaskFactoryRegistry;
use super::value::ParameterValue;

/// Binds, executes, and harvests outputs for declared task instances.
pub struct TaskExecutionHost {
    registry: TaskFactoryRegistry,
}

impl TaskExecutionHost {
    #[must_use]
    pub const fn new(registry: TaskFactoryRegistry) -> Self {
        Self { registry }
    }

    /// Runs one declared task instance against `scope`, harvesting its
    /// declared outputs back into `scope`.
    ///
    /// Returns the task's success bit (`Execute()`'s return value) on
    /// success; an `Err` models `Execute()` throwing, a missing factory
    /// registration, or a project-file binding error (§4.4, §7.1-2).
    ///
    /// # Errors
    ///
    /// See [`ProjectFileError`] and [`TaskError`] for the specific failure
    /// modes surfaced here.
    pub fn execute(&self, instance: &TaskInstance, scope: &mut EvaluationScope) -> ForgeResult<bool> {
        let Some(mut task) = self.registry.find(&instance.name)? else {
            return Err(TaskError::NotFound(instance.name.clone()).into());
        };

        let schema = task.schema();
        let outcome = bind_parameters(&instance.name, &schema, &instance.parameters, scope)?;
        task.set_parameters(outcome.values);

        let succeeded = task.execute()?;

        for output in &instance.outputs {
            if !schema.declares_output(&output.parameter_name) {
                return Err(ProjectFileError::UnknownOutputParameter {
                    task: instance.name.clone(),
                    parameter: output.parameter_name.clone(),
                }
                .into());
            }

            let Some(value) = task.output(&output.parameter_name) else {
                continue; // null: property is not overwritten, no items added
            };

            match &output.target {
                TaskOutputTarget::Property(name) => scope.set_property(name, value.stringify()),
                TaskOutputTarget::Item(name) => {
                    // An empty scalar string contributes no item (unlike the
                    // property branch, where an empty string still overwrites).
                    if !matches!(&value, ParameterValue::String(s) if s.is_empty()) {
                        for item in value.as_items() {
                            scope.add_item(name, item);
                        }
                    }
                }
            }
        }

        Ok(succeeded)
    }
}
