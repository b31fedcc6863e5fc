// forge-engine: parallel build graph engine core
//
// SPDX-FileCopyrightText: 2026 Forge Engine Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Declared project data: [`ProjectTarget`] and [`TaskInstance`] (§3).
//!
//! These are produced by the (out-of-scope) project evaluator and consumed
//! by the Target Builder and Task Execution Host. Nothing here parses a
//! project file; it is the in-memory shape the evaluator hands the core.

use std::collections::BTreeMap;

/// Where a raw parameter string or condition came from, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

/// How a task failure should be handled (§3, §4.5, §7.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContinueOnError {
    #[default]
    Never,
    WarnAndContinue,
    ErrorAndContinue,
}

impl ContinueOnError {
    /// Whether the target should keep running subsequent tasks after this
    /// task fails.
    #[must_use]
    pub const fn continues(self) -> bool {
        matches!(self, Self::WarnAndContinue | Self::ErrorAndContinue)
    }
}

/// Where a task output parameter's value should be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutputTarget {
    Property(String),
    Item(String),
}

/// One `(parameterName -> propertyName | itemName)` output binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskOutput {
    pub parameter_name: String,
    pub target: TaskOutputTarget,
}

/// A single declared task invocation within a target.
#[derive(Debug, Clone)]
pub struct TaskInstance {
    pub name: String,
    pub parameters: BTreeMap<String, (String, SourceLocation)>,
    pub continue_on_error: ContinueOnError,
    pub outputs: Vec<TaskOutput>,
}

impl TaskInstance {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: BTreeMap::new(),
            continue_on_error: ContinueOnError::Never,
            outputs: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, raw: impl Into<String>) -> Self {
        self.parameters
            .insert(name.into(), (raw.into(), SourceLocation::default()));
        self
    }

    #[must_use]
    pub const fn with_continue_on_error(mut self, policy: ContinueOnError) -> Self {
        self.continue_on_error = policy;
        self
    }

    #[must_use]
    pub fn with_output_property(mut self, parameter_name: impl Into<String>, property: impl Into<String>) -> Self {
        self.outputs.push(TaskOutput {
            parameter_name: parameter_name.into(),
            target: TaskOutputTarget::Property(property.into()),
        });
        self
    }

    #[must_use]
    pub fn with_output_item(mut self, parameter_name: impl Into<String>, item_name: impl Into<String>) -> Self {
        self.outputs.push(TaskOutput {
            parameter_name: parameter_name.into(),
            target: TaskOutputTarget::Item(item_name.into()),
        });
        self
    }
}

/// A single `OnError` handler: runs a list of targets when the owning
/// target's tasks fail in a non-continue way (§4.5).
#[derive(Debug, Clone, Default)]
pub struct OnErrorHandler {
    pub targets: Vec<String>,
    pub condition: Option<String>,
}

/// A named unit within a project: declared inputs/outputs, condition,
/// dependency/before/after relationships, and an ordered task list (§3).
#[derive(Debug, Clone)]
pub struct ProjectTarget {
    pub name: String,
    pub condition: Option<String>,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    pub depends_on: Vec<String>,
    pub before_targets: Vec<String>,
    pub after_targets: Vec<String>,
    pub tasks: Vec<TaskInstance>,
    pub on_error_handlers: Vec<OnErrorHandler>,
}

impl ProjectTarget {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            condition: None,
            inputs: Vec::new(),
            outputs: Vec::new(),
            depends_on: Vec::new(),
            before_targets: Vec::new(),
            after_targets: Vec::new(),
            tasks: Vec::new(),
            on_error_handlers: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    #[must_use]
    pub fn with_depends_on(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.depends_on.extend(names.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_before_targets(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.before_targets.extend(names.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_after_targets(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.after_targets.extend(names.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_inputs(mut self, inputs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.inputs.extend(inputs.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_outputs(mut self, outputs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.outputs.extend(outputs.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_task(mut self, task: TaskInstance) -> Self {
        self.tasks.push(task);
        self
    }

    #[must_use]
    pub fn with_on_error(mut self, targets: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.on_error_handlers.push(OnErrorHandler {
            targets: targets.into_iter().map(Into::into).collect(),
            condition: None,
        });
        self
    }

    /// Declared input/output up-to-date check is applicable when both are
    /// non-empty (§4.5's "inputs/outputs up-to-date check").
    #[must_use]
    pub fn declares_inputs_outputs(&self) -> bool {
        !self.inputs.is_empty() && !self.outputs.is_empty()
    }
}
