// forge-engine: parallel build graph engine core
//
// SPDX-FileCopyrightText: 2026 Forge Engine Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Request/result data model (§3): [`BuildRequest`], [`BuildRequestConfiguration`],
//! [`BuildResult`], [`TargetResult`].

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::core::item::TaskItem;
use crate::error::ForgeError;
use crate::logging::EventContext;
use crate::project::ProjectInstance;

/// Identity of a registered build configuration. `0` means "unresolved"
/// (assigned locally by a node, pending the authoritative id).
pub type ConfigurationId = u32;

/// Identity of one submission-level demand.
pub type SubmissionId = u32;

/// Global request id, unique across an engine instance's lifetime.
pub type GlobalRequestId = u64;

/// Flags carried by a [`BuildRequest`] (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BuildRequestFlags {
    /// When set, a requested target name absent from the project is
    /// silently dropped rather than treated as an error (§4.5).
    pub skip_nonexistent_targets: bool,
}

/// A demand to run a specific target list against a specific configuration.
#[derive(Debug, Clone)]
pub struct BuildRequest {
    pub submission_id: SubmissionId,
    pub node_request_id: u64,
    pub global_request_id: GlobalRequestId,
    pub configuration_id: ConfigurationId,
    pub targets: Vec<String>,
    pub parent_context: Option<EventContext>,
    pub flags: BuildRequestFlags,
}

impl BuildRequest {
    #[must_use]
    pub fn new(
        submission_id: SubmissionId,
        global_request_id: GlobalRequestId,
        configuration_id: ConfigurationId,
        targets: Vec<String>,
    ) -> Self {
        Self {
            submission_id,
            node_request_id: global_request_id,
            global_request_id,
            configuration_id,
            targets,
            parent_context: None,
            flags: BuildRequestFlags::default(),
        }
    }

    #[must_use]
    pub const fn with_flags(mut self, flags: BuildRequestFlags) -> Self {
        self.flags = flags;
        self
    }

    #[must_use]
    pub const fn with_parent_context(mut self, context: EventContext) -> Self {
        self.parent_context = Some(context);
        self
    }
}

/// A normalized `(projectPath, toolsVersion, globalProperties)` identity
/// under which a project is built, plus the lazily-attached evaluated
/// project (§3, §4.1).
#[derive(Debug, Clone)]
pub struct BuildRequestConfiguration {
    pub configuration_id: ConfigurationId,
    pub project_path: String,
    pub tools_version: String,
    pub global_properties: BTreeMap<String, String>,
    /// `true` when this id was assigned locally by a node pending
    /// confirmation from a central authority (§4.1).
    pub was_generated_by_node: bool,
    pub project: Option<Arc<ProjectInstance>>,
}

impl BuildRequestConfiguration {
    #[must_use]
    pub fn new(
        project_path: impl Into<String>,
        tools_version: impl Into<String>,
        global_properties: BTreeMap<String, String>,
    ) -> Self {
        Self {
            configuration_id: 0,
            project_path: project_path.into(),
            tools_version: tools_version.into(),
            global_properties,
            was_generated_by_node: false,
            project: None,
        }
    }

    /// The `(path, toolsVersion, sorted globalProperties)` identity used by
    /// the Config Cache: path comparison is case-insensitive, everything
    /// else exact (§4.1).
    #[must_use]
    pub fn identity_key(&self) -> (String, String, Vec<(String, String)>) {
        (
            self.project_path.to_ascii_lowercase(),
            self.tools_version.clone(),
            self.global_properties
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }
}

/// Outcome of running a build request's tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverallResult {
    Success,
    Failure,
}

/// A request's completed outcome: all requested targets' results, plus the
/// overall success/failure verdict (§3).
#[derive(Debug, Clone)]
pub struct BuildResult {
    pub request_id: GlobalRequestId,
    pub per_target_results: BTreeMap<String, TargetResult>,
    pub overall_result: OverallResult,
    pub exception: Option<Arc<ForgeError>>,
}

impl BuildResult {
    #[must_use]
    pub fn new(request_id: GlobalRequestId) -> Self {
        Self {
            request_id,
            per_target_results: BTreeMap::new(),
            overall_result: OverallResult::Success,
            exception: None,
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.overall_result == OverallResult::Success
    }
}

/// A target's completion state (§4.5's per-target state machine's terminal
/// states; only `Completed*` may be read back from the Results Cache).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetCode {
    Success,
    Failure,
    Skipped,
}

impl TargetCode {
    /// Whether this code satisfies a dependent's requirement to proceed
    /// (`Skipped` counts as success for dependent satisfaction, §4.5).
    #[must_use]
    pub const fn satisfies_dependents(self) -> bool {
        !matches!(self, Self::Failure)
    }
}

/// A single target's recorded outcome (§3).
#[derive(Debug, Clone)]
pub struct TargetResult {
    pub code: TargetCode,
    pub items: Vec<TaskItem>,
    /// Set when this target's own tasks succeeded but at least one
    /// after-target (transitively) failed (§4.5, P4).
    pub after_targets_have_failed: bool,
}

impl TargetResult {
    #[must_use]
    pub const fn success(items: Vec<TaskItem>) -> Self {
        Self {
            code: TargetCode::Success,
            items,
            after_targets_have_failed: false,
        }
    }

    #[must_use]
    pub const fn failure() -> Self {
        Self {
            code: TargetCode::Failure,
            items: Vec::new(),
            after_targets_have_failed: false,
        }
    }

    #[must_use]
    pub const fn skipped() -> Self {
        Self {
            code: TargetCode::Skipped,
            items: Vec::new(),
            after_targets_have_failed: false,
        }
    }
}

#[cfg(test)]
mod tests;
