// forge-engine: parallel build graph engine core
//
// SPDX-FileCopyrightText: 2026 Forge Engine Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Hierarchical context ids threaded through every logged event.

/// Hierarchical context id carried by every [`super::EngineEvent`].
///
/// Mirrors `(submissionId, nodeId, projectInstanceId, projectContextId,
/// targetId, taskId)` from §6: each field is `None` until that level of
/// nesting is entered, and a child context always carries its parent's ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct EventContext {
    pub submission_id: Option<u32>,
    pub node_id: Option<u32>,
    pub project_instance_id: Option<u32>,
    pub project_context_id: Option<u32>,
    pub target_id: Option<u32>,
    pub task_id: Option<u32>,
}

impl EventContext {
    /// Root context for a submission, before any request/project has started.
    #[must_use]
    pub const fn for_submission(submission_id: u32) -> Self {
        Self {
            submission_id: Some(submission_id),
            node_id: None,
            project_instance_id: None,
            project_context_id: None,
            target_id: None,
            task_id: None,
        }
    }

    /// Derives a child context with the project instance id set.
    #[must_use]
    pub const fn with_project(mut self, project_instance_id: u32, project_context_id: u32) -> Self {
        self.project_instance_id = Some(project_instance_id);
        self.project_context_id = Some(project_context_id);
        self
    }

    /// Derives a child context with the target id set.
    #[must_use]
    pub const fn with_target(mut self, target_id: u32) -> Self {
        self.target_id = Some(target_id);
        self
    }

    /// Derives a child context with the task id set.
    #[must_use]
    pub const fn with_task(mut self, task_id: u32) -> Self {
        self.task_id = Some(task_id);
        self
    }
}
