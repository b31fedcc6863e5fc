// forge-engine: parallel build graph engine core
//
// SPDX-FileCopyrightText: 2026 Forge Engine Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! [`TargetBuilder`]: the §4.5 traversal algorithm.

use std::collections::BTreeMap;

use tokio_util::sync::CancellationToken;

use crate::core::item::TaskItem;
use crate::core::request::{BuildResult, OverallResult, TargetCode, TargetResult};
use crate::core::scope::{EvaluationScope, split_semicolon_list};
use crate::core::target_def::ProjectTarget;
use crate::error::{CycleError, ForgeError, ForgeResult, bail_out};
use crate::logging::{EngineEvent, EventContext, LoggerSink};
use crate::project::ProjectInstance;
use crate::task_host::TaskExecutionHost;

use super::graph::{dependents_to_run_after, prerequisites};
use super::uptodate::is_up_to_date;

/// Walks a single project's target graph for one build request.
///
/// One `TargetBuilder` is scoped to a single request: the per-target
/// results it accumulates become the Results Cache entries the Build
/// Request Engine commits once the traversal completes.
pub struct TargetBuilder<'a> {
    project: &'a ProjectInstance,
    host: &'a TaskExecutionHost,
    logger: &'a dyn LoggerSink,
    event_context: EventContext,
    skip_nonexistent_targets: bool,
    cancellation: Option<CancellationToken>,
    scope: EvaluationScope,
    results: BTreeMap<String, TargetResult>,
    active: Vec<String>,
}

impl<'a> TargetBuilder<'a> {
    #[must_use]
    pub fn new(project: &'a ProjectInstance, host: &'a TaskExecutionHost, logger: &'a dyn LoggerSink, event_context: EventContext) -> Self {
        Self {
            project,
            host,
            logger,
            event_context,
            skip_nonexistent_targets: false,
            cancellation: None,
            scope: project.initial_scope(),
            results: BTreeMap::new(),
            active: Vec::new(),
        }
    }

    #[must_use]
    pub const fn with_skip_nonexistent_targets(mut self, skip: bool) -> Self {
        self.skip_nonexistent_targets = skip;
        self
    }

    /// Checked at every target boundary; a token already cancelled when
    /// reached aborts the remaining traversal (§5's cooperative cancellation).
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Every target visited so far, including dependencies, before/after
    /// triggers, and error handlers reached but never named in `requested`.
    /// The Build Request Engine commits this full set to the Results Cache,
    /// not just the subset `build` returns in its `BuildResult`.
    #[must_use]
    pub const fn results(&self) -> &BTreeMap<String, TargetResult> {
        &self.results
    }

    /// Runs every name in `requested`, in order, and returns a
    /// [`BuildResult`] mapping each requested target to its outcome.
    /// Targets reached transitively (dependencies, before/after-triggered,
    /// error handlers) are recorded in the results cache but only appear in
    /// the returned map if also named in `requested`.
    ///
    /// # Errors
    ///
    /// Propagates a [`CycleError`] on a dependency cycle, a project-file
    /// binding error, or any other fatal error a task raised.
    pub fn build(&mut self, requested: &[String]) -> ForgeResult<BuildResult> {
        for name in requested {
            self.visit(name)?;
        }

        let mut per_target = BTreeMap::new();
        let mut overall = OverallResult::Success;
        for name in requested {
            let Some(result) = self.results.get(name) else {
                continue; // skip_nonexistent_targets dropped it
            };
            if matches!(result.code, TargetCode::Failure) {
                overall = OverallResult::Failure;
            }
            per_target.insert(name.clone(), result.clone());
        }

        let mut build_result = BuildResult::new(0);
        build_result.per_target_results = per_target;
        build_result.overall_result = overall;
        Ok(build_result)
    }

    /// Ensures `name` has a recorded result, running it (and whatever it
    /// requires) if it doesn't already have one.
    fn visit(&mut self, name: &str) -> ForgeResult<()> {
        if self.results.contains_key(name) {
            return Ok(());
        }
        if self.cancellation.as_ref().is_some_and(CancellationToken::is_cancelled) {
            return Err(bail_out("build cancelled"));
        }
        if self.active.iter().any(|n| n == name) {
            let mut cycle = self.active.clone();
            cycle.push(name.to_string());
            return Err(CycleError { cycle }.into());
        }

        let Some(target) = self.project.target(name).cloned() else {
            if self.skip_nonexistent_targets {
                return Ok(());
            }
            return Err(bail_out(format!("target '{name}' does not exist in the project")));
        };

        self.active.push(name.to_string());
        let outcome = self.run_target(&target);
        self.active.pop();
        outcome
    }

    fn run_target(&mut self, target: &ProjectTarget) -> ForgeResult<()> {
        for dep in prerequisites(self.project, &target.name) {
            self.visit(&dep)?;
        }

        if !self.scope.evaluate_condition(target.condition.as_deref().unwrap_or("")) {
            self.results.insert(target.name.clone(), TargetResult::skipped());
            return Ok(());
        }

        let deps_ok = prerequisites(self.project, &target.name)
            .iter()
            .all(|dep| self.results.get(dep).is_none_or(|r| r.code.satisfies_dependents()));
        if !deps_ok {
            self.results.insert(target.name.clone(), TargetResult::failure());
            return Ok(());
        }

        if target.declares_inputs_outputs() && is_up_to_date(&self.scope, &target.inputs, &target.outputs) {
            let items = target
                .outputs
                .iter()
                .flat_map(|spec| split_semicolon_list(&self.scope.evaluate(spec)))
                .filter(|s| !s.is_empty())
                .map(TaskItem::from_spec)
                .collect();
            self.results.insert(target.name.clone(), TargetResult::success(items));
            self.run_after_targets(target)?;
            return Ok(());
        }

        self.logger.emit(&EngineEvent::TargetStarted {
            context: self.event_context,
            target_name: target.name.clone(),
        });

        let mut failed = false;
        for task in &target.tasks {
            self.logger.emit(&EngineEvent::TaskStarted {
                context: self.event_context,
                task_name: task.name.clone(),
            });
            let outcome = self.host.execute(task, &mut self.scope);
            let task_succeeded = match &outcome {
                Ok(succeeded) => *succeeded,
                Err(ForgeError::Task(_)) => false,
                Err(_) => {
                    // Project-file errors are unconditionally fatal, regardless of continueOnError.
                    return outcome.map(|_| ());
                }
            };
            self.logger.emit(&EngineEvent::TaskFinished {
                context: self.event_context,
                task_name: task.name.clone(),
                succeeded: task_succeeded,
            });

            if task_succeeded {
                continue;
            }

            failed = true;
            if task.continue_on_error.continues() {
                continue;
            }

            for handler in &target.on_error_handlers {
                let condition = handler.condition.as_deref().unwrap_or("");
                if !self.scope.evaluate_condition(condition) {
                    continue;
                }
                for handler_target in &handler.targets {
                    self.visit(handler_target)?;
                }
            }
            break;
        }

        self.logger.emit(&EngineEvent::TargetFinished {
            context: self.event_context,
            target_name: target.name.clone(),
            succeeded: !failed,
        });

        let code = if failed { TargetCode::Failure } else { TargetCode::Success };
        self.results.insert(target.name.clone(), TargetResult { code, items: Vec::new(), after_targets_have_failed: false });

        self.run_after_targets(target)?;
        Ok(())
    }

    fn run_after_targets(&mut self, target: &ProjectTarget) -> ForgeResult<()> {
        let mut after_failed = false;
        for after_name in dependents_to_run_after(self.project, &target.name) {
            self.visit(&after_name)?;
            if let Some(r) = self.results.get(&after_name)
                && (matches!(r.code, TargetCode::Failure) || r.after_targets_have_failed)
            {
                after_failed = true;
            }
        }
        if after_failed
            && let Some(r) = self.results.get_mut(&target.name)
            && matches!(r.code, TargetCode::Success)
        {
            r.after_targets_have_failed = true;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
