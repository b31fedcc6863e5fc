// forge-engine: parallel build graph engine core
//
// SPDX-FileCopyrightText: 2026 Forge Engine Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! [`BuildRequestEngine`]: the §4.6 state machine tying the Config Cache,
//! Results Cache, and Target Builder together behind `submit_build_request`.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::config::EngineSettings;
use crate::core::request::{BuildRequest, BuildRequestConfiguration, BuildResult, OverallResult};
use crate::error::{EngineError, ForgeError, ForgeResult, bail_out};
use crate::logging::LoggerSink;
use crate::project::ProjectEvaluator;
use crate::sdk::CachingSdkResolverService;
use crate::sdk::{ResolverContext, SdkResolutionRequest, SdkResult};
use crate::target::TargetBuilder;
use crate::task_host::TaskExecutionHost;

use super::{ConfigCache, EngineState, Observers, ResultsCache};

/// Behavior shared by every part of this module: the stateful façade a host
/// submits [`BuildRequest`]s to.
///
/// A build request's configuration carries an (external) project evaluator
/// out of scope for this core (§1): [`BuildRequestEngine`] is generic over
/// it via [`ProjectEvaluator`] so tests and the demo front end can supply a
/// fixed-function in-memory one.
pub struct BuildRequestEngine {
    state: Mutex<EngineState>,
    config_cache: Arc<ConfigCache>,
    results_cache: Arc<ResultsCache>,
    evaluator: Arc<dyn ProjectEvaluator>,
    task_host: Arc<TaskExecutionHost>,
    logger: Arc<dyn LoggerSink>,
    sdk_resolver: Option<Arc<CachingSdkResolverService>>,
    settings: EngineSettings,
    /// A fresh token per `initialize_for_build` call: `CancellationToken` is
    /// one-shot, so a new build needs a new one rather than reusing an
    /// already-cancelled token from a prior `cleanup_for_build`.
    cancellation: Mutex<CancellationToken>,
    observers: Observers,
    in_flight: AtomicUsize,
}

impl BuildRequestEngine {
    #[must_use]
    pub fn new(
        evaluator: Arc<dyn ProjectEvaluator>,
        task_host: Arc<TaskExecutionHost>,
        logger: Arc<dyn LoggerSink>,
        settings: EngineSettings,
    ) -> Self {
        Self {
            state: Mutex::new(EngineState::Uninitialized),
            config_cache: Arc::new(ConfigCache::new()),
            results_cache: Arc::new(ResultsCache::new()),
            evaluator,
            task_host,
            logger,
            sdk_resolver: None,
            settings,
            cancellation: Mutex::new(CancellationToken::new()),
            observers: Observers::new(),
            in_flight: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub fn with_sdk_resolver(mut self, resolver: Arc<CachingSdkResolverService>) -> Self {
        self.sdk_resolver = Some(resolver);
        self
    }

    #[must_use]
    pub fn config_cache(&self) -> &ConfigCache {
        &self.config_cache
    }

    #[must_use]
    pub fn results_cache(&self) -> &ResultsCache {
        &self.results_cache
    }

    #[must_use]
    pub fn observers(&self) -> &Observers {
        &self.observers
    }

    pub async fn state(&self) -> EngineState {
        *self.state.lock().await
    }

    async fn set_state(&self, state: EngineState) {
        *self.state.lock().await = state;
        self.observers.notify_status_changed(state).await;
    }

    /// Transitions `Uninitialized -> Active`, installing a fresh
    /// cancellation token so a prior build's `cleanup_for_build` doesn't
    /// leak into this one.
    pub async fn initialize_for_build(&self) {
        *self.cancellation.lock().await = CancellationToken::new();
        self.set_state(EngineState::Active).await;
    }

    /// Cancels any in-flight request and returns the engine to
    /// `Uninitialized` from any state (§4.6).
    pub async fn cleanup_for_build(&self) {
        self.cancellation.lock().await.cancel();
        self.in_flight.store(0, Ordering::SeqCst);
        self.set_state(EngineState::Uninitialized).await;
    }

    /// Cancels the current build's in-flight requests without tearing down
    /// engine state (unlike `cleanup_for_build`, which also resets to
    /// `Uninitialized`). Lets a host wire a Ctrl+C handler straight to
    /// cooperative cancellation.
    pub async fn cancel_current_build(&self) {
        self.cancellation.lock().await.cancel();
    }

    /// Resolves an SDK reference through the configured resolver service.
    ///
    /// # Errors
    ///
    /// Returns an error if no resolver service was configured, or
    /// propagates the underlying resolution failure.
    pub async fn resolve_sdk(
        &self,
        request: SdkResolutionRequest,
        context: ResolverContext,
        event_context: crate::logging::EventContext,
    ) -> ForgeResult<SdkResult> {
        let Some(resolver) = &self.sdk_resolver else {
            return Err(bail_out("no sdk resolver service configured on this engine"));
        };
        resolver.resolve(request, context, self.logger.as_ref(), event_context).await
    }

    /// Registers (and evaluates, if needed) `config`, runs `request.targets`
    /// against it, and commits the outcome to the Results Cache.
    ///
    /// Results Cache hits short-circuit entirely: the Target Builder never
    /// runs for a request whose targets are already fully covered.
    ///
    /// # Errors
    ///
    /// Returns `Err(ForgeError::Engine(_))` for an unknown configuration id
    /// or an internal invariant violation; these transition the engine to
    /// `Shutdown`. Ordinary build failures (cycles, task errors, project-file
    /// errors, cancellation) are reported as a `Failure` [`BuildResult`]
    /// instead, leaving the engine usable for further requests.
    pub async fn submit_build_request(&self, request: BuildRequest) -> ForgeResult<BuildResult> {
        let current = *self.state.lock().await;
        if matches!(current, EngineState::Uninitialized | EngineState::Shutdown) {
            return Err(bail_out(format!("engine is not accepting requests in state {current:?}")));
        }

        if let Some(cached) = self.results_cache.get(request.configuration_id, &request.targets).await {
            self.observers.notify_request_complete(&request, &cached).await;
            return Ok(cached);
        }

        let Some(config) = self.config_cache.resolve(request.configuration_id).await else {
            let err: ForgeError = EngineError::UnknownConfiguration(request.configuration_id).into();
            self.set_state(EngineState::Shutdown).await;
            self.observers.notify_engine_exception(&err).await;
            return Err(err);
        };

        self.in_flight.fetch_add(1, Ordering::SeqCst);
        self.set_state(EngineState::Waiting).await;

        let result = self.run_request(&config, &request).await;

        let remaining = self.in_flight.fetch_sub(1, Ordering::SeqCst) - 1;
        let (result, all_results) = match result {
            Ok((mut built, all_results)) => {
                built.request_id = request.global_request_id;
                (built, all_results)
            }
            Err(err) => {
                self.set_state(EngineState::Shutdown).await;
                self.observers.notify_engine_exception(&err).await;
                return Err(err);
            }
        };

        self.results_cache.put(request.configuration_id, all_results).await;
        self.set_state(if remaining == 0 { EngineState::Idle } else { EngineState::Active }).await;
        self.observers.notify_request_complete(&request, &result).await;
        Ok(result)
    }

    /// Evaluates the project (if not already attached) and runs the Target
    /// Builder on a blocking thread, racing it against cancellation with a
    /// shutdown budget. A cancelled or budget-exceeded run reports a
    /// `Failure` result carrying an aborted-exception marker (§5) rather
    /// than propagating `Err`; `Err` here means the blocking task itself
    /// panicked, which is an engine-internal exception.
    async fn run_request(
        &self,
        config: &BuildRequestConfiguration,
        request: &BuildRequest,
    ) -> ForgeResult<(BuildResult, std::collections::BTreeMap<String, crate::core::request::TargetResult>)> {
        let project = match &config.project {
            Some(project) => Arc::clone(project),
            None => {
                let project = self
                    .evaluator
                    .create_project_instance(config)
                    .map_err(|e| bail_out(e.to_string()))?;
                self.config_cache.attach_project(request.configuration_id, Arc::clone(&project)).await;
                project
            }
        };

        let task_host = Arc::clone(&self.task_host);
        let logger = Arc::clone(&self.logger);
        let skip_nonexistent = request.flags.skip_nonexistent_targets;
        let targets = request.targets.clone();
        let event_context = request.parent_context.unwrap_or_default();
        let cancellation = self.cancellation.lock().await.clone();
        let cancellation_for_builder = cancellation.clone();
        let global_request_id = request.global_request_id;

        let mut handle = tokio::task::spawn_blocking(move || {
            let mut builder = TargetBuilder::new(&project, &task_host, logger.as_ref(), event_context)
                .with_skip_nonexistent_targets(skip_nonexistent)
                .with_cancellation(cancellation_for_builder);
            let outcome = builder.build(&targets);
            (outcome, builder.results().clone())
        });

        let budget = Duration::from_millis(self.settings.builder_shutdown_budget_ms);
        let join_result = tokio::select! {
            biased;
            res = &mut handle => res,
            () = cancellation.cancelled() => {
                match tokio::time::timeout(budget, &mut handle).await {
                    Ok(res) => res,
                    Err(_elapsed) => {
                        handle.abort();
                        return Ok((
                            aborted_result(global_request_id, "target builder did not observe cancellation within the shutdown budget"),
                            std::collections::BTreeMap::new(),
                        ));
                    }
                }
            }
        };

        let (outcome, all_results) = match join_result {
            Ok(pair) => pair,
            Err(join_err) => return Err(EngineError::Internal(format!("target builder task panicked: {join_err}")).into()),
        };

        Ok(match outcome {
            Ok(result) => (result, all_results),
            Err(e) => (aborted_result(global_request_id, &e.to_string()), all_results),
        })
    }
}

fn aborted_result(request_id: crate::core::request::GlobalRequestId, message: &str) -> BuildResult {
    let mut result = BuildResult::new(request_id);
    result.overall_result = OverallResult::Failure;
    result.exception = Some(Arc::new(bail_out(message.to_string())));
    result
}

#[cfg(test)]
mod tests;
