// forge-engine: parallel build graph engine core
//
// SPDX-FileCopyrightText: 2026 Forge Engine Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::core::request::BuildRequestConfiguration;
use crate::core::target_def::TaskInstance;
use crate::logging::TracingLoggerSink;
use crate::project::{FixedProjectEvaluator, ProjectInstanceBuilder};
use crate::task_host::schema::TaskSchema;
use crate::task_host::task::Task;
use crate::task_host::value::ParameterValue;
use crate::task_host::TaskFactoryRegistry;
use crate::core::target_def::ProjectTarget;

struct CountingTask {
    calls: Arc<AtomicUsize>,
    succeeds: bool,
}

impl Task for CountingTask {
    fn schema(&self) -> TaskSchema {
        TaskSchema::new()
    }
    fn set_parameters(&mut self, _values: BTreeMap<String, ParameterValue>) {}
    fn execute(&mut self) -> ForgeResult<bool> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.succeeds)
    }
    fn output(&self, _parameter: &str) -> Option<ParameterValue> {
        None
    }
}

fn host_counting(calls: Arc<AtomicUsize>, succeeds: bool) -> Arc<TaskExecutionHost> {
    let mut registry = TaskFactoryRegistry::new();
    registry.register(
        "Count",
        Arc::new(move || Box::new(CountingTask { calls: Arc::clone(&calls), succeeds }) as Box<dyn Task>),
    );
    Arc::new(TaskExecutionHost::new(registry))
}

fn engine_with(calls: Arc<AtomicUsize>, succeeds: bool) -> (BuildRequestEngine, u32) {
    let project = ProjectInstanceBuilder::new("a.proj")
        .with_target(ProjectTarget::new("Build").with_task(TaskInstance::new("Count")))
        .build();
    let evaluator = Arc::new(FixedProjectEvaluator::new().with_project(project));
    let host = host_counting(calls, succeeds);
    let logger: Arc<dyn LoggerSink> = Arc::new(TracingLoggerSink);
    let engine = BuildRequestEngine::new(evaluator, host, logger, EngineSettings::default());
    (engine, 0)
}

async fn register_config(engine: &BuildRequestEngine) -> u32 {
    engine
        .config_cache()
        .add_or_get(BuildRequestConfiguration::new("a.proj", "current", BTreeMap::new()))
        .await
}

fn request(configuration_id: u32, targets: &[&str]) -> BuildRequest {
    BuildRequest::new(1, 1, configuration_id, targets.iter().map(|s| s.to_string()).collect())
}

#[tokio::test]
async fn test_submit_before_initialize_is_rejected() {
    let (engine, _) = engine_with(Arc::new(AtomicUsize::new(0)), true);
    let config_id = register_config(&engine).await;
    let err = engine.submit_build_request(request(config_id, &["Build"])).await.unwrap_err();
    assert!(err.to_string().contains("not accepting requests"));
}

#[tokio::test]
async fn test_submit_runs_target_and_commits_results_cache() {
    let calls = Arc::new(AtomicUsize::new(0));
    let (engine, _) = engine_with(Arc::clone(&calls), true);
    let config_id = register_config(&engine).await;
    engine.initialize_for_build().await;

    let result = engine.submit_build_request(request(config_id, &["Build"])).await.unwrap();
    assert!(result.is_success());
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let cached = engine.results_cache().get(config_id, &["Build".to_string()]).await;
    assert!(cached.is_some());
}

#[tokio::test]
async fn test_second_submit_hits_results_cache_without_rerunning_tasks() {
    let calls = Arc::new(AtomicUsize::new(0));
    let (engine, _) = engine_with(Arc::clone(&calls), true);
    let config_id = register_config(&engine).await;
    engine.initialize_for_build().await;

    engine.submit_build_request(request(config_id, &["Build"])).await.unwrap();
    engine.submit_build_request(request(config_id, &["Build"])).await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_unknown_configuration_id_errors_and_shuts_down_engine() {
    let (engine, _) = engine_with(Arc::new(AtomicUsize::new(0)), true);
    engine.initialize_for_build().await;

    let err = engine.submit_build_request(request(999, &["Build"])).await.unwrap_err();
    assert!(matches!(err, ForgeError::Engine(_)));
    assert_eq!(engine.state().await, EngineState::Shutdown);
}

#[tokio::test]
async fn test_state_goes_idle_after_request_completes() {
    let (engine, _) = engine_with(Arc::new(AtomicUsize::new(0)), true);
    let config_id = register_config(&engine).await;
    engine.initialize_for_build().await;

    engine.submit_build_request(request(config_id, &["Build"])).await.unwrap();
    assert_eq!(engine.state().await, EngineState::Idle);
}

#[tokio::test]
async fn test_cleanup_for_build_resets_to_uninitialized() {
    let (engine, _) = engine_with(Arc::new(AtomicUsize::new(0)), true);
    engine.initialize_for_build().await;
    assert_eq!(engine.state().await, EngineState::Active);

    engine.cleanup_for_build().await;
    assert_eq!(engine.state().await, EngineState::Uninitialized);
}

#[tokio::test]
async fn test_cancel_current_build_aborts_a_pending_request_with_failure_result() {
    let (engine, _) = engine_with(Arc::new(AtomicUsize::new(0)), true);
    let config_id = register_config(&engine).await;
    engine.initialize_for_build().await;
    engine.cancel_current_build().await;

    let result = engine.submit_build_request(request(config_id, &["Build"])).await.unwrap();
    assert!(!result.is_success());
    assert!(result.exception.is_some());
}

#[tokio::test]
async fn test_initialize_for_build_installs_a_fresh_token_after_a_prior_cancel() {
    let calls = Arc::new(AtomicUsize::new(0));
    let (engine, _) = engine_with(Arc::clone(&calls), true);
    let config_id = register_config(&engine).await;

    engine.initialize_for_build().await;
    engine.cancel_current_build().await;
    engine.cleanup_for_build().await;

    engine.initialize_for_build().await;
    let result = engine.submit_build_request(request(config_id, &["Build"])).await.unwrap();
    assert!(result.is_success());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_failed_task_produces_failure_result_and_stays_active() {
    let (engine, _) = engine_with(Arc::new(AtomicUsize::new(0)), false);
    let config_id = register_config(&engine).await;
    engine.initialize_for_build().await;

    let result = engine.submit_build_request(request(config_id, &["Build"])).await.unwrap();
    assert!(!result.is_success());
    assert_eq!(engine.state().await, EngineState::Idle);
}

#[tokio::test]
async fn test_request_complete_observer_fires() {
    let (engine, _) = engine_with(Arc::new(AtomicUsize::new(0)), true);
    let config_id = register_config(&engine).await;
    engine.initialize_for_build().await;

    let fired = Arc::new(AtomicUsize::new(0));
    let fired_clone = Arc::clone(&fired);
    engine
        .observers()
        .on_request_complete(Arc::new(move |_req, _result| {
            fired_clone.fetch_add(1, Ordering::SeqCst);
        }))
        .await;

    engine.submit_build_request(request(config_id, &["Build"])).await.unwrap();
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_resolve_sdk_without_resolver_configured_errors() {
    let (engine, _) = engine_with(Arc::new(AtomicUsize::new(0)), true);
    let request = SdkResolutionRequest::new(0, crate::sdk::SdkReference::new("Custom.Sdk"));
    let err = engine
        .resolve_sdk(request, ResolverContext::default(), crate::logging::EventContext::default())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("no sdk resolver"));
}
