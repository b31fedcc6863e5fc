// forge-engine: parallel build graph engine core
//
// SPDX-FileCopyrightText: 2026 Forge Engine Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::BTreeMap;
use std::sync::Arc;

use super::*;
use crate::core::request::{BuildRequest, BuildRequestConfiguration};
use crate::core::target_def::{ProjectTarget, TaskInstance};
use crate::logging::{LoggerSink, TracingLoggerSink};
use crate::project::{FixedProjectEvaluator, ProjectInstanceBuilder};
use crate::task_host::task::Task;
use crate::task_host::schema::TaskSchema;
use crate::task_host::value::ParameterValue;
use crate::task_host::{TaskExecutionHost, TaskFactoryRegistry};

struct NoopTask;
impl Task for NoopTask {
    fn schema(&self) -> TaskSchema {
        TaskSchema::new()
    }
    fn set_parameters(&mut self, _values: BTreeMap<String, ParameterValue>) {}
    fn execute(&mut self) -> crate::error::ForgeResult<bool> {
        Ok(true)
    }
    fn output(&self, _parameter: &str) -> Option<ParameterValue> {
        None
    }
}

fn noop_host() -> Arc<TaskExecutionHost> {
    let mut registry = TaskFactoryRegistry::new();
    registry.register("Noop", Arc::new(|| Box::new(NoopTask) as Box<dyn Task>));
    Arc::new(TaskExecutionHost::new(registry))
}

/// Scenario 2 from the end-to-end list: a two-target dependency chain run
/// through the full engine, not just the Target Builder in isolation.
#[tokio::test]
async fn test_dependency_build_caches_both_targets_but_exposes_only_the_requested_one() {
    let project = ProjectInstanceBuilder::new("app.proj")
        .with_target(ProjectTarget::new("Baz").with_depends_on(["Bar"]).with_task(TaskInstance::new("Noop")))
        .with_target(ProjectTarget::new("Bar").with_task(TaskInstance::new("Noop")))
        .build();
    let evaluator = Arc::new(FixedProjectEvaluator::new().with_project(project));
    let logger: Arc<dyn LoggerSink> = Arc::new(TracingLoggerSink);
    let engine = BuildRequestEngine::new(evaluator, noop_host(), logger, crate::config::EngineSettings::default());

    let config_id = engine
        .config_cache()
        .add_or_get(BuildRequestConfiguration::new("app.proj", "current", BTreeMap::new()))
        .await;
    engine.initialize_for_build().await;

    let result = engine
        .submit_build_request(BuildRequest::new(1, 1, config_id, vec!["Baz".to_string()]))
        .await
        .unwrap();

    assert!(result.is_success());
    assert_eq!(result.per_target_results.len(), 1);
    assert!(result.per_target_results.contains_key("Baz"));

    let cached_bar = engine.results_cache().get(config_id, &["Bar".to_string()]).await.unwrap();
    assert!(cached_bar.is_success());
}

/// Scenario 3: a dependency cycle reported through the full engine reaches
/// the caller as a `Failure` result, not a hard `Err` — cycles are a build
/// outcome, not an engine-internal exception.
#[tokio::test]
async fn test_cycle_reports_failure_result_not_engine_exception() {
    let project = ProjectInstanceBuilder::new("app.proj")
        .with_target(ProjectTarget::new("Build").with_depends_on(["B"]))
        .with_target(ProjectTarget::new("B").with_depends_on(["C"]))
        .with_target(ProjectTarget::new("C").with_depends_on(["Build"]))
        .build();
    let evaluator = Arc::new(FixedProjectEvaluator::new().with_project(project));
    let logger: Arc<dyn LoggerSink> = Arc::new(TracingLoggerSink);
    let engine = BuildRequestEngine::new(evaluator, noop_host(), logger, crate::config::EngineSettings::default());

    let config_id = engine
        .config_cache()
        .add_or_get(BuildRequestConfiguration::new("app.proj", "current", BTreeMap::new()))
        .await;
    engine.initialize_for_build().await;

    let result = engine
        .submit_build_request(BuildRequest::new(1, 1, config_id, vec!["Build".to_string()]))
        .await
        .unwrap();

    assert!(!result.is_success());
    let exception = result.exception.expect("cycle failure carries its exception");
    assert!(exception.to_string().contains("cycle"));
    assert_eq!(engine.state().await, EngineState::Idle);
}
