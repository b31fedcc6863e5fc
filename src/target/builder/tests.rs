// forge-engine: parallel build graph engine core
//
// SPDX-FileCopyrightText: 2026 Forge Engine Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use std::sync::Arc;

use super::*;
use crate::core::target_def::{ContinueOnError, TaskInstance};
use crate::logging::TracingLoggerSink;
use crate::project::ProjectInstanceBuilder;
use crate::task_host::schema::{ParameterKind, ParameterSchema, TaskSchema};
use crate::task_host::task::Task;
use crate::task_host::value::ParameterValue;
use crate::task_host::{TaskExecutionHost, TaskFactoryRegistry};

struct RecordingTask {
    name: &'static str,
    log: Arc<std::sync::Mutex<Vec<&'static str>>>,
    succeeds: bool,
}

impl Task for RecordingTask {
    fn schema(&self) -> TaskSchema {
        TaskSchema::new()
    }
    fn set_parameters(&mut self, _values: std::collections::BTreeMap<String, ParameterValue>) {}
    fn execute(&mut self) -> ForgeResult<bool> {
        self.log.lock().unwrap().push(self.name);
        Ok(self.succeeds)
    }
    fn output(&self, _parameter: &str) -> Option<ParameterValue> {
        None
    }
}

struct ThrowingTask;

impl Task for ThrowingTask {
    fn schema(&self) -> TaskSchema {
        TaskSchema::new().with_parameter(ParameterSchema::new("Required", ParameterKind::String).required())
    }
    fn set_parameters(&mut self, _values: std::collections::BTreeMap<String, ParameterValue>) {}
    fn execute(&mut self) -> ForgeResult<bool> {
        Ok(true)
    }
    fn output(&self, _parameter: &str) -> Option<ParameterValue> {
        None
    }
}

fn host_recording(log: Arc<std::sync::Mutex<Vec<&'static str>>>) -> TaskExecutionHost {
    let mut registry = TaskFactoryRegistry::new();
    for (name, succeeds) in [("Ok", true), ("Boom", false)] {
        let log = Arc::clone(&log);
        registry.register(
            name,
            Arc::new(move || {
                Box::new(RecordingTask { name, log: Arc::clone(&log), succeeds }) as Box<dyn Task>
            }),
        );
    }
    registry.register("Throwing", Arc::new(|| Box::new(ThrowingTask) as Box<dyn Task>));
    TaskExecutionHost::new(registry)
}

fn task(name: &str) -> TaskInstance {
    TaskInstance::new(name)
}

#[test]
fn test_dependency_runs_before_dependent() {
    let log = Arc::new(std::sync::Mutex::new(Vec::new()));
    let project = ProjectInstanceBuilder::new("p")
        .with_target(ProjectTarget::new("A").with_depends_on(["B"]).with_task(task("Ok")))
        .with_target(ProjectTarget::new("B").with_task(task("Ok")))
        .build();
    let host = host_recording(Arc::clone(&log));
    let logger = TracingLoggerSink;
    let mut builder = TargetBuilder::new(&project, &host, &logger, EventContext::default());
    let result = builder.build(&["A".to_string()]).unwrap();
    assert!(result.is_success());
    assert_eq!(log.lock().unwrap().len(), 2);
}

#[test]
fn test_cycle_is_detected_and_reports_the_cycle() {
    let log = Arc::new(std::sync::Mutex::new(Vec::new()));
    let project = ProjectInstanceBuilder::new("p")
        .with_target(ProjectTarget::new("A").with_depends_on(["B"]))
        .with_target(ProjectTarget::new("B").with_depends_on(["A"]))
        .build();
    let host = host_recording(log);
    let logger = TracingLoggerSink;
    let mut builder = TargetBuilder::new(&project, &host, &logger, EventContext::default());
    let err = builder.build(&["A".to_string()]).unwrap_err();
    assert!(matches!(err, ForgeError::Cycle(_)));
}

#[test]
fn test_false_condition_skips_target() {
    let log = Arc::new(std::sync::Mutex::new(Vec::new()));
    let project = ProjectInstanceBuilder::new("p")
        .with_target(ProjectTarget::new("A").with_condition("false").with_task(task("Ok")))
        .build();
    let host = host_recording(Arc::clone(&log));
    let logger = TracingLoggerSink;
    let mut builder = TargetBuilder::new(&project, &host, &logger, EventContext::default());
    let result = builder.build(&["A".to_string()]).unwrap();
    assert_eq!(result.per_target_results["A"].code, TargetCode::Skipped);
    assert!(log.lock().unwrap().is_empty());
}

#[test]
fn test_before_target_runs_even_when_the_declaring_target_condition_is_false() {
    let log = Arc::new(std::sync::Mutex::new(Vec::new()));
    let project = ProjectInstanceBuilder::new("p")
        .with_target(ProjectTarget::new("Build").with_condition("false").with_task(task("Boom")))
        .with_target(ProjectTarget::new("Before").with_before_targets(["Build"]).with_task(task("Ok")))
        .build();
    let host = host_recording(Arc::clone(&log));
    let logger = TracingLoggerSink;
    let mut builder = TargetBuilder::new(&project, &host, &logger, EventContext::default());
    let result = builder.build(&["Build".to_string()]).unwrap();

    assert_eq!(result.per_target_results["Build"].code, TargetCode::Skipped);
    assert_eq!(*log.lock().unwrap(), vec!["Ok"]);
}

#[test]
fn test_failing_task_without_continue_on_error_aborts_remaining_tasks() {
    let log = Arc::new(std::sync::Mutex::new(Vec::new()));
    let project = ProjectInstanceBuilder::new("p")
        .with_target(ProjectTarget::new("A").with_task(task("Boom")).with_task(task("Ok")))
        .build();
    let host = host_recording(Arc::clone(&log));
    let logger = TracingLoggerSink;
    let mut builder = TargetBuilder::new(&project, &host, &logger, EventContext::default());
    let result = builder.build(&["A".to_string()]).unwrap();
    assert_eq!(result.per_target_results["A"].code, TargetCode::Failure);
    assert_eq!(*log.lock().unwrap(), vec!["Boom"]);
}

#[test]
fn test_warn_and_continue_runs_remaining_tasks_but_target_still_fails() {
    let log = Arc::new(std::sync::Mutex::new(Vec::new()));
    let project = ProjectInstanceBuilder::new("p")
        .with_target(
            ProjectTarget::new("A")
                .with_task(task("Boom").with_continue_on_error(ContinueOnError::WarnAndContinue))
                .with_task(task("Ok")),
        )
        .build();
    let host = host_recording(Arc::clone(&log));
    let logger = TracingLoggerSink;
    let mut builder = TargetBuilder::new(&project, &host, &logger, EventContext::default());
    let result = builder.build(&["A".to_string()]).unwrap();
    assert_eq!(result.per_target_results["A"].code, TargetCode::Failure);
    assert_eq!(*log.lock().unwrap(), vec!["Boom", "Ok"]);
}

#[test]
fn test_on_error_handler_runs_as_top_level_target() {
    let log = Arc::new(std::sync::Mutex::new(Vec::new()));
    let project = ProjectInstanceBuilder::new("p")
        .with_target(ProjectTarget::new("A").with_task(task("Boom")).with_on_error(["Cleanup"]))
        .with_target(ProjectTarget::new("Cleanup").with_task(task("Ok")))
        .build();
    let host = host_recording(Arc::clone(&log));
    let logger = TracingLoggerSink;
    let mut builder = TargetBuilder::new(&project, &host, &logger, EventContext::default());
    let result = builder.build(&["A".to_string()]).unwrap();
    assert_eq!(result.per_target_results["A"].code, TargetCode::Failure);
    assert_eq!(*log.lock().unwrap(), vec!["Boom", "Ok"]);
}

#[test]
fn test_after_target_failure_sets_bit_but_keeps_success() {
    let log = Arc::new(std::sync::Mutex::new(Vec::new()));
    let project = ProjectInstanceBuilder::new("p")
        .with_target(ProjectTarget::new("A").with_task(task("Ok")))
        .with_target(ProjectTarget::new("B").with_after_targets(["A"]).with_task(task("Boom")))
        .build();
    let host = host_recording(Arc::clone(&log));
    let logger = TracingLoggerSink;
    let mut builder = TargetBuilder::new(&project, &host, &logger, EventContext::default());
    let result = builder.build(&["A".to_string()]).unwrap();
    let a = &result.per_target_results["A"];
    assert_eq!(a.code, TargetCode::Success);
    assert!(a.after_targets_have_failed);
}

#[test]
fn test_skip_nonexistent_targets_flag_drops_missing_target_silently() {
    let log = Arc::new(std::sync::Mutex::new(Vec::new()));
    let project = ProjectInstanceBuilder::new("p").build();
    let host = host_recording(log);
    let logger = TracingLoggerSink;
    let mut builder = TargetBuilder::new(&project, &host, &logger, EventContext::default())
        .with_skip_nonexistent_targets(true);
    let result = builder.build(&["Ghost".to_string()]).unwrap();
    assert!(result.is_success());
    assert!(!result.per_target_results.contains_key("Ghost"));
}

#[test]
fn test_missing_target_without_skip_flag_is_an_error() {
    let log = Arc::new(std::sync::Mutex::new(Vec::new()));
    let project = ProjectInstanceBuilder::new("p").build();
    let host = host_recording(log);
    let logger = TracingLoggerSink;
    let mut builder = TargetBuilder::new(&project, &host, &logger, EventContext::default());
    assert!(builder.build(&["Ghost".to_string()]).is_err());
}

#[test]
fn test_project_file_error_is_fatal_even_under_continue_on_error() {
    let log = Arc::new(std::sync::Mutex::new(Vec::new()));
    let project = ProjectInstanceBuilder::new("p")
        .with_target(
            ProjectTarget::new("A")
                .with_task(task("Throwing").with_continue_on_error(ContinueOnError::WarnAndContinue)),
        )
        .build();
    let host = host_recording(log);
    let logger = TracingLoggerSink;
    let mut builder = TargetBuilder::new(&project, &host, &logger, EventContext::default());
    let err = builder.build(&["A".to_string()]).unwrap_err();
    assert!(matches!(err, ForgeError::ProjectFile(_)));
}

#[test]
fn test_up_to_date_target_runs_no_tasks_and_exposes_outputs_as_items() {
    let log = Arc::new(std::sync::Mutex::new(Vec::new()));
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.txt");
    std::fs::write(&input, b"x").unwrap();
    std::thread::sleep(std::time::Duration::from_millis(20));
    let output = dir.path().join("out.txt");
    std::fs::write(&output, b"x").unwrap();

    let project = ProjectInstanceBuilder::new("p")
        .with_target(
            ProjectTarget::new("A")
                .with_inputs([input.to_string_lossy().into_owned()])
                .with_outputs([output.to_string_lossy().into_owned()])
                .with_task(task("Ok")),
        )
        .build();
    let host = host_recording(Arc::clone(&log));
    let logger = TracingLoggerSink;
    let mut builder = TargetBuilder::new(&project, &host, &logger, EventContext::default());
    let result = builder.build(&["A".to_string()]).unwrap();
    let a = &result.per_target_results["A"];
    assert_eq!(a.code, TargetCode::Success);
    assert_eq!(a.items.len(), 1);
    assert!(log.lock().unwrap().is_empty());
}
