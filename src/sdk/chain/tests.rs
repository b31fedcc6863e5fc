// forge-engine: parallel build graph engine core
//
// SPDX-FileCopyrightText: 2026 Forge Engine Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::*;
use crate::logging::{EventContext, TracingLoggerSink};
use crate::sdk::types::{ResolverContext, SdkReference, SdkResolutionRequest};

struct NullResolver;
impl SdkResolver for NullResolver {
    fn name(&self) -> &str {
        "null-resolver"
    }
    fn resolve(&self, _sdk: &SdkReference, _ctx: &ResolverContext) -> Result<Option<SdkResult>, String> {
        Ok(None)
    }
}

struct SucceedingResolver {
    calls: Arc<AtomicUsize>,
}
impl SdkResolver for SucceedingResolver {
    fn name(&self) -> &str {
        "succeeding-resolver"
    }
    fn resolve(&self, _sdk: &SdkReference, _ctx: &ResolverContext) -> Result<Option<SdkResult>, String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Some(SdkResult::success("p").with_version("2.0.0")))
    }
}

struct FailingResolver;
impl SdkResolver for FailingResolver {
    fn name(&self) -> &str {
        "failing-resolver"
    }
    fn resolve(&self, _sdk: &SdkReference, _ctx: &ResolverContext) -> Result<Option<SdkResult>, String> {
        Ok(Some(SdkResult::Failure {
            errors: vec!["not found".to_string()],
            warnings: vec![],
        }))
    }
}

struct ThrowingResolver;
impl SdkResolver for ThrowingResolver {
    fn name(&self) -> &str {
        "throwing-resolver"
    }
    fn resolve(&self, _sdk: &SdkReference, _ctx: &ResolverContext) -> Result<Option<SdkResult>, String> {
        Err("boom".to_string())
    }
}

#[test]
fn test_null_then_success_invokes_second_exactly_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let chain = ChainSdkResolverService::new(DeploymentStyle::Framework)
        .register(ResolverManifest::general("first"), Arc::new(NullResolver))
        .register(
            ResolverManifest::general("second"),
            Arc::new(SucceedingResolver { calls: calls.clone() }),
        );

    let request = SdkResolutionRequest::new(1, SdkReference::new("foo").with_referenced_version("1.0.0"));
    let (result, _state) = chain
        .resolve(
            &request,
            &ResolverContext::default(),
            &TracingLoggerSink,
            EventContext::for_submission(1),
        )
        .unwrap();

    assert!(result.is_success());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_single_resolver_failure_shape() {
    let chain = ChainSdkResolverService::new(DeploymentStyle::Framework)
        .register(ResolverManifest::general("only"), Arc::new(FailingResolver));
    let request = SdkResolutionRequest::new(1, SdkReference::new("foo"));
    let (result, _) = chain
        .resolve(&request, &ResolverContext::default(), &TracingLoggerSink, EventContext::for_submission(1))
        .unwrap();
    assert!(!result.is_success());
}

#[test]
fn test_fail_on_unresolved_is_fatal() {
    let chain = ChainSdkResolverService::new(DeploymentStyle::Framework)
        .register(ResolverManifest::general("only"), Arc::new(FailingResolver));
    let mut request = SdkResolutionRequest::new(1, SdkReference::new("foo"));
    request.fail_on_unresolved = true;
    let outcome = chain.resolve(&request, &ResolverContext::default(), &TracingLoggerSink, EventContext::for_submission(1));
    assert!(outcome.is_err());
}

#[test]
fn test_resolver_exception_aborts() {
    let chain = ChainSdkResolverService::new(DeploymentStyle::Framework)
        .register(ResolverManifest::general("throws"), Arc::new(ThrowingResolver))
        .register(ResolverManifest::general("never-reached"), Arc::new(FailingResolver));
    let request = SdkResolutionRequest::new(1, SdkReference::new("foo"));
    let outcome = chain.resolve(&request, &ResolverContext::default(), &TracingLoggerSink, EventContext::for_submission(1));
    assert!(outcome.is_err());
}

#[test]
fn test_core_style_skips_regular_chain_when_default_succeeds() {
    let calls = Arc::new(AtomicUsize::new(0));
    let regular_calls = Arc::new(AtomicUsize::new(0));
    struct CountingFailure(Arc<AtomicUsize>);
    impl SdkResolver for CountingFailure {
        fn name(&self) -> &str {
            "regular"
        }
        fn resolve(&self, _sdk: &SdkReference, _ctx: &ResolverContext) -> Result<Option<SdkResult>, String> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(None)
        }
    }

    let chain = ChainSdkResolverService::new(DeploymentStyle::Core)
        .register(ResolverManifest::general("regular"), Arc::new(CountingFailure(regular_calls.clone())))
        .register_default(
            ResolverManifest::general("default"),
            Arc::new(SucceedingResolver { calls: calls.clone() }),
        );

    let request = SdkResolutionRequest::new(1, SdkReference::new("foo"));
    let (result, _) = chain
        .resolve(&request, &ResolverContext::default(), &TracingLoggerSink, EventContext::for_submission(1))
        .unwrap();

    assert!(result.is_success());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(regular_calls.load(Ordering::SeqCst), 0);
}
