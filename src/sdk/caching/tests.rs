// forge-engine: parallel build graph engine core
//
// SPDX-FileCopyrightText: 2026 Forge Engine Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::logging::{EventContext, TracingLoggerSink};
use crate::sdk::chain::DeploymentStyle;
use crate::sdk::types::{ResolverManifest, SdkReference, SdkResolver};

struct CountingResolver {
    calls: Arc<AtomicUsize>,
}
impl SdkResolver for CountingResolver {
    fn name(&self) -> &str {
        "counting"
    }
    fn resolve(&self, _sdk: &SdkReference, _ctx: &ResolverContext) -> Result<Option<SdkResult>, String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(std::time::Duration::from_millis(5));
        Ok(Some(SdkResult::success("p").with_version("1.0.0")))
    }
}

#[tokio::test]
async fn test_ten_concurrent_resolutions_invoke_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let chain = Arc::new(
        ChainSdkResolverService::new(DeploymentStyle::Framework)
            .register(ResolverManifest::general("counting"), Arc::new(CountingResolver { calls: calls.clone() })),
    );
    let service = Arc::new(CachingSdkResolverService::new(chain));

    let mut handles = Vec::new();
    for _ in 0..10 {
        let service = Arc::clone(&service);
        handles.push(tokio::spawn(async move {
            let request = SdkResolutionRequest::new(1, SdkReference::new("foo").with_referenced_version("1.0.0"));
            service
                .resolve(request, ResolverContext::default(), &TracingLoggerSink, EventContext::for_submission(1))
                .await
                .unwrap()
        }));
    }
    for handle in handles {
        assert!(handle.await.unwrap().is_success());
    }

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_second_request_different_version_reuses_cached_result() {
    let calls = Arc::new(AtomicUsize::new(0));
    let chain = Arc::new(
        ChainSdkResolverService::new(DeploymentStyle::Framework)
            .register(ResolverManifest::general("counting"), Arc::new(CountingResolver { calls: calls.clone() })),
    );
    let service = CachingSdkResolverService::new(chain);

    let first = SdkResolutionRequest::new(1, SdkReference::new("foo").with_referenced_version("1.0.0"));
    let result_a = service
        .resolve(first, ResolverContext::default(), &TracingLoggerSink, EventContext::for_submission(1))
        .await
        .unwrap();

    let second = SdkResolutionRequest::new(1, SdkReference::new("foo").with_referenced_version("2.0.0"));
    let result_b = service
        .resolve(second, ResolverContext::default(), &TracingLoggerSink, EventContext::for_submission(1))
        .await
        .unwrap();

    assert!(result_a.is_success());
    assert!(result_b.is_success());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
