// forge-engine: parallel build graph engine core
//
// SPDX-FileCopyrightText: 2026 Forge Engine Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! `CachingSdkResolverService`: at-most-once execution per SDK name per
//! build (§4.3, P5).
//!
//! Uses a `tokio::sync::OnceCell` per SDK name rather than a coarse lock:
//! the first caller runs the chain and every concurrent caller for the
//! same name awaits the same future instead of queueing behind a mutex
//! that would serialize unrelated SDK names too.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OnceCell};

use crate::error::{ForgeError, ForgeResult, codes};
use crate::logging::{EngineEvent, EventContext, LoggerSink};

use super::chain::ChainSdkResolverService;
use super::types::{ResolverContext, SdkResolutionRequest, SdkResult, same_version};

struct CacheEntry {
    result: SdkResult,
    requested_version: Option<String>,
}

/// Wraps a [`ChainSdkResolverService`] with at-most-once-per-name caching
/// for the lifetime of one build.
pub struct CachingSdkResolverService {
    inner: Arc<ChainSdkResolverService>,
    cells: Mutex<HashMap<String, Arc<OnceCell<CacheEntry>>>>,
}

impl CachingSdkResolverService {
    #[must_use]
    pub fn new(inner: Arc<ChainSdkResolverService>) -> Self {
        Self {
            inner,
            cells: Mutex::new(HashMap::new()),
        }
    }

    /// Resolves `request.sdk`, invoking the underlying chain at most once
    /// per SDK name for this service's lifetime.
    ///
    /// # Errors
    ///
    /// Propagates the underlying chain's resolver-exception and
    /// `failOnUnresolvedSdk` errors.
    pub async fn resolve(
        &self,
        request: SdkResolutionRequest,
        context: ResolverContext,
        logger: &dyn LoggerSink,
        event_context: EventContext,
    ) -> ForgeResult<SdkResult> {
        let cell = {
            let mut cells = self.cells.lock().await;
            cells
                .entry(request.sdk.name.clone())
                .or_insert_with(|| Arc::new(OnceCell::new()))
                .clone()
        };

        let caller_version = request.sdk.referenced_version.clone();
        let inner = Arc::clone(&self.inner);
        let entry = cell
            .get_or_try_init(|| async move {
                let requested_version = request.sdk.referenced_version.clone();
                let (result, _state) = inner.resolve(&request, &context, logger, event_context)?;
                Ok::<CacheEntry, ForgeError>(CacheEntry {
                    result,
                    requested_version,
                })
            })
            .await?;

        if entry.result.is_success()
            && !same_version(caller_version.as_deref(), entry.requested_version.as_deref())
        {
            logger.emit(&EngineEvent::Warning {
                context: event_context,
                code: Some(codes::SDK_MULTIPLE_VERSIONS),
                text: format!(
                    "multiple versions referenced for sdk resolved previously with version {:?}; this request asked for {:?}",
                    entry.requested_version, caller_version
                ),
            });
        }

        Ok(entry.result.clone())
    }
}

#[cfg(test)]
mod tests;
