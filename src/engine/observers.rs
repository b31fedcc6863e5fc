// forge-engine: parallel build graph engine core
//
// SPDX-FileCopyrightText: 2026 Forge Engine Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Typed observer registry (§4.6, §6): callers subscribe closures rather
//! than polling state. Dispatch clones the subscriber list out from under
//! the lock before invoking anything, so an observer that calls back into
//! the engine (e.g. to submit another request) never deadlocks on its own
//! notification.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::core::request::{BuildRequest, BuildResult};
use crate::error::ForgeError;

use super::EngineState;

pub type RequestCompleteObserver = Arc<dyn Fn(&BuildRequest, &BuildResult) + Send + Sync>;
pub type StatusChangedObserver = Arc<dyn Fn(EngineState) + Send + Sync>;
pub type EngineExceptionObserver = Arc<dyn Fn(&ForgeError) + Send + Sync>;

#[derive(Default)]
pub struct Observers {
    request_complete: Mutex<Vec<RequestCompleteObserver>>,
    status_changed: Mutex<Vec<StatusChangedObserver>>,
    engine_exception: Mutex<Vec<EngineExceptionObserver>>,
}

impl Observers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn on_request_complete(&self, callback: RequestCompleteObserver) {
        self.request_complete.lock().await.push(callback);
    }

    pub async fn on_status_changed(&self, callback: StatusChangedObserver) {
        self.status_changed.lock().await.push(callback);
    }

    pub async fn on_engine_exception(&self, callback: EngineExceptionObserver) {
        self.engine_exception.lock().await.push(callback);
    }

    pub(super) async fn notify_request_complete(&self, request: &BuildRequest, result: &BuildResult) {
        let subscribers = self.request_complete.lock().await.clone();
        for observer in subscribers {
            observer(request, result);
        }
    }

    pub(super) async fn notify_status_changed(&self, state: EngineState) {
        let subscribers = self.status_changed.lock().await.clone();
        for observer in subscribers {
            observer(state);
        }
    }

    pub(super) async fn notify_engine_exception(&self, error: &ForgeError) {
        let subscribers = self.engine_exception.lock().await.clone();
        for observer in subscribers {
            observer(error);
        }
    }
}

#[cfg(test)]
mod tests;
