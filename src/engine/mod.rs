// forge-engine: parallel build graph engine core
//
// SPDX-FileCopyrightText: 2026 Forge Engine Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Build Request Engine (§4.6): the stateful façade in front of the Config
//! Cache, Results Cache, and Target Builder.
//!
//! ```text
//!  submit_build_request(BuildRequest)
//!        |
//!        v  Results Cache hit? -> return cached BuildResult, no rebuild
//!        |
//!        v  resolve configuration, evaluate project if not yet attached
//!        |
//!        v  run the Target Builder on a blocking thread, cooperatively
//!        |  cancellable; a worker stuck past the shutdown budget is
//!        |  escalated rather than awaited forever
//!        v
//!  Results Cache committed, onRequestComplete fired
//!
//!  Uninitialized --initialize_for_build--> Active --submit--> Waiting
//!       ^                                    |  ^               |
//!       |                                    |  +---no in-flight+
//!       +------------cleanup_for_build-------+---Idle<----------+
//!                        (any state)         |
//!                                             v
//!                                          Shutdown (engine-internal
//!                                          exception; requires a fresh
//!                                          engine to recover)
//! ```

pub mod config_cache;
pub mod observers;
pub mod request_engine;
pub mod results_cache;

pub use config_cache::ConfigCache;
pub use observers::{EngineExceptionObserver, Observers, RequestCompleteObserver, StatusChangedObserver};
pub use request_engine::BuildRequestEngine;
pub use results_cache::ResultsCache;

/// The engine's lifecycle state (§4.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No build in progress; `submit_build_request` is rejected.
    Uninitialized,
    /// A build is in progress with at least one request in flight.
    Active,
    /// A request is running its Target Builder pass.
    Waiting,
    /// A build is in progress but no request is currently in flight.
    Idle,
    /// An engine-internal exception fired; a fresh engine is required.
    Shutdown,
}

#[cfg(test)]
mod tests;
