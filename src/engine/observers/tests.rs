// forge-engine: parallel build graph engine core
//
// SPDX-FileCopyrightText: 2026 Forge Engine Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;

#[tokio::test]
async fn test_status_changed_observer_is_invoked() {
    let observers = Observers::new();
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_clone = Arc::clone(&calls);
    observers
        .on_status_changed(Arc::new(move |_state| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        }))
        .await;

    observers.notify_status_changed(EngineState::Active).await;
    observers.notify_status_changed(EngineState::Idle).await;

    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_notify_with_no_subscribers_is_a_noop() {
    let observers = Observers::new();
    observers.notify_status_changed(EngineState::Active).await;
}

#[tokio::test]
async fn test_multiple_subscribers_all_fire() {
    let observers = Observers::new();
    let a = Arc::new(AtomicUsize::new(0));
    let b = Arc::new(AtomicUsize::new(0));
    let (a_clone, b_clone) = (Arc::clone(&a), Arc::clone(&b));
    observers
        .on_status_changed(Arc::new(move |_| {
            a_clone.fetch_add(1, Ordering::SeqCst);
        }))
        .await;
    observers
        .on_status_changed(Arc::new(move |_| {
            b_clone.fetch_add(1, Ordering::SeqCst);
        }))
        .await;

    observers.notify_status_changed(EngineState::Shutdown).await;

    assert_eq!(a.load(Ordering::SeqCst), 1);
    assert_eq!(b.load(Ordering::SeqCst), 1);
}
