// forge-engine: parallel build graph engine core
//
// SPDX-FileCopyrightText: 2026 Forge Engine Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use super::*;

#[tokio::test]
async fn test_get_on_empty_cache_is_none() {
    let cache = ResultsCache::new();
    assert!(cache.get(1, &["A".to_string()]).await.is_none());
}

#[tokio::test]
async fn test_put_then_get_round_trips() {
    let cache = ResultsCache::new();
    let mut targets = BTreeMap::new();
    targets.insert("A".to_string(), TargetResult::success(Vec::new()));
    cache.put(1, targets).await;

    let result = cache.get(1, &["A".to_string()]).await.unwrap();
    assert!(result.is_success());
}

#[tokio::test]
async fn test_overall_failure_when_any_target_failed() {
    let cache = ResultsCache::new();
    let mut targets = BTreeMap::new();
    targets.insert("A".to_string(), TargetResult::success(Vec::new()));
    targets.insert("B".to_string(), TargetResult::failure());
    cache.put(1, targets).await;

    let result = cache.get(1, &["A".to_string(), "B".to_string()]).await.unwrap();
    assert!(!result.is_success());
}

#[tokio::test]
async fn test_partial_coverage_is_not_a_hit() {
    let cache = ResultsCache::new();
    let mut targets = BTreeMap::new();
    targets.insert("A".to_string(), TargetResult::success(Vec::new()));
    cache.put(1, targets).await;

    // "B" was never cached: a request for A+B must miss entirely, not
    // silently return only A.
    assert!(cache.get(1, &["A".to_string(), "B".to_string()]).await.is_none());
}

#[tokio::test]
async fn test_skipped_target_is_distinguishable_from_absent_target() {
    let cache = ResultsCache::new();
    let mut targets = BTreeMap::new();
    targets.insert("Ghost".to_string(), TargetResult::skipped());
    cache.put(1, targets).await;

    // An executed-and-skipped target is a cache hit with code Skipped...
    let hit = cache.get(1, &["Ghost".to_string()]).await.unwrap();
    assert_eq!(hit.per_target_results["Ghost"].code, TargetCode::Skipped);

    // ...whereas a target that was dropped by skipNonexistentTargets was
    // never written here at all, so a different configuration's lookup
    // for the same name is a clean miss, not a false "skipped" hit.
    assert!(cache.get(2, &["Ghost".to_string()]).await.is_none());
}

#[tokio::test]
async fn test_put_merges_with_existing_entries() {
    let cache = ResultsCache::new();
    let mut first = BTreeMap::new();
    first.insert("A".to_string(), TargetResult::success(Vec::new()));
    cache.put(1, first).await;

    let mut second = BTreeMap::new();
    second.insert("B".to_string(), TargetResult::success(Vec::new()));
    cache.put(1, second).await;

    let result = cache.get(1, &["A".to_string(), "B".to_string()]).await;
    assert!(result.is_some());
}
