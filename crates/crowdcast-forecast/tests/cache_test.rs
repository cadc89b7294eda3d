//! "Now" label cache: bucket memoization, single-flight, fallbacks.

mod common;

use std::sync::atomic::Ordering;

use common::*;
use crowdcast_core::config::CrowdcastConfig;
use crowdcast_core::models::CongestionLevel;
use crowdcast_forecast::engine::components;
use crowdcast_forecast::ForecastEngine;

fn engine(store: MockStore) -> ForecastEngine<MockStore> {
    ForecastEngine::new(store, &CrowdcastConfig::default())
}

#[test]
fn repeated_calls_in_a_bucket_train_once() {
    let engine = engine(MockStore::with_curve(flat_curve(80)));

    let first = engine.current_label_at(VENUE, wednesday(13, 30));
    let second = engine.current_label_at(VENUE, wednesday(13, 34));

    assert_eq!(first, CongestionLevel::High);
    assert_eq!(second, first);
    assert_eq!(engine.store().fetch_count(), 1);
    let m = engine.metrics().snapshot();
    assert_eq!(m.training_passes, 1);
    assert_eq!(m.cache_misses, 1);
    assert_eq!(m.cache_hits, 1);
}

#[test]
fn next_bucket_recomputes() {
    let engine = engine(MockStore::with_curve(flat_curve(80)));
    engine.current_label_at(VENUE, wednesday(13, 34));
    engine.current_label_at(VENUE, wednesday(13, 35));
    assert_eq!(engine.store().fetch_count(), 2);
    assert_eq!(engine.metrics().training_passes(), 2);
}

#[test]
fn cached_result_is_written_back() {
    let engine = engine(MockStore::with_curve(flat_curve(5)));
    assert_eq!(engine.current_label_at(VENUE, wednesday(9, 0)), CongestionLevel::Low);
    assert_eq!(engine.store().label(), Some(CongestionLevel::Low));
    engine.current_label_at(VENUE, wednesday(9, 1));
    assert_eq!(engine.store().write_count(), 1);
}

#[test]
fn concurrent_first_access_trains_once() {
    let store = MockStore::with_curve(flat_curve(80));
    store.fetch_delay_ms.store(50, Ordering::SeqCst);
    let engine = engine(store);
    let now = wednesday(13, 30);

    let labels: Vec<CongestionLevel> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| s.spawn(|| engine.current_label_at(VENUE, now)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(labels.iter().all(|l| *l == CongestionLevel::High));
    assert_eq!(engine.store().fetch_count(), 1);
    assert_eq!(engine.metrics().training_passes(), 1);
    // Waiters that shared the single computation count as hits.
    let m = engine.metrics().snapshot();
    assert_eq!(m.cache_misses, 1);
    assert_eq!(m.cache_hits, 7);
    assert!((engine.metrics().cache_hit_rate() - 7.0 / 8.0).abs() < 1e-12);
}

#[test]
fn failure_falls_back_to_the_persisted_label() {
    let store = MockStore::with_curve(flat_curve(80));
    store.set_label(Some(CongestionLevel::Low));
    store.fail_reports.store(true, Ordering::SeqCst);
    let engine = engine(store);

    assert_eq!(engine.current_label_at(VENUE, wednesday(13, 30)), CongestionLevel::Low);
    assert!(engine.is_degraded(components::NOW_CACHE));
    assert_eq!(engine.metrics().snapshot().cache_fallbacks, 1);
    assert_eq!(engine.store().write_count(), 0);
}

#[test]
fn failure_without_a_persisted_label_is_medium() {
    let store = MockStore::with_curve(flat_curve(80));
    store.fail_curve.store(true, Ordering::SeqCst);
    let engine = engine(store);
    assert_eq!(engine.current_label_at(VENUE, wednesday(13, 30)), CongestionLevel::Medium);
}

#[test]
fn failure_with_an_unreadable_label_is_medium() {
    let store = MockStore::with_curve(flat_curve(80));
    store.fail_labels.store(true, Ordering::SeqCst);
    let engine = engine(store);
    assert_eq!(engine.current_label_at(VENUE, wednesday(13, 30)), CongestionLevel::Medium);
}

#[test]
fn failures_are_retried_within_the_same_bucket() {
    let store = MockStore::with_curve(flat_curve(80));
    store.fail_reports.store(true, Ordering::SeqCst);
    let engine = engine(store);

    engine.current_label_at(VENUE, wednesday(13, 30));
    engine.store().fail_reports.store(false, Ordering::SeqCst);
    let level = engine.current_label_at(VENUE, wednesday(13, 31));

    assert_eq!(level, CongestionLevel::High);
    assert_eq!(engine.store().fetch_count(), 2);
    assert!(!engine.is_degraded(components::NOW_CACHE));
}

#[test]
fn current_label_uses_the_configured_offset() {
    let engine = engine(MockStore::with_curve(flat_curve(80)));
    assert_eq!(engine.local_offset(), seoul());
    assert_eq!(engine.current_label(VENUE), CongestionLevel::High);
}
