//! Shared in-memory venue store for forecast integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use crowdcast_core::errors::{CrowdcastResult, StorageError};
use crowdcast_core::models::{CongestionLevel, ReferenceCurve, VenueId, VisitReport};
use crowdcast_core::traits::IVenueStore;

pub const VENUE: VenueId = VenueId(7);

#[derive(Default)]
struct State {
    reports: Vec<VisitReport>,
    curve: Option<ReferenceCurve>,
    label: Option<CongestionLevel>,
}

/// Mutex-backed store with call counters and switchable failures.
#[derive(Default)]
pub struct MockStore {
    state: Mutex<State>,
    pub fetches: AtomicUsize,
    pub label_writes: AtomicUsize,
    pub fail_reports: AtomicBool,
    pub fail_curve: AtomicBool,
    pub fail_labels: AtomicBool,
    pub fetch_delay_ms: AtomicU64,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_curve(curve: ReferenceCurve) -> Self {
        let store = Self::new();
        store.state.lock().unwrap().curve = Some(curve);
        store
    }

    pub fn add_report(&self, at: DateTime<FixedOffset>, label: &str) {
        self.state.lock().unwrap().reports.push(VisitReport::new(
            VENUE,
            at.with_timezone(&Utc),
            label,
        ));
    }

    pub fn set_label(&self, level: Option<CongestionLevel>) {
        self.state.lock().unwrap().label = level;
    }

    pub fn label(&self) -> Option<CongestionLevel> {
        self.state.lock().unwrap().label
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn write_count(&self) -> usize {
        self.label_writes.load(Ordering::SeqCst)
    }

    fn failure(what: &str) -> crowdcast_core::errors::CrowdcastError {
        StorageError::SqliteError {
            message: format!("{what} unavailable"),
        }
        .into()
    }
}

impl IVenueStore for MockStore {
    fn fetch_reports(&self, venue: VenueId, since: DateTime<Utc>) -> CrowdcastResult<Vec<VisitReport>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let delay = self.fetch_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            std::thread::sleep(StdDuration::from_millis(delay));
        }
        if self.fail_reports.load(Ordering::SeqCst) {
            return Err(Self::failure("visit_reports"));
        }
        let state = self.state.lock().unwrap();
        Ok(state
            .reports
            .iter()
            .filter(|r| r.venue_id == venue && r.timestamp >= since)
            .cloned()
            .collect())
    }

    fn reference_curve(&self, _venue: VenueId) -> CrowdcastResult<Option<ReferenceCurve>> {
        if self.fail_curve.load(Ordering::SeqCst) {
            return Err(Self::failure("reference_curve"));
        }
        Ok(self.state.lock().unwrap().curve.clone())
    }

    fn persisted_label(&self, _venue: VenueId) -> CrowdcastResult<Option<CongestionLevel>> {
        if self.fail_labels.load(Ordering::SeqCst) {
            return Err(Self::failure("congestion"));
        }
        Ok(self.state.lock().unwrap().label)
    }

    fn set_persisted_label(&self, _venue: VenueId, level: CongestionLevel) -> CrowdcastResult<()> {
        if self.fail_labels.load(Ordering::SeqCst) {
            return Err(Self::failure("congestion"));
        }
        self.label_writes.fetch_add(1, Ordering::SeqCst);
        self.state.lock().unwrap().label = Some(level);
        Ok(())
    }
}

pub fn seoul() -> FixedOffset {
    FixedOffset::east_opt(9 * 3600).unwrap()
}

/// Wednesday 2025-03-05 at the given local time.
pub fn wednesday(hour: u32, minute: u32) -> DateTime<FixedOffset> {
    seoul().with_ymd_and_hms(2025, 3, 5, hour, minute, 0).unwrap()
}

/// A curve whose Wednesday reads 40% at 13:00 and 60% at 14:00, 0 elsewhere.
pub fn wednesday_lunch_curve() -> ReferenceCurve {
    let mut hours = [0u8; 24];
    hours[13] = 40;
    hours[14] = 60;
    let mut curve = ReferenceCurve::new();
    curve.set_day(2, hours).unwrap();
    curve
}

/// A curve reading `percent` at every hour of every weekday.
pub fn flat_curve(percent: u8) -> ReferenceCurve {
    let mut curve = ReferenceCurve::new();
    for weekday in 0..7 {
        curve.set_day(weekday, [percent; 24]).unwrap();
    }
    curve
}

/// `count` reports labelled `label`, one every `step_minutes` going back from `now`.
pub fn add_recent_reports(store: &MockStore, now: DateTime<FixedOffset>, count: usize, step_minutes: i64, label: &str) {
    for i in 1..=count {
        store.add_report(now - Duration::minutes(step_minutes * i as i64), label);
    }
}
