//! Record every degradation event: component, failure mode, fallback used, timestamp, recovery status.

use chrono::{DateTime, Utc};
use crowdcast_core::models::DegradationEvent;
use serde::{Deserialize, Serialize};

/// Events kept before the oldest are dropped.
const MAX_TRACKED_EVENTS: usize = 1_000;

/// Recovery status of a degradation event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecoveryStatus {
    /// Still in degraded mode.
    Active,
    /// Recovered to normal operation.
    Recovered,
}

/// A tracked degradation event with recovery status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackedDegradation {
    pub event: DegradationEvent,
    pub recovery_status: RecoveryStatus,
    pub recovered_at: Option<DateTime<Utc>>,
}

/// Tracks recent degradation events for reporting.
#[derive(Debug, Clone, Default)]
pub struct DegradationTracker {
    events: Vec<TrackedDegradation>,
}

impl DegradationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new degradation event.
    pub fn record(&mut self, event: DegradationEvent) {
        crate::tracing_setup::events::degradation_triggered(
            &event.component,
            &event.failure,
            &event.fallback_used,
        );
        self.events.push(TrackedDegradation {
            event,
            recovery_status: RecoveryStatus::Active,
            recovered_at: None,
        });
        if self.events.len() > MAX_TRACKED_EVENTS {
            self.events.drain(..self.events.len() - MAX_TRACKED_EVENTS);
        }
    }

    /// Mark every active degradation of a component as recovered.
    pub fn mark_recovered(&mut self, component: &str) {
        let now = Utc::now();
        for tracked in self.events.iter_mut() {
            if tracked.event.component == component
                && tracked.recovery_status == RecoveryStatus::Active
            {
                tracked.recovery_status = RecoveryStatus::Recovered;
                tracked.recovered_at = Some(now);
            }
        }
    }

    /// All tracked events, oldest first.
    pub fn events(&self) -> &[TrackedDegradation] {
        &self.events
    }

    /// Active (unrecovered) degradations.
    pub fn active_degradations(&self) -> Vec<&TrackedDegradation> {
        self.events
            .iter()
            .filter(|t| t.recovery_status == RecoveryStatus::Active)
            .collect()
    }

    /// Whether a component currently has an active degradation.
    pub fn is_degraded(&self, component: &str) -> bool {
        self.events.iter().any(|t| {
            t.event.component == component && t.recovery_status == RecoveryStatus::Active
        })
    }

    /// Count events in the last N seconds for a given component.
    pub fn count_recent(&self, component: &str, window_secs: i64) -> usize {
        let now = Utc::now();
        let cutoff = chrono::Duration::try_seconds(window_secs)
            .and_then(|window| now.checked_sub_signed(window))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        self.events
            .iter()
            .filter(|t| t.event.component == component && t.event.timestamp > cutoff)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(component: &str) -> DegradationEvent {
        DegradationEvent::now(component, "boom", "medium")
    }

    #[test]
    fn record_then_recover() {
        let mut tracker = DegradationTracker::new();
        tracker.record(event("classifier"));
        tracker.record(event("classifier"));
        tracker.record(event("reference_curve"));
        assert_eq!(tracker.active_degradations().len(), 3);
        assert!(tracker.is_degraded("classifier"));

        tracker.mark_recovered("classifier");
        assert!(!tracker.is_degraded("classifier"));
        assert!(tracker.is_degraded("reference_curve"));
        assert_eq!(tracker.active_degradations().len(), 1);
        assert!(tracker.events()[0].recovered_at.is_some());
    }

    #[test]
    fn count_recent_filters_by_component() {
        let mut tracker = DegradationTracker::new();
        tracker.record(event("now_cache"));
        tracker.record(event("classifier"));
        assert_eq!(tracker.count_recent("now_cache", 60), 1);
        assert_eq!(tracker.count_recent("store", 60), 0);
        assert_eq!(tracker.count_recent("now_cache", i64::MAX), 1);
    }

    #[test]
    fn history_is_bounded() {
        let mut tracker = DegradationTracker::new();
        for _ in 0..(MAX_TRACKED_EVENTS + 10) {
            tracker.record(event("classifier"));
        }
        assert_eq!(tracker.events().len(), MAX_TRACKED_EVENTS);
    }
}
