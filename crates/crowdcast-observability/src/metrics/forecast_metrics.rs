//! Forecast counts, training passes, model availability, write-backs, cache hits/misses/fallbacks.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Lock-free forecast counters.
#[derive(Debug, Default)]
pub struct ForecastMetrics {
    forecasts: AtomicU64,
    training_passes: AtomicU64,
    models_fitted: AtomicU64,
    models_unavailable: AtomicU64,
    reference_only_items: AtomicU64,
    label_writes: AtomicU64,
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
    cache_fallbacks: AtomicU64,
}

/// Point-in-time copy of [`ForecastMetrics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastMetricsSnapshot {
    pub forecasts: u64,
    pub training_passes: u64,
    pub models_fitted: u64,
    pub models_unavailable: u64,
    pub reference_only_items: u64,
    pub label_writes: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub cache_fallbacks: u64,
}

impl ForecastMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_forecast(&self) {
        self.forecasts.fetch_add(1, Ordering::Relaxed);
    }

    /// A training set was collected and handed to the classifier.
    pub fn record_training_pass(&self, fitted: bool) {
        self.training_passes.fetch_add(1, Ordering::Relaxed);
        if fitted {
            self.models_fitted.fetch_add(1, Ordering::Relaxed);
        } else {
            self.models_unavailable.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_reference_only_items(&self, count: u64) {
        self.reference_only_items.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_label_write(&self) {
        self.label_writes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_fallback(&self) {
        self.cache_fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    /// Number of training passes so far.
    pub fn training_passes(&self) -> u64 {
        self.training_passes.load(Ordering::Relaxed)
    }

    /// Cache hit rate (0.0–1.0).
    pub fn cache_hit_rate(&self) -> f64 {
        let h = self.cache_hits.load(Ordering::Relaxed) as f64;
        let m = self.cache_misses.load(Ordering::Relaxed) as f64;
        let total = h + m;
        if total == 0.0 {
            0.0
        } else {
            h / total
        }
    }

    pub fn snapshot(&self) -> ForecastMetricsSnapshot {
        ForecastMetricsSnapshot {
            forecasts: self.forecasts.load(Ordering::Relaxed),
            training_passes: self.training_passes.load(Ordering::Relaxed),
            models_fitted: self.models_fitted.load(Ordering::Relaxed),
            models_unavailable: self.models_unavailable.load(Ordering::Relaxed),
            reference_only_items: self.reference_only_items.load(Ordering::Relaxed),
            label_writes: self.label_writes.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
            cache_fallbacks: self.cache_fallbacks.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters (useful for testing or periodic rotation).
    pub fn reset(&self) {
        for counter in [
            &self.forecasts,
            &self.training_passes,
            &self.models_fitted,
            &self.models_unavailable,
            &self.reference_only_items,
            &self.label_writes,
            &self.cache_hits,
            &self.cache_misses,
            &self.cache_fallbacks,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}
