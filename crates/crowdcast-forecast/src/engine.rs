//! Forecast orchestration: train once, predict and blend per offset, write
//! the "now" level back, and memoize it per time bucket.

use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Duration, FixedOffset, Offset, Utc};
use crowdcast_core::config::{CrowdcastConfig, ForecastConfig};
use crowdcast_core::errors::{CrowdcastError, CrowdcastResult, ForecastError};
use crowdcast_core::models::{CongestionLevel, DegradationEvent, ForecastItem, VenueId};
use crowdcast_core::traits::{ICongestionForecaster, IVenueStore};
use crowdcast_observability::tracing_setup::events;
use crowdcast_observability::{
    cache_span, forecast_span, training_span, DegradationTracker, ForecastMetrics,
    TrackedDegradation,
};

use crate::blender::{blend, BlendWeights};
use crate::cache::NowCache;
use crate::classifier::{CongestionClassifier, ModelState};
use crate::features;
use crate::reference::ReferenceCurveInterpolator;
use crate::training::{TrainingSet, TrainingSetCollector};

/// Component names used in degradation events.
pub mod components {
    pub const VISIT_REPORTS: &str = "visit_reports";
    pub const REFERENCE_CURVE: &str = "reference_curve";
    pub const CLASSIFIER: &str = "classifier";
    pub const LABEL_WRITE_BACK: &str = "label_write_back";
    pub const NOW_CACHE: &str = "now_cache";
    pub const OFFSET: &str = "offset";
}

/// Whether stage failures propagate or degrade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Strict,
    Soft,
}

/// The hybrid congestion forecaster for one entity store.
pub struct ForecastEngine<S: IVenueStore> {
    store: S,
    config: ForecastConfig,
    collector: TrainingSetCollector,
    classifier: CongestionClassifier,
    interpolator: ReferenceCurveInterpolator,
    cache: NowCache,
    metrics: ForecastMetrics,
    degradation: Mutex<DegradationTracker>,
    local_offset: FixedOffset,
}

impl<S: IVenueStore> ForecastEngine<S> {
    /// Build an engine after validating `config`.
    pub fn try_new(store: S, config: &CrowdcastConfig) -> CrowdcastResult<Self> {
        config.validate()?;
        Ok(Self::new(store, config))
    }

    /// Build an engine without validating `config`.
    pub fn new(store: S, config: &CrowdcastConfig) -> Self {
        let forecast = config.forecast.clone();
        let local_offset = FixedOffset::east_opt(forecast.utc_offset_minutes * 60)
            .unwrap_or_else(|| Utc.fix());
        Self {
            store,
            collector: TrainingSetCollector::from_config(&forecast),
            classifier: CongestionClassifier::from_config(&forecast),
            interpolator: ReferenceCurveInterpolator::from_config(&forecast),
            cache: NowCache::from_config(&config.cache),
            metrics: ForecastMetrics::new(),
            degradation: Mutex::new(DegradationTracker::new()),
            local_offset,
            config: forecast,
        }
    }

    /// Forecast at each minute offset from `now`, propagating store failures.
    ///
    /// Classifier failures never propagate: the forecast falls back to the
    /// reference curve. The offset-0 level is written back when it differs
    /// from the persisted one.
    pub fn try_forecast(
        &self,
        venue: VenueId,
        offsets: &[i64],
        now: DateTime<FixedOffset>,
    ) -> CrowdcastResult<Vec<ForecastItem>> {
        self.run(venue, offsets, now, Mode::Strict)
    }

    /// Forecast at each minute offset from `now`. Always answers.
    ///
    /// A failed report fetch trains on nothing, a failed curve fetch forecasts
    /// without a curve, and a failed write-back is recorded and ignored.
    pub fn forecast(
        &self,
        venue: VenueId,
        offsets: &[i64],
        now: DateTime<FixedOffset>,
    ) -> Vec<ForecastItem> {
        match self.run(venue, offsets, now, Mode::Soft) {
            Ok(items) => items,
            Err(e) => {
                // Soft mode recovers every stage; keep the contract regardless.
                self.record_degradation(components::VISIT_REPORTS, &e.to_string(), "medium");
                offsets
                    .iter()
                    .map(|&minutes_ahead| ForecastItem {
                        minutes_ahead,
                        at: now,
                        level: CongestionLevel::Medium,
                    })
                    .collect()
            }
        }
    }

    /// Forecast at the configured default offsets.
    pub fn forecast_default(&self, venue: VenueId, now: DateTime<FixedOffset>) -> Vec<ForecastItem> {
        self.forecast(venue, &self.config.default_offsets, now)
    }

    /// The venue's level right now in the configured local offset.
    pub fn current_label(&self, venue: VenueId) -> CongestionLevel {
        self.current_label_at(venue, Utc::now().with_timezone(&self.local_offset))
    }

    /// The venue's level at `now`, memoized per (venue, bucket).
    ///
    /// On any failure falls back to the persisted level, then `Medium`.
    pub fn current_label_at(&self, venue: VenueId, now: DateTime<FixedOffset>) -> CongestionLevel {
        let bucket = self.cache.bucket_for(&now);
        let _span = cache_span!(venue, bucket).entered();

        let lookup = self
            .cache
            .get_or_try_compute(venue, bucket, || self.compute_now(venue, now));
        match lookup {
            Ok(lookup) => {
                if lookup.computed {
                    self.metrics.record_cache_miss();
                } else {
                    self.metrics.record_cache_hit();
                }
                self.mark_recovered(components::NOW_CACHE);
                lookup.level
            }
            Err(e) => {
                self.metrics.record_cache_fallback();
                let fallback = match self.store.persisted_label(venue) {
                    Ok(Some(level)) => level,
                    Ok(None) | Err(_) => CongestionLevel::Medium,
                };
                self.record_degradation(
                    components::NOW_CACHE,
                    &e.to_string(),
                    &format!("persisted label {fallback}"),
                );
                fallback
            }
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    pub fn local_offset(&self) -> FixedOffset {
        self.local_offset
    }

    pub fn metrics(&self) -> &ForecastMetrics {
        &self.metrics
    }

    pub fn cache(&self) -> &NowCache {
        &self.cache
    }

    /// Copy of every tracked degradation, oldest first.
    pub fn degradations(&self) -> Vec<TrackedDegradation> {
        self.tracker().events().to_vec()
    }

    /// Whether a component currently has an unrecovered degradation.
    pub fn is_degraded(&self, component: &str) -> bool {
        self.tracker().is_degraded(component)
    }

    fn compute_now(&self, venue: VenueId, now: DateTime<FixedOffset>) -> CrowdcastResult<CongestionLevel> {
        let items = self.try_forecast(venue, &[0], now)?;
        items.first().map(|item| item.level).ok_or_else(|| {
            ForecastError::CacheComputationFailure {
                reason: "no item for offset 0".to_string(),
            }
            .into()
        })
    }

    fn run(
        &self,
        venue: VenueId,
        offsets: &[i64],
        now: DateTime<FixedOffset>,
        mode: Mode,
    ) -> CrowdcastResult<Vec<ForecastItem>> {
        let _span = forecast_span!(venue, offsets).entered();
        self.metrics.record_forecast();
        if offsets.is_empty() {
            return Ok(Vec::new());
        }

        let set = self.recover(
            mode,
            components::VISIT_REPORTS,
            self.collector.collect(&self.store, venue, &now),
            "empty training set",
            TrainingSet::new,
        )?;
        let state = self.train(venue, &set);
        let curve = self.recover(
            mode,
            components::REFERENCE_CURVE,
            self.store.reference_curve(venue),
            "no reference curve",
            || None,
        )?;

        let model = state.model();
        let weights = match model {
            Some(model) => BlendWeights::for_samples(model.samples(), &self.config),
            None => BlendWeights::reference_only(),
        };

        let mut items = Vec::with_capacity(offsets.len());
        for &minutes_ahead in offsets {
            let at = self.recover(
                mode,
                components::OFFSET,
                target_time(now, minutes_ahead),
                "forecast at now",
                || now,
            )?;
            let reference = self.interpolator.level_at(curve.as_ref(), &at);
            let predicted = model.map(|m| m.predict(&features::encode(&at)).0);
            items.push(ForecastItem {
                minutes_ahead,
                at,
                level: blend(predicted, reference, weights),
            });
        }
        if model.is_none() {
            self.metrics.record_reference_only_items(items.len() as u64);
        }

        if let Some(current) = items.iter().find(|item| item.minutes_ahead == 0) {
            let level = current.level;
            self.recover(
                mode,
                components::LABEL_WRITE_BACK,
                self.write_back(venue, level),
                "label not persisted",
                || false,
            )?;
        }

        Ok(items)
    }

    fn train(&self, venue: VenueId, set: &TrainingSet) -> ModelState {
        let _span = training_span!(venue, set.len()).entered();
        let state = self.classifier.train(set);
        match &state {
            ModelState::Trained { report, .. } => {
                events::model_trained(venue.value(), report.samples, report.iterations, report.converged);
                self.mark_recovered(components::CLASSIFIER);
            }
            ModelState::Unavailable(ForecastError::InsufficientData { samples, required }) => {
                tracing::debug!(venue = %venue, samples, required, "too few reports to train");
            }
            ModelState::Unavailable(e) => {
                self.record_degradation(components::CLASSIFIER, &e.to_string(), "reference curve");
            }
        }
        self.metrics.record_training_pass(state.is_available());
        state
    }

    /// Persist `level` if it differs from the stored one. Returns whether it wrote.
    fn write_back(&self, venue: VenueId, level: CongestionLevel) -> CrowdcastResult<bool> {
        let previous = self.store.persisted_label(venue)?;
        if previous == Some(level) {
            return Ok(false);
        }
        self.store.set_persisted_label(venue, level)?;
        self.metrics.record_label_write();
        events::label_written(venue.value(), previous.map(CongestionLevel::as_str), level.as_str());
        Ok(true)
    }

    /// Strict mode propagates `result`; soft mode records the failure and
    /// substitutes `fallback`.
    fn recover<T>(
        &self,
        mode: Mode,
        component: &str,
        result: CrowdcastResult<T>,
        fallback_used: &str,
        fallback: impl FnOnce() -> T,
    ) -> CrowdcastResult<T> {
        match (result, mode) {
            (Ok(value), _) => {
                self.mark_recovered(component);
                Ok(value)
            }
            (Err(e), Mode::Strict) => Err(e),
            (Err(e), Mode::Soft) => {
                self.record_degradation(component, &e.to_string(), fallback_used);
                Ok(fallback())
            }
        }
    }

    fn record_degradation(&self, component: &str, failure: &str, fallback_used: &str) {
        self.tracker()
            .record(DegradationEvent::now(component, failure, fallback_used));
    }

    fn mark_recovered(&self, component: &str) {
        let mut tracker = self.tracker();
        if tracker.is_degraded(component) {
            tracker.mark_recovered(component);
        }
    }

    fn tracker(&self) -> MutexGuard<'_, DegradationTracker> {
        self.degradation.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<S: IVenueStore> ICongestionForecaster for ForecastEngine<S> {
    fn forecast(
        &self,
        venue: VenueId,
        offsets: &[i64],
        now: DateTime<FixedOffset>,
    ) -> Vec<ForecastItem> {
        ForecastEngine::forecast(self, venue, offsets, now)
    }

    fn current_label(&self, venue: VenueId) -> CongestionLevel {
        ForecastEngine::current_label(self, venue)
    }
}

/// `now + minutes`, or an error when that instant is not representable.
fn target_time(now: DateTime<FixedOffset>, minutes: i64) -> CrowdcastResult<DateTime<FixedOffset>> {
    Duration::try_minutes(minutes)
        .and_then(|delta| now.checked_add_signed(delta))
        .ok_or_else(|| CrowdcastError::ConfigError(format!("offset of {minutes} minutes is out of range")))
}
