//! Training-set construction from recent visit reports.
//!
//! Each report becomes one example: its time features, its label (unknown
//! labels read as `medium`), and a weight that halves every `half_life_hours`
//! of age and is multiplied by `weekday_match_bonus` when the report falls on
//! the same weekday as the forecast's `now`.

use chrono::{DateTime, Datelike, Duration, FixedOffset, Utc};
use crowdcast_core::config::ForecastConfig;
use crowdcast_core::constants::NUM_FEATURES;
use crowdcast_core::errors::CrowdcastResult;
use crowdcast_core::models::{CongestionLevel, VenueId, VisitReport};
use crowdcast_core::traits::IVenueStore;

use crate::features;

/// Parallel feature, label, and weight columns. Always equal length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingSet {
    pub features: Vec<[f64; NUM_FEATURES]>,
    pub labels: Vec<CongestionLevel>,
    pub weights: Vec<f64>,
}

impl TrainingSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, features: [f64; NUM_FEATURES], label: CongestionLevel, weight: f64) {
        self.features.push(features);
        self.labels.push(label);
        self.weights.push(weight);
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Sum of example weights.
    pub fn total_weight(&self) -> f64 {
        self.weights.iter().sum()
    }
}

/// Weight of an example `age_hours` old: `0.5 ^ (age / half_life)`.
///
/// Negative ages (reports stamped after `now`) count as fresh. The result is
/// kept strictly positive even when it would underflow.
pub fn recency_weight(age_hours: f64, half_life_hours: f64) -> f64 {
    0.5f64
        .powf(age_hours.max(0.0) / half_life_hours)
        .max(f64::MIN_POSITIVE)
}

/// Builds weighted training sets from a venue's visit reports.
#[derive(Debug, Clone)]
pub struct TrainingSetCollector {
    lookback_days: i64,
    half_life_hours: f64,
    weekday_match_bonus: f64,
}

impl TrainingSetCollector {
    pub fn new(lookback_days: i64, half_life_hours: f64, weekday_match_bonus: f64) -> Self {
        Self {
            lookback_days,
            half_life_hours,
            weekday_match_bonus,
        }
    }

    pub fn from_config(config: &ForecastConfig) -> Self {
        Self::new(
            config.lookback_days,
            config.half_life_hours,
            config.weekday_match_bonus,
        )
    }

    /// Start of the lookback window for a forecast made at `now`.
    ///
    /// Saturates at the earliest representable instant when the window
    /// reaches past it.
    pub fn window_start(&self, now: &DateTime<FixedOffset>) -> DateTime<Utc> {
        Duration::try_days(self.lookback_days)
            .and_then(|window| now.with_timezone(&Utc).checked_sub_signed(window))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Fetch the venue's reports inside the lookback window and weight them.
    pub fn collect<S: IVenueStore + ?Sized>(
        &self,
        store: &S,
        venue: VenueId,
        now: &DateTime<FixedOffset>,
    ) -> CrowdcastResult<TrainingSet> {
        let reports = store.fetch_reports(venue, self.window_start(now))?;
        Ok(self.build(&reports, now))
    }

    /// Weight already-fetched reports. Reports older than the window are skipped.
    pub fn build(&self, reports: &[VisitReport], now: &DateTime<FixedOffset>) -> TrainingSet {
        let since = self.window_start(now);
        let now_utc = now.with_timezone(&Utc);
        let today = now.weekday();

        let mut set = TrainingSet::new();
        for report in reports.iter().filter(|r| r.timestamp >= since) {
            let local = report.timestamp.with_timezone(now.offset());

            let age_hours = (now_utc - report.timestamp).num_milliseconds() as f64 / 3_600_000.0;
            let mut weight = recency_weight(age_hours, self.half_life_hours);
            if local.weekday() == today {
                weight *= self.weekday_match_bonus;
            }

            set.push(features::encode(&local).as_array(), report.level(), weight);
        }
        set
    }
}
