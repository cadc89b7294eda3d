use serde::{Deserialize, Serialize};

use super::defaults;

/// Forecasting engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// How far back visit reports are used for training.
    pub lookback_days: i64,
    /// Half-life of a report's training weight, in hours.
    pub half_life_hours: f64,
    /// Weight multiplier for reports sharing the forecast's weekday.
    pub weekday_match_bonus: f64,
    /// Below this many reports the classifier is not trained.
    pub min_samples: usize,
    /// Sample count at which the model weight reaches its ceiling.
    pub full_trust_samples: usize,
    /// Inverse L2 regularization strength.
    pub regularization_c: f64,
    /// Maximum optimizer iterations.
    pub max_iterations: usize,
    /// Gradient max-norm at which fitting stops.
    pub tolerance: f64,
    /// Model weight at `min_samples`.
    pub model_weight_min: f64,
    /// Model weight at `full_trust_samples` and beyond.
    pub model_weight_max: f64,
    /// Floor applied to the interpolated model weight.
    pub model_weight_base: f64,
    /// Reference percentages below this are `low`.
    pub low_below_percent: u8,
    /// Reference percentages at or above this are `high`.
    pub high_from_percent: u8,
    /// Minute offsets used when a caller does not supply any.
    pub default_offsets: Vec<i64>,
    /// Local wall-clock offset used by `current_label`.
    pub utc_offset_minutes: i32,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            lookback_days: defaults::DEFAULT_LOOKBACK_DAYS,
            half_life_hours: defaults::DEFAULT_HALF_LIFE_HOURS,
            weekday_match_bonus: defaults::DEFAULT_WEEKDAY_MATCH_BONUS,
            min_samples: defaults::DEFAULT_MIN_SAMPLES,
            full_trust_samples: defaults::DEFAULT_FULL_TRUST_SAMPLES,
            regularization_c: defaults::DEFAULT_REGULARIZATION_C,
            max_iterations: defaults::DEFAULT_MAX_ITERATIONS,
            tolerance: defaults::DEFAULT_TOLERANCE,
            model_weight_min: defaults::DEFAULT_MODEL_WEIGHT_MIN,
            model_weight_max: defaults::DEFAULT_MODEL_WEIGHT_MAX,
            model_weight_base: defaults::DEFAULT_MODEL_WEIGHT_BASE,
            low_below_percent: defaults::DEFAULT_LOW_BELOW_PERCENT,
            high_from_percent: defaults::DEFAULT_HIGH_FROM_PERCENT,
            default_offsets: defaults::DEFAULT_OFFSETS.to_vec(),
            utc_offset_minutes: defaults::DEFAULT_UTC_OFFSET_MINUTES,
        }
    }
}
