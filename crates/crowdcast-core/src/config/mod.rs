//! Workspace configuration, loaded from TOML with per-section defaults.

pub mod cache_config;
pub mod defaults;
pub mod forecast_config;
pub mod observability_config;
pub mod storage_config;

use serde::{Deserialize, Serialize};

pub use cache_config::CacheConfig;
pub use forecast_config::ForecastConfig;
pub use observability_config::ObservabilityConfig;
pub use storage_config::StorageConfig;

use crate::constants::MAX_LOOKBACK_DAYS;
use crate::errors::{CrowdcastError, CrowdcastResult};

/// Top-level configuration aggregating every subsystem section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CrowdcastConfig {
    pub forecast: ForecastConfig,
    pub cache: CacheConfig,
    pub storage: StorageConfig,
    pub observability: ObservabilityConfig,
}

impl CrowdcastConfig {
    /// Parse a TOML document. Missing sections and fields take their defaults.
    pub fn from_toml(input: &str) -> CrowdcastResult<Self> {
        let config: Self =
            toml::from_str(input).map_err(|e| CrowdcastError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: &std::path::Path) -> CrowdcastResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| CrowdcastError::ConfigError(format!("{}: {e}", path.display())))?;
        Self::from_toml(&raw)
    }

    /// Serialize back to TOML.
    pub fn to_toml(&self) -> CrowdcastResult<String> {
        toml::to_string_pretty(self).map_err(|e| CrowdcastError::ConfigError(e.to_string()))
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> CrowdcastResult<()> {
        let f = &self.forecast;
        let fail = |msg: String| Err(CrowdcastError::ConfigError(msg));

        if !(1..=MAX_LOOKBACK_DAYS).contains(&f.lookback_days) {
            return fail(format!(
                "forecast.lookback_days must lie in 1..={MAX_LOOKBACK_DAYS}, got {}",
                f.lookback_days
            ));
        }
        if !(f.half_life_hours > 0.0 && f.half_life_hours.is_finite()) {
            return fail(format!(
                "forecast.half_life_hours must be positive, got {}",
                f.half_life_hours
            ));
        }
        if !(f.weekday_match_bonus > 0.0 && f.weekday_match_bonus.is_finite()) {
            return fail(format!(
                "forecast.weekday_match_bonus must be positive, got {}",
                f.weekday_match_bonus
            ));
        }
        if f.min_samples >= f.full_trust_samples {
            return fail(format!(
                "forecast.min_samples ({}) must be below forecast.full_trust_samples ({})",
                f.min_samples, f.full_trust_samples
            ));
        }
        if !(f.regularization_c > 0.0 && f.regularization_c.is_finite()) {
            return fail(format!(
                "forecast.regularization_c must be positive, got {}",
                f.regularization_c
            ));
        }
        if f.max_iterations == 0 {
            return fail("forecast.max_iterations must be at least 1".to_string());
        }
        for (name, w) in [
            ("model_weight_min", f.model_weight_min),
            ("model_weight_max", f.model_weight_max),
            ("model_weight_base", f.model_weight_base),
        ] {
            if !(0.0..=1.0).contains(&w) {
                return fail(format!("forecast.{name} must lie in [0, 1], got {w}"));
            }
        }
        if f.model_weight_min > f.model_weight_max {
            return fail(format!(
                "forecast.model_weight_min ({}) exceeds forecast.model_weight_max ({})",
                f.model_weight_min, f.model_weight_max
            ));
        }
        if f.low_below_percent > f.high_from_percent || f.high_from_percent > 100 {
            return fail(format!(
                "forecast thresholds out of order: low_below_percent={} high_from_percent={}",
                f.low_below_percent, f.high_from_percent
            ));
        }
        if f.utc_offset_minutes.abs() >= 24 * 60 {
            return fail(format!(
                "forecast.utc_offset_minutes out of range: {}",
                f.utc_offset_minutes
            ));
        }
        if !(1..=60).contains(&self.cache.bucket_minutes) {
            return fail(format!(
                "cache.bucket_minutes must lie in 1..=60, got {}",
                self.cache.bucket_minutes
            ));
        }
        if self.cache.max_entries == 0 {
            return fail("cache.max_entries must be at least 1".to_string());
        }
        Ok(())
    }
}
