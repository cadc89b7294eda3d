//! Reference-curve lookup with per-minute linear interpolation.

use chrono::{DateTime, Datelike, TimeZone, Timelike};
use crowdcast_core::config::ForecastConfig;
use crowdcast_core::constants::DAYS_PER_WEEK;
use crowdcast_core::models::{CongestionLevel, ReferenceCurve};

/// Turns a venue's hour-of-week busyness curve into a level at any instant.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceCurveInterpolator {
    low_below: u8,
    high_from: u8,
}

impl ReferenceCurveInterpolator {
    pub fn new(low_below: u8, high_from: u8) -> Self {
        Self {
            low_below,
            high_from,
        }
    }

    pub fn from_config(config: &ForecastConfig) -> Self {
        Self::new(config.low_below_percent, config.high_from_percent)
    }

    /// Busyness percentage at `at`, interpolated between the surrounding hours.
    ///
    /// `None` when there is no curve or no data for `at`'s weekday. At 23:xx
    /// the next point is 00:00 of the following weekday, or the 23:00 value
    /// itself when that day is missing.
    pub fn percent_at<Tz: TimeZone>(
        &self,
        curve: Option<&ReferenceCurve>,
        at: &DateTime<Tz>,
    ) -> Option<u8> {
        let curve = curve?;
        let weekday = at.weekday().num_days_from_monday() as usize;
        let hour = at.hour() as usize;
        let today = curve.day(weekday)?;

        let p0 = today[hour];
        let p1 = if hour < 23 {
            today[hour + 1]
        } else {
            curve
                .percent((weekday + 1) % DAYS_PER_WEEK, 0)
                .unwrap_or(p0)
        };

        let fraction = f64::from(at.minute()) / 60.0;
        let value = f64::from(p0) + (f64::from(p1) - f64::from(p0)) * fraction;
        // Halves round to even: 40.5 -> 40, 41.5 -> 42.
        Some(value.round_ties_even().clamp(0.0, 100.0) as u8)
    }

    /// Classify a percentage; `None` is `Medium`.
    pub fn level_for(&self, percent: Option<u8>) -> CongestionLevel {
        CongestionLevel::from_percent_with(percent, self.low_below, self.high_from)
    }

    /// Level suggested by the curve at `at`.
    pub fn level_at<Tz: TimeZone>(
        &self,
        curve: Option<&ReferenceCurve>,
        at: &DateTime<Tz>,
    ) -> CongestionLevel {
        self.level_for(self.percent_at(curve, at))
    }
}

impl Default for ReferenceCurveInterpolator {
    fn default() -> Self {
        Self::from_config(&ForecastConfig::default())
    }
}
