//! Cyclic time encoding.
//!
//! Hour of day and day of week are each mapped onto the unit circle so that
//! 23:59 sits next to 00:00 and Sunday next to Monday.

use std::f64::consts::TAU;

use chrono::{DateTime, Datelike, TimeZone, Timelike};
use crowdcast_core::constants::NUM_FEATURES;
use serde::{Deserialize, Serialize};

/// Sine/cosine position of an instant in the daily and weekly cycles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeFeatures {
    pub h_sin: f64,
    pub h_cos: f64,
    pub w_sin: f64,
    pub w_cos: f64,
}

impl TimeFeatures {
    /// Feature vector in classifier column order.
    pub fn as_array(&self) -> [f64; NUM_FEATURES] {
        [self.h_sin, self.h_cos, self.w_sin, self.w_cos]
    }
}

/// Encode an instant using its wall-clock time in its own offset.
///
/// Seconds are ignored; the hour position is `hour + minute / 60`.
pub fn encode<Tz: TimeZone>(at: &DateTime<Tz>) -> TimeFeatures {
    let hour = f64::from(at.hour()) + f64::from(at.minute()) / 60.0;
    let weekday = f64::from(at.weekday().num_days_from_monday());

    let h = TAU * hour / 24.0;
    let w = TAU * weekday / 7.0;
    TimeFeatures {
        h_sin: h.sin(),
        h_cos: h.cos(),
        w_sin: w.sin(),
        w_cos: w.cos(),
    }
}
