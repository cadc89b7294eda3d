use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::CongestionLevel;

/// One forecast point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastItem {
    /// Minutes after the forecast's `now` (0 = now).
    pub minutes_ahead: i64,
    /// The instant being forecast, in the caller's local offset.
    pub at: DateTime<FixedOffset>,
    /// Final blended level.
    pub level: CongestionLevel,
}
