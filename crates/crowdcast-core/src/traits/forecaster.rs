use chrono::{DateTime, FixedOffset};

use crate::models::{CongestionLevel, ForecastItem, VenueId};

/// Congestion forecasting as exposed to the request layer.
///
/// Both operations always answer; failures degrade to a fallback level.
pub trait ICongestionForecaster: Send + Sync {
    /// Forecast the venue at each minute offset from `now`, in request order.
    fn forecast(
        &self,
        venue: VenueId,
        offsets: &[i64],
        now: DateTime<FixedOffset>,
    ) -> Vec<ForecastItem>;

    /// The venue's level right now, memoized per time bucket.
    fn current_label(&self, venue: VenueId) -> CongestionLevel;
}
