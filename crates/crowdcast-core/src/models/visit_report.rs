use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CongestionLevel, VenueId};

/// A visitor's congestion report for a venue. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitReport {
    pub venue_id: VenueId,
    /// When the report was made.
    pub timestamp: DateTime<Utc>,
    /// The label exactly as reported; interpreted leniently by the forecaster.
    pub congestion: Option<String>,
}

impl VisitReport {
    pub fn new(venue_id: VenueId, timestamp: DateTime<Utc>, congestion: impl Into<String>) -> Self {
        Self {
            venue_id,
            timestamp,
            congestion: Some(congestion.into()),
        }
    }

    /// The reported label, with unknown or missing labels read as `Medium`.
    pub fn level(&self) -> CongestionLevel {
        CongestionLevel::from_report_label(self.congestion.as_deref())
    }
}
