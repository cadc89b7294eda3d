use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::errors::CrowdcastResult;
use crate::models::{CongestionLevel, ReferenceCurve, VenueId, VisitReport};

/// Read/write access to the entity store, limited to what forecasting needs.
pub trait IVenueStore: Send + Sync {
    /// Visit reports for a venue made at or after `since`, oldest first.
    fn fetch_reports(
        &self,
        venue: VenueId,
        since: DateTime<Utc>,
    ) -> CrowdcastResult<Vec<VisitReport>>;

    /// The venue's reference curve, or `None` if none has been collected yet.
    fn reference_curve(&self, venue: VenueId) -> CrowdcastResult<Option<ReferenceCurve>>;

    /// The venue's last persisted "now" level.
    fn persisted_label(&self, venue: VenueId) -> CrowdcastResult<Option<CongestionLevel>>;

    /// Overwrite the persisted "now" level. Idempotent.
    fn set_persisted_label(&self, venue: VenueId, level: CongestionLevel) -> CrowdcastResult<()>;
}

impl<T: IVenueStore + ?Sized> IVenueStore for &T {
    fn fetch_reports(
        &self,
        venue: VenueId,
        since: DateTime<Utc>,
    ) -> CrowdcastResult<Vec<VisitReport>> {
        (**self).fetch_reports(venue, since)
    }

    fn reference_curve(&self, venue: VenueId) -> CrowdcastResult<Option<ReferenceCurve>> {
        (**self).reference_curve(venue)
    }

    fn persisted_label(&self, venue: VenueId) -> CrowdcastResult<Option<CongestionLevel>> {
        (**self).persisted_label(venue)
    }

    fn set_persisted_label(&self, venue: VenueId, level: CongestionLevel) -> CrowdcastResult<()> {
        (**self).set_persisted_label(venue, level)
    }
}

impl<T: IVenueStore + ?Sized> IVenueStore for Arc<T> {
    fn fetch_reports(
        &self,
        venue: VenueId,
        since: DateTime<Utc>,
    ) -> CrowdcastResult<Vec<VisitReport>> {
        (**self).fetch_reports(venue, since)
    }

    fn reference_curve(&self, venue: VenueId) -> CrowdcastResult<Option<ReferenceCurve>> {
        (**self).reference_curve(venue)
    }

    fn persisted_label(&self, venue: VenueId) -> CrowdcastResult<Option<CongestionLevel>> {
        (**self).persisted_label(venue)
    }

    fn set_persisted_label(&self, venue: VenueId, level: CongestionLevel) -> CrowdcastResult<()> {
        (**self).set_persisted_label(venue, level)
    }
}
