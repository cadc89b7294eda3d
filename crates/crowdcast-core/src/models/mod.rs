mod congestion;
mod degradation_event;
mod forecast_item;
mod reference_curve;
mod venue;
mod visit_report;

pub use congestion::CongestionLevel;
pub use degradation_event::DegradationEvent;
pub use forecast_item::ForecastItem;
pub use reference_curve::{DayCurve, ReferenceCurve};
pub use venue::VenueId;
pub use visit_report::VisitReport;
