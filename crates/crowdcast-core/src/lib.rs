//! # crowdcast-core
//!
//! Foundation crate for the crowdcast congestion forecaster.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::CrowdcastConfig;
pub use errors::{CrowdcastError, CrowdcastResult};
pub use models::{CongestionLevel, ForecastItem, ReferenceCurve, VenueId, VisitReport};
