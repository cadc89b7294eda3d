//! # crowdcast-observability
//!
//! Structured tracing with span definitions, lock-free forecast metrics, and
//! degradation event tracking for the soft-fail paths of the forecaster.

pub mod degradation;
pub mod metrics;
pub mod tracing_setup;

pub use degradation::{DegradationTracker, RecoveryStatus, TrackedDegradation};
pub use metrics::{ForecastMetrics, ForecastMetricsSnapshot};
