//! Forecast metrics.
//!
//! [`ForecastMetrics`] is shared by reference across request threads, so every
//! counter is an atomic; [`ForecastMetricsSnapshot`] is the serializable view.

pub mod forecast_metrics;

pub use forecast_metrics::{ForecastMetrics, ForecastMetricsSnapshot};
