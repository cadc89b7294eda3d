//! Degradation tracking for the forecaster's soft-fail paths.

pub mod tracker;

pub use tracker::{DegradationTracker, RecoveryStatus, TrackedDegradation};
