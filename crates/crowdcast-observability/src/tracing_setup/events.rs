//! Structured log events for key forecasting operations.
//!
//! Each function emits a `tracing` event with structured fields.

/// Log a degradation trigger event.
pub fn degradation_triggered(component: &str, failure: &str, fallback: &str) {
    tracing::warn!(
        event = "degradation_triggered",
        component = %component,
        failure = %failure,
        fallback = %fallback,
        "degradation triggered"
    );
}

/// Log a completed classifier fit.
pub fn model_trained(venue: i64, samples: usize, iterations: usize, converged: bool) {
    tracing::debug!(
        event = "model_trained",
        venue = venue,
        samples = samples,
        iterations = iterations,
        converged = converged,
        "congestion model trained"
    );
}

/// Log a write-back of the persisted "now" level.
pub fn label_written(venue: i64, previous: Option<&str>, current: &str) {
    tracing::info!(
        event = "label_written",
        venue = venue,
        previous = ?previous,
        current = %current,
        "persisted congestion label updated"
    );
}
