//! Span definitions per operation: forecast, training, cache lookup.
//!
//! Each span carries its identifying fields via the `tracing` crate.

/// Create a forecast span.
#[macro_export]
macro_rules! forecast_span {
    ($venue:expr, $offsets:expr) => {
        tracing::info_span!("crowdcast.forecast", venue = %$venue, offsets = ?$offsets)
    };
}

/// Create a classifier training span.
#[macro_export]
macro_rules! training_span {
    ($venue:expr, $samples:expr) => {
        tracing::debug_span!("crowdcast.training", venue = %$venue, samples = $samples)
    };
}

/// Create a "now" cache lookup span.
#[macro_export]
macro_rules! cache_span {
    ($venue:expr, $bucket:expr) => {
        tracing::debug_span!("crowdcast.cache", venue = %$venue, bucket = %$bucket)
    };
}
