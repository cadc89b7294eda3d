/// Forecasting failures.
///
/// None of these escape the engine's soft-fail boundary. They are carried as
/// values so the degraded path can record why it was taken.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ForecastError {
    #[error("insufficient training data: {samples} samples, {required} required")]
    InsufficientData { samples: usize, required: usize },

    #[error("malformed reference curve for weekday {weekday}: {reason}")]
    MalformedReferenceCurve { weekday: String, reason: String },

    #[error("model fit failed: {reason}")]
    ModelFitFailure { reason: String },

    #[error("cached computation failed: {reason}")]
    CacheComputationFailure { reason: String },
}
