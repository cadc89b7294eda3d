//! Error types for every crowdcast subsystem, folded into [`CrowdcastError`].

mod forecast_error;
mod storage_error;

pub use forecast_error::ForecastError;
pub use storage_error::StorageError;

/// Root error type for the crowdcast workspace.
#[derive(Debug, thiserror::Error)]
pub enum CrowdcastError {
    #[error("venue not found: {id}")]
    VenueNotFound { id: i64 },

    #[error("invalid congestion label: {label}")]
    InvalidLabel { label: String },

    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("forecast error: {0}")]
    ForecastError(#[from] ForecastError),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("config error: {0}")]
    ConfigError(String),
}

/// Convenience alias used across the workspace.
pub type CrowdcastResult<T> = Result<T, CrowdcastError>;
