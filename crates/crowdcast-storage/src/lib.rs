//! # crowdcast-storage
//!
//! SQLite entity store backing the forecaster: venues with their persisted
//! "now" label and reference curve, and the visit reports used for training.
//! Implements [`IVenueStore`](crowdcast_core::traits::IVenueStore).

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StorageEngine;

use crowdcast_core::errors::{CrowdcastError, StorageError};

/// Wrap a SQLite failure message as a workspace error.
pub(crate) fn to_storage_err(message: String) -> CrowdcastError {
    CrowdcastError::StorageError(StorageError::SqliteError { message })
}
