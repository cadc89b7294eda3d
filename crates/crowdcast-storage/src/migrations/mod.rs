//! Schema migrations using PRAGMA user_version.

pub mod v001_venues;
pub mod v002_visit_reports;

use rusqlite::Connection;

use crowdcast_core::errors::{CrowdcastResult, StorageError};

use crate::to_storage_err;

/// Highest schema version this build knows about.
pub const LATEST_VERSION: u32 = 2;

/// Run all pending migrations.
pub fn run_migrations(conn: &Connection) -> CrowdcastResult<()> {
    let current = current_version(conn)?;

    let migrations: &[(&str, u32)] = &[
        (v001_venues::MIGRATION_SQL, 1),
        (v002_visit_reports::MIGRATION_SQL, 2),
    ];

    for (sql, version) in migrations {
        if current < *version {
            conn.execute_batch(sql)
                .and_then(|_| conn.pragma_update(None, "user_version", version))
                .map_err(|e| StorageError::MigrationFailed {
                    version: *version,
                    reason: e.to_string(),
                })?;
            tracing::info!(version = version, "applied migration");
        }
    }

    Ok(())
}

/// Get the current schema version.
pub fn current_version(conn: &Connection) -> CrowdcastResult<u32> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))
}
