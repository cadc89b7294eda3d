//! PRAGMA configuration applied to every SQLite connection.
//!
//! WAL mode, NORMAL sync, 16MB page cache, foreign_keys ON, configurable
//! busy timeout.

use std::time::Duration;

use rusqlite::Connection;

use crowdcast_core::errors::CrowdcastResult;

use crate::to_storage_err;

/// Apply performance and safety pragmas to a connection.
pub fn apply_pragmas(conn: &Connection, busy_timeout_ms: u32) -> CrowdcastResult<()> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA cache_size = -16000;
        PRAGMA foreign_keys = ON;
        PRAGMA temp_store = MEMORY;
        ",
    )
    .map_err(|e| to_storage_err(format!("failed to apply pragmas: {e}")))?;

    conn.busy_timeout(Duration::from_millis(u64::from(busy_timeout_ms)))
        .map_err(|e| to_storage_err(format!("failed to set busy timeout: {e}")))?;
    Ok(())
}

/// Verify that WAL mode is active. Always false for in-memory databases.
pub fn verify_wal_mode(conn: &Connection) -> CrowdcastResult<bool> {
    let mode: String = conn
        .pragma_query_value(None, "journal_mode", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(mode.eq_ignore_ascii_case("wal"))
}
