//! Single connection behind `std::sync::Mutex`. Serialized access.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use crowdcast_core::errors::CrowdcastResult;

use super::pragmas::apply_pragmas;
use crate::to_storage_err;

/// A single connection protected by a mutex.
pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    /// Open a connection to the given database path.
    pub fn open(path: &Path, busy_timeout_ms: u32) -> CrowdcastResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn, busy_timeout_ms)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> CrowdcastResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn, 0)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Acquire the lock and run a closure with the connection.
    pub fn with_conn_sync<F, T>(&self, f: F) -> CrowdcastResult<T>
    where
        F: FnOnce(&Connection) -> CrowdcastResult<T>,
    {
        let guard = self
            .conn
            .lock()
            .map_err(|e| to_storage_err(format!("connection lock poisoned: {e}")))?;
        f(&guard)
    }
}
