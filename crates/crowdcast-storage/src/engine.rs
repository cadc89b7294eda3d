//! StorageEngine: owns the connection, runs migrations, implements IVenueStore.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crowdcast_core::config::StorageConfig;
use crowdcast_core::config::defaults::DEFAULT_BUSY_TIMEOUT_MS;
use crowdcast_core::errors::CrowdcastResult;
use crowdcast_core::models::{CongestionLevel, ReferenceCurve, VenueId, VisitReport};
use crowdcast_core::traits::IVenueStore;

use crate::migrations;
use crate::pool::{pragmas, WriteConnection};
use crate::queries::{report_ops, venue_ops};

/// SQLite-backed venue store.
pub struct StorageEngine {
    conn: WriteConnection,
    db_path: Option<PathBuf>,
}

impl StorageEngine {
    /// Open (creating if needed) a database file.
    pub fn open(path: &Path) -> CrowdcastResult<Self> {
        Self::open_with_timeout(path, DEFAULT_BUSY_TIMEOUT_MS)
    }

    /// Open the database named by a storage config section.
    pub fn from_config(config: &StorageConfig) -> CrowdcastResult<Self> {
        Self::open_with_timeout(Path::new(&config.db_path), config.busy_timeout_ms)
    }

    fn open_with_timeout(path: &Path, busy_timeout_ms: u32) -> CrowdcastResult<Self> {
        let engine = Self {
            conn: WriteConnection::open(path, busy_timeout_ms)?,
            db_path: Some(path.to_path_buf()),
        };
        engine.initialize()?;
        Ok(engine)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> CrowdcastResult<Self> {
        let engine = Self {
            conn: WriteConnection::open_in_memory()?,
            db_path: None,
        };
        engine.initialize()?;
        Ok(engine)
    }

    fn initialize(&self) -> CrowdcastResult<()> {
        self.conn.with_conn_sync(migrations::run_migrations)
    }

    /// Database file path, `None` when in memory.
    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    /// Applied schema version.
    pub fn schema_version(&self) -> CrowdcastResult<u32> {
        self.conn.with_conn_sync(migrations::current_version)
    }

    /// Whether the connection runs in WAL mode.
    pub fn is_wal(&self) -> CrowdcastResult<bool> {
        self.conn.with_conn_sync(pragmas::verify_wal_mode)
    }

    pub fn insert_venue(&self, name: &str) -> CrowdcastResult<VenueId> {
        self.conn
            .with_conn_sync(|conn| venue_ops::insert_venue(conn, name))
    }

    pub fn insert_report(&self, report: &VisitReport) -> CrowdcastResult<i64> {
        self.conn
            .with_conn_sync(|conn| report_ops::insert_report(conn, report))
    }

    /// Insert many reports atomically.
    pub fn insert_reports(&self, reports: &[VisitReport]) -> CrowdcastResult<usize> {
        self.conn
            .with_conn_sync(|conn| report_ops::insert_reports(conn, reports))
    }

    /// Replace a venue's reference curve; `None` clears it.
    pub fn set_reference_curve(
        &self,
        venue: VenueId,
        curve: Option<&ReferenceCurve>,
    ) -> CrowdcastResult<()> {
        self.conn
            .with_conn_sync(|conn| venue_ops::set_reference_curve(conn, venue, curve))
    }

    /// Store a reference curve document exactly as collected.
    ///
    /// Malformed days are kept in the database and dropped when read.
    pub fn set_raw_reference_curve(&self, venue: VenueId, json: &str) -> CrowdcastResult<()> {
        self.conn
            .with_conn_sync(|conn| venue_ops::set_raw_reference_curve(conn, venue, json))
    }

    pub fn report_count(&self, venue: VenueId) -> CrowdcastResult<usize> {
        self.conn
            .with_conn_sync(|conn| report_ops::report_count(conn, venue))
    }
}

impl IVenueStore for StorageEngine {
    fn fetch_reports(
        &self,
        venue: VenueId,
        since: DateTime<Utc>,
    ) -> CrowdcastResult<Vec<VisitReport>> {
        self.conn
            .with_conn_sync(|conn| report_ops::reports_since(conn, venue, since))
    }

    fn reference_curve(&self, venue: VenueId) -> CrowdcastResult<Option<ReferenceCurve>> {
        self.conn
            .with_conn_sync(|conn| venue_ops::get_reference_curve(conn, venue))
    }

    fn persisted_label(&self, venue: VenueId) -> CrowdcastResult<Option<CongestionLevel>> {
        self.conn
            .with_conn_sync(|conn| venue_ops::get_label(conn, venue))
    }

    fn set_persisted_label(&self, venue: VenueId, level: CongestionLevel) -> CrowdcastResult<()> {
        self.conn
            .with_conn_sync(|conn| venue_ops::set_label(conn, venue, level))
    }
}
