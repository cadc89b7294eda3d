//! v002: visit_reports, indexed for per-venue time-window scans.

pub const MIGRATION_SQL: &str = "
CREATE TABLE IF NOT EXISTS visit_reports (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    venue_id    INTEGER NOT NULL,
    congestion  TEXT,
    created_at  TEXT NOT NULL,
    FOREIGN KEY (venue_id) REFERENCES venues(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_visit_reports_venue_time ON visit_reports(venue_id, created_at);
";
