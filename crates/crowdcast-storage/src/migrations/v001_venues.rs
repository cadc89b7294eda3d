//! v001: venues with their persisted "now" label and reference curve.

pub const MIGRATION_SQL: &str = "
CREATE TABLE IF NOT EXISTS venues (
    id              INTEGER PRIMARY KEY,
    name            TEXT NOT NULL,
    congestion      TEXT,
    reference_curve TEXT,
    updated_at      TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);
";
