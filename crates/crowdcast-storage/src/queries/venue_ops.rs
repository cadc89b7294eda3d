//! venues CRUD: creation, persisted label, reference curve.

use rusqlite::{params, Connection, OptionalExtension};

use crowdcast_core::errors::{CrowdcastError, CrowdcastResult};
use crowdcast_core::models::{CongestionLevel, ReferenceCurve, VenueId};

use crate::to_storage_err;

/// Insert a venue and return its id.
pub fn insert_venue(conn: &Connection, name: &str) -> CrowdcastResult<VenueId> {
    conn.execute("INSERT INTO venues (name) VALUES (?1)", params![name])
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(VenueId(conn.last_insert_rowid()))
}

/// Whether a venue row exists.
pub fn venue_exists(conn: &Connection, venue: VenueId) -> CrowdcastResult<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM venues WHERE id = ?1)",
        params![venue.value()],
        |row| row.get(0),
    )
    .map_err(|e| to_storage_err(e.to_string()))
}

/// The persisted label. A stored value that does not parse reads as `None`.
pub fn get_label(conn: &Connection, venue: VenueId) -> CrowdcastResult<Option<CongestionLevel>> {
    let raw: Option<String> = select_column(conn, venue, "congestion")?;
    Ok(raw.and_then(|label| match label.parse() {
        Ok(level) => Some(level),
        Err(e) => {
            tracing::warn!(venue = %venue, error = %e, "ignoring unparsable persisted label");
            None
        }
    }))
}

/// Overwrite the persisted label.
pub fn set_label(conn: &Connection, venue: VenueId, level: CongestionLevel) -> CrowdcastResult<()> {
    update_column(conn, venue, "congestion", Some(level.as_str().to_string()), false)
}

/// The reference curve. A stored document that is not a JSON object reads as `None`.
pub fn get_reference_curve(
    conn: &Connection,
    venue: VenueId,
) -> CrowdcastResult<Option<ReferenceCurve>> {
    let raw: Option<String> = select_column(conn, venue, "reference_curve")?;
    Ok(raw.and_then(|json| match ReferenceCurve::from_json(&json) {
        Ok(curve) => Some(curve),
        Err(e) => {
            tracing::warn!(venue = %venue, error = %e, "ignoring malformed reference curve");
            None
        }
    }))
}

/// Replace the reference curve; `None` clears it.
pub fn set_reference_curve(
    conn: &Connection,
    venue: VenueId,
    curve: Option<&ReferenceCurve>,
) -> CrowdcastResult<()> {
    let json = curve.map(ReferenceCurve::to_json).transpose()?;
    update_column(conn, venue, "reference_curve", json, true)
}

/// Store a raw reference curve document as collected, without validation.
pub fn set_raw_reference_curve(conn: &Connection, venue: VenueId, json: &str) -> CrowdcastResult<()> {
    update_column(conn, venue, "reference_curve", Some(json.to_string()), true)
}

fn select_column(conn: &Connection, venue: VenueId, column: &str) -> CrowdcastResult<Option<String>> {
    let sql = format!("SELECT {column} FROM venues WHERE id = ?1");
    let row: Option<Option<String>> = conn
        .query_row(&sql, params![venue.value()], |row| row.get(0))
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    row.ok_or(CrowdcastError::VenueNotFound { id: venue.value() })
}

fn update_column(
    conn: &Connection,
    venue: VenueId,
    column: &str,
    value: Option<String>,
    touch: bool,
) -> CrowdcastResult<()> {
    // The label is a single-field write; only curve refreshes bump updated_at.
    let sql = if touch {
        format!(
            "UPDATE venues SET {column} = ?1, updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now') \
             WHERE id = ?2"
        )
    } else {
        format!("UPDATE venues SET {column} = ?1 WHERE id = ?2")
    };
    let changed = conn
        .execute(&sql, params![value, venue.value()])
        .map_err(|e| to_storage_err(e.to_string()))?;
    if changed == 0 {
        return Err(CrowdcastError::VenueNotFound { id: venue.value() });
    }
    Ok(())
}
