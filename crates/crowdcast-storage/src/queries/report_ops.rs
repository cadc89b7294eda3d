//! visit_reports inserts and time-window scans.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use crowdcast_core::errors::{CrowdcastError, CrowdcastResult};
use crowdcast_core::models::{VenueId, VisitReport};

use super::{format_timestamp, parse_timestamp, venue_ops};
use crate::to_storage_err;

/// Insert a report and return its row id. Unknown venues are rejected.
pub fn insert_report(conn: &Connection, report: &VisitReport) -> CrowdcastResult<i64> {
    if !venue_ops::venue_exists(conn, report.venue_id)? {
        return Err(CrowdcastError::VenueNotFound {
            id: report.venue_id.value(),
        });
    }
    conn.execute(
        "INSERT INTO visit_reports (venue_id, congestion, created_at) VALUES (?1, ?2, ?3)",
        params![
            report.venue_id.value(),
            report.congestion,
            format_timestamp(&report.timestamp)
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(conn.last_insert_rowid())
}

/// Insert many reports in one transaction.
pub fn insert_reports(conn: &Connection, reports: &[VisitReport]) -> CrowdcastResult<usize> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(e.to_string()))?;
    for report in reports {
        insert_report(&tx, report)?;
    }
    tx.commit().map_err(|e| to_storage_err(e.to_string()))?;
    Ok(reports.len())
}

/// Reports for a venue at or after `since`, oldest first.
pub fn reports_since(
    conn: &Connection,
    venue: VenueId,
    since: DateTime<Utc>,
) -> CrowdcastResult<Vec<VisitReport>> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT congestion, created_at FROM visit_reports
             WHERE venue_id = ?1 AND created_at >= ?2
             ORDER BY created_at, id",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![venue.value(), format_timestamp(&since)], |row| {
            Ok((row.get::<_, Option<String>>(0)?, row.get::<_, String>(1)?))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut reports = Vec::new();
    for row in rows {
        let (congestion, created_at) = row.map_err(|e| to_storage_err(e.to_string()))?;
        reports.push(VisitReport {
            venue_id: venue,
            timestamp: parse_timestamp("visit_reports", &created_at)?,
            congestion,
        });
    }
    Ok(reports)
}

/// Number of reports stored for a venue.
pub fn report_count(conn: &Connection, venue: VenueId) -> CrowdcastResult<usize> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM visit_reports WHERE venue_id = ?1",
            params![venue.value()],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(usize::try_from(count).unwrap_or_default())
}
