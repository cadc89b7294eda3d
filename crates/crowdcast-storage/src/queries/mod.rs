//! SQL query modules and the shared timestamp encoding.

pub mod report_ops;
pub mod venue_ops;

use chrono::{DateTime, Utc};

use crowdcast_core::errors::{CrowdcastResult, StorageError};

/// Fixed-width UTC timestamp layout; lexical order equals time order.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

pub fn parse_timestamp(table: &str, raw: &str) -> CrowdcastResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| {
            StorageError::CorruptRow {
                table: table.to_string(),
                details: format!("bad timestamp {raw:?}: {e}"),
            }
            .into()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamps_are_fixed_width_and_ordered() {
        let a = Utc.with_ymd_and_hms(2025, 3, 5, 9, 0, 0).unwrap();
        let b = a + chrono::Duration::microseconds(1);
        let (fa, fb) = (format_timestamp(&a), format_timestamp(&b));
        assert_eq!(fa, "2025-03-05T09:00:00.000000Z");
        assert_eq!(fa.len(), fb.len());
        assert!(fa < fb);
        assert_eq!(parse_timestamp("t", &fb).unwrap(), b);
    }

    #[test]
    fn unparsable_timestamp_is_a_corrupt_row() {
        let err = parse_timestamp("visit_reports", "yesterday").unwrap_err();
        assert!(err.to_string().contains("corrupt row in visit_reports"));
    }
}
