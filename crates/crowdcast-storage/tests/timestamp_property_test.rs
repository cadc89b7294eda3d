//! Stored timestamps sort lexically in time order.

use chrono::{TimeZone, Utc};
use crowdcast_storage::queries::{format_timestamp, parse_timestamp};
use proptest::prelude::*;

// 2000-01-01 .. 2100-01-01 in microseconds.
const MIN_MICROS: i64 = 946_684_800_000_000;
const MAX_MICROS: i64 = 4_102_444_800_000_000;

proptest! {
    #[test]
    fn lexical_order_matches_time_order(a in MIN_MICROS..MAX_MICROS, b in MIN_MICROS..MAX_MICROS) {
        let ta = Utc.timestamp_micros(a).unwrap();
        let tb = Utc.timestamp_micros(b).unwrap();
        let (fa, fb) = (format_timestamp(&ta), format_timestamp(&tb));
        prop_assert_eq!(fa.len(), fb.len());
        prop_assert_eq!(fa.cmp(&fb), ta.cmp(&tb));
        prop_assert_eq!(parse_timestamp("visit_reports", &fa).unwrap(), ta);
    }
}
