use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::{DAYS_PER_WEEK, HOURS_PER_DAY, MAX_PERCENT};
use crate::errors::{CrowdcastResult, ForecastError};

/// Hourly busyness percentages for one weekday.
pub type DayCurve = [u8; HOURS_PER_DAY];

/// Typical busyness by hour of week for a venue.
///
/// Weekday `0` is Monday. A day is either a complete 24-hour curve with every
/// value in `0..=100`, or absent. Validation happens once, when the curve is
/// built from its stored weekday-keyed JSON form; a malformed day is dropped
/// and behaves exactly like a missing one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, serde_json::Value>",
    into = "BTreeMap<String, Vec<u8>>"
)]
pub struct ReferenceCurve {
    days: [Option<DayCurve>; DAYS_PER_WEEK],
}

impl ReferenceCurve {
    /// An empty curve (no weekday has data).
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the stored weekday-keyed JSON object, e.g. `{"0": [..24 ints..]}`.
    ///
    /// Fails only when the document is not a JSON object; bad days are dropped.
    pub fn from_json(raw: &str) -> CrowdcastResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Serialize to the weekday-keyed JSON object, valid days only.
    pub fn to_json(&self) -> CrowdcastResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Build from a weekday-keyed map, dropping every malformed entry.
    pub fn from_weekday_map(map: BTreeMap<String, serde_json::Value>) -> Self {
        let mut curve = Self::new();
        for (key, value) in &map {
            match parse_day(key, value) {
                Ok((weekday, hours)) => curve.days[weekday] = Some(hours),
                Err(e) => tracing::debug!(error = %e, "dropping reference curve day"),
            }
        }
        curve
    }

    /// Install a full day.
    pub fn set_day(&mut self, weekday: usize, hours: DayCurve) -> Result<(), ForecastError> {
        if weekday >= DAYS_PER_WEEK {
            return Err(malformed(weekday.to_string(), "weekday out of range"));
        }
        if let Some(bad) = hours.iter().find(|&&p| p > MAX_PERCENT) {
            return Err(malformed(
                weekday.to_string(),
                &format!("percentage {bad} above {MAX_PERCENT}"),
            ));
        }
        self.days[weekday] = Some(hours);
        Ok(())
    }

    /// The curve for a weekday, if present.
    pub fn day(&self, weekday: usize) -> Option<&DayCurve> {
        self.days.get(weekday).and_then(Option::as_ref)
    }

    /// Percentage at a weekday and hour, if that day is present.
    pub fn percent(&self, weekday: usize, hour: usize) -> Option<u8> {
        self.day(weekday).and_then(|d| d.get(hour).copied())
    }

    /// Number of weekdays carrying data.
    pub fn valid_days(&self) -> usize {
        self.days.iter().filter(|d| d.is_some()).count()
    }

    /// Whether no weekday carries data.
    pub fn is_empty(&self) -> bool {
        self.valid_days() == 0
    }
}

impl From<BTreeMap<String, serde_json::Value>> for ReferenceCurve {
    fn from(map: BTreeMap<String, serde_json::Value>) -> Self {
        Self::from_weekday_map(map)
    }
}

impl From<ReferenceCurve> for BTreeMap<String, Vec<u8>> {
    fn from(curve: ReferenceCurve) -> Self {
        curve
            .days
            .iter()
            .enumerate()
            .filter_map(|(weekday, day)| day.map(|hours| (weekday.to_string(), hours.to_vec())))
            .collect()
    }
}

fn parse_day(key: &str, value: &serde_json::Value) -> Result<(usize, DayCurve), ForecastError> {
    let weekday: usize = key
        .trim()
        .parse()
        .ok()
        .filter(|w| *w < DAYS_PER_WEEK)
        .ok_or_else(|| malformed(key.to_string(), "key is not a weekday index 0-6"))?;

    let items = value
        .as_array()
        .ok_or_else(|| malformed(key.to_string(), "value is not an array"))?;
    if items.len() != HOURS_PER_DAY {
        return Err(malformed(
            key.to_string(),
            &format!("expected {HOURS_PER_DAY} hours, found {}", items.len()),
        ));
    }

    let mut hours = [0u8; HOURS_PER_DAY];
    for (slot, item) in hours.iter_mut().zip(items) {
        *slot = item
            .as_u64()
            .filter(|p| *p <= u64::from(MAX_PERCENT))
            .map(|p| p as u8)
            .ok_or_else(|| malformed(key.to_string(), &format!("bad percentage {item}")))?;
    }
    Ok((weekday, hours))
}

fn malformed(weekday: String, reason: &str) -> ForecastError {
    ForecastError::MalformedReferenceCurve {
        weekday,
        reason: reason.to_string(),
    }
}
