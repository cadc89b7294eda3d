/// Crowdcast version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Number of weekdays in a reference curve (Monday = 0).
pub const DAYS_PER_WEEK: usize = 7;

/// Number of hourly samples per reference-curve day.
pub const HOURS_PER_DAY: usize = 24;

/// Upper bound of a reference-curve busyness percentage.
pub const MAX_PERCENT: u8 = 100;

/// Number of congestion classes the classifier distinguishes.
pub const NUM_LEVELS: usize = 3;

/// Number of temporal features fed to the classifier.
pub const NUM_FEATURES: usize = 4;

/// Longest accepted training lookback, in days.
pub const MAX_LOOKBACK_DAYS: i64 = 3_650;
