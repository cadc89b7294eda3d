// Single source of truth for all default values.

// --- Forecast: training window ---
pub const DEFAULT_LOOKBACK_DAYS: i64 = 30;
pub const DEFAULT_HALF_LIFE_HOURS: f64 = 24.0;
pub const DEFAULT_WEEKDAY_MATCH_BONUS: f64 = 2.0;

// --- Forecast: classifier ---
pub const DEFAULT_MIN_SAMPLES: usize = 20;
pub const DEFAULT_FULL_TRUST_SAMPLES: usize = 100;
pub const DEFAULT_REGULARIZATION_C: f64 = 0.8;
pub const DEFAULT_MAX_ITERATIONS: usize = 1_000;
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

// --- Forecast: blending ---
pub const DEFAULT_MODEL_WEIGHT_MIN: f64 = 0.55;
pub const DEFAULT_MODEL_WEIGHT_MAX: f64 = 0.90;
pub const DEFAULT_MODEL_WEIGHT_BASE: f64 = 0.70;

// --- Forecast: reference curve thresholds ---
pub const DEFAULT_LOW_BELOW_PERCENT: u8 = 30;
pub const DEFAULT_HIGH_FROM_PERCENT: u8 = 60;

// --- Forecast: request shape ---
pub const DEFAULT_OFFSETS: [i64; 5] = [0, 10, 20, 30, 60];
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 540; // Asia/Seoul

// --- Cache ---
pub const DEFAULT_BUCKET_MINUTES: u32 = 5;
pub const DEFAULT_CACHE_MAX_ENTRIES: u64 = 4_096;

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "crowdcast.db";
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
