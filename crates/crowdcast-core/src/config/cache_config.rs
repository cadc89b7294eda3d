use serde::{Deserialize, Serialize};

use super::defaults;

/// "Now" label cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Width of a memoization bucket in minutes.
    pub bucket_minutes: u32,
    /// Upper bound on memoized (venue, bucket) entries.
    pub max_entries: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            bucket_minutes: defaults::DEFAULT_BUCKET_MINUTES,
            max_entries: defaults::DEFAULT_CACHE_MAX_ENTRIES,
        }
    }
}
