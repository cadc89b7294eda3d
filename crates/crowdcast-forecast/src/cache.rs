//! Time-bucketed memoization of a venue's "now" level.
//!
//! Uses `moka::sync::Cache` keyed by `(venue, bucket)`. Keys change every
//! bucket, so old entries are never requested again; they age out through
//! the TTL (two buckets) or the capacity bound. `try_get_with` coalesces
//! concurrent first lookups of a key into one computation, and failed
//! computations are not stored. Hit and miss counting belongs to the
//! caller, which learns which case applied from [`Lookup::computed`].

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Datelike, TimeZone, Timelike};
use crowdcast_core::config::CacheConfig;
use crowdcast_core::errors::CrowdcastError;
use crowdcast_core::models::{CongestionLevel, VenueId};
use moka::sync::Cache;

/// A wall-clock bucket: the hour plus `minute / bucket_minutes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BucketKey {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub slot: u32,
}

impl BucketKey {
    /// Bucket containing `at`, in `at`'s own offset. A zero width is treated as 1.
    pub fn for_time<Tz: TimeZone>(at: &DateTime<Tz>, bucket_minutes: u32) -> Self {
        Self {
            year: at.year(),
            month: at.month(),
            day: at.day(),
            hour: at.hour(),
            slot: at.minute() / bucket_minutes.max(1),
        }
    }
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}{:02}{:02}{:02}_{}",
            self.year, self.month, self.day, self.hour, self.slot
        )
    }
}

/// Result of a cache lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lookup {
    pub level: CongestionLevel,
    /// Whether this caller ran the computation.
    pub computed: bool,
}

/// Bounded "now" level cache.
pub struct NowCache {
    cache: Cache<(VenueId, BucketKey), CongestionLevel>,
    bucket_minutes: u32,
}

impl NowCache {
    pub fn new(bucket_minutes: u32, max_entries: u64) -> Self {
        let bucket_minutes = bucket_minutes.max(1);
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(Duration::from_secs(u64::from(bucket_minutes) * 60 * 2))
            .build();
        Self {
            cache,
            bucket_minutes,
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.bucket_minutes, config.max_entries)
    }

    /// Bucket width in minutes.
    pub fn bucket_minutes(&self) -> u32 {
        self.bucket_minutes
    }

    /// Bucket for `at` under this cache's width.
    pub fn bucket_for<Tz: TimeZone>(&self, at: &DateTime<Tz>) -> BucketKey {
        BucketKey::for_time(at, self.bucket_minutes)
    }

    /// Return the memoized level for `(venue, bucket)` or compute it.
    ///
    /// At most one caller runs `compute` per key at a time; others block and
    /// share its result. An error is handed to every waiting caller and
    /// nothing is cached.
    pub fn get_or_try_compute<F>(
        &self,
        venue: VenueId,
        bucket: BucketKey,
        compute: F,
    ) -> Result<Lookup, Arc<CrowdcastError>>
    where
        F: FnOnce() -> Result<CongestionLevel, CrowdcastError>,
    {
        let mut computed = false;
        let level = self.cache.try_get_with((venue, bucket), || {
            computed = true;
            compute()
        })?;
        Ok(Lookup { level, computed })
    }

    /// Memoized level without computing.
    pub fn peek(&self, venue: VenueId, bucket: BucketKey) -> Option<CongestionLevel> {
        self.cache.get(&(venue, bucket))
    }

    /// Drop every entry for every venue.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    /// Number of entries currently in the cache.
    pub fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }
}

impl Default for NowCache {
    fn default() -> Self {
        Self::from_config(&CacheConfig::default())
    }
}
