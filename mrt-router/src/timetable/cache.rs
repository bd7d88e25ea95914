//! Caching layer for schedule loads.
//!
//! A route search asks for the same few station schedules many times, and
//! each uncached load parses a CSV file. Loaded schedules are kept per
//! (station, day group) for a bounded time.

use std::time::Duration;

use moka::sync::Cache as MokaCache;

use crate::domain::{DayGroup, Station};

use super::{Schedule, ScheduleError, ScheduleSource};

/// Cache key: one schedule file.
type ScheduleKey = (Station, DayGroup);

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached schedules.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_capacity: 1000,
        }
    }
}

/// Schedule source with caching.
///
/// Only successful loads are cached; errors are returned to the caller
/// and retried on the next request.
pub struct CachedSchedule<S> {
    inner: S,
    schedules: MokaCache<ScheduleKey, Schedule>,
}

impl<S> CachedSchedule<S> {
    pub fn new(inner: S, config: &CacheConfig) -> Self {
        let schedules = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, schedules }
    }

    /// Access the underlying source for loads that bypass the cache.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Number of cached schedules (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.schedules.run_pending_tasks();
        self.schedules.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.schedules.invalidate_all();
    }
}

impl<S: ScheduleSource> ScheduleSource for CachedSchedule<S> {
    fn load(&self, station: Station, group: DayGroup) -> Result<Schedule, ScheduleError> {
        let key = (station, group);
        if let Some(cached) = self.schedules.get(&key) {
            return Ok(cached);
        }

        let trains = self.inner.load(station, group)?;
        self.schedules.insert(key, Schedule::clone(&trains));
        Ok(trains)
    }
}
