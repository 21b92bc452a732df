//! In-memory query cache for upstream search results
//!
//! Provides a `QueryCache` that keeps the last successful result list per
//! [`CacheKey`] together with the time it was fetched. Entries older than the
//! freshness window are reported as misses but stay in the map until the next
//! successful fetch for the same key overwrites them.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use super::clock::{Clock, SystemClock};
use super::key::CacheKey;

/// How long a fetched result list is served without re-fetching
pub const FRESHNESS_WINDOW: Duration = Duration::from_millis(60_000);

/// A stored result list with the time it was fetched
#[derive(Debug, Clone)]
struct CacheEntry<T> {
    /// The cached results, in upstream order
    data: Vec<T>,
    /// When the results were stored, in epoch milliseconds
    fetched_at_ms: u64,
}

/// Result of a cache hit
#[derive(Debug, Clone, PartialEq)]
pub struct CachedData<T> {
    /// The cached results
    pub data: Vec<T>,
    /// When the results were originally fetched
    pub cached_at: DateTime<Utc>,
}

/// Time-expiring map from search key to result list
///
/// Reads and writes go through a single `RwLock`, so a reader sees either the
/// previous entry or the new one, never a partial write. Staleness is decided
/// lazily on `get`; there is no background sweep and no size bound.
#[derive(Debug)]
pub struct QueryCache<T> {
    entries: RwLock<HashMap<CacheKey, CacheEntry<T>>>,
    clock: Arc<dyn Clock>,
    freshness: Duration,
}

impl<T: Clone> Default for QueryCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> QueryCache<T> {
    /// Creates an empty cache using the system clock and the default freshness window
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates an empty cache reading time from `clock`
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            clock,
            freshness: FRESHNESS_WINDOW,
        }
    }

    /// Overrides the freshness window
    pub fn with_freshness(mut self, freshness: Duration) -> Self {
        self.freshness = freshness;
        self
    }

    /// Returns the configured freshness window
    pub fn freshness(&self) -> Duration {
        self.freshness
    }

    /// Reads a fresh entry for `key`
    ///
    /// Returns `None` both when nothing was ever stored and when the stored
    /// entry is older than the freshness window.
    pub fn get(&self, key: &CacheKey) -> Option<CachedData<T>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let entry = entries.get(key)?;

        let age_ms = self.clock.now_ms().saturating_sub(entry.fetched_at_ms);
        if u128::from(age_ms) >= self.freshness.as_millis() {
            return None;
        }

        Some(CachedData {
            data: entry.data.clone(),
            cached_at: to_datetime(entry.fetched_at_ms),
        })
    }

    /// Stores `data` for `key` stamped with the current time, replacing any previous entry
    pub fn put(&self, key: CacheKey, data: Vec<T>) {
        let entry = CacheEntry {
            data,
            fetched_at_ms: self.clock.now_ms(),
        };
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, entry);
    }

    /// Number of stored entries, stale ones included
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing has been stored yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn to_datetime(epoch_ms: u64) -> DateTime<Utc> {
    i64::try_from(epoch_ms)
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .unwrap_or_default()
}
