//! Cache Entry Module
//!
//! Defines the immutable record a cache store keeps per key.

use std::time::{SystemTime, UNIX_EPOCH};

// == Cache Entry ==
/// A stored value stamped with its insertion time.
///
/// Entries are never mutated after insertion. Replacing a key creates a new
/// entry with a fresh timestamp.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Insertion timestamp (Unix milliseconds)
    pub inserted_at: u64,
    /// Store-wide insertion counter, orders entries sharing a millisecond
    pub(crate) sequence: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry inserted at `inserted_at`.
    pub(crate) fn new(value: V, inserted_at: u64, sequence: u64) -> Self {
        Self {
            value,
            inserted_at,
            sequence,
        }
    }

    // == Age ==
    /// Returns the entry age in milliseconds at `now`.
    ///
    /// Clock readings from before insertion count as age zero.
    pub fn age_ms(&self, now: u64) -> u64 {
        now.saturating_sub(self.inserted_at)
    }

    // == Is Fresh ==
    /// Checks whether the entry can be trusted at `now` under `ttl_ms`.
    ///
    /// Boundary condition: an entry inserted at `T` is fresh for every `now` in
    /// `[T, T + ttl)` and stale from `T + ttl` onwards.
    pub fn is_fresh(&self, now: u64, ttl_ms: u64) -> bool {
        self.age_ms(now) < ttl_ms
    }

    // == Is Expired ==
    /// Checks whether a sweep at `now` should delete the entry.
    ///
    /// Sweeps only delete entries strictly older than the TTL, so an entry
    /// exactly `ttl` old is stale to readers but survives one more sweep.
    pub fn is_expired(&self, now: u64, ttl_ms: u64) -> bool {
        self.age_ms(now) > ttl_ms
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
