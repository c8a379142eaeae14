//! Cache Statistics Module
//!
//! Tracks lookup and eviction counters for one cache store.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Lookups that found a fresh entry
    pub hits: u64,
    /// Lookups that found nothing or only a stale entry
    pub misses: u64,
    /// Entries removed by overflow sweeps
    pub evictions: u64,
    /// Entries removed by expiry sweeps
    pub expired: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_evictions(&mut self, count: usize) {
        self.evictions += count as u64;
    }

    pub fn record_expired(&mut self, count: usize) {
        self.expired += count as u64;
    }
}

// == Lookup Counters ==
/// Hit and miss counters that can be bumped through a shared reference.
///
/// Lookups only hold the store's read lock, so these counters cannot live in
/// the `&mut`-updated [`CacheStats`].
#[derive(Debug, Default)]
pub struct LookupCounters {
    hits: AtomicU64,
    misses: AtomicU64,
}

impl LookupCounters {
    pub fn record(&self, hit: bool) {
        let counter = if hit { &self.hits } else { &self.misses };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = CacheStats::new();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.evictions, 0);
        assert_eq!(stats.expired, 0);
    }

    #[test]
    fn test_hit_rate() {
        let stats = CacheStats {
            hits: 3,
            misses: 1,
            ..CacheStats::default()
        };

        assert!((stats.hit_rate() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hit_rate_no_lookups() {
        assert_eq!(CacheStats::new().hit_rate(), 0.0);
    }

    #[test]
    fn test_sweep_counters_accumulate() {
        let mut stats = CacheStats::new();
        stats.record_evictions(3);
        stats.record_evictions(2);
        stats.record_expired(4);

        assert_eq!(stats.evictions, 5);
        assert_eq!(stats.expired, 4);
    }

    #[test]
    fn test_lookup_counters_through_shared_ref() {
        let counters = LookupCounters::default();
        let shared = &counters;

        shared.record(true);
        shared.record(false);
        shared.record(true);

        assert_eq!(counters.hits(), 2);
        assert_eq!(counters.misses(), 1);
    }
}
