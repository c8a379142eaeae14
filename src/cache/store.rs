//! Cache Store Module
//!
//! Bounded, TTL-aware key/value container. Reads never enforce freshness and
//! nothing is deleted outside the two sweep operations.

use std::collections::HashMap;

use crate::cache::stats::LookupCounters;
use crate::cache::{current_timestamp_ms, CacheEntry, CacheStats};

// == Cache Store ==
/// In-memory store keyed by opaque cache-key strings.
///
/// `len() <= max_size` holds after `sweep_overflow`, not continuously: inserts
/// may overshoot until the next sweep.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Sweep counters
    stats: CacheStats,
    /// Hit and miss counters, updated under the read lock
    lookups: LookupCounters,
    /// Maximum age in milliseconds before an entry is stale
    ttl_ms: u64,
    /// Entry-count ceiling enforced by overflow sweeps
    max_size: usize,
    /// Next insertion sequence number
    next_sequence: u64,
}

impl<V> CacheStore<V> {
    // == Constructor ==
    /// Creates an empty store.
    ///
    /// # Arguments
    /// * `max_size` - Entry-count ceiling enforced by `sweep_overflow`
    /// * `ttl_secs` - Maximum entry age in seconds
    pub fn new(max_size: usize, ttl_secs: u64) -> Self {
        Self::with_ttl_ms(max_size, ttl_secs.saturating_mul(1000))
    }

    /// Creates an empty store with a millisecond TTL.
    pub fn with_ttl_ms(max_size: usize, ttl_ms: u64) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            lookups: LookupCounters::default(),
            ttl_ms,
            max_size,
            next_sequence: 0,
        }
    }

    // == Get ==
    /// Pure lookup. Returns stale entries too; callers compare
    /// `entry.is_fresh(now, store.ttl_ms())` before trusting the value.
    pub fn get(&self, key: &str) -> Option<&CacheEntry<V>> {
        self.entries.get(key)
    }

    // == Set ==
    /// Inserts or overwrites `key` stamped with the current time.
    pub fn set(&mut self, key: impl Into<String>, value: V) {
        self.set_at(key, value, current_timestamp_ms());
    }

    /// Inserts or overwrites `key` stamped with `now`.
    pub fn set_at(&mut self, key: impl Into<String>, value: V, now: u64) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.entries
            .insert(key.into(), CacheEntry::new(value, now, sequence));
    }

    // == Sweep Expired ==
    /// Removes every entry strictly older than the TTL at `now`.
    ///
    /// Returns the number of entries removed.
    pub fn sweep_expired(&mut self, now: u64) -> usize {
        let ttl_ms = self.ttl_ms;
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now, ttl_ms));

        let removed = before - self.entries.len();
        self.stats.record_expired(removed);
        removed
    }

    // == Sweep Overflow ==
    /// Deletes the oldest-inserted entries until `len() <= max_size`.
    ///
    /// Ordering is by insertion time, not by last access.
    /// Returns the number of entries removed.
    pub fn sweep_overflow(&mut self) -> usize {
        let excess = self.entries.len().saturating_sub(self.max_size);
        if excess == 0 {
            return 0;
        }

        let mut order: Vec<(u64, u64, &String)> = self
            .entries
            .iter()
            .map(|(key, entry)| (entry.inserted_at, entry.sequence, key))
            .collect();
        order.sort_unstable();

        let victims: Vec<String> = order
            .into_iter()
            .take(excess)
            .map(|(_, _, key)| key.clone())
            .collect();

        for key in &victims {
            self.entries.remove(key);
        }

        self.stats.record_evictions(victims.len());
        victims.len()
    }

    // == Lookup Accounting ==
    /// Records the outcome of a caller-side freshness check.
    ///
    /// Takes `&self` so lookups can run under a shared read lock.
    pub fn record_lookup(&self, hit: bool) {
        self.lookups.record(hit);
    }

    // == Stats ==
    /// Returns a snapshot of the store counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.lookups.hits(),
            misses: self.lookups.misses(),
            ..self.stats.clone()
        }
    }

    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn ttl_ms(&self) -> u64 {
        self.ttl_ms
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_new() {
        let store: CacheStore<String> = CacheStore::new(100, 300);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.max_size(), 100);
        assert_eq!(store.ttl_ms(), 300_000);
    }

    #[test]
    fn test_store_set_and_get() {
        let mut store = CacheStore::new(100, 300);

        store.set("key1", "value1".to_string());
        let entry = store.get("key1").unwrap();

        assert_eq!(entry.value, "value1");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let store: CacheStore<String> = CacheStore::new(100, 300);
        assert!(store.get("nonexistent").is_none());
    }

    #[test]
    fn test_store_overwrite_restamps_entry() {
        let mut store = CacheStore::with_ttl_ms(100, 1_000);

        store.set_at("key1", "value1", 10);
        store.set_at("key1", "value2", 20);

        let entry = store.get("key1").unwrap();
        assert_eq!(entry.value, "value2");
        assert_eq!(entry.inserted_at, 20);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_get_returns_stale_entries() {
        let mut store = CacheStore::with_ttl_ms(100, 1_000);
        store.set_at("key1", "value1", 0);

        let entry = store.get("key1").unwrap();
        assert!(!entry.is_fresh(5_000, store.ttl_ms()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_set_does_not_evict() {
        let mut store = CacheStore::with_ttl_ms(2, 1_000);

        store.set_at("a", 1, 0);
        store.set_at("b", 2, 1);
        store.set_at("c", 3, 2);

        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_sweep_expired() {
        let mut store = CacheStore::with_ttl_ms(100, 1_000);

        store.set_at("old", 1, 0);
        store.set_at("edge", 2, 500);
        store.set_at("new", 3, 1_400);

        let removed = store.sweep_expired(1_500);

        assert_eq!(removed, 1);
        assert!(store.get("old").is_none());
        assert!(store.get("edge").is_some());
        assert!(store.get("new").is_some());
        assert_eq!(store.stats().expired, 1);
    }

    #[test]
    fn test_sweep_overflow_removes_oldest_inserted() {
        let mut store = CacheStore::with_ttl_ms(3, 60_000);

        store.set_at("key1", 1, 100);
        store.set_at("key2", 2, 200);
        store.set_at("key3", 3, 300);
        store.set_at("key4", 4, 400);
        store.set_at("key5", 5, 500);

        let removed = store.sweep_overflow();

        assert_eq!(removed, 2);
        assert_eq!(store.len(), 3);
        assert!(store.get("key1").is_none());
        assert!(store.get("key2").is_none());
        assert!(store.get("key3").is_some());
        assert!(store.get("key5").is_some());
        assert_eq!(store.stats().evictions, 2);
    }

    #[test]
    fn test_sweep_overflow_ignores_reads() {
        let mut store = CacheStore::with_ttl_ms(2, 60_000);

        store.set_at("key1", 1, 100);
        store.set_at("key2", 2, 200);
        // Reading does not refresh the insertion stamp
        let _ = store.get("key1");
        store.set_at("key3", 3, 300);

        store.sweep_overflow();

        assert!(store.get("key1").is_none());
        assert!(store.get("key2").is_some());
        assert!(store.get("key3").is_some());
    }

    #[test]
    fn test_sweep_overflow_orders_same_millisecond_by_insertion() {
        let mut store = CacheStore::with_ttl_ms(2, 60_000);

        store.set_at("first", 1, 42);
        store.set_at("second", 2, 42);
        store.set_at("third", 3, 42);

        store.sweep_overflow();

        assert!(store.get("first").is_none());
        assert!(store.get("second").is_some());
        assert!(store.get("third").is_some());
    }

    #[test]
    fn test_sweep_overflow_under_capacity_noop() {
        let mut store = CacheStore::with_ttl_ms(10, 60_000);
        store.set_at("key1", 1, 0);

        assert_eq!(store.sweep_overflow(), 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_record_lookup() {
        let store: CacheStore<u8> = CacheStore::new(10, 60);

        store.record_lookup(true);
        store.record_lookup(false);
        store.record_lookup(false);

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 2);
    }
}
