//! Cache Module
//!
//! Bounded, TTL-aware stores for source images and rendered PNGs, plus the
//! key functions that address them.

mod entry;
mod keys;
mod stats;
mod store;


use std::sync::Arc;

use tokio::sync::RwLock;

// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry};
pub use keys::{image_key, render_key};
pub use stats::CacheStats;
pub use store::CacheStore;

/// A cache store shared between request tasks and the sweeper.
pub type SharedStore<V> = Arc<RwLock<CacheStore<V>>>;

/// Wraps a store for shared access.
pub fn shared<V>(store: CacheStore<V>) -> SharedStore<V> {
    Arc::new(RwLock::new(store))
}

// == Fresh Lookup ==
/// Returns a clone of the value under `key` if it is fresh at `now`.
///
/// Freshness is decided here, by the caller side, against the store's TTL.
/// Stale entries are left in place for the sweeper. Only the read lock is
/// taken, so concurrent lookups do not serialize.
pub async fn lookup_fresh<V: Clone>(store: &SharedStore<V>, key: &str, now: u64) -> Option<V> {
    let guard = store.read().await;
    let ttl_ms = guard.ttl_ms();
    let value = guard
        .get(key)
        .filter(|entry| entry.is_fresh(now, ttl_ms))
        .map(|entry| entry.value.clone());
    guard.record_lookup(value.is_some());
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lookup_fresh_hit() {
        let store = shared(CacheStore::with_ttl_ms(10, 1_000));
        store.write().await.set_at("k", 7u32, 100);

        assert_eq!(lookup_fresh(&store, "k", 600).await, Some(7));
        assert_eq!(store.read().await.stats().hits, 1);
    }

    #[tokio::test]
    async fn test_lookup_fresh_treats_stale_as_absent() {
        let store = shared(CacheStore::with_ttl_ms(10, 1_000));
        store.write().await.set_at("k", 7u32, 100);

        assert_eq!(lookup_fresh(&store, "k", 1_100).await, None);

        let guard = store.read().await;
        // Still present until a sweep runs
        assert_eq!(guard.len(), 1);
        assert_eq!(guard.stats().misses, 1);
    }

    #[tokio::test]
    async fn test_lookup_fresh_runs_alongside_other_readers() {
        let store = shared(CacheStore::with_ttl_ms(10, 1_000));
        store.write().await.set_at("k", 7u32, 100);

        // A reader holding the lock must not block a lookup
        let held = store.read().await;
        let found = tokio::time::timeout(
            std::time::Duration::from_secs(1),
            lookup_fresh(&store, "k", 200),
        )
        .await
        .expect("lookup blocked behind a read guard");
        drop(held);

        assert_eq!(found, Some(7));
        assert_eq!(store.read().await.stats().hits, 1);
    }

    #[tokio::test]
    async fn test_lookup_fresh_missing() {
        let store: SharedStore<u32> = shared(CacheStore::new(10, 60));
        assert_eq!(lookup_fresh(&store, "missing", 0).await, None);
    }
}
