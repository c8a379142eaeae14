//! Cache Sweeper Task
//!
//! Background task that periodically expires and trims both cache stores.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{current_timestamp_ms, SharedStore};

/// Entries removed from one store by one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub expired: usize,
    pub evicted: usize,
}

/// Expires then trims a single store at `now`.
///
/// Expiry runs first so overflow eviction only considers live entries.
pub async fn sweep_store<V>(store: &SharedStore<V>, now: u64) -> SweepReport {
    let mut guard = store.write().await;
    let expired = guard.sweep_expired(now);
    let evicted = guard.sweep_overflow();
    SweepReport { expired, evicted }
}

/// Sweeps the source-image store and the output store.
pub async fn sweep_caches(
    image_cache: &SharedStore<Arc<str>>,
    render_cache: &SharedStore<Bytes>,
    now: u64,
) -> (SweepReport, SweepReport) {
    let images = sweep_store(image_cache, now).await;
    let renders = sweep_store(render_cache, now).await;

    for (name, report) in [("image", images), ("png", renders)] {
        if report.expired + report.evicted > 0 {
            info!(
                cache = name,
                expired = report.expired,
                evicted = report.evicted,
                "Cache sweep removed entries"
            );
        } else {
            debug!(cache = name, "Cache sweep: nothing to remove");
        }
    }

    (images, renders)
}

/// Spawns the periodic sweeper.
///
/// The first sweep runs one full interval after start. The returned handle
/// is aborted on shutdown.
///
/// # Example
/// ```ignore
/// let handle = spawn_sweeper(image_cache, render_cache, 300);
/// // Later, during shutdown:
/// handle.abort();
/// ```
pub fn spawn_sweeper(
    image_cache: SharedStore<Arc<str>>,
    render_cache: SharedStore<Bytes>,
    interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting cache sweeper with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;
            sweep_caches(&image_cache, &render_cache, current_timestamp_ms()).await;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{shared, CacheStore};

    #[tokio::test]
    async fn test_sweep_store_expires_then_trims() {
        let store = shared(CacheStore::with_ttl_ms(2, 1_000));
        {
            let mut guard = store.write().await;
            guard.set_at("stale", 0u8, 0);
            guard.set_at("a", 1, 900);
            guard.set_at("b", 2, 950);
            guard.set_at("c", 3, 980);
        }

        let report = sweep_store(&store, 1_500).await;

        // Expiry removed "stale", so only one live entry was evicted
        assert_eq!(
            report,
            SweepReport {
                expired: 1,
                evicted: 1
            }
        );
        let guard = store.read().await;
        assert_eq!(guard.len(), 2);
        assert!(guard.get("a").is_none());
        assert!(guard.get("b").is_some());
        assert!(guard.get("c").is_some());
    }

    #[tokio::test]
    async fn test_sweep_caches_covers_both_stores() {
        let images: SharedStore<Arc<str>> = shared(CacheStore::with_ttl_ms(10, 100));
        let renders: SharedStore<Bytes> = shared(CacheStore::with_ttl_ms(10, 100));
        images.write().await.set_at("i", Arc::from("x"), 0);
        renders
            .write()
            .await
            .set_at("r", Bytes::from_static(b"x"), 0);

        let (i, r) = sweep_caches(&images, &renders, 1_000).await;

        assert_eq!(i.expired, 1);
        assert_eq!(r.expired, 1);
        assert!(images.read().await.is_empty());
        assert!(renders.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_sweeper_runs_periodically() {
        let images: SharedStore<Arc<str>> = shared(CacheStore::with_ttl_ms(10, 1));
        let renders: SharedStore<Bytes> = shared(CacheStore::with_ttl_ms(10, 1));
        images.write().await.set_at("old", Arc::from("x"), 0);

        let handle = spawn_sweeper(images.clone(), renders.clone(), 1);
        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert!(images.read().await.is_empty());
        handle.abort();
    }

    #[tokio::test]
    async fn test_sweeper_preserves_fresh_entries() {
        let images: SharedStore<Arc<str>> = shared(CacheStore::new(10, 3600));
        let renders: SharedStore<Bytes> = shared(CacheStore::new(10, 3600));
        renders.write().await.set("fresh", Bytes::from_static(b"png"));

        let handle = spawn_sweeper(images, renders.clone(), 1);
        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert_eq!(renders.read().await.len(), 1);
        handle.abort();
    }

    #[tokio::test]
    async fn test_sweeper_can_be_aborted() {
        let images: SharedStore<Arc<str>> = shared(CacheStore::new(10, 60));
        let renders: SharedStore<Bytes> = shared(CacheStore::new(10, 60));

        let handle = spawn_sweeper(images, renders, 1);
        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
