//! Response DTOs for the render server API
//!
//! Defines the structure of outgoing JSON response bodies.

use serde::Serialize;

use crate::cache::CacheStore;

/// Size and counters for one cache.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheSummary {
    /// Current number of entries
    pub size: usize,
    /// Entry ceiling enforced by sweeps
    pub max_size: usize,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expired: u64,
    /// hits / (hits + misses), 0.0 before any lookup
    pub hit_rate: f64,
}

impl CacheSummary {
    pub fn from_store<V>(store: &CacheStore<V>) -> Self {
        let stats = store.stats();
        Self {
            size: store.len(),
            max_size: store.max_size(),
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            expired: stats.expired,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for `GET /cache-stats`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatsResponse {
    pub image_cache: CacheSummary,
    pub png_cache: CacheSummary,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
