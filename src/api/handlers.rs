//! API Handlers
//!
//! HTTP request handlers for each render server endpoint.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, HeaderName, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};

use crate::cache::{shared, CacheStore, SharedStore};
use crate::config::Config;
use crate::error::Result;
use crate::models::{CacheStatsResponse, CacheSummary, HealthResponse, RenderQuery};
use crate::render::{RenderOrchestrator, ResvgRasterizer, SvgSceneRenderer};
use crate::source::{HttpFetcher, SourceImageResolver, TranscodeLimits};

/// Reports whether the body came from the output cache.
pub const CACHE_STATUS_HEADER: HeaderName = HeaderName::from_static("x-cache");

/// Browser/CDN caching policy for rendered images.
pub const PNG_CACHE_CONTROL: &str = "public, max-age=1800";

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<RenderOrchestrator>,
}

impl AppState {
    /// Creates a new AppState around an orchestrator.
    pub fn new(orchestrator: RenderOrchestrator) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
        }
    }

    /// Wires the production collaborators from configuration.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let image_cache = shared(CacheStore::new(
            config.image_cache_max_entries,
            config.image_cache_ttl,
        ));
        let png_cache = shared(CacheStore::new(
            config.png_cache_max_entries,
            config.png_cache_ttl,
        ));

        let fetcher = HttpFetcher::new(
            Duration::from_secs(config.fetch_timeout),
            config.max_fetch_bytes,
        )
            .context("build upstream HTTP client")?;
        let resolver = SourceImageResolver::new(
            Arc::new(fetcher),
            image_cache,
            TranscodeLimits {
                max_input_pixels: config.max_input_pixels,
                max_width: config.max_image_width,
            },
        );

        let orchestrator = RenderOrchestrator::new(
            png_cache,
            resolver,
            Arc::new(SvgSceneRenderer),
            Arc::new(ResvgRasterizer::new(config.font_dir.as_deref())),
            config.render_width,
            config.brand_name.clone(),
        );
        Ok(Self::new(orchestrator))
    }

    pub fn image_cache(&self) -> &SharedStore<Arc<str>> {
        self.orchestrator.image_cache()
    }

    pub fn png_cache(&self) -> &SharedStore<Bytes> {
        self.orchestrator.output_cache()
    }
}

/// Handler for GET /
///
/// Renders (or serves from cache) the PNG described by the query string.
pub async fn render_handler(
    State(state): State<AppState>,
    Query(query): Query<RenderQuery>,
) -> Result<Response> {
    let request = query.into_render_request();
    let rendered = state.orchestrator.render(&request).await?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("image/png")),
            (
                header::CACHE_CONTROL,
                HeaderValue::from_static(PNG_CACHE_CONTROL),
            ),
            (
                CACHE_STATUS_HEADER,
                HeaderValue::from_static(rendered.cache.as_str()),
            ),
        ],
        rendered.png,
    )
        .into_response())
}

/// Handler for GET /cache-stats
///
/// Returns size and counters of both caches.
pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<CacheStatsResponse> {
    let image_cache = CacheSummary::from_store(&*state.image_cache().read().await);
    let png_cache = CacheSummary::from_store(&*state.png_cache().read().await);

    Json(CacheStatsResponse {
        image_cache,
        png_cache,
    })
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
