//! Render Orchestrator
//!
//! Serves a render request from the output cache or runs the full pipeline:
//! source image → layout → scene → raster → cache.

use std::sync::Arc;

use axum::body::Bytes;
use tracing::{debug, info};

use crate::cache::{current_timestamp_ms, lookup_fresh, render_key, SharedStore};
use crate::error::{RenderError, Result};
use crate::render::{select_layout, Rasterizer, RenderRequest, Scene, SceneRenderer};
use crate::source::SourceImageResolver;

/// Whether the output came from the output cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
}

impl CacheStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CacheStatus::Hit => "HIT",
            CacheStatus::Miss => "MISS",
        }
    }
}

/// PNG bytes plus how they were produced.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub png: Bytes,
    pub cache: CacheStatus,
}

// == Render Orchestrator ==
pub struct RenderOrchestrator {
    output_cache: SharedStore<Bytes>,
    resolver: SourceImageResolver,
    scene: Arc<dyn SceneRenderer>,
    rasterizer: Arc<dyn Rasterizer>,
    render_width: u32,
    brand: String,
}

impl RenderOrchestrator {
    pub fn new(
        output_cache: SharedStore<Bytes>,
        resolver: SourceImageResolver,
        scene: Arc<dyn SceneRenderer>,
        rasterizer: Arc<dyn Rasterizer>,
        render_width: u32,
        brand: impl Into<String>,
    ) -> Self {
        Self {
            output_cache,
            resolver,
            scene,
            rasterizer,
            render_width,
            brand: brand.into(),
        }
    }

    pub fn output_cache(&self) -> &SharedStore<Bytes> {
        &self.output_cache
    }

    pub fn image_cache(&self) -> &SharedStore<Arc<str>> {
        self.resolver.cache()
    }

    /// Returns the PNG for `request`.
    ///
    /// A fresh cached render returns immediately with no other work. On a miss
    /// the pipeline runs in order and only a successful result is stored.
    /// Identical concurrent misses each run the pipeline; the last write wins.
    pub async fn render(&self, request: &RenderRequest) -> Result<Rendered> {
        let key = render_key(request);
        if let Some(png) = lookup_fresh(&self.output_cache, &key, current_timestamp_ms()).await {
            debug!(key = %key, "Render cache HIT");
            return Ok(Rendered {
                png,
                cache: CacheStatus::Hit,
            });
        }
        debug!(key = %key, "Render cache MISS");

        let image = self.resolver.resolve(&request.image_url).await;

        let layout = select_layout(request.aspect_ratio, request.style);
        let (width, height) = request.aspect_ratio.dimensions(self.render_width);
        let scene = Scene::new(request, &self.brand, image, (width, height));

        let composer = Arc::clone(&self.scene);
        let rasterizer = Arc::clone(&self.rasterizer);
        let png = tokio::task::spawn_blocking(move || {
            let svg = composer.compose(layout, &scene)?;
            rasterizer.rasterize(&svg, scene.width, scene.height)
        })
        .await
        .map_err(|e| RenderError::Internal(format!("render task failed: {e}")))??;

        let png = Bytes::from(png);
        self.output_cache.write().await.set(key, png.clone());

        info!(
            layout = layout.name,
            width,
            height,
            bytes = png.len(),
            "Rendered image"
        );
        Ok(Rendered {
            png,
            cache: CacheStatus::Miss,
        })
    }
}
