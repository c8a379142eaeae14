//! Source image resolution
//!
//! Fetches a product photo, normalizes it to a bounded JPEG and caches the
//! resulting data URI by URL.

use std::io::Cursor;
use std::sync::Arc;

use base64::Engine as _;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use tracing::{debug, warn};

use crate::cache::{current_timestamp_ms, image_key, lookup_fresh, SharedStore};
use crate::source::{FetchError, ImageFetcher};

/// 1x1 transparent GIF substituted when a source image cannot be produced.
pub const PLACEHOLDER_IMAGE: &str =
    "data:image/gif;base64,R0lGODlhAQABAIAAAAAAAP///yH5BAEAAAAALAAAAAABAAEAAAIBRAA7";

const JPEG_QUALITY: u8 = 85;

/// Bounds on transcode work per image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranscodeLimits {
    /// Largest accepted `width * height` of the decoded input
    pub max_input_pixels: u64,
    /// Output is downscaled to this width when wider
    pub max_width: u32,
}

impl Default for TranscodeLimits {
    fn default() -> Self {
        Self {
            max_input_pixels: 40_000_000,
            max_width: 1080,
        }
    }
}

/// Decodes `bytes`, downsizes and re-encodes as a JPEG data URI.
///
/// The pixel budget is checked from the header before any pixel data is decoded.
pub fn transcode(bytes: &[u8], limits: TranscodeLimits) -> Result<String, FetchError> {
    let reader = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| FetchError::Decode(image::ImageError::IoError(e)))?;
    let (width, height) = reader.into_dimensions()?;

    let pixels = u64::from(width) * u64::from(height);
    if pixels > limits.max_input_pixels {
        return Err(FetchError::TooLarge {
            pixels,
            max: limits.max_input_pixels,
        });
    }

    let mut img = image::load_from_memory(bytes)?;
    if img.width() > limits.max_width {
        img = img.resize(limits.max_width, u32::MAX, FilterType::Triangle);
    }

    let rgb = img.to_rgb8();
    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY)
        .encode_image(&rgb)
        .map_err(|e| FetchError::Encode(e.to_string()))?;

    Ok(format!(
        "data:image/jpeg;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(&jpeg)
    ))
}

// == Source Image Resolver ==
/// Turns image URLs into embeddable data URIs, caching successes.
///
/// Concurrent resolutions of one uncached URL each fetch independently; the
/// last write wins.
#[derive(Clone)]
pub struct SourceImageResolver {
    fetcher: Arc<dyn ImageFetcher>,
    cache: SharedStore<Arc<str>>,
    limits: TranscodeLimits,
}

impl SourceImageResolver {
    pub fn new(
        fetcher: Arc<dyn ImageFetcher>,
        cache: SharedStore<Arc<str>>,
        limits: TranscodeLimits,
    ) -> Self {
        Self {
            fetcher,
            cache,
            limits,
        }
    }

    pub fn cache(&self) -> &SharedStore<Arc<str>> {
        &self.cache
    }

    /// Resolves `url`, substituting [`PLACEHOLDER_IMAGE`] on any failure.
    ///
    /// Placeholders are not cached.
    pub async fn resolve(&self, url: &str) -> Arc<str> {
        match self.try_resolve(url).await {
            Ok(image) => image,
            Err(e) => {
                warn!(url, error = %e, "Failed to load source image, using placeholder");
                Arc::from(PLACEHOLDER_IMAGE)
            }
        }
    }

    /// Resolves `url`, reporting failures instead of substituting.
    pub async fn try_resolve(&self, url: &str) -> Result<Arc<str>, FetchError> {
        let key = image_key(url);
        if let Some(image) = lookup_fresh(&self.cache, &key, current_timestamp_ms()).await {
            debug!(url, "Source image cache hit");
            return Ok(image);
        }

        let bytes = self.fetcher.fetch(url).await?;
        let limits = self.limits;
        let data_uri = tokio::task::spawn_blocking(move || transcode(&bytes, limits))
            .await
            .map_err(|e| FetchError::Task(e.to_string()))??;

        let image: Arc<str> = Arc::from(data_uri);
        self.cache.write().await.set(key, image.clone());
        Ok(image)
    }
}
