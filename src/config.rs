//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::source::DEFAULT_MAX_BODY_BYTES;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub port: u16,
    /// Source-image cache TTL in seconds
    pub image_cache_ttl: u64,
    /// Source-image cache entry ceiling
    pub image_cache_max_entries: usize,
    /// Rendered PNG cache TTL in seconds
    pub png_cache_ttl: u64,
    /// Rendered PNG cache entry ceiling
    pub png_cache_max_entries: usize,
    /// Sweeper interval in seconds
    pub sweep_interval: u64,
    /// Upstream image fetch timeout in seconds
    pub fetch_timeout: u64,
    /// Largest upstream image body downloaded, in bytes
    pub max_fetch_bytes: u64,
    /// Largest decoded source image accepted, in pixels
    pub max_input_pixels: u64,
    /// Source images wider than this are downscaled
    pub max_image_width: u32,
    /// Output image width in pixels
    pub render_width: u32,
    /// Brand name printed on every image
    pub brand_name: String,
    /// Extra directory scanned for fonts
    pub font_dir: Option<PathBuf>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PORT` - HTTP server port (default: 3004)
    /// - `IMAGE_CACHE_TTL` - Source-image TTL in seconds (default: 3600)
    /// - `IMAGE_CACHE_MAX_ENTRIES` - Source-image cache size (default: 100)
    /// - `PNG_CACHE_TTL` - Rendered PNG TTL in seconds (default: 1800)
    /// - `PNG_CACHE_MAX_ENTRIES` - Rendered PNG cache size (default: 500)
    /// - `SWEEP_INTERVAL` - Sweep frequency in seconds (default: 300)
    /// - `FETCH_TIMEOUT` - Upstream fetch timeout in seconds (default: 10)
    /// - `MAX_FETCH_BYTES` - Upstream body ceiling in bytes (default: 26214400)
    /// - `MAX_INPUT_PIXELS` - Source image pixel ceiling (default: 40000000)
    /// - `MAX_IMAGE_WIDTH` - Source image width ceiling (default: 1080)
    /// - `RENDER_WIDTH` - Output width (default: 1080)
    /// - `BRAND_NAME` - Brand text (default: LUNATIK)
    /// - `FONT_DIR` - Optional extra font directory
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            port: env_or("PORT", defaults.port),
            image_cache_ttl: env_or("IMAGE_CACHE_TTL", defaults.image_cache_ttl),
            image_cache_max_entries: env_or(
                "IMAGE_CACHE_MAX_ENTRIES",
                defaults.image_cache_max_entries,
            ),
            png_cache_ttl: env_or("PNG_CACHE_TTL", defaults.png_cache_ttl),
            png_cache_max_entries: env_or("PNG_CACHE_MAX_ENTRIES", defaults.png_cache_max_entries),
            sweep_interval: env_or("SWEEP_INTERVAL", defaults.sweep_interval),
            fetch_timeout: env_or("FETCH_TIMEOUT", defaults.fetch_timeout),
            max_fetch_bytes: env_or("MAX_FETCH_BYTES", defaults.max_fetch_bytes),
            max_input_pixels: env_or("MAX_INPUT_PIXELS", defaults.max_input_pixels),
            max_image_width: env_or("MAX_IMAGE_WIDTH", defaults.max_image_width),
            render_width: env_or("RENDER_WIDTH", defaults.render_width),
            brand_name: env::var("BRAND_NAME")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.brand_name),
            font_dir: env::var_os("FONT_DIR").map(PathBuf::from),
        }
    }
}

/// Reads and parses `name`, falling back to `default` when unset or invalid.
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3004,
            image_cache_ttl: 3600,
            image_cache_max_entries: 100,
            png_cache_ttl: 1800,
            png_cache_max_entries: 500,
            sweep_interval: 300,
            fetch_timeout: 10,
            max_fetch_bytes: DEFAULT_MAX_BODY_BYTES,
            max_input_pixels: 40_000_000,
            max_image_width: 1080,
            render_width: 1080,
            brand_name: "LUNATIK".to_string(),
            font_dir: None,
        }
    }
}
