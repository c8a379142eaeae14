//! Request and Response models for the render server API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! deserializing query strings and serializing JSON responses.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{decode_image_param, RenderQuery, DEFAULT_IMAGE_URL, DEFAULT_PRODUCT_NAME};
pub use responses::{CacheStatsResponse, CacheSummary, HealthResponse};
