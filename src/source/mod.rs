//! Source Image Module
//!
//! Fetches external product photos and turns them into embeddable data URIs.

mod fetch;
mod resolver;

pub use fetch::{FetchError, HttpFetcher, ImageFetcher, DEFAULT_MAX_BODY_BYTES};
pub use resolver::{transcode, SourceImageResolver, TranscodeLimits, PLACEHOLDER_IMAGE};
