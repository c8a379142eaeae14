//! Upstream image fetching
//!
//! The network boundary of the resolver. Failures are explicit here and only
//! turned into a placeholder by the caller.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

// == Fetch Error ==
/// Why a source image could not be produced.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport failure or timeout
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("upstream returned HTTP {0}")]
    Status(u16),

    /// Bytes are not a decodable image
    #[error("decode failed: {0}")]
    Decode(#[from] image::ImageError),

    /// Input exceeds the transcode pixel budget
    #[error("image has {pixels} pixels, limit is {max}")]
    TooLarge { pixels: u64, max: u64 },

    /// Response body exceeds the download ceiling
    #[error("response body exceeds {max} bytes (read {bytes})")]
    BodyTooLarge { bytes: u64, max: u64 },

    /// Re-encoding failed
    #[error("encode failed: {0}")]
    Encode(String),

    /// Blocking transcode task did not complete
    #[error("transcode task failed: {0}")]
    Task(String),
}

// == Image Fetcher ==
/// Retrieves raw image bytes for a URL.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Default ceiling on a downloaded image body.
pub const DEFAULT_MAX_BODY_BYTES: u64 = 25 * 1024 * 1024;

/// reqwest-backed fetcher with a per-request timeout and a body size ceiling.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    max_body_bytes: u64,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, max_body_bytes: u64) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            max_body_bytes,
        })
    }
}

#[async_trait]
impl ImageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let mut response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let max = self.max_body_bytes;
        if let Some(declared) = response.content_length() {
            if declared > max {
                return Err(FetchError::BodyTooLarge {
                    bytes: declared,
                    max,
                });
            }
        }

        // A missing or understated Content-Length is caught while reading
        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            let total = (body.len() + chunk.len()) as u64;
            if total > max {
                return Err(FetchError::BodyTooLarge { bytes: total, max });
            }
            body.extend_from_slice(&chunk);
        }

        debug!(url, bytes = body.len(), "Fetched source image");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(FetchError::Status(404).to_string(), "upstream returned HTTP 404");
        assert_eq!(
            FetchError::TooLarge {
                pixels: 200,
                max: 100
            }
            .to_string(),
            "image has 200 pixels, limit is 100"
        );
    }

    /// Serves `body` at `/img` on an ephemeral local port.
    async fn serve(body: Vec<u8>) -> String {
        use axum::{body::Body, response::Response, routing::get, Router};

        let app = Router::new().route(
            "/img",
            get(move || {
                let body = body.clone();
                async move { Response::new(Body::from(body)) }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/img")
    }

    #[tokio::test]
    async fn test_http_fetcher_reads_body_under_limit() {
        let url = serve(vec![7u8; 1024]).await;
        let fetcher = HttpFetcher::new(Duration::from_secs(5), 4096).unwrap();

        let body = fetcher.fetch(&url).await.unwrap();

        assert_eq!(body, vec![7u8; 1024]);
    }

    #[tokio::test]
    async fn test_http_fetcher_rejects_oversized_body() {
        let url = serve(vec![0u8; 10_000]).await;
        let fetcher = HttpFetcher::new(Duration::from_secs(5), 4096).unwrap();

        let result = fetcher.fetch(&url).await;

        assert!(matches!(
            result,
            Err(FetchError::BodyTooLarge { max: 4096, .. })
        ));
    }

    #[tokio::test]
    async fn test_http_fetcher_reports_unreachable_host() {
        let fetcher = HttpFetcher::new(Duration::from_secs(2), DEFAULT_MAX_BODY_BYTES).unwrap();
        // Port 9 on localhost is expected to refuse connections
        let result = fetcher.fetch("http://127.0.0.1:9/missing.png").await;
        assert!(matches!(result, Err(FetchError::Request(_))));
    }
}
