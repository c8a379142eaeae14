//! Error types for the render server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Render Error Enum ==
/// Failures that abort a single render request.
///
/// None of these are cached; the next identical request runs the pipeline again.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Layout could not be turned into a vector scene
    #[error("Scene composition failed: {0}")]
    Scene(String),

    /// Vector scene could not be rasterized or encoded
    #[error("Rasterization failed: {0}")]
    Rasterize(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for RenderError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.to_string()
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the render pipeline.
pub type Result<T> = std::result::Result<T, RenderError>;
