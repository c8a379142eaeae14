//! API Routes
//!
//! Configures the Axum router with all render server endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{cache_stats_handler, health_handler, render_handler, AppState};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /` - Render a marketing image
/// - `GET /cache-stats` - Cache sizes and counters
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin so images can be embedded anywhere
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(render_handler))
        .route("/cache-stats", get(cache_stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
