//! API Module
//!
//! HTTP handlers and routing for the render server.
//!
//! # Endpoints
//! - `GET /` - Render a marketing image as PNG
//! - `GET /cache-stats` - Cache sizes and counters
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
