//! Promo Render - on-demand marketing image server
//!
//! Composites a product photo, brand and price onto a template and serves
//! repeated requests from a TTL- and size-bounded in-memory cache.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod render;
pub mod source;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_sweeper;
