//! Render Module
//!
//! Request model, pricing, layout selection and the render pipeline.

pub mod layout;
mod orchestrator;
mod pricing;
mod raster;
mod request;
mod scene;

pub use layout::{select_layout, Layout};
pub use orchestrator::{CacheStatus, RenderOrchestrator, Rendered};
pub use pricing::{discount_percentage, parse_price, Pricing};
pub use raster::{Rasterizer, ResvgRasterizer};
pub use request::{AspectRatio, RenderRequest, Style};
pub use scene::{escape, Scene, SceneRenderer, SvgSceneRenderer};
