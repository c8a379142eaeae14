//! Rasterization
//!
//! Renders an SVG document into PNG bytes at an exact pixel size.

use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::error::{RenderError, Result};

/// Converts a scalable document into final bitmap bytes.
pub trait Rasterizer: Send + Sync {
    fn rasterize(&self, svg: &str, width: u32, height: u32) -> Result<Vec<u8>>;
}

/// resvg-backed rasterizer producing PNG output.
#[derive(Clone)]
pub struct ResvgRasterizer {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl ResvgRasterizer {
    /// Loads system fonts, plus any `.ttf`/`.otf`/`.ttc` files in `font_dir`.
    pub fn new(font_dir: Option<&Path>) -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        if let Some(dir) = font_dir {
            db.load_fonts_dir(dir);
        }
        debug!(faces = db.len(), "Font database loaded");
        Self::with_fontdb(Arc::new(db))
    }

    pub fn with_fontdb(fontdb: Arc<usvg::fontdb::Database>) -> Self {
        Self { fontdb }
    }
}

impl Rasterizer for ResvgRasterizer {
    fn rasterize(&self, svg: &str, width: u32, height: u32) -> Result<Vec<u8>> {
        let opts = usvg::Options {
            fontdb: self.fontdb.clone(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(svg, &opts)
            .map_err(|e| RenderError::Rasterize(format!("parse svg: {e}")))?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height).ok_or_else(|| {
            RenderError::Rasterize(format!("failed to allocate {width}x{height} pixmap"))
        })?;

        let sx = (width as f32) / tree.size().width();
        let sy = (height as f32) / tree.size().height();
        let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);
        resvg::render(&tree, xform, &mut pixmap.as_mut());

        encode_png(&pixmap)
    }
}

fn encode_png(pixmap: &resvg::tiny_skia::Pixmap) -> Result<Vec<u8>> {
    let mut rgba = Vec::with_capacity(pixmap.data().len());
    for px in pixmap.pixels() {
        let c = px.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }

    let img = image::RgbaImage::from_raw(pixmap.width(), pixmap.height(), rgba)
        .ok_or_else(|| RenderError::Rasterize("pixel buffer size mismatch".to_string()))?;

    let mut out = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .map_err(|e| RenderError::Rasterize(format!("encode png: {e}")))?;
    Ok(out)
}
