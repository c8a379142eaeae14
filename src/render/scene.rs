//! Scene composition
//!
//! Turns a layout plus request content into an SVG document sized to the
//! output canvas.

use std::fmt::Write as _;
use std::sync::Arc;

use crate::error::{RenderError, Result};
use crate::render::layout::{Arrangement, Layout, REFERENCE_WIDTH};
use crate::render::RenderRequest;

/// Text while a discount badge is shown.
const BADGE_LABEL: &str = "Sniženo";
/// Text shown when there is no discount badge.
const COD_LABEL: &str = "Plaćanje pouzećem";
const FONT_FAMILY: &str = "Roboto, Arial, Helvetica, sans-serif";

// == Scene ==
/// Content placed into a layout.
#[derive(Debug, Clone)]
pub struct Scene {
    pub brand: String,
    pub product_name: String,
    pub final_price: Option<String>,
    pub old_price: Option<String>,
    pub is_discounted: bool,
    pub discount_percentage: Option<u32>,
    /// Embeddable image source (data URI)
    pub image: Arc<str>,
    pub debug: bool,
    pub width: u32,
    pub height: u32,
}

impl Scene {
    pub fn new(
        request: &RenderRequest,
        brand: &str,
        image: Arc<str>,
        (width, height): (u32, u32),
    ) -> Self {
        Self {
            brand: brand.to_string(),
            product_name: request.product_name.clone(),
            final_price: request.final_price.clone(),
            old_price: request.old_price.clone(),
            is_discounted: request.is_discounted,
            discount_percentage: request.discount_percentage,
            image,
            debug: request.debug_mode,
            width,
            height,
        }
    }
}

// == Scene Renderer ==
/// Produces a scalable vector document for a layout.
pub trait SceneRenderer: Send + Sync {
    fn compose(&self, layout: &Layout, scene: &Scene) -> Result<String>;
}

/// Writes SVG markup directly.
#[derive(Debug, Default, Clone)]
pub struct SvgSceneRenderer;

#[derive(Debug, Clone, Copy)]
struct Rect {
    x: f32,
    y: f32,
    w: f32,
    h: f32,
}

impl Rect {
    fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }
}

fn panels(layout: &Layout, width: f32, height: f32, scale: f32) -> (Rect, Rect) {
    let inset = layout.image_inset * scale;
    match layout.arrangement {
        Arrangement::ImageLeft { image_share } => {
            let split = width * image_share;
            (
                Rect {
                    x: 0.0,
                    y: inset,
                    w: split,
                    h: (height - 2.0 * inset).max(1.0),
                },
                Rect {
                    x: split,
                    y: 0.0,
                    w: width - split,
                    h: height,
                },
            )
        }
        Arrangement::ImageTop { image_share } => {
            let split = height * image_share;
            (
                Rect {
                    x: inset,
                    y: inset,
                    w: (width - 2.0 * inset).max(1.0),
                    h: (split - inset).max(1.0),
                },
                Rect {
                    x: 0.0,
                    y: split,
                    w: width,
                    h: height - split,
                },
            )
        }
    }
}

impl SceneRenderer for SvgSceneRenderer {
    fn compose(&self, layout: &Layout, scene: &Scene) -> Result<String> {
        if scene.width == 0 || scene.height == 0 {
            return Err(RenderError::Scene(format!(
                "invalid canvas size {}x{}",
                scene.width, scene.height
            )));
        }

        let width = scene.width as f32;
        let height = scene.height as f32;
        let scale = width / REFERENCE_WIDTH;
        let palette = &layout.palette;
        let ty = &layout.typography;
        let (image, text) = panels(layout, width, height, scale);

        let mut svg = String::with_capacity(scene.image.len() + 4096);
        // Writing into a String cannot fail
        let _ = write!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{width}" height="{height}" viewBox="0 0 {width} {height}" font-family="{FONT_FAMILY}">"#
        );
        let _ = write!(
            svg,
            r#"<defs><clipPath id="image-clip"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath></defs>"#,
            image.x, image.y, image.w, image.h
        );
        let _ = write!(
            svg,
            r#"<rect width="{width}" height="{height}" fill="{}"/>"#,
            palette.background
        );

        if layout.ornaments {
            write_ornaments(&mut svg, layout, &text, width, scale);
        }

        // Product image, cropped to fill its panel
        let _ = write!(
            svg,
            r#"<image xlink:href="{}" x="{}" y="{}" width="{}" height="{}" preserveAspectRatio="xMidYMid slice" clip-path="url(#image-clip)"/>"#,
            escape(&scene.image),
            image.x,
            image.y,
            image.w,
            image.h
        );
        let _ = write!(
            svg,
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
            image.x,
            image.y,
            image.w,
            image.h,
            palette.frame,
            scale.max(1.0)
        );

        let cx = text.center_x();
        let top = text.y + layout.text_inset * scale;
        let bottom = text.y + text.h - layout.text_inset * scale;

        // Top block: discount badge or cash-on-delivery label
        match scene.discount_percentage.filter(|_| scene.is_discounted) {
            Some(pct) => {
                let r = layout.badge_radius * scale;
                let cy = top + r;
                let _ = write!(
                    svg,
                    r#"<circle cx="{cx}" cy="{cy}" r="{r}" fill="{}"/>"#,
                    palette.badge_fill
                );
                let _ = write!(
                    svg,
                    r#"<text x="{cx}" y="{}" font-size="{}" font-weight="700" fill="{}" text-anchor="middle">{BADGE_LABEL}</text>"#,
                    cy - 4.0 * scale,
                    ty.badge * scale,
                    palette.badge_text
                );
                let _ = write!(
                    svg,
                    r#"<text x="{cx}" y="{}" font-size="{}" font-weight="700" fill="{}" text-anchor="middle">-{pct}%</text>"#,
                    cy + ty.badge_percentage * scale,
                    ty.badge_percentage * scale,
                    palette.badge_text
                );
            }
            None => {
                let icon = 24.0 * scale;
                let cy = top + icon;
                let _ = write!(
                    svg,
                    r#"<circle cx="{cx}" cy="{cy}" r="{icon}" fill="{}"/>"#,
                    palette.text
                );
                let _ = write!(
                    svg,
                    r#"<path d="M{} {cy} l{} {} l{} {}" fill="none" stroke="{}" stroke-width="{}" stroke-linecap="round" stroke-linejoin="round"/>"#,
                    cx - icon * 0.45,
                    icon * 0.3,
                    icon * 0.3,
                    icon * 0.6,
                    -icon * 0.6,
                    palette.background,
                    icon * 0.16
                );
                let _ = write!(
                    svg,
                    r#"<text x="{cx}" y="{}" font-size="{}" fill="{}" text-anchor="middle">{COD_LABEL}</text>"#,
                    cy + icon + ty.label * scale * 1.3,
                    ty.label * scale,
                    palette.text
                );
            }
        }

        // Brand, vertically centred in the text panel
        let _ = write!(
            svg,
            r#"<text x="{cx}" y="{}" font-size="{}" font-weight="700" letter-spacing="{}" fill="{}" text-anchor="middle">{}</text>"#,
            text.y + text.h / 2.0 + ty.brand * scale * 0.35,
            ty.brand * scale,
            ty.brand_tracking * scale,
            palette.text,
            escape(&scene.brand.to_uppercase())
        );

        // Pricing block, laid out bottom-up
        let gap = 10.0 * scale;
        let price_baseline = bottom;
        let name_baseline = price_baseline - ty.price * scale - gap;
        if let Some(price) = &scene.final_price {
            let _ = write!(
                svg,
                r#"<text x="{cx}" y="{price_baseline}" font-size="{}" font-weight="700" fill="{}" text-anchor="middle">{}</text>"#,
                ty.price * scale,
                palette.text,
                escape(price)
            );
        }
        let _ = write!(
            svg,
            r#"<text x="{cx}" y="{name_baseline}" font-size="{}" fill="{}" text-anchor="middle">{}</text>"#,
            ty.product_name * scale,
            palette.secondary,
            escape(&scene.product_name)
        );
        if scene.is_discounted {
            if let Some(old) = &scene.old_price {
                let _ = write!(
                    svg,
                    r#"<text x="{cx}" y="{}" font-size="{}" fill="{}" text-anchor="middle" text-decoration="line-through">{}</text>"#,
                    name_baseline - ty.product_name * scale - gap,
                    ty.old_price * scale,
                    palette.muted,
                    escape(old)
                );
            }
        }

        if scene.debug {
            write_debug_frame(&mut svg, width, height, &image, &text, scale);
        }

        svg.push_str("</svg>");
        Ok(svg)
    }
}

fn write_ornaments(svg: &mut String, layout: &Layout, text: &Rect, width: f32, scale: f32) {
    let palette = &layout.palette;
    let band = 16.0 * scale;
    let _ = write!(
        svg,
        r#"<rect width="{width}" height="{band}" fill="{}"/><rect y="{band}" width="{width}" height="{}" fill="{}"/>"#,
        palette.accent,
        band / 2.0,
        palette.text
    );

    // Fixed scatter of snow dots over the text panel
    const DOTS: [(f32, f32, f32); 8] = [
        (0.12, 0.08, 6.0),
        (0.34, 0.15, 4.0),
        (0.58, 0.06, 7.0),
        (0.81, 0.12, 5.0),
        (0.22, 0.90, 5.0),
        (0.47, 0.95, 4.0),
        (0.70, 0.88, 6.0),
        (0.90, 0.94, 4.0),
    ];
    for (fx, fy, r) in DOTS {
        let _ = write!(
            svg,
            r#"<circle cx="{}" cy="{}" r="{}" fill="{}" fill-opacity="0.6"/>"#,
            text.x + text.w * fx,
            text.y + text.h * fy,
            r * scale,
            palette.frame
        );
    }
}

fn write_debug_frame(
    svg: &mut String,
    width: f32,
    height: f32,
    image: &Rect,
    text: &Rect,
    scale: f32,
) {
    let stroke = 2.0 * scale.max(0.5);
    for (rect, color) in [
        (
            Rect {
                x: 0.0,
                y: 0.0,
                w: width,
                h: height,
            },
            "red",
        ),
        (*image, "blue"),
        (*text, "green"),
    ] {
        let _ = write!(
            svg,
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="none" stroke="{color}" stroke-width="{stroke}"/>"#,
            rect.x, rect.y, rect.w, rect.h
        );
    }
}

/// Escapes text for use in SVG character data and attribute values.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
