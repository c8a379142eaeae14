//! Layout variants
//!
//! Static geometry, typography and palette for each aspect-ratio/style pair.
//! Sizes are in pixels at the 1080px reference width and scale linearly.

use crate::render::{AspectRatio, Style};

/// Width all layout measurements are expressed against.
pub const REFERENCE_WIDTH: f32 = 1080.0;

/// How the image panel and the text panel share the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Arrangement {
    /// Image column on the left taking `image_share` of the width.
    ImageLeft { image_share: f32 },
    /// Image band on top taking `image_share` of the height.
    ImageTop { image_share: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Typography {
    pub brand: f32,
    pub product_name: f32,
    pub price: f32,
    pub old_price: f32,
    pub badge: f32,
    pub badge_percentage: f32,
    pub label: f32,
    /// Letter spacing applied to the brand name
    pub brand_tracking: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: &'static str,
    pub text: &'static str,
    pub secondary: &'static str,
    pub muted: &'static str,
    pub frame: &'static str,
    pub badge_fill: &'static str,
    pub badge_text: &'static str,
    pub accent: &'static str,
}

/// One of the six fixed template variants.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub name: &'static str,
    pub aspect_ratio: AspectRatio,
    pub style: Style,
    pub arrangement: Arrangement,
    /// Padding around the image panel along the cross axis
    pub image_inset: f32,
    /// Padding at both ends of the text panel's main axis
    pub text_inset: f32,
    pub badge_radius: f32,
    pub typography: Typography,
    pub palette: Palette,
    /// Draw seasonal ornaments
    pub ornaments: bool,
}

const TYPE_WIDE: Typography = Typography {
    brand: 72.0,
    product_name: 26.0,
    price: 56.0,
    old_price: 36.0,
    badge: 26.0,
    badge_percentage: 32.0,
    label: 28.0,
    brand_tracking: -2.0,
};

const TYPE_TALL: Typography = Typography {
    brand: 96.0,
    product_name: 34.0,
    price: 72.0,
    old_price: 44.0,
    badge: 30.0,
    badge_percentage: 40.0,
    label: 32.0,
    brand_tracking: -3.0,
};

const STANDARD: Palette = Palette {
    background: "#ffffff",
    text: "#000000",
    secondary: "#333333",
    muted: "#666666",
    frame: "#e0e0e0",
    badge_fill: "#ff0000",
    badge_text: "#ffffff",
    accent: "#ee2a2a",
};

const CHRISTMAS: Palette = Palette {
    background: "#fdf8f2",
    text: "#0f3d2e",
    secondary: "#1f5c45",
    muted: "#7a6a5a",
    frame: "#c9a227",
    badge_fill: "#b3121f",
    badge_text: "#ffffff",
    accent: "#b3121f",
};

static SQUARE_STANDARD: Layout = Layout {
    name: "square-standard",
    aspect_ratio: AspectRatio::Square,
    style: Style::Standard,
    arrangement: Arrangement::ImageLeft { image_share: 0.60 },
    image_inset: 0.0,
    text_inset: 240.0,
    badge_radius: 100.0,
    typography: TYPE_WIDE,
    palette: STANDARD,
    ornaments: false,
};

static SQUARE_CHRISTMAS: Layout = Layout {
    name: "square-christmas",
    aspect_ratio: AspectRatio::Square,
    style: Style::Christmas,
    arrangement: Arrangement::ImageLeft { image_share: 0.60 },
    image_inset: 40.0,
    text_inset: 240.0,
    badge_radius: 100.0,
    typography: TYPE_WIDE,
    palette: CHRISTMAS,
    ornaments: true,
};

static PORTRAIT_STANDARD: Layout = Layout {
    name: "portrait-standard",
    aspect_ratio: AspectRatio::FourFive,
    style: Style::Standard,
    arrangement: Arrangement::ImageLeft { image_share: 0.65 },
    image_inset: 220.0,
    text_inset: 240.0,
    badge_radius: 100.0,
    typography: TYPE_WIDE,
    palette: STANDARD,
    ornaments: false,
};

static PORTRAIT_CHRISTMAS: Layout = Layout {
    name: "portrait-christmas",
    aspect_ratio: AspectRatio::FourFive,
    style: Style::Christmas,
    arrangement: Arrangement::ImageLeft { image_share: 0.65 },
    image_inset: 220.0,
    text_inset: 240.0,
    badge_radius: 100.0,
    typography: TYPE_WIDE,
    palette: CHRISTMAS,
    ornaments: true,
};

static STORY_STANDARD: Layout = Layout {
    name: "story-standard",
    aspect_ratio: AspectRatio::NineSixteen,
    style: Style::Standard,
    arrangement: Arrangement::ImageTop { image_share: 0.62 },
    image_inset: 60.0,
    text_inset: 60.0,
    badge_radius: 120.0,
    typography: TYPE_TALL,
    palette: STANDARD,
    ornaments: false,
};

static STORY_CHRISTMAS: Layout = Layout {
    name: "story-christmas",
    aspect_ratio: AspectRatio::NineSixteen,
    style: Style::Christmas,
    arrangement: Arrangement::ImageTop { image_share: 0.62 },
    image_inset: 60.0,
    text_inset: 60.0,
    badge_radius: 120.0,
    typography: TYPE_TALL,
    palette: CHRISTMAS,
    ornaments: true,
};

/// Picks the template for an aspect-ratio/style pair.
pub fn select_layout(aspect_ratio: AspectRatio, style: Style) -> &'static Layout {
    match (aspect_ratio, style) {
        (AspectRatio::Square, Style::Standard) => &SQUARE_STANDARD,
        (AspectRatio::Square, Style::Christmas) => &SQUARE_CHRISTMAS,
        (AspectRatio::FourFive, Style::Standard) => &PORTRAIT_STANDARD,
        (AspectRatio::FourFive, Style::Christmas) => &PORTRAIT_CHRISTMAS,
        (AspectRatio::NineSixteen, Style::Standard) => &STORY_STANDARD,
        (AspectRatio::NineSixteen, Style::Christmas) => &STORY_CHRISTMAS,
    }
}
