//! Render request model
//!
//! The normalized set of inputs that fully determines one output image.

use serde::Serialize;
use tracing::warn;

// == Style ==
/// Visual theme of the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Standard,
    Christmas,
}

impl Style {
    /// `"christmas"` selects the seasonal theme; anything else is standard.
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw {
            Some("christmas") => Style::Christmas,
            _ => Style::Standard,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Style::Standard => "standard",
            Style::Christmas => "christmas",
        }
    }
}

// == Aspect Ratio ==
/// Supported output aspect ratios, written width:height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AspectRatio {
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "4:5")]
    FourFive,
    #[serde(rename = "9:16")]
    NineSixteen,
}

impl AspectRatio {
    /// Ratio used when the parameter is absent or unsupported.
    pub const DEFAULT: AspectRatio = AspectRatio::FourFive;

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "1:1" => Some(AspectRatio::Square),
            "4:5" => Some(AspectRatio::FourFive),
            "9:16" => Some(AspectRatio::NineSixteen),
            _ => None,
        }
    }

    /// Resolves a request parameter, falling back to [`AspectRatio::DEFAULT`].
    ///
    /// An absent parameter falls back silently; an unsupported one is logged.
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw {
            None => Self::DEFAULT,
            Some(value) => Self::parse(value).unwrap_or_else(|| {
                warn!(
                    aspect_ratio = value,
                    fallback = Self::DEFAULT.as_str(),
                    "Unsupported aspect ratio, using default"
                );
                Self::DEFAULT
            }),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::FourFive => "4:5",
            AspectRatio::NineSixteen => "9:16",
        }
    }

    /// Returns `(width_ratio, height_ratio)`.
    pub fn ratio(self) -> (u32, u32) {
        match self {
            AspectRatio::Square => (1, 1),
            AspectRatio::FourFive => (4, 5),
            AspectRatio::NineSixteen => (9, 16),
        }
    }

    /// Output pixel size for a fixed base width.
    ///
    /// Height is `round(width * height_ratio / width_ratio)`.
    pub fn dimensions(self, width: u32) -> (u32, u32) {
        let (w, h) = self.ratio();
        let height = (f64::from(width) * f64::from(h) / f64::from(w)).round() as u32;
        (width, height)
    }
}

// == Render Request ==
/// Every input that affects output pixels.
///
/// Only used to derive the output cache key and to populate the layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderRequest {
    pub style: Style,
    pub aspect_ratio: AspectRatio,
    pub product_name: String,
    pub final_price: Option<String>,
    pub old_price: Option<String>,
    pub is_discounted: bool,
    pub discount_percentage: Option<u32>,
    pub image_url: String,
    pub debug_mode: bool,
}
