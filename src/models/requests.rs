//! Request DTOs for the render server API
//!
//! Defines the query parameters accepted by the render endpoint.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use serde::Deserialize;
use tracing::debug;

use crate::render::{AspectRatio, Pricing, RenderRequest, Style};

/// Product name used when `name` is absent or empty.
pub const DEFAULT_PRODUCT_NAME: &str = "Haljina Judson";

/// Photo used when `img` is absent.
pub const DEFAULT_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1595777457583-95e059d581b8?w=800&q=80";

/// Decoding config accepting `img` values with or without `=` padding.
const PADDING_INDIFFERENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);

const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, PADDING_INDIFFERENT);
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, PADDING_INDIFFERENT);

/// Query string of `GET /`
///
/// # Fields
/// - `name`: Product name
/// - `price`: Regular price display string
/// - `discount_price`: Discounted price display string
/// - `img`: Base64-encoded product image URL
/// - `style`: `christmas` or anything else for standard
/// - `aspect_ratio`: `1:1`, `4:5` or `9:16`
/// - `debug`: `true` draws panel borders
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RenderQuery {
    pub name: Option<String>,
    pub price: Option<String>,
    pub discount_price: Option<String>,
    pub img: Option<String>,
    pub style: Option<String>,
    pub aspect_ratio: Option<String>,
    pub debug: Option<String>,
}

impl RenderQuery {
    /// Normalizes the query into a fully specified render request.
    pub fn into_render_request(self) -> RenderRequest {
        let pricing = Pricing::resolve(self.price.as_deref(), self.discount_price.as_deref());

        RenderRequest {
            style: Style::from_param(self.style.as_deref()),
            aspect_ratio: AspectRatio::from_param(self.aspect_ratio.as_deref()),
            product_name: self
                .name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| DEFAULT_PRODUCT_NAME.to_string()),
            final_price: pricing.final_price,
            old_price: pricing.old_price,
            is_discounted: pricing.is_discounted,
            discount_percentage: pricing.discount_percentage,
            image_url: self
                .img
                .filter(|i| !i.is_empty())
                .map(|raw| decode_image_param(&raw))
                .unwrap_or_else(|| DEFAULT_IMAGE_URL.to_string()),
            debug_mode: self.debug.as_deref() == Some("true"),
        }
    }
}

/// Decodes a base64 `img` parameter, using it verbatim if it is not base64 text.
///
/// Form decoding turns `+` into a space, so spaces are restored first.
/// Padding is optional in both the standard and URL-safe alphabets.
pub fn decode_image_param(raw: &str) -> String {
    let candidate = raw.trim().replace(' ', "+");
    let decoded = STANDARD_LENIENT
        .decode(&candidate)
        .or_else(|_| URL_SAFE_LENIENT.decode(&candidate))
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok());

    match decoded {
        Some(url) => url,
        None => {
            debug!(img = raw, "img parameter is not base64, using it as a URL");
            raw.to_string()
        }
    }
}
