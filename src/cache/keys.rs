//! Cache Key Derivation
//!
//! Deterministic 128-bit keys for source images and render requests.

use xxhash_rust::xxh3::{xxh3_128_with_seed, Xxh3};

use crate::render::RenderRequest;

const XXH3_SEED: u64 = 0x5f3c_91a7_0d2e_64b8;

/// Bumped whenever the render-key encoding changes shape.
const RENDER_KEY_VERSION: u8 = 1;

/// Key for a single external image resource.
pub fn image_key(url: &str) -> String {
    format!("img:{:032x}", xxh3_128_with_seed(url.as_bytes(), XXH3_SEED))
}

/// Key for a fully specified render request.
///
/// Every `RenderRequest` field is written in declaration order with explicit
/// tags and length prefixes, so field boundaries cannot be shifted between
/// adjacent strings and `None` never collides with an empty string. A field
/// added to `RenderRequest` must be written here too; the destructuring
/// below fails to compile until it is.
pub fn render_key(request: &RenderRequest) -> String {
    let RenderRequest {
        style,
        aspect_ratio,
        product_name,
        final_price,
        old_price,
        is_discounted,
        discount_percentage,
        image_url,
        debug_mode,
    } = request;

    let mut h = StableHasher::new();
    h.write_u8(RENDER_KEY_VERSION);
    h.write_str(style.as_str());
    h.write_str(aspect_ratio.as_str());
    h.write_str(product_name);
    h.write_opt_str(final_price.as_deref());
    h.write_opt_str(old_price.as_deref());
    h.write_bool(*is_discounted);
    match discount_percentage {
        Some(pct) => {
            h.write_u8(1);
            h.write_u32(*pct);
        }
        None => h.write_u8(0),
    }
    h.write_str(image_url);
    h.write_bool(*debug_mode);

    format!("png:{:032x}", h.finish())
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_str(&mut self, s: &str) {
        self.write_u64(s.len() as u64);
        self.write_bytes(s.as_bytes());
    }

    fn write_opt_str(&mut self, s: Option<&str>) {
        match s {
            Some(s) => {
                self.write_u8(1);
                self.write_str(s);
            }
            None => self.write_u8(0),
        }
    }

    fn finish(self) -> u128 {
        self.inner.digest128()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{AspectRatio, Style};

    fn request() -> RenderRequest {
        RenderRequest {
            style: Style::Standard,
            aspect_ratio: AspectRatio::FourFive,
            product_name: "Haljina Judson".to_string(),
            final_price: Some("75KM".to_string()),
            old_price: Some("100KM".to_string()),
            is_discounted: true,
            discount_percentage: Some(25),
            image_url: "https://cdn.example.com/dress.jpg".to_string(),
            debug_mode: false,
        }
    }

    #[test]
    fn test_image_key_deterministic() {
        let url = "https://cdn.example.com/dress.jpg";
        assert_eq!(image_key(url), image_key(url));
    }

    #[test]
    fn test_image_key_distinct_urls() {
        assert_ne!(
            image_key("https://cdn.example.com/a.jpg"),
            image_key("https://cdn.example.com/b.jpg")
        );
    }

    #[test]
    fn test_key_format_is_fixed_width() {
        assert_eq!(image_key("").len(), "img:".len() + 32);
        assert_eq!(render_key(&request()).len(), "png:".len() + 32);
    }

    #[test]
    fn test_render_key_sensitive_to_product_name() {
        let a = RenderRequest {
            product_name: "A".to_string(),
            ..request()
        };
        let b = RenderRequest {
            product_name: "B".to_string(),
            ..request()
        };
        assert_ne!(render_key(&a), render_key(&b));
    }

    #[test]
    fn test_render_key_sensitive_to_every_field() {
        let base = render_key(&request());
        let variants = [
            RenderRequest {
                style: Style::Christmas,
                ..request()
            },
            RenderRequest {
                aspect_ratio: AspectRatio::NineSixteen,
                ..request()
            },
            RenderRequest {
                final_price: None,
                ..request()
            },
            RenderRequest {
                old_price: None,
                ..request()
            },
            RenderRequest {
                is_discounted: false,
                ..request()
            },
            RenderRequest {
                discount_percentage: None,
                ..request()
            },
            RenderRequest {
                image_url: "https://cdn.example.com/other.jpg".to_string(),
                ..request()
            },
            RenderRequest {
                debug_mode: true,
                ..request()
            },
        ];

        for variant in &variants {
            assert_ne!(base, render_key(variant), "{variant:?}");
        }
    }

    #[test]
    fn test_render_key_none_differs_from_empty() {
        let none = RenderRequest {
            old_price: None,
            ..request()
        };
        let empty = RenderRequest {
            old_price: Some(String::new()),
            ..request()
        };
        assert_ne!(render_key(&none), render_key(&empty));
    }

    #[test]
    fn test_render_key_field_boundaries() {
        let a = RenderRequest {
            product_name: "ab".to_string(),
            final_price: Some("c".to_string()),
            ..request()
        };
        let b = RenderRequest {
            product_name: "a".to_string(),
            final_price: Some("bc".to_string()),
            ..request()
        };
        assert_ne!(render_key(&a), render_key(&b));
    }
}
