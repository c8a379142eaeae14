//! Price handling
//!
//! Prices arrive as display strings like `"1.299,00 KM"`. Only the digits and
//! decimal separators matter for the discount badge.

/// Price strings resolved for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pricing {
    pub final_price: Option<String>,
    pub old_price: Option<String>,
    pub is_discounted: bool,
    pub discount_percentage: Option<u32>,
}

impl Pricing {
    /// Resolves the `price` and `discount_price` parameters.
    ///
    /// A discount price that is absent, empty or the literal `"undefined"`
    /// means the product is not discounted. When discounted, the discount
    /// price becomes the final price and the regular price is shown crossed
    /// out. The percentage is withheld unless the discount is a real reduction.
    pub fn resolve(price: Option<&str>, discount_price: Option<&str>) -> Self {
        let discount = discount_price
            .map(str::trim)
            .filter(|d| !d.is_empty() && *d != "undefined");

        match discount {
            Some(discount) => Self {
                final_price: Some(discount.to_string()),
                old_price: price.map(str::to_string),
                is_discounted: true,
                discount_percentage: price.and_then(|p| discount_percentage(p, discount)),
            },
            None => Self {
                final_price: price.map(str::to_string),
                old_price: None,
                is_discounted: false,
                discount_percentage: None,
            },
        }
    }
}

/// Extracts a decimal value from a display string.
///
/// Keeps digits, `.` and `,`, then treats `,` as the decimal separator.
pub fn parse_price(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Rounded percentage saved, or `None` unless `0 <= discounted < original`.
pub fn discount_percentage(original: &str, discounted: &str) -> Option<u32> {
    let original = parse_price(original)?;
    let discounted = parse_price(discounted)?;

    if original <= 0.0 || discounted >= original {
        return None;
    }

    Some(((original - discounted) / original * 100.0).round() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price_strips_currency() {
        assert_eq!(parse_price("100KM"), Some(100.0));
        assert_eq!(parse_price("KM 59,90"), Some(59.9));
        assert_eq!(parse_price("12.5 €"), Some(12.5));
    }

    #[test]
    fn test_parse_price_rejects_garbage() {
        assert_eq!(parse_price("free"), None);
        assert_eq!(parse_price(""), None);
        // Thousands separator plus decimal comma is ambiguous after normalisation
        assert_eq!(parse_price("1.299,00"), None);
    }

    #[test]
    fn test_discount_percentage() {
        assert_eq!(discount_percentage("100KM", "75KM"), Some(25));
        assert_eq!(discount_percentage("59,90", "39,90"), Some(33));
    }

    #[test]
    fn test_discount_percentage_withheld_when_not_lower() {
        assert_eq!(discount_percentage("100KM", "120KM"), None);
        assert_eq!(discount_percentage("100KM", "100KM"), None);
        assert_eq!(discount_percentage("0KM", "0KM"), None);
    }

    #[test]
    fn test_resolve_discounted() {
        let pricing = Pricing::resolve(Some("100KM"), Some("75KM"));

        assert!(pricing.is_discounted);
        assert_eq!(pricing.final_price.as_deref(), Some("75KM"));
        assert_eq!(pricing.old_price.as_deref(), Some("100KM"));
        assert_eq!(pricing.discount_percentage, Some(25));
    }

    #[test]
    fn test_resolve_higher_discount_price_keeps_flag() {
        let pricing = Pricing::resolve(Some("100KM"), Some("120KM"));

        assert!(pricing.is_discounted);
        assert_eq!(pricing.discount_percentage, None);
        assert_eq!(pricing.final_price.as_deref(), Some("120KM"));
        assert_eq!(pricing.old_price.as_deref(), Some("100KM"));
    }

    #[test]
    fn test_resolve_not_discounted() {
        for discount in [None, Some(""), Some("   "), Some("undefined")] {
            let pricing = Pricing::resolve(Some("100KM"), discount);

            assert!(!pricing.is_discounted, "{discount:?}");
            assert_eq!(pricing.final_price.as_deref(), Some("100KM"));
            assert_eq!(pricing.old_price, None);
            assert_eq!(pricing.discount_percentage, None);
        }
    }

    #[test]
    fn test_resolve_trims_discount() {
        let pricing = Pricing::resolve(Some("100KM"), Some(" 80KM "));
        assert_eq!(pricing.final_price.as_deref(), Some("80KM"));
        assert_eq!(pricing.discount_percentage, Some(20));
    }

    #[test]
    fn test_resolve_discount_without_price() {
        let pricing = Pricing::resolve(None, Some("80KM"));
        assert!(pricing.is_discounted);
        assert_eq!(pricing.old_price, None);
        assert_eq!(pricing.discount_percentage, None);
    }
}
