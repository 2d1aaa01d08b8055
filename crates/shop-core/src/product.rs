//! # Product Types
//!
//! Display model for catalog products.
//! Products are owned by the payment provider and reshaped on every fetch.

use serde::{Deserialize, Serialize};

/// Image shown when the provider has none for a product
pub const PLACEHOLDER_IMAGE: &str = "/images/placeholder.jpg";

/// Description shown when the provider has none for a product
pub const FALLBACK_DESCRIPTION: &str = "No description available";

/// Category assigned when product metadata names none
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// Currencies with a known minor-unit exponent (ISO 4217)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Currency {
    USD,
    EUR,
    GBP,
    JPY,
    KRW,
    CAD,
    AUD,
    CHF,
    MXN,
}

impl Currency {
    /// Parse a provider currency code (case-insensitive)
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_lowercase().as_str() {
            "usd" => Some(Currency::USD),
            "eur" => Some(Currency::EUR),
            "gbp" => Some(Currency::GBP),
            "jpy" => Some(Currency::JPY),
            "krw" => Some(Currency::KRW),
            "cad" => Some(Currency::CAD),
            "aud" => Some(Currency::AUD),
            "chf" => Some(Currency::CHF),
            "mxn" => Some(Currency::MXN),
            _ => None,
        }
    }

    /// Returns the number of decimal places for this currency
    /// (JPY and KRW have 0 decimals, the others have 2)
    pub fn decimal_places(&self) -> u8 {
        match self {
            Currency::JPY | Currency::KRW => 0,
            _ => 2,
        }
    }

    /// Convert from smallest unit to decimal
    pub fn from_smallest_unit(&self, amount: i64) -> f64 {
        let divisor = 10_f64.powi(self.decimal_places() as i32);
        amount as f64 / divisor
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::USD
    }
}

/// Convert a provider minor-unit amount to decimal currency units.
///
/// Unknown currency codes are treated as two-decimal currencies.
pub fn minor_units_to_decimal(amount: i64, currency: Option<&str>) -> f64 {
    currency
        .and_then(Currency::from_code)
        .unwrap_or_default()
        .from_smallest_unit(amount)
}

/// Fallbacks applied when reshaping provider products
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductDefaults {
    pub placeholder_image: String,
    pub fallback_description: String,
    pub default_category: String,
}

impl Default for ProductDefaults {
    fn default() -> Self {
        Self {
            placeholder_image: PLACEHOLDER_IMAGE.to_string(),
            fallback_description: FALLBACK_DESCRIPTION.to_string(),
            default_category: DEFAULT_CATEGORY.to_string(),
        }
    }
}

impl ProductDefaults {
    /// First non-empty image, else the placeholder
    pub fn image(&self, images: &[String]) -> String {
        images
            .first()
            .filter(|url| !url.is_empty())
            .cloned()
            .unwrap_or_else(|| self.placeholder_image.clone())
    }

    /// Provider description, else the fallback
    pub fn description(&self, description: Option<&str>) -> String {
        match description {
            Some(d) if !d.is_empty() => d.to_string(),
            _ => self.fallback_description.clone(),
        }
    }

    /// Parse the comma-separated `categories` (or legacy `category`) metadata field.
    pub fn categories(&self, categories: Option<&str>, category: Option<&str>) -> Vec<String> {
        let raw = [categories, category]
            .into_iter()
            .flatten()
            .find(|value| !value.is_empty())
            .unwrap_or(self.default_category.as_str());

        let parsed: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|cat| !cat.is_empty())
            .map(String::from)
            .collect();

        if parsed.is_empty() {
            vec![self.default_category.clone()]
        } else {
            parsed
        }
    }
}

/// A catalog product reshaped for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedProduct {
    /// Provider product id (e.g. "prod_Q1w2e3")
    pub id: String,

    /// Display name
    pub name: String,

    /// Unit price in decimal currency units
    pub price: f64,

    /// Image URL (placeholder when the provider has none)
    pub image: String,

    /// Description (fallback text when the provider has none)
    pub description: String,

    /// Categories parsed from product metadata
    pub categories: Vec<String>,

    /// Provider price reference used for checkout
    #[serde(rename = "stripePriceId")]
    pub price_id: String,
}

impl ProcessedProduct {
    /// Check whether the product is listed under a category (case-insensitive)
    pub fn in_category(&self, category: &str) -> bool {
        self.categories
            .iter()
            .any(|c| c.eq_ignore_ascii_case(category))
    }
}
