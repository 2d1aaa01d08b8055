//! # Storefront Settings
//!
//! Optional `config/storefront.toml`. Every field has a default, so an
//! absent file or an empty table is valid.
//!
//! ```toml
//! [display]
//! placeholder_image = "/images/placeholder.jpg"
//! fallback_description = "No description available"
//! default_category = "Uncategorized"
//!
//! [checkout]
//! success_path = "/success"
//! cancel_path = "/cart"
//! ```

use crate::checkout::CheckoutUrls;
use crate::product::ProductDefaults;
use serde::{Deserialize, Serialize};

/// Redirect paths appended to the request origin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutPaths {
    pub success_path: String,
    pub cancel_path: String,
}

impl Default for CheckoutPaths {
    fn default() -> Self {
        Self {
            success_path: "/success".to_string(),
            cancel_path: "/cart".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontSettings {
    pub display: ProductDefaults,
    pub checkout: CheckoutPaths,
}

impl StorefrontSettings {
    /// Load settings from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Redirect URLs for a request arriving at `origin`
    pub fn checkout_urls(&self, origin: &str) -> CheckoutUrls {
        CheckoutUrls::new(origin).with_paths(
            self.checkout.success_path.clone(),
            self.checkout.cancel_path.clone(),
        )
    }
}
