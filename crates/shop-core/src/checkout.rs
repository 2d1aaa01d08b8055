//! # Checkout Types
//!
//! Requests sent to the provider's hosted checkout and the sessions it returns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A (price reference, quantity) pair sent to the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutLineItem {
    /// Provider price reference
    pub price: String,

    /// Quantity, at least 1
    pub quantity: u32,
}

impl CheckoutLineItem {
    pub fn new(price: impl Into<String>, quantity: u32) -> Self {
        Self {
            price: price.into(),
            quantity,
        }
    }
}

/// A request for a hosted checkout session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    /// Lines to charge, in display order
    pub line_items: Vec<CheckoutLineItem>,

    /// Where the provider sends the customer after paying
    pub success_url: String,

    /// Where the provider sends the customer on cancel
    pub cancel_url: String,

    /// Sent once with the create call so the provider never applies it twice
    pub idempotency_key: String,
}

impl CheckoutRequest {
    /// Build a request for the given lines with a fresh idempotency key
    pub fn new(line_items: Vec<CheckoutLineItem>, urls: &CheckoutUrls) -> Self {
        Self {
            line_items,
            success_url: urls.success_url(),
            cancel_url: urls.cancel_url(),
            idempotency_key: Uuid::new_v4().to_string(),
        }
    }

    /// One unit of a single price
    pub fn single(price_id: impl Into<String>, urls: &CheckoutUrls) -> Self {
        Self::new(vec![CheckoutLineItem::new(price_id, 1)], urls)
    }

    /// Total units across all lines
    pub fn item_count(&self) -> u32 {
        self.line_items.iter().map(|item| item.quantity).sum()
    }
}

/// A checkout session created by the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Provider's session ID
    pub session_id: String,

    /// URL to redirect the customer to
    pub url: String,

    /// Provider name (e.g., "stripe")
    pub provider: String,

    /// When the hosted page stops accepting payment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl CheckoutSession {
    pub fn new(
        session_id: impl Into<String>,
        url: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            url: url.into(),
            provider: provider.into(),
            expires_at: None,
        }
    }
}

/// Redirect URLs built from the request origin
#[derive(Debug, Clone)]
pub struct CheckoutUrls {
    /// Origin of the storefront (e.g., "https://shop.example")
    pub base_url: String,
    /// Success page path (e.g., "/success")
    pub success_path: String,
    /// Cancel page path (e.g., "/cart")
    pub cancel_path: String,
}

impl CheckoutUrls {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            success_path: "/success".to_string(),
            cancel_path: "/cart".to_string(),
        }
    }

    pub fn with_paths(
        mut self,
        success_path: impl Into<String>,
        cancel_path: impl Into<String>,
    ) -> Self {
        self.success_path = success_path.into();
        self.cancel_path = cancel_path.into();
        self
    }

    pub fn success_url(&self) -> String {
        format!("{}{}", self.base_url, self.success_path)
    }

    pub fn cancel_url(&self) -> String {
        format!("{}{}", self.base_url, self.cancel_path)
    }
}

impl Default for CheckoutUrls {
    fn default() -> Self {
        Self::new("http://localhost:4321")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_urls() {
        let urls = CheckoutUrls::new("https://shop.example/");

        assert_eq!(urls.success_url(), "https://shop.example/success");
        assert_eq!(urls.cancel_url(), "https://shop.example/cart");

        let custom = urls.with_paths("/thanks", "/basket");
        assert_eq!(custom.success_url(), "https://shop.example/thanks");
        assert_eq!(custom.cancel_url(), "https://shop.example/basket");
    }

    #[test]
    fn test_single_request() {
        let urls = CheckoutUrls::new("https://shop.example");
        let request = CheckoutRequest::single("price_123", &urls);

        assert_eq!(request.line_items, vec![CheckoutLineItem::new("price_123", 1)]);
        assert_eq!(request.success_url, "https://shop.example/success");
        assert_eq!(request.item_count(), 1);
        assert!(!request.idempotency_key.is_empty());
    }

    #[test]
    fn test_idempotency_keys_are_unique() {
        let urls = CheckoutUrls::default();
        let a = CheckoutRequest::single("price_1", &urls);
        let b = CheckoutRequest::single("price_1", &urls);
        assert_ne!(a.idempotency_key, b.idempotency_key);
    }
}
