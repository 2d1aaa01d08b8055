//! # Commerce Provider Trait
//!
//! Strategy trait for the external payment provider that owns the catalog
//! and hosts checkout.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  CommerceProvider (trait)                   │
//! │  ├── fetch_products()                                       │
//! │  ├── fetch_product()                                        │
//! │  ├── create_checkout_session()                              │
//! │  └── provider_name()                                        │
//! └─────────────────────────────────────────────────────────────┘
//!                            ▲
//!                    ┌───────┴───────┐
//!                    │ StripeProvider│
//!                    └───────────────┘
//! ```

use crate::checkout::{CheckoutRequest, CheckoutSession};
use crate::error::ShopResult;
use crate::product::ProcessedProduct;
use async_trait::async_trait;
use std::sync::Arc;

/// Core trait for payment provider implementations.
///
/// Implementations make exactly one attempt per call; callers decide whether
/// a failure degrades (catalog reads) or surfaces (checkout).
#[async_trait]
pub trait CommerceProvider: Send + Sync {
    /// Fetch every active product that has a usable unit price.
    ///
    /// Products without a default price, or whose price has no unit amount,
    /// are filtered out here.
    async fn fetch_products(&self) -> ShopResult<Vec<ProcessedProduct>>;

    /// Fetch one product by id.
    ///
    /// Returns `Ok(None)` if the product does not exist or has no usable price.
    async fn fetch_product(&self, product_id: &str) -> ShopResult<Option<ProcessedProduct>>;

    /// Create a hosted checkout session and return its redirect URL.
    async fn create_checkout_session(&self, request: &CheckoutRequest)
        -> ShopResult<CheckoutSession>;

    /// Get the provider name (for logging).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared provider (dynamic dispatch)
pub type BoxedProvider = Arc<dyn CommerceProvider>;
