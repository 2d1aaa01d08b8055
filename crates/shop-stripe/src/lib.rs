//! # shop-stripe
//!
//! Stripe provider for the Satellite Spectrum storefront.
//!
//! Covers the three Stripe calls the storefront makes:
//!
//! 1. **Product listing** - `GET /v1/products` with `default_price` expanded,
//!    all pages
//! 2. **Product retrieval** - `GET /v1/products/{id}`
//! 3. **Checkout Sessions** - `POST /v1/checkout/sessions` for existing prices
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shop_stripe::StripeProvider;
//! use shop_core::{CheckoutRequest, CheckoutUrls, CommerceProvider};
//!
//! // Create provider from environment
//! let provider = StripeProvider::from_env()?;
//!
//! let products = provider.fetch_products().await?;
//!
//! let urls = CheckoutUrls::new("https://shop.example");
//! let session = provider
//!     .create_checkout_session(&CheckoutRequest::single(&products[0].price_id, &urls))
//!     .await?;
//!
//! // Redirect user to session.url
//! ```

pub mod catalog;
pub mod checkout;
pub mod client;
pub mod config;
pub mod provider;

// Re-exports
pub use client::StripeClient;
pub use config::StripeConfig;
pub use provider::StripeProvider;
