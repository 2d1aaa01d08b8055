//! # shop-core
//!
//! Core types and traits for the Satellite Spectrum storefront.
//!
//! This crate provides:
//! - `Cart`, `CartItem` and the storage-backed `CartStore`
//! - `ProcessedProduct` and the `Catalog` adapter
//! - `CheckoutRequest`, `CheckoutSession` and request body validation
//! - `CommerceProvider` trait for the payment provider
//! - `ShopError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use shop_core::{CartStore, MemoryStorage, CheckoutRequest, CheckoutUrls};
//!
//! let store = CartStore::new(MemoryStorage::new());
//! store.add(&product)?;
//!
//! let urls = CheckoutUrls::new("https://shop.example");
//! let request = CheckoutRequest::new(store.line_items(), &urls);
//! let session = provider.create_checkout_session(&request).await?;
//!
//! // Redirect user to session.url
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod product;
pub mod provider;
pub mod settings;
pub mod store;
pub mod validation;

// Re-exports for convenience
pub use cart::{Cart, CartItem, NewCartItem};
pub use catalog::Catalog;
pub use checkout::{CheckoutLineItem, CheckoutRequest, CheckoutSession, CheckoutUrls};
pub use error::{ShopError, ShopResult, StorageError};
pub use product::{minor_units_to_decimal, Currency, ProcessedProduct, ProductDefaults};
pub use provider::{BoxedProvider, CommerceProvider};
pub use settings::{CheckoutPaths, StorefrontSettings};
pub use store::{
    CartLoadError, CartObserver, CartStorage, CartStore, MemoryStorage, UnavailableStorage,
    CART_STORAGE_KEY,
};
pub use validation::{validate_cart_checkout, validate_single_checkout, ValidationError};
