//! # shop-api
//!
//! HTTP API layer for the Satellite Spectrum storefront.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Checkout endpoints that hand the customer off to hosted checkout
//! - Read-only product endpoints over the provider catalog
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/api/create-checkout-session` | Checkout one unit of a price |
//! | POST | `/api/create-cart-checkout-session` | Checkout the cart's line items |
//! | GET | `/api/products` | List products |
//! | GET | `/api/products/{id}` | Get product |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
