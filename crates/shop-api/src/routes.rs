//! # Routes
//!
//! Axum router configuration for the storefront API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - POST /api/create-checkout-session - Single price checkout
/// - POST /api/create-cart-checkout-session - Whole cart checkout
/// - GET  /api/products - List products
/// - GET  /api/products/{product_id} - Get product by ID
/// - GET  /health - Health check
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Checkout
        .route("/create-checkout-session", post(handlers::create_checkout_session))
        .route(
            "/create-cart-checkout-session",
            post(handlers::create_cart_checkout_session),
        )
        // Products
        .route("/products", get(handlers::list_products))
        .route("/products/{product_id}", get(handlers::get_product));

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
