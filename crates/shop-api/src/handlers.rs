//! # Request Handlers
//!
//! Axum request handlers for the storefront API.
//! Checkout handlers take the raw body so that empty, non-JSON and
//! wrongly-shaped bodies each get their own 400.

use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use shop_core::{
    validate_cart_checkout, validate_single_checkout, CheckoutRequest, ShopError,
    ValidationError,
};
use tracing::{error, info, instrument, warn};

const SINGLE_CHECKOUT_FAILED: &str = "Failed to create checkout session";
const CART_CHECKOUT_FAILED: &str = "Failed to create cart checkout session";
const PRODUCT_LOOKUP_FAILED: &str = "Failed to fetch product";

// =============================================================================
// Request/Response Types
// =============================================================================

/// Create checkout response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    /// Session ID
    pub session_id: String,
    /// Checkout URL (redirect user here)
    pub url: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    /// Failing request field, for validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            field: None,
        }
    }
}

impl From<ValidationError> for ErrorResponse {
    fn from(err: ValidationError) -> Self {
        Self {
            error: err.message,
            field: Some(err.field),
        }
    }
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn validation_error_to_response(err: ValidationError) -> ApiError {
    warn!("Rejected checkout request: {}", err);
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::from(err)))
}

/// Provider failures keep the provider's reason when it gave one
fn shop_error_to_response(err: ShopError, fallback: &str) -> ApiError {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let response = match err {
        ShopError::InvalidRequest(validation) => ErrorResponse::from(validation),
        not_found @ ShopError::ProductNotFound { .. } => ErrorResponse::new(not_found.to_string()),
        other => ErrorResponse::new(other.provider_message().unwrap_or(fallback)),
    };
    (status, Json(response))
}

/// Origin the browser used to reach us.
///
/// Honors reverse-proxy headers, then `Host`, then the configured base URL.
pub fn request_origin(headers: &HeaderMap, fallback: &str) -> String {
    let header_str = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    let host = header_str("x-forwarded-host").or_else(|| header_str(header::HOST.as_str()));
    match host {
        Some(host) => {
            let scheme = header_str("x-forwarded-proto").unwrap_or("http");
            format!("{}://{}", scheme, host)
        }
        None => fallback.trim_end_matches('/').to_string(),
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "satellite-storefront",
        "provider": state.provider.provider_name(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Create a checkout session for one unit of a single price
#[instrument(skip(state, headers, body), fields(bytes = body.len()))]
pub async fn create_checkout_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<CheckoutResponse>, ApiError> {
    let price_id = validate_single_checkout(&body).map_err(validation_error_to_response)?;

    let origin = request_origin(&headers, &state.config.base_url);
    let request = CheckoutRequest::single(price_id, &state.checkout_urls(&origin));

    info!(
        "Creating checkout: price={}, success_url={}",
        request.line_items[0].price, request.success_url
    );

    let session = state
        .provider
        .create_checkout_session(&request)
        .await
        .map_err(|e| {
            error!("Error creating checkout session: {}", e);
            shop_error_to_response(e, SINGLE_CHECKOUT_FAILED)
        })?;

    info!("Created checkout session: {}", session.session_id);

    Ok(Json(CheckoutResponse {
        session_id: session.session_id,
        url: session.url,
    }))
}

/// Create a checkout session for the whole cart
#[instrument(skip(state, headers, body), fields(bytes = body.len()))]
pub async fn create_cart_checkout_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<CheckoutResponse>, ApiError> {
    let line_items = validate_cart_checkout(&body).map_err(validation_error_to_response)?;

    let origin = request_origin(&headers, &state.config.base_url);
    let request = CheckoutRequest::new(line_items, &state.checkout_urls(&origin));

    info!(
        "Creating cart checkout: {} lines, {} units, origin={}",
        request.line_items.len(),
        request.item_count(),
        origin
    );

    let session = state
        .provider
        .create_checkout_session(&request)
        .await
        .map_err(|e| {
            error!("Error creating cart checkout session: {}", e);
            shop_error_to_response(e, CART_CHECKOUT_FAILED)
        })?;

    info!("Created cart checkout session: {}", session.session_id);

    Ok(Json(CheckoutResponse {
        session_id: session.session_id,
        url: session.url,
    }))
}

/// Get products list (empty when the provider is unreachable)
pub async fn list_products(State(state): State<AppState>) -> impl IntoResponse {
    let products = state.catalog.list_products().await;
    Json(serde_json::json!({
        "products": products,
        "count": products.len()
    }))
}

/// Get single product
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let product = match state.catalog.get_product(&product_id).await {
        Some(product) => product,
        None => {
            let err = ShopError::ProductNotFound { product_id };
            return Err(shop_error_to_response(err, PRODUCT_LOOKUP_FAILED));
        }
    };

    Ok(Json(product))
}
