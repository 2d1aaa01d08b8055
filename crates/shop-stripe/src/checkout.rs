//! # Stripe Checkout Sessions
//!
//! Creates hosted Checkout Sessions for existing Stripe prices.

use crate::client::{StripeClient, PROVIDER};
use chrono::DateTime;
use serde::Deserialize;
use shop_core::{CheckoutRequest, CheckoutSession, ShopError, ShopResult, ValidationError};
use tracing::{debug, info, instrument};

/// One-time payment for fixed prices
const CHECKOUT_MODE: &str = "payment";

/// Create a checkout session for the request's line items
#[instrument(
    skip(client, request),
    fields(lines = request.line_items.len(), units = request.item_count())
)]
pub async fn create_session(
    client: &StripeClient,
    request: &CheckoutRequest,
) -> ShopResult<CheckoutSession> {
    if request.line_items.is_empty() {
        return Err(ValidationError::new("lineItems", "Order has no items").into());
    }

    let form_params = build_form(request);
    debug!(
        "Creating Stripe checkout session: {} items, mode={}",
        request.line_items.len(),
        CHECKOUT_MODE
    );

    let response: StripeCheckoutSessionResponse = client
        .post_form("/v1/checkout/sessions", &form_params, Some(&request.idempotency_key))
        .await?;

    let url = response.url.ok_or_else(|| ShopError::ProviderError {
        provider: PROVIDER.to_string(),
        message: format!("Checkout session {} has no redirect URL", response.id),
    })?;

    info!("Created Stripe checkout session: id={}", response.id);

    let mut session = CheckoutSession::new(response.id, url, PROVIDER);
    session.expires_at = response.expires_at.and_then(|ts| DateTime::from_timestamp(ts, 0));
    Ok(session)
}

/// Build form data for the Stripe API
fn build_form(request: &CheckoutRequest) -> Vec<(String, String)> {
    let mut form_params: Vec<(String, String)> = vec![
        ("payment_method_types[0]".to_string(), "card".to_string()),
        ("mode".to_string(), CHECKOUT_MODE.to_string()),
        ("success_url".to_string(), request.success_url.clone()),
        ("cancel_url".to_string(), request.cancel_url.clone()),
    ];

    for (i, item) in request.line_items.iter().enumerate() {
        form_params.push((format!("line_items[{}][price]", i), item.price.clone()));
        form_params.push((format!("line_items[{}][quantity]", i), item.quantity.to_string()));
    }

    form_params
}

#[derive(Debug, Deserialize)]
struct StripeCheckoutSessionResponse {
    id: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    expires_at: Option<i64>,
}
