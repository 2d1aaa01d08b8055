//! # Request Validation
//!
//! Schema checks for the checkout request bodies. Bodies arrive as raw bytes
//! so that "empty", "not JSON" and "wrong shape" are reported separately,
//! each naming the field that failed.

use crate::checkout::CheckoutLineItem;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub const EMPTY_BODY: &str = "Request body is empty";
pub const INVALID_JSON: &str = "Invalid JSON in request body";
pub const PRICE_ID_REQUIRED: &str = "Price ID is required";
pub const LINE_ITEMS_REQUIRED: &str = "Line items are required";
pub const INVALID_LINE_ITEM: &str = "Invalid line item structure";

/// A request body that failed validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{message} ({field})")]
pub struct ValidationError {
    /// Path of the failing field, e.g. `lineItems[2].quantity`
    pub field: String,
    /// Client-facing message
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

fn parse_body(body: &[u8]) -> Result<Value, ValidationError> {
    if body.is_empty() {
        return Err(ValidationError::new("body", EMPTY_BODY));
    }
    serde_json::from_slice(body).map_err(|_| ValidationError::new("body", INVALID_JSON))
}

/// Validate `{ "priceId": string }` and return the price reference.
pub fn validate_single_checkout(body: &[u8]) -> Result<String, ValidationError> {
    let value = parse_body(body)?;

    match value.get("priceId").and_then(Value::as_str) {
        Some(price_id) if !price_id.is_empty() => Ok(price_id.to_string()),
        _ => Err(ValidationError::new("priceId", PRICE_ID_REQUIRED)),
    }
}

/// Validate `{ "lineItems": [{ "price": string, "quantity": integer }] }`.
pub fn validate_cart_checkout(body: &[u8]) -> Result<Vec<CheckoutLineItem>, ValidationError> {
    let value = parse_body(body)?;

    let entries = match value.get("lineItems").and_then(Value::as_array) {
        Some(entries) if !entries.is_empty() => entries,
        _ => return Err(ValidationError::new("lineItems", LINE_ITEMS_REQUIRED)),
    };

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| validate_line_item(index, entry))
        .collect()
}

fn validate_line_item(index: usize, entry: &Value) -> Result<CheckoutLineItem, ValidationError> {
    let path = format!("lineItems[{index}]");

    if !entry.is_object() {
        return Err(ValidationError::new(path, INVALID_LINE_ITEM));
    }

    let price = match entry.get("price").and_then(Value::as_str) {
        Some(price) if !price.is_empty() => price.to_string(),
        _ => return Err(ValidationError::new(format!("{path}.price"), INVALID_LINE_ITEM)),
    };

    let quantity = entry
        .get("quantity")
        .and_then(positive_quantity)
        .ok_or_else(|| ValidationError::new(format!("{path}.quantity"), INVALID_LINE_ITEM))?;

    Ok(CheckoutLineItem { price, quantity })
}

/// Positive integers that fit in `u32`; `2.0` counts, `1.5` does not.
fn positive_quantity(value: &Value) -> Option<u32> {
    let quantity = match value.as_u64() {
        Some(q) => q,
        None => {
            let f = value.as_f64()?;
            if f.fract() != 0.0 || f < 1.0 || f > f64::from(u32::MAX) {
                return None;
            }
            f as u64
        }
    };
    u32::try_from(quantity).ok().filter(|q| *q > 0)
}
