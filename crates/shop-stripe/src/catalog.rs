//! # Stripe Products
//!
//! Product listing and retrieval with the default price expanded, and the
//! reshaping of Stripe products into `ProcessedProduct`.

use crate::client::StripeClient;
use serde::Deserialize;
use shop_core::{minor_units_to_decimal, ProcessedProduct, ProductDefaults, ShopResult};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Stripe's maximum page size for list endpoints
const PAGE_LIMIT: u32 = 100;

/// List all active products, following pagination
#[instrument(skip(client, defaults))]
pub async fn list_products(
    client: &StripeClient,
    defaults: &ProductDefaults,
) -> ShopResult<Vec<ProcessedProduct>> {
    let mut products = Vec::new();
    let mut starting_after: Option<String> = None;
    let mut pages = 0;

    loop {
        let mut query = vec![
            ("active", "true".to_string()),
            ("expand[]", "data.default_price".to_string()),
            ("limit", PAGE_LIMIT.to_string()),
        ];
        if let Some(ref cursor) = starting_after {
            query.push(("starting_after", cursor.clone()));
        }

        let page: StripeList<StripeProduct> = client.get("/v1/products", &query).await?;
        pages += 1;

        starting_after = page.data.last().map(|p| p.id.clone());
        products.extend(page.data.iter().filter_map(|p| process_product(p, defaults)));

        if !page.has_more || starting_after.is_none() {
            break;
        }
    }

    debug!("Fetched {} priced products in {} page(s)", products.len(), pages);
    Ok(products)
}

/// Retrieve one product; `None` if missing or unpriced
#[instrument(skip(client, defaults))]
pub async fn retrieve_product(
    client: &StripeClient,
    defaults: &ProductDefaults,
    product_id: &str,
) -> ShopResult<Option<ProcessedProduct>> {
    if !is_object_id(product_id) {
        debug!("Rejected malformed product id: {:?}", product_id);
        return Ok(None);
    }

    let path = format!("/v1/products/{}", product_id);
    let query = [("expand[]", "default_price".to_string())];

    let product: Option<StripeProduct> = client.get_optional(&path, &query).await?;
    Ok(product.and_then(|p| process_product(&p, defaults)))
}

/// Stripe object ids are ASCII alphanumerics, `_` and `-`; anything else
/// would change the request path.
fn is_object_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// Reshape a Stripe product for display.
///
/// Returns `None` unless the default price is expanded and has a unit amount.
pub fn process_product(
    product: &StripeProduct,
    defaults: &ProductDefaults,
) -> Option<ProcessedProduct> {
    let price = match product.default_price.as_ref()? {
        Expandable::Object(price) => price,
        Expandable::Id(_) => return None,
    };
    let unit_amount = price.unit_amount?;

    Some(ProcessedProduct {
        id: product.id.clone(),
        name: product.name.clone(),
        price: minor_units_to_decimal(unit_amount, price.currency.as_deref()),
        image: defaults.image(&product.images),
        description: defaults.description(product.description.as_deref()),
        categories: defaults.categories(
            product.metadata.get("categories").map(String::as_str),
            product.metadata.get("category").map(String::as_str),
        ),
        price_id: price.id.clone(),
    })
}

// =============================================================================
// Stripe API Types
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct StripeList<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub has_more: bool,
}

#[derive(Debug, Deserialize)]
pub struct StripeProduct {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub default_price: Option<Expandable<StripePrice>>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

/// A field Stripe returns as an id unless expanded
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Expandable<T> {
    Id(String),
    Object(T),
}

#[derive(Debug, Deserialize)]
pub struct StripePrice {
    pub id: String,
    #[serde(default)]
    pub unit_amount: Option<i64>,
    #[serde(default)]
    pub currency: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> StripeProduct {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_maps_priced_product() {
        let product = parse(json!({
            "id": "prod_dish",
            "object": "product",
            "name": "Ku-band Dish",
            "description": "60cm offset dish",
            "images": ["https://files.stripe.com/dish.png"],
            "metadata": {"categories": "antennas, outdoor"},
            "default_price": {"id": "price_dish", "object": "price", "unit_amount": 1999, "currency": "usd"}
        }));

        let processed = process_product(&product, &ProductDefaults::default()).unwrap();
        assert_eq!(processed.price, 19.99);
        assert_eq!(processed.price_id, "price_dish");
        assert_eq!(processed.image, "https://files.stripe.com/dish.png");
        assert_eq!(processed.description, "60cm offset dish");
        assert_eq!(processed.categories, vec!["antennas", "outdoor"]);
    }

    #[test]
    fn test_applies_fallbacks() {
        let product = parse(json!({
            "id": "prod_lnb",
            "name": "LNB",
            "description": null,
            "images": [],
            "metadata": {},
            "default_price": {"id": "price_lnb", "unit_amount": 500, "currency": "jpy"}
        }));

        let processed = process_product(&product, &ProductDefaults::default()).unwrap();
        assert_eq!(processed.price, 500.0);
        assert_eq!(processed.image, "/images/placeholder.jpg");
        assert_eq!(processed.description, "No description available");
        assert_eq!(processed.categories, vec!["Uncategorized"]);
    }

    #[test]
    fn test_object_ids() {
        assert!(is_object_id("prod_NWjs8kKbJWmuuc"));
        assert!(is_object_id("prod-legacy_2"));
        assert!(!is_object_id(""));
        assert!(!is_object_id("../customers/cus_1"));
        assert!(!is_object_id("prod_a/prices"));
        assert!(!is_object_id("prod_a?expand[]=x"));
        assert!(!is_object_id("prod_a#x"));
        assert!(!is_object_id("prod_ä"));
    }

    #[test]
    fn test_excludes_unusable_prices() {
        let defaults = ProductDefaults::default();

        let no_price = parse(json!({"id": "prod_a", "name": "A", "default_price": null}));
        assert!(process_product(&no_price, &defaults).is_none());

        let unexpanded = parse(json!({"id": "prod_b", "name": "B", "default_price": "price_b"}));
        assert!(process_product(&unexpanded, &defaults).is_none());

        let custom_amount = parse(json!({
            "id": "prod_c", "name": "C",
            "default_price": {"id": "price_c", "unit_amount": null, "currency": "usd"}
        }));
        assert!(process_product(&custom_amount, &defaults).is_none());

        let missing_field = parse(json!({"id": "prod_d", "name": "D"}));
        assert!(process_product(&missing_field, &defaults).is_none());
    }
}
