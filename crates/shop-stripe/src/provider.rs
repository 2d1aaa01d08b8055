//! # Stripe Provider
//!
//! `CommerceProvider` backed by the Stripe REST API.

use crate::catalog;
use crate::checkout;
use crate::client::{StripeClient, PROVIDER};
use crate::config::StripeConfig;
use async_trait::async_trait;
use shop_core::{
    CheckoutRequest, CheckoutSession, CommerceProvider, ProcessedProduct, ProductDefaults,
    ShopResult,
};

/// Stripe catalog and hosted checkout
pub struct StripeProvider {
    client: StripeClient,
    defaults: ProductDefaults,
}

impl StripeProvider {
    /// Create a new Stripe provider
    pub fn new(config: StripeConfig) -> ShopResult<Self> {
        Ok(Self {
            client: StripeClient::new(config)?,
            defaults: ProductDefaults::default(),
        })
    }

    /// Create from environment variables
    pub fn from_env() -> ShopResult<Self> {
        let config = StripeConfig::from_env()?;
        Self::new(config)
    }

    /// Builder: set display fallbacks used when reshaping products
    pub fn with_defaults(mut self, defaults: ProductDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn config(&self) -> &StripeConfig {
        self.client.config()
    }
}

#[async_trait]
impl CommerceProvider for StripeProvider {
    async fn fetch_products(&self) -> ShopResult<Vec<ProcessedProduct>> {
        catalog::list_products(&self.client, &self.defaults).await
    }

    async fn fetch_product(&self, product_id: &str) -> ShopResult<Option<ProcessedProduct>> {
        catalog::retrieve_product(&self.client, &self.defaults, product_id).await
    }

    async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> ShopResult<CheckoutSession> {
        checkout::create_session(&self.client, request).await
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shop_core::{CheckoutLineItem, CheckoutUrls, ShopError};
    use wiremock::matchers::{
        body_string_contains, header, header_exists, method, path, query_param,
    };
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(server: &MockServer) -> StripeProvider {
        let config = StripeConfig::new("sk_test_abc123").with_api_base_url(server.uri());
        StripeProvider::new(config).unwrap()
    }

    fn product(id: &str, price: serde_json::Value) -> serde_json::Value {
        json!({
            "id": id,
            "object": "product",
            "name": format!("Product {id}"),
            "description": null,
            "images": [],
            "metadata": {"category": "parts"},
            "default_price": price
        })
    }

    #[tokio::test]
    async fn test_list_products_filters_and_maps() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/products"))
            .and(query_param("active", "true"))
            .and(query_param("expand[]", "data.default_price"))
            .and(header("Authorization", "Bearer sk_test_abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "object": "list",
                "has_more": false,
                "data": [
                    product("prod_a", json!({"id": "price_a", "unit_amount": 1999, "currency": "usd"})),
                    product("prod_b", serde_json::Value::Null),
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let products = provider(&server).fetch_products().await.unwrap();

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, "prod_a");
        assert_eq!(products[0].price, 19.99);
        assert_eq!(products[0].categories, vec!["parts"]);
    }

    #[tokio::test]
    async fn test_list_products_follows_pages() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/products"))
            .and(query_param("starting_after", "prod_a"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "has_more": false,
                "data": [product("prod_b", json!({"id": "price_b", "unit_amount": 250, "currency": "usd"}))]
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "has_more": true,
                "data": [product("prod_a", json!({"id": "price_a", "unit_amount": 100, "currency": "usd"}))]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let products = provider(&server).fetch_products().await.unwrap();
        let ids: Vec<_> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["prod_a", "prod_b"]);
    }

    #[tokio::test]
    async fn test_list_products_surfaces_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/products"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {"type": "invalid_request_error", "message": "Invalid API Key provided"}
            })))
            .mount(&server)
            .await;

        let err = provider(&server).fetch_products().await.unwrap_err();
        assert_eq!(err.provider_message(), Some("Invalid API Key provided"));
    }

    #[tokio::test]
    async fn test_fetch_product() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/products/prod_a"))
            .and(query_param("expand[]", "default_price"))
            .respond_with(ResponseTemplate::new(200).set_body_json(product(
                "prod_a",
                json!({"id": "price_a", "unit_amount": 4500, "currency": "usd"}),
            )))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/products/prod_unpriced"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(product("prod_unpriced", serde_json::Value::Null)),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/products/prod_gone"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "error": {"type": "invalid_request_error", "code": "resource_missing", "message": "No such product: 'prod_gone'"}
            })))
            .mount(&server)
            .await;

        let provider = provider(&server);
        let found = provider.fetch_product("prod_a").await.unwrap().unwrap();
        assert_eq!(found.price, 45.0);
        assert_eq!(found.price_id, "price_a");

        assert!(provider.fetch_product("prod_unpriced").await.unwrap().is_none());
        assert!(provider.fetch_product("prod_gone").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_fetch_product_keeps_id_inside_products_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(product(
                "prod_a",
                json!({"id": "price_a", "unit_amount": 4500, "currency": "usd"}),
            )))
            .expect(0)
            .mount(&server)
            .await;

        let provider = provider(&server);
        for id in ["../customers/cus_1", "prod_a?expand[]=x", "prod_a#frag", "", "prod a"] {
            assert!(provider.fetch_product(id).await.unwrap().is_none(), "{id}");
        }

        let received = server.received_requests().await.unwrap_or_default();
        assert!(received.is_empty());
    }

    #[tokio::test]
    async fn test_create_checkout_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/checkout/sessions"))
            .and(header_exists("Idempotency-Key"))
            .and(header("Stripe-Version", "2025-08-27.basil"))
            .and(body_string_contains("mode=payment"))
            .and(body_string_contains("line_items%5B0%5D%5Bprice%5D=price_dish"))
            .and(body_string_contains("line_items%5B0%5D%5Bquantity%5D=2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "cs_test_123",
                "object": "checkout.session",
                "url": "https://checkout.stripe.com/c/pay/cs_test_123",
                "expires_at": 1_900_000_000
            })))
            .expect(1)
            .mount(&server)
            .await;

        let urls = CheckoutUrls::new("https://shop.example");
        let request = CheckoutRequest::new(vec![CheckoutLineItem::new("price_dish", 2)], &urls);
        let session = provider(&server).create_checkout_session(&request).await.unwrap();

        assert_eq!(session.session_id, "cs_test_123");
        assert_eq!(session.url, "https://checkout.stripe.com/c/pay/cs_test_123");
        assert_eq!(session.provider, "stripe");
        assert_eq!(session.expires_at.map(|t| t.timestamp()), Some(1_900_000_000));
    }

    #[tokio::test]
    async fn test_create_checkout_session_provider_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/checkout/sessions"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": {"type": "invalid_request_error", "message": "No such price: 'price_nope'"}
            })))
            .mount(&server)
            .await;

        let urls = CheckoutUrls::new("https://shop.example");
        let request = CheckoutRequest::single("price_nope", &urls);
        let err = provider(&server).create_checkout_session(&request).await.unwrap_err();

        assert_eq!(err.status_code(), 500);
        assert_eq!(err.provider_message(), Some("No such price: 'price_nope'"));
    }

    #[tokio::test]
    async fn test_create_checkout_session_rejects_empty_request() {
        let server = MockServer::start().await;
        let urls = CheckoutUrls::new("https://shop.example");
        let request = CheckoutRequest::new(Vec::new(), &urls);

        let err = provider(&server).create_checkout_session(&request).await.unwrap_err();
        assert!(matches!(err, ShopError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_network_failure() {
        let config = StripeConfig::new("sk_test_abc123").with_api_base_url("http://127.0.0.1:9");
        let provider = StripeProvider::new(config).unwrap();

        let err = provider.fetch_products().await.unwrap_err();
        assert!(matches!(err, ShopError::NetworkError(_)));
    }
}
