//! # Stripe HTTP Client
//!
//! Thin wrapper over `reqwest` that authenticates, pins the API version
//! and turns Stripe error bodies into `ShopError::ProviderError`.

use crate::config::StripeConfig;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use shop_core::{ShopError, ShopResult};
use tracing::error;

pub(crate) const PROVIDER: &str = "stripe";

pub struct StripeClient {
    config: StripeConfig,
    http: Client,
}

impl StripeClient {
    pub fn new(config: StripeConfig) -> ShopResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ShopError::Configuration(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &StripeConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
    }

    /// GET a resource; a 404 is reported as `Ok(None)`
    pub async fn get_optional<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ShopResult<Option<T>> {
        let request = self.authorized(self.http.get(self.url(path)).query(query));
        let (status, body) = send(request).await?;

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        parse(status, &body).map(Some)
    }

    /// GET a resource that must exist
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ShopResult<T> {
        let request = self.authorized(self.http.get(self.url(path)).query(query));
        let (status, body) = send(request).await?;
        parse(status, &body)
    }

    /// POST a form-encoded body
    pub async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &[(String, String)],
        idempotency_key: Option<&str>,
    ) -> ShopResult<T> {
        let mut request = self.authorized(self.http.post(self.url(path)).form(form));
        if let Some(key) = idempotency_key {
            request = request.header("Idempotency-Key", key);
        }
        let (status, body) = send(request).await?;
        parse(status, &body)
    }
}

async fn send(request: RequestBuilder) -> ShopResult<(StatusCode, String)> {
    let response = request
        .send()
        .await
        .map_err(|e| ShopError::NetworkError(e.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ShopError::NetworkError(e.to_string()))?;

    Ok((status, body))
}

fn parse<T: DeserializeOwned>(status: StatusCode, body: &str) -> ShopResult<T> {
    if !status.is_success() {
        error!("Stripe API error: status={}, body={}", status, body);

        // Parse Stripe error
        if let Ok(error_response) = serde_json::from_str::<StripeErrorResponse>(body) {
            return Err(ShopError::ProviderError {
                provider: PROVIDER.to_string(),
                message: error_response.error.message,
            });
        }

        return Err(ShopError::ProviderError {
            provider: PROVIDER.to_string(),
            message: format!("HTTP {}", status),
        });
    }

    serde_json::from_str(body)
        .map_err(|e| ShopError::Serialization(format!("Failed to parse Stripe response: {}", e)))
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Thing {
        id: String,
    }

    #[test]
    fn test_parse_success() {
        let thing: Thing = parse(StatusCode::OK, r#"{"id":"prod_1","object":"product"}"#).unwrap();
        assert_eq!(thing.id, "prod_1");
    }

    #[test]
    fn test_parse_stripe_error_message() {
        let body = r#"{"error":{"type":"invalid_request_error","code":"resource_missing","message":"No such price: 'price_nope'"}}"#;
        let err = parse::<Thing>(StatusCode::BAD_REQUEST, body).unwrap_err();

        assert_eq!(err.provider_message(), Some("No such price: 'price_nope'"));
    }

    #[test]
    fn test_parse_opaque_error() {
        let err = parse::<Thing>(StatusCode::BAD_GATEWAY, "<html>").unwrap_err();
        assert!(matches!(
            err,
            ShopError::ProviderError { ref message, .. } if message == "HTTP 502 Bad Gateway"
        ));
    }

    #[test]
    fn test_parse_garbage_success_body() {
        let err = parse::<Thing>(StatusCode::OK, "[]").unwrap_err();
        assert!(matches!(err, ShopError::Serialization(_)));
    }
}
