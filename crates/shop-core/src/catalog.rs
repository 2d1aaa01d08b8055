//! # Catalog Adapter
//!
//! Read-through view of the provider's product catalog. Nothing is cached;
//! every call fetches.
//!
//! The plain methods keep the storefront's degrade-on-failure behavior
//! (empty list, `None`). The `try_` methods return the underlying result for
//! callers that need to tell "no products" from "fetch failed".

use crate::error::ShopResult;
use crate::product::ProcessedProduct;
use crate::provider::BoxedProvider;
use tracing::{error, warn};

#[derive(Clone)]
pub struct Catalog {
    provider: BoxedProvider,
}

impl Catalog {
    pub fn new(provider: BoxedProvider) -> Self {
        Self { provider }
    }

    /// All purchasable products, or an empty list if the fetch fails
    pub async fn list_products(&self) -> Vec<ProcessedProduct> {
        match self.try_list_products().await {
            Ok(products) => products,
            Err(e) => {
                error!(
                    provider = self.provider.provider_name(),
                    "Error fetching products: {}", e
                );
                Vec::new()
            }
        }
    }

    pub async fn try_list_products(&self) -> ShopResult<Vec<ProcessedProduct>> {
        self.provider.fetch_products().await
    }

    /// One product, or `None` if missing, unpriced, or the fetch fails
    pub async fn get_product(&self, product_id: &str) -> Option<ProcessedProduct> {
        match self.try_get_product(product_id).await {
            Ok(product) => product,
            Err(e) => {
                warn!(
                    provider = self.provider.provider_name(),
                    product_id,
                    "Error fetching product: {}", e
                );
                None
            }
        }
    }

    pub async fn try_get_product(&self, product_id: &str) -> ShopResult<Option<ProcessedProduct>> {
        self.provider.fetch_product(product_id).await
    }

    /// Products listed under a category, same degrade rules as `list_products`
    pub async fn products_in_category(&self, category: &str) -> Vec<ProcessedProduct> {
        self.list_products()
            .await
            .into_iter()
            .filter(|p| p.in_category(category))
            .collect()
    }
}
