//! # Storefront Error Types
//!
//! Typed error handling for the storefront.
//! Provider and request operations return `Result<T, ShopError>`.

use crate::validation::ValidationError;
use thiserror::Error;

/// Core error type for catalog and checkout operations
#[derive(Debug, Error)]
pub enum ShopError {
    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Request body failed schema validation
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] ValidationError),

    /// Product not found in the provider catalog
    #[error("Product not found: {product_id}")]
    ProductNotFound { product_id: String },

    /// Payment provider API error
    #[error("Provider error [{provider}]: {message}")]
    ProviderError { provider: String, message: String },

    /// Network/HTTP error communicating with provider
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ShopError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            ShopError::Configuration(_) => 500,
            ShopError::InvalidRequest(_) => 400,
            ShopError::ProductNotFound { .. } => 404,
            ShopError::ProviderError { .. } => 500,
            ShopError::NetworkError(_) => 500,
            ShopError::Serialization(_) => 500,
            ShopError::Internal(_) => 500,
        }
    }

    /// The provider's own failure reason, if this error carries one.
    pub fn provider_message(&self) -> Option<&str> {
        match self {
            ShopError::ProviderError { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}

/// Result type alias for storefront operations
pub type ShopResult<T> = Result<T, ShopError>;

/// Failure of the cart's storage port.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// No storage in this context (server-side render, storage disabled)
    #[error("storage is not available")]
    Unavailable,

    /// The backend refused the write (quota, private mode)
    #[error("write rejected: {0}")]
    WriteRejected(String),

    /// The backend failed to read
    #[error("read failed: {0}")]
    ReadFailed(String),
}
