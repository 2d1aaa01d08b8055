//! # Application State
//!
//! Shared state for the Axum application.
//! Contains the payment provider, catalog adapter, settings and configuration.

use shop_core::{BoxedProvider, Catalog, CheckoutUrls, StorefrontSettings};
use shop_stripe::StripeProvider;
use std::net::SocketAddr;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Origin used when a request carries no Host header
    pub base_url: String,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Emit JSON log lines
    pub json_logs: bool,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(4321),
            base_url: std::env::var("BASE_URL")
                .unwrap_or_else(|_| "http://localhost:4321".to_string()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            json_logs: std::env::var("LOG_FORMAT")
                .map(|f| f.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| {
                anyhow::anyhow!("Invalid socket address {}:{}: {}", self.host, self.port, e)
            })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 4321,
            base_url: "http://localhost:4321".to_string(),
            environment: "development".to_string(),
            json_logs: false,
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Payment provider (checkout sessions)
    pub provider: BoxedProvider,
    /// Catalog adapter over the same provider
    pub catalog: Catalog,
    /// Display fallbacks and redirect paths
    pub settings: Arc<StorefrontSettings>,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create a new AppState with the Stripe provider
    pub fn new() -> anyhow::Result<Self> {
        Self::from_config(AppConfig::from_env())
    }

    /// Create the Stripe-backed state for an already loaded config
    pub fn from_config(config: AppConfig) -> anyhow::Result<Self> {
        let settings = load_settings()?;

        let stripe = StripeProvider::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Stripe: {}", e))?
            .with_defaults(settings.display.clone());

        if stripe.config().is_live_mode() && !config.is_production() {
            tracing::warn!("Live Stripe key in use outside production");
        }

        Ok(Self::with_provider(Arc::new(stripe), settings, config))
    }

    /// Assemble state around any provider
    pub fn with_provider(
        provider: BoxedProvider,
        settings: StorefrontSettings,
        config: AppConfig,
    ) -> Self {
        Self {
            catalog: Catalog::new(provider.clone()),
            provider,
            settings: Arc::new(settings),
            config,
        }
    }

    /// Redirect URLs for a request arriving at `origin`
    pub fn checkout_urls(&self, origin: &str) -> CheckoutUrls {
        self.settings.checkout_urls(origin)
    }
}

/// Load storefront settings from config file
fn load_settings() -> anyhow::Result<StorefrontSettings> {
    // Try to load from config/storefront.toml
    let config_paths = [
        "config/storefront.toml",
        "../config/storefront.toml",
        "../../config/storefront.toml",
    ];

    for path in config_paths {
        if let Ok(content) = std::fs::read_to_string(path) {
            let settings = StorefrontSettings::from_toml(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path, e))?;
            tracing::info!("Loaded storefront settings from {}", path);
            return Ok(settings);
        }
    }

    tracing::warn!("No storefront settings found, using defaults");
    Ok(StorefrontSettings::default())
}
