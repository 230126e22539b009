//! Application State

use std::sync::Arc;
use std::time::Duration;

use checkout_core::CheckoutConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Configuration loaded at startup
    pub config: Arc<CheckoutConfig>,

    /// Client used to forward `/api/*` to the payment service
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: CheckoutConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.proxy_timeout_secs))
            .build()?;
        Ok(Self {
            config: Arc::new(config),
            http,
        })
    }
}
