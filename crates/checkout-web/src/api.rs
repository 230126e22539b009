//! API Client

use std::sync::Arc;

use checkout_core::{CheckoutError, PublicConfig, Result};
use checkout_payments::PaymentServiceClient;

const CONFIG_PATH: &str = "/api/config";

/// Origin of the current page, used to resolve `/api/...` endpoints
pub fn origin() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_else(|| "http://localhost:3000".into())
}

/// Fetch the public checkout configuration from the server
pub async fn load_config() -> Result<PublicConfig> {
    let url = format!("{}{CONFIG_PATH}", origin());

    let response = reqwest::get(&url)
        .await
        .map_err(|e| CheckoutError::Transport(e.to_string()))?;

    if !response.status().is_success() {
        return Err(CheckoutError::Http {
            status: response.status().as_u16(),
            message: "Failed to load checkout configuration".into(),
        });
    }

    response
        .json()
        .await
        .map_err(|e| CheckoutError::MalformedResponse(e.to_string()))
}

/// Payment service client bound to this page's origin
pub fn client(config: &PublicConfig) -> Arc<PaymentServiceClient> {
    Arc::new(PaymentServiceClient::new(origin(), config.clone()))
}
