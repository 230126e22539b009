//! Checkout Configuration
//!
//! One explicit record loaded at startup and passed down. The server reads it
//! from the environment; the browser receives the [`PublicConfig`] subset
//! from `/api/config`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CheckoutError, Result};
use crate::provider::ProviderKind;

/// PayPal environment
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayPalEnvironment {
    #[default]
    Sandbox,
    Live,
}

impl PayPalEnvironment {
    /// Base URL of PayPal's buyer-facing site
    pub const fn web_base(self) -> &'static str {
        match self {
            Self::Sandbox => "https://www.sandbox.paypal.com",
            Self::Live => "https://www.paypal.com",
        }
    }
}

impl FromStr for PayPalEnvironment {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "sandbox" => Ok(Self::Sandbox),
            "live" | "production" => Ok(Self::Live),
            other => Err(CheckoutError::Config(format!("unknown PayPal environment: {other}"))),
        }
    }
}

impl fmt::Display for PayPalEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sandbox => "sandbox",
            Self::Live => "live",
        })
    }
}

/// Browser-safe settings served to the frontend
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicConfig {
    /// Stripe publishable key (`pk_...`)
    #[serde(default)]
    pub stripe_publishable_key: Option<String>,

    /// PayPal REST client id
    #[serde(default)]
    pub paypal_client_id: Option<String>,

    #[serde(default)]
    pub paypal_environment: PayPalEnvironment,

    /// Order-creation endpoint for Stripe sessions
    #[serde(default = "default_stripe_orders_api")]
    pub stripe_orders_api: String,

    /// Order-creation endpoint for PayPal orders
    #[serde(default = "default_paypal_orders_api")]
    pub paypal_orders_api: String,

    /// Post-payment lookup endpoint
    #[serde(default = "default_payment_success_api")]
    pub payment_success_api: String,

    /// Linked from the confirmation page for multi-seat orders
    #[serde(default = "default_license_manager_url")]
    pub license_manager_url: String,
}

fn default_stripe_orders_api() -> String {
    "/api/stripe/orders".into()
}

fn default_paypal_orders_api() -> String {
    "/api/paypal/orders".into()
}

fn default_payment_success_api() -> String {
    "/api/stripe/success".into()
}

fn default_license_manager_url() -> String {
    "/license-manager".into()
}

impl Default for PublicConfig {
    fn default() -> Self {
        Self {
            stripe_publishable_key: None,
            paypal_client_id: None,
            paypal_environment: PayPalEnvironment::default(),
            stripe_orders_api: default_stripe_orders_api(),
            paypal_orders_api: default_paypal_orders_api(),
            payment_success_api: default_payment_success_api(),
            license_manager_url: default_license_manager_url(),
        }
    }
}

impl PublicConfig {
    /// Providers with credentials present, Stripe first
    pub fn enabled_providers(&self) -> Vec<ProviderKind> {
        let mut providers = Vec::new();
        if self.stripe_publishable_key.is_some() {
            providers.push(ProviderKind::Stripe);
        }
        if self.paypal_client_id.is_some() {
            providers.push(ProviderKind::PayPal);
        }
        providers
    }

    /// Order-creation endpoint for a provider
    pub fn orders_api(&self, kind: ProviderKind) -> &str {
        match kind {
            ProviderKind::Stripe => &self.stripe_orders_api,
            ProviderKind::PayPal => &self.paypal_orders_api,
        }
    }
}

/// Full configuration, including server-only settings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckoutConfig {
    pub public: PublicConfig,

    /// Upstream payment service that `/api/*` is proxied to
    pub payment_service_url: String,

    pub bind_addr: String,

    /// Directory holding the built WASM bundle and `index.html`
    pub static_dir: String,

    pub proxy_timeout_secs: u64,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            public: PublicConfig::default(),
            payment_service_url: "http://localhost:4000".into(),
            bind_addr: "0.0.0.0:3000".into(),
            static_dir: "static".into(),
            proxy_timeout_secs: 30,
        }
    }
}

impl CheckoutConfig {
    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let paypal_environment = get("PAYPAL_ENVIRONMENT")
            .map(|v| v.parse::<PayPalEnvironment>())
            .transpose()?
            .unwrap_or_default();

        let proxy_timeout_secs = get("PROXY_TIMEOUT_SECS")
            .map(|v| {
                v.parse::<u64>().map_err(|_| {
                    CheckoutError::Config(format!("PROXY_TIMEOUT_SECS is not a number: {v}"))
                })
            })
            .transpose()?
            .unwrap_or(defaults.proxy_timeout_secs);

        let public = PublicConfig {
            stripe_publishable_key: get("STRIPE_PUBLISHABLE_KEY"),
            paypal_client_id: get("PAYPAL_CLIENT_ID"),
            paypal_environment,
            stripe_orders_api: get("STRIPE_ORDERS_API")
                .unwrap_or(defaults.public.stripe_orders_api),
            paypal_orders_api: get("PAYPAL_ORDERS_API")
                .unwrap_or(defaults.public.paypal_orders_api),
            payment_success_api: get("PAYMENT_SUCCESS_API")
                .unwrap_or(defaults.public.payment_success_api),
            license_manager_url: get("LICENSE_MANAGER_URL")
                .unwrap_or(defaults.public.license_manager_url),
        };

        Ok(Self {
            public,
            payment_service_url: get("PAYMENT_SERVICE_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.payment_service_url),
            bind_addr: get("BIND_ADDR").unwrap_or(defaults.bind_addr),
            static_dir: get("STATIC_DIR").unwrap_or(defaults.static_dir),
            proxy_timeout_secs,
        })
    }
}
