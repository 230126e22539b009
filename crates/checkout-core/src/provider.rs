//! Payment Provider Strategy Pattern
//!
//! The checkout flow talks to payment providers and to the browser only
//! through the traits in this module, so Stripe can be swapped for PayPal
//! (or a test double) without touching form logic.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use checkout_core::provider::PaymentProvider;
//!
//! let session = provider.create_session(&order).await?;
//! provider.redirect(&session).await?;
//! ```
//!
//! Traits are `?Send` because the browser's fetch futures are not `Send`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;
use crate::order::{CheckoutSession, OrderRequest, PaymentSuccessRequest, PaymentSuccessResponse};

/// Supported payment providers
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Stripe,
    PayPal,
}

impl ProviderKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stripe => "stripe",
            Self::PayPal => "paypal",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Stripe => "Card (Stripe)",
            Self::PayPal => "PayPal",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the browser goes to pay
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RedirectTarget {
    /// Plain navigation to a hosted page
    Url(String),
    /// Hand the session to Stripe.js `redirectToCheckout`
    StripeSession {
        publishable_key: String,
        session_id: String,
    },
}

/// Transfers control of the page
#[async_trait(?Send)]
pub trait Navigator {
    /// Leave the page for a payment provider's hosted flow
    async fn redirect(&self, target: &RedirectTarget) -> Result<()>;

    /// Navigate within the site (e.g. "Back to Website")
    fn go_to(&self, path: &str) -> Result<()>;
}

/// Payment provider capability: create a session, then hand over to it
#[async_trait(?Send)]
pub trait PaymentProvider {
    fn kind(&self) -> ProviderKind;

    /// Ask the payment service for a checkout session for this order
    async fn create_session(&self, order: &OrderRequest) -> Result<CheckoutSession>;

    /// Send the browser into the provider's hosted checkout
    async fn redirect(&self, session: &CheckoutSession) -> Result<()>;
}

/// Order lookup after the provider redirects back
#[async_trait(?Send)]
pub trait OrderApi {
    async fn payment_success(
        &self,
        request: &PaymentSuccessRequest,
    ) -> Result<PaymentSuccessResponse>;
}
