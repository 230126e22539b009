//! Stripe Checkout (Hosted)
//!
//! **Flow:** purchase form → payment service creates a Checkout Session →
//! browser goes to Stripe's hosted page → Stripe sends the user back to
//! `/stripe/success?sessionId=...&orderNumber=...`.
//!
//! When the service returns the session's hosted `url` we navigate to it
//! directly; otherwise the session id is handed to Stripe.js.

use async_trait::async_trait;
use std::sync::Arc;

use checkout_core::{
    CheckoutError, CheckoutSession, Navigator, OrderRequest, PaymentProvider, ProviderKind,
    RedirectTarget, Result,
};

use crate::client::PaymentServiceClient;

/// Stripe hosted checkout
pub struct StripeCheckout<N> {
    client: Arc<PaymentServiceClient>,
    navigator: N,
    publishable_key: String,
}

impl<N: Navigator> StripeCheckout<N> {
    /// Fails when no publishable key is configured
    pub fn new(client: Arc<PaymentServiceClient>, navigator: N) -> Result<Self> {
        let publishable_key = client
            .config()
            .stripe_publishable_key
            .clone()
            .ok_or_else(|| CheckoutError::Config("STRIPE_PUBLISHABLE_KEY not set".into()))?;
        Ok(Self {
            client,
            navigator,
            publishable_key,
        })
    }

    pub const fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn redirect_target(&self, session: &CheckoutSession) -> RedirectTarget {
        session.url.as_ref().map_or_else(
            || RedirectTarget::StripeSession {
                publishable_key: self.publishable_key.clone(),
                session_id: session.session_id.clone(),
            },
            |url| RedirectTarget::Url(url.clone()),
        )
    }
}

#[async_trait(?Send)]
impl<N: Navigator> PaymentProvider for StripeCheckout<N> {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Stripe
    }

    async fn create_session(&self, order: &OrderRequest) -> Result<CheckoutSession> {
        self.client.create_order(ProviderKind::Stripe, order).await
    }

    async fn redirect(&self, session: &CheckoutSession) -> Result<()> {
        self.navigator.redirect(&self.redirect_target(session)).await
    }
}
