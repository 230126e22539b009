//! PayPal Checkout
//!
//! The payment service creates a PayPal order and returns its id (and
//! usually its HATEOAS links). The buyer approves the order on PayPal's site.

use async_trait::async_trait;
use reqwest::Url;
use std::sync::Arc;

use checkout_core::{
    CheckoutError, CheckoutSession, Navigator, OrderRequest, PayPalEnvironment, PaymentProvider,
    ProviderKind, RedirectTarget, Result,
};

use crate::client::PaymentServiceClient;

/// Link relations that point at the buyer approval page
const APPROVAL_RELS: &[&str] = &["payer-action", "approve"];

/// PayPal hosted approval
pub struct PayPalCheckout<N> {
    client: Arc<PaymentServiceClient>,
    navigator: N,
    environment: PayPalEnvironment,
}

impl<N: Navigator> PayPalCheckout<N> {
    /// Fails when no PayPal client id is configured
    pub fn new(client: Arc<PaymentServiceClient>, navigator: N) -> Result<Self> {
        let config = client.config();
        if config.paypal_client_id.is_none() {
            return Err(CheckoutError::Config("PAYPAL_CLIENT_ID not set".into()));
        }
        let environment = config.paypal_environment;
        Ok(Self {
            client,
            navigator,
            environment,
        })
    }

    pub const fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Approval link, hosted url, or the `checkoutnow` page for the order id
    pub fn approval_url(&self, session: &CheckoutSession) -> Result<String> {
        if let Some(link) = session.link(APPROVAL_RELS).or(session.url.as_deref()) {
            return Ok(link.to_string());
        }
        let base = format!("{}/checkoutnow", self.environment.web_base());
        Url::parse_with_params(&base, &[("token", session.session_id.as_str())])
            .map(String::from)
            .map_err(|e| CheckoutError::Provider(format!("invalid PayPal approval URL: {e}")))
    }
}

#[async_trait(?Send)]
impl<N: Navigator> PaymentProvider for PayPalCheckout<N> {
    fn kind(&self) -> ProviderKind {
        ProviderKind::PayPal
    }

    async fn create_session(&self, order: &OrderRequest) -> Result<CheckoutSession> {
        self.client.create_order(ProviderKind::PayPal, order).await
    }

    async fn redirect(&self, session: &CheckoutSession) -> Result<()> {
        let url = self.approval_url(session)?;
        self.navigator.redirect(&RedirectTarget::Url(url)).await
    }
}
