//! Page Checkout Provider
//!
//! The purchase page keeps one [`CheckoutInitiator`] for its whole lifetime.
//! Configuration arrives asynchronously and the provider is picked with a
//! radio button, so the concrete provider is resolved from signals each time
//! a checkout runs.

use async_trait::async_trait;
use leptos::prelude::*;

use checkout_core::{
    CheckoutError, CheckoutInitiator, CheckoutSession, OrderRequest, PaymentProvider,
    ProviderKind, PublicConfig, Result,
};
use checkout_payments::CheckoutProvider;

use crate::api;
use crate::browser::BrowserNavigator;

/// Initiator held by the purchase page
pub type PageInitiator = CheckoutInitiator<SelectedProvider>;

/// Provider chosen on the page, backed by the loaded public config
#[derive(Clone, Copy)]
pub struct SelectedProvider {
    config: ReadSignal<Option<PublicConfig>>,
    kind: ReadSignal<ProviderKind>,
}

impl SelectedProvider {
    pub const fn new(
        config: ReadSignal<Option<PublicConfig>>,
        kind: ReadSignal<ProviderKind>,
    ) -> Self {
        Self { config, kind }
    }

    fn resolve(&self) -> Result<CheckoutProvider<BrowserNavigator>> {
        let config = self
            .config
            .get_untracked()
            .ok_or_else(|| CheckoutError::Config("checkout configuration not loaded".into()))?;
        let kind = self.kind.get_untracked();
        CheckoutProvider::for_kind(kind, api::client(&config), BrowserNavigator)
    }
}

// The provider radios are disabled while a checkout is in flight, so the
// kind read in `redirect` is the one the session was created with.
#[async_trait(?Send)]
impl PaymentProvider for SelectedProvider {
    fn kind(&self) -> ProviderKind {
        self.kind.get_untracked()
    }

    async fn create_session(&self, order: &OrderRequest) -> Result<CheckoutSession> {
        self.resolve()?.create_session(order).await
    }

    async fn redirect(&self, session: &CheckoutSession) -> Result<()> {
        self.resolve()?.redirect(session).await
    }
}
