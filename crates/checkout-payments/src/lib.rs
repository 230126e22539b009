//! # checkout-payments
//!
//! Payment service client and the payment providers behind the checkout form.
//!
//! ## Providers
//!
//! ### Stripe Checkout (Hosted)
//!
//! ```text
//! ┌─────────────┐     ┌─────────────────┐     ┌──────────────────┐
//! │  Purchase   │────▶│  Stripe Hosted  │────▶│  /stripe/success │
//! │    form     │     │  Checkout Page  │     │  (confirmation)  │
//! └─────────────┘     └─────────────────┘     └──────────────────┘
//! ```
//!
//! ### PayPal
//!
//! Same shape; the hosted page is PayPal's order approval screen.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use checkout_payments::{CheckoutProvider, PaymentServiceClient};
//!
//! let client = Arc::new(PaymentServiceClient::new(origin, public_config));
//! let provider = CheckoutProvider::for_kind(ProviderKind::Stripe, client, navigator)?;
//! let initiator = CheckoutInitiator::new(provider);
//! initiator.checkout(&order).await?;
//! ```

mod client;
mod paypal;
mod stripe;

pub use client::PaymentServiceClient;
pub use paypal::PayPalCheckout;
pub use stripe::StripeCheckout;

use async_trait::async_trait;
use std::sync::Arc;

use checkout_core::{
    CheckoutSession, Navigator, OrderRequest, PaymentProvider, ProviderKind, Result,
};

/// Provider chosen at submit time
pub enum CheckoutProvider<N> {
    Stripe(StripeCheckout<N>),
    PayPal(PayPalCheckout<N>),
}

impl<N: Navigator> CheckoutProvider<N> {
    pub fn for_kind(
        kind: ProviderKind,
        client: Arc<PaymentServiceClient>,
        navigator: N,
    ) -> Result<Self> {
        Ok(match kind {
            ProviderKind::Stripe => Self::Stripe(StripeCheckout::new(client, navigator)?),
            ProviderKind::PayPal => Self::PayPal(PayPalCheckout::new(client, navigator)?),
        })
    }
}

#[async_trait(?Send)]
impl<N: Navigator> PaymentProvider for CheckoutProvider<N> {
    fn kind(&self) -> ProviderKind {
        match self {
            Self::Stripe(p) => p.kind(),
            Self::PayPal(p) => p.kind(),
        }
    }

    async fn create_session(&self, order: &OrderRequest) -> Result<CheckoutSession> {
        match self {
            Self::Stripe(p) => p.create_session(order).await,
            Self::PayPal(p) => p.create_session(order).await,
        }
    }

    async fn redirect(&self, session: &CheckoutSession) -> Result<()> {
        match self {
            Self::Stripe(p) => p.redirect(session).await,
            Self::PayPal(p) => p.redirect(session).await,
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use async_trait::async_trait;
    use checkout_core::{Navigator, RedirectTarget, Result};
    use std::cell::RefCell;

    /// Navigator that records where it was sent
    #[derive(Default)]
    pub struct RecordingNavigator {
        targets: RefCell<Vec<RedirectTarget>>,
    }

    impl RecordingNavigator {
        pub fn targets(&self) -> Vec<RedirectTarget> {
            self.targets.borrow().clone()
        }
    }

    #[async_trait(?Send)]
    impl Navigator for RecordingNavigator {
        async fn redirect(&self, target: &RedirectTarget) -> Result<()> {
            self.targets.borrow_mut().push(target.clone());
            Ok(())
        }

        fn go_to(&self, _path: &str) -> Result<()> {
            Ok(())
        }
    }
}
