//! Checkout Initiator
//!
//! Validates the purchase form, asks the provider for a session and hands the
//! browser over to the provider's hosted page. No retries: a failed attempt
//! is reported and the user submits again.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{CheckoutError, Result};
use crate::form::FormState;
use crate::order::{CheckoutSession, OrderRequest};
use crate::provider::PaymentProvider;

/// Drives one checkout at a time through a [`PaymentProvider`].
///
/// Meant to live as long as the page: the in-flight flag is what turns a
/// second click into [`CheckoutError::Busy`].
pub struct CheckoutInitiator<P> {
    provider: P,
    in_flight: AtomicBool,
}

impl<P: PaymentProvider> CheckoutInitiator<P> {
    pub const fn new(provider: P) -> Self {
        Self {
            provider,
            in_flight: AtomicBool::new(false),
        }
    }

    pub const fn provider(&self) -> &P {
        &self.provider
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Synchronous half of [`submit`](Self::submit): refuse while a checkout
    /// is running, otherwise validate the form into an order.
    ///
    /// Field errors are left on the form for inline display.
    pub fn prepare(&self, form: &mut FormState) -> Result<OrderRequest> {
        if self.is_in_flight() {
            return Err(CheckoutError::Busy);
        }
        form.submit().map_err(CheckoutError::Validation)
    }

    /// Validate the form and, if it passes, start the checkout.
    ///
    /// Validation failures never reach the provider.
    pub async fn submit(&self, form: &mut FormState) -> Result<CheckoutSession> {
        let order = self.prepare(form)?;
        self.checkout(&order).await
    }

    /// Create a session for an already validated order and redirect to it
    pub async fn checkout(&self, order: &OrderRequest) -> Result<CheckoutSession> {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            return Err(CheckoutError::Busy);
        }
        let result = self.run(order).await;
        self.in_flight.store(false, Ordering::Release);
        result
    }

    async fn run(&self, order: &OrderRequest) -> Result<CheckoutSession> {
        let kind = self.provider.kind();
        tracing::info!(
            provider = %kind,
            product = %order.product,
            licenses = order.no_of_licenses,
            "Creating checkout session"
        );

        let session = self.provider.create_session(order).await.map_err(|e| {
            tracing::error!(provider = %kind, error = %e, "Checkout session creation failed");
            e
        })?;

        self.provider.redirect(&session).await.map_err(|e| {
            tracing::error!(
                provider = %kind,
                session_id = %session.session_id,
                error = %e,
                "Redirect to hosted checkout failed"
            );
            e
        })?;

        Ok(session)
    }
}
