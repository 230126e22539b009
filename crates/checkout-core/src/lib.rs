//! # checkout-core
//!
//! Licence purchase flow: form state, validation, checkout initiation and the
//! post-payment confirmation state machine. Free of I/O; the HTTP client and
//! browser glue live in `checkout-payments` and `checkout-web`.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐  OrderRequest  ┌───────────────────┐  RedirectTarget  ┌───────────┐
//! │  FormState   │───────────────▶│ CheckoutInitiator │─────────────────▶│ Navigator │
//! │ (validation) │                │ (PaymentProvider) │                  │ (browser) │
//! └──────────────┘                └───────────────────┘                  └───────────┘
//!
//!   return URL ──▶ Confirmation ──(OrderApi)──▶ Success | Error
//! ```
//!
//! The `PaymentProvider` trait enables swapping between Stripe, PayPal or a
//! test double without changing form logic.

pub mod config;
pub mod confirmation;
pub mod error;
pub mod form;
pub mod initiator;
pub mod order;
pub mod product;
pub mod provider;
pub mod validation;

pub use config::{CheckoutConfig, PayPalEnvironment, PublicConfig};
pub use confirmation::{
    Confirmation, ConfirmationState, OrderSummary, ReturnParams, fetch_confirmation,
};
pub use error::{CheckoutError, Result};
pub use form::{Address, FormState, PurchaseForm};
pub use initiator::CheckoutInitiator;
pub use order::{
    CheckoutSession, OrderDetails, OrderRequest, PaymentSuccessRequest, PaymentSuccessResponse,
};
pub use product::{COUNTRIES, Country, Product};
pub use provider::{Navigator, OrderApi, PaymentProvider, ProviderKind, RedirectTarget};
pub use validation::{FieldPath, FormErrors};
