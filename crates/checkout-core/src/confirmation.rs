//! Order Confirmation
//!
//! State machine for the page the payment provider redirects back to:
//!
//! ```text
//!            begin(params)           resolve(Ok + well-formed)
//!  Pending ───────────────▶ Pending ─────────────────────────▶ Success
//!  (idle)                  (in flight)
//!                               │    resolve(Err | malformed)
//!                               └────────────────────────────▶ Error
//! ```
//!
//! Success and Error are terminal. There is no retry.

use crate::error::{CheckoutError, ORDER_DETAILS_FAILED, Result};
use crate::order::{OrderDetails, PaymentSuccessRequest, PaymentSuccessResponse};
use crate::product::Product;
use crate::provider::OrderApi;

/// Query parameters on the return URL
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReturnParams {
    pub session_id: String,
    pub order_number: String,
}

impl ReturnParams {
    /// Both parameters must be present and non-empty
    pub fn from_query(session_id: Option<&str>, order_number: Option<&str>) -> Option<Self> {
        let session_id = session_id.map(str::trim).filter(|s| !s.is_empty())?;
        let order_number = order_number.map(str::trim).filter(|s| !s.is_empty())?;
        Some(Self {
            session_id: session_id.to_string(),
            order_number: order_number.to_string(),
        })
    }

    pub fn to_request(&self) -> PaymentSuccessRequest {
        PaymentSuccessRequest {
            session_id: self.session_id.clone(),
            order_number: self.order_number.clone(),
        }
    }
}

/// What the confirmation page shows
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfirmationState {
    Pending,
    Success(OrderDetails),
    Error(String),
}

impl ConfirmationState {
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// Confirmation page controller
#[derive(Clone, Debug)]
pub struct Confirmation {
    state: ConfirmationState,
    in_flight: bool,
}

impl Default for Confirmation {
    fn default() -> Self {
        Self::new()
    }
}

impl Confirmation {
    pub const fn new() -> Self {
        Self {
            state: ConfirmationState::Pending,
            in_flight: false,
        }
    }

    pub const fn state(&self) -> &ConfirmationState {
        &self.state
    }

    pub const fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Start the lookup. Returns the request to send, or `None` when the
    /// params are incomplete, a request is already out, or the page has
    /// already settled.
    pub fn begin(&mut self, params: Option<&ReturnParams>) -> Option<PaymentSuccessRequest> {
        if self.in_flight || self.state.is_terminal() {
            return None;
        }
        let request = params?.to_request();
        self.in_flight = true;
        Some(request)
    }

    /// Settle the page with the lookup result
    pub fn resolve(&mut self, result: Result<PaymentSuccessResponse>) -> &ConfirmationState {
        if self.state.is_terminal() {
            return &self.state;
        }
        self.in_flight = false;
        self.state = match result.and_then(PaymentSuccessResponse::into_order_details) {
            Ok(details) => {
                tracing::info!(order_number = %details.order_number, "Order confirmed");
                ConfirmationState::Success(details)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Order details unavailable");
                ConfirmationState::Error(ORDER_DETAILS_FAILED.into())
            }
        };
        &self.state
    }
}

/// Drive a [`Confirmation`] to a terminal state through an [`OrderApi`].
///
/// Returns `Err(CheckoutError::Unauthorized)` untouched so the caller can
/// send the user home; every other failure becomes the error state.
pub async fn fetch_confirmation<A: OrderApi + ?Sized>(
    api: &A,
    confirmation: &mut Confirmation,
    params: Option<&ReturnParams>,
) -> Result<ConfirmationState> {
    let Some(request) = confirmation.begin(params) else {
        return Ok(confirmation.state().clone());
    };
    let result = api.payment_success(&request).await;
    let unauthorized = matches!(result, Err(CheckoutError::Unauthorized));
    let state = confirmation.resolve(result).clone();
    if unauthorized {
        return Err(CheckoutError::Unauthorized);
    }
    Ok(state)
}

/// Display data for a confirmed order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderSummary {
    pub plan_label: String,
    pub order_number: String,
    pub billing_email: String,
    pub licenses: u32,
}

impl OrderSummary {
    /// Teams with more than one seat manage them in the licence manager
    pub const fn show_license_manager(&self) -> bool {
        self.licenses > 1
    }
}

impl From<&OrderDetails> for OrderSummary {
    fn from(details: &OrderDetails) -> Self {
        Self {
            plan_label: Product::label_for(&details.plan),
            order_number: details.order_number.clone(),
            billing_email: details.billing_email.clone(),
            licenses: details.licenses,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::cell::RefCell;

    struct FakeApi {
        body: Option<serde_json::Value>,
        unauthorized: bool,
        calls: RefCell<Vec<PaymentSuccessRequest>>,
    }

    impl FakeApi {
        fn answering(body: serde_json::Value) -> Self {
            Self {
                body: Some(body),
                unauthorized: false,
                calls: RefCell::default(),
            }
        }

        fn failing() -> Self {
            Self {
                body: None,
                unauthorized: false,
                calls: RefCell::default(),
            }
        }
    }

    #[async_trait(?Send)]
    impl OrderApi for FakeApi {
        async fn payment_success(
            &self,
            request: &PaymentSuccessRequest,
        ) -> Result<PaymentSuccessResponse> {
            self.calls.borrow_mut().push(request.clone());
            if self.unauthorized {
                return Err(CheckoutError::Unauthorized);
            }
            match &self.body {
                Some(body) => PaymentSuccessResponse::from_body(&body.to_string()),
                None => Err(CheckoutError::Http {
                    status: 500,
                    message: "boom".into(),
                }),
            }
        }
    }

    fn subscription(licenses: u32) -> serde_json::Value {
        json!({"data": {"subscription": {
            "plan": "golden-edition-subscription",
            "orderNumber": "123",
            "billingEmail": "b@acme.io",
            "licenses": licenses
        }}})
    }

    fn params() -> Option<ReturnParams> {
        ReturnParams::from_query(Some("abc"), Some("123"))
    }

    #[test]
    fn test_params_require_both_values() {
        assert!(ReturnParams::from_query(Some("abc"), None).is_none());
        assert!(ReturnParams::from_query(None, Some("123")).is_none());
        assert!(ReturnParams::from_query(Some(""), Some("123")).is_none());
        assert!(params().is_some());
    }

    #[tokio::test]
    async fn test_success_renders_order_number() {
        let api = FakeApi::answering(subscription(1));
        let mut confirmation = Confirmation::new();

        let state = fetch_confirmation(&api, &mut confirmation, params().as_ref()).await.unwrap();
        let details = match state {
            ConfirmationState::Success(details) => details,
            other => panic!("expected success, got {other:?}"),
        };
        assert_eq!(OrderSummary::from(&details).order_number, "123");
        assert_eq!(
            api.calls.borrow()[0],
            PaymentSuccessRequest {
                session_id: "abc".into(),
                order_number: "123".into(),
            }
        );
    }

    #[tokio::test]
    async fn test_backend_error_renders_generic_message() {
        let api = FakeApi::failing();
        let mut confirmation = Confirmation::new();

        let state = fetch_confirmation(&api, &mut confirmation, params().as_ref()).await.unwrap();
        assert_eq!(state, ConfirmationState::Error(ORDER_DETAILS_FAILED.into()));
    }

    #[tokio::test]
    async fn test_error_envelope_renders_generic_message() {
        let api = FakeApi::answering(json!({"error": {"message": "unknown session"}}));
        let mut confirmation = Confirmation::new();

        let state = fetch_confirmation(&api, &mut confirmation, params().as_ref()).await.unwrap();
        assert_eq!(state, ConfirmationState::Error(ORDER_DETAILS_FAILED.into()));
    }

    #[tokio::test]
    async fn test_missing_params_stay_pending_without_request() {
        let api = FakeApi::answering(subscription(1));
        let mut confirmation = Confirmation::new();

        let state = fetch_confirmation(&api, &mut confirmation, None).await.unwrap();
        assert_eq!(state, ConfirmationState::Pending);
        assert!(api.calls.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_terminal_state_is_final() {
        let api = FakeApi::failing();
        let mut confirmation = Confirmation::new();
        fetch_confirmation(&api, &mut confirmation, params().as_ref()).await.unwrap();

        let api = FakeApi::answering(subscription(1));
        let state = fetch_confirmation(&api, &mut confirmation, params().as_ref()).await.unwrap();
        assert!(matches!(state, ConfirmationState::Error(_)));
        assert!(api.calls.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_unauthorized_is_reported() {
        let api = FakeApi {
            body: None,
            unauthorized: true,
            calls: RefCell::default(),
        };
        let mut confirmation = Confirmation::new();

        let result = fetch_confirmation(&api, &mut confirmation, params().as_ref()).await;
        assert!(matches!(result, Err(CheckoutError::Unauthorized)));
        assert!(matches!(confirmation.state(), ConfirmationState::Error(_)));
    }

    #[test]
    fn test_single_request_in_flight() {
        let mut confirmation = Confirmation::new();
        assert!(confirmation.begin(params().as_ref()).is_some());
        assert!(confirmation.begin(params().as_ref()).is_none());
    }

    #[test]
    fn test_license_manager_link_only_for_teams() {
        let mut details = OrderDetails {
            plan: "ultimate-edition-subscription".into(),
            order_number: "9".into(),
            billing_email: "b@acme.io".into(),
            licenses: 1,
        };
        let single = OrderSummary::from(&details);
        assert!(!single.show_license_manager());
        assert_eq!(single.plan_label, "Ultimate Edition");

        details.licenses = 5;
        assert!(OrderSummary::from(&details).show_license_manager());
    }
}
