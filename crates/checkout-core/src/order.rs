//! Order Wire Types
//!
//! JSON bodies exchanged with the payment service. Field names are camelCase
//! on the wire.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CheckoutError, Result};
use crate::form::Address;
use crate::product::Product;

/// Body of the order-creation call
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub billing_email: String,
    pub admin_email: String,
    pub no_of_licenses: u32,
    pub company_name: String,
    pub product: Product,
    pub address: Address,
}

/// Hypermedia link as returned by PayPal's orders API
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
    pub rel: String,
}

/// Pending payment handed out by the payment service
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSession {
    /// Stripe session id or PayPal order id
    #[serde(alias = "id")]
    pub session_id: String,

    /// Hosted checkout URL, when the service returns one
    #[serde(default, alias = "checkoutUrl", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

impl CheckoutSession {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            url: None,
            links: Vec::new(),
        }
    }

    /// Parse an order-creation response body
    pub fn from_body(body: &str) -> Result<Self> {
        let session: Self = serde_json::from_str(body)
            .map_err(|e| CheckoutError::MalformedResponse(format!("order response: {e}")))?;
        if session.session_id.trim().is_empty() {
            return Err(CheckoutError::MalformedResponse("empty sessionId".into()));
        }
        Ok(session)
    }

    /// First link whose relation matches one of `rels`
    pub fn link(&self, rels: &[&str]) -> Option<&str> {
        rels.iter()
            .find_map(|rel| self.links.iter().find(|l| l.rel == *rel))
            .map(|l| l.href.as_str())
    }
}

/// Body of the payment-success call
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSuccessRequest {
    pub session_id: String,
    pub order_number: String,
}

/// Completed order as shown on the confirmation page
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetails {
    pub plan: String,
    pub order_number: String,
    pub billing_email: String,
    pub licenses: u32,
}

/// Subscription object as the service sends it; every field may be absent
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSubscription {
    plan: Option<String>,
    order_number: Option<Value>,
    billing_email: Option<String>,
    licenses: Option<Value>,
}

#[derive(Clone, Debug, Default, Deserialize)]
struct RawData {
    subscription: Option<RawSubscription>,
}

/// Payment-success response envelope.
///
/// Accepts `{data: {subscription}}` as well as a bare `{subscription}`; an
/// `error` member marks the whole response as failed.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PaymentSuccessResponse {
    #[serde(default)]
    error: Option<Value>,
    #[serde(default)]
    data: Option<RawData>,
    #[serde(default)]
    subscription: Option<RawSubscription>,
}

impl PaymentSuccessResponse {
    pub fn from_body(body: &str) -> Result<Self> {
        serde_json::from_str(body)
            .map_err(|e| CheckoutError::MalformedResponse(format!("payment success response: {e}")))
    }

    /// Extract order details, rejecting error envelopes and incomplete
    /// subscriptions
    pub fn into_order_details(self) -> Result<OrderDetails> {
        if let Some(error) = self.error.filter(|e| !e.is_null() && *e != Value::Bool(false)) {
            return Err(CheckoutError::MalformedResponse(format!("error envelope: {error}")));
        }

        let raw = self
            .data
            .and_then(|d| d.subscription)
            .or(self.subscription)
            .ok_or_else(|| CheckoutError::MalformedResponse("missing subscription".into()))?;

        let missing = |field: &str| {
            CheckoutError::MalformedResponse(format!("subscription missing {field}"))
        };

        let plan = raw.plan.filter(|p| !p.is_empty()).ok_or_else(|| missing("plan"))?;
        let order_number = raw
            .order_number
            .as_ref()
            .and_then(scalar_to_string)
            .ok_or_else(|| missing("orderNumber"))?;
        let billing_email = raw
            .billing_email
            .filter(|e| !e.is_empty())
            .ok_or_else(|| missing("billingEmail"))?;
        let licenses = raw
            .licenses
            .as_ref()
            .and_then(scalar_to_u32)
            .ok_or_else(|| missing("licenses"))?;

        Ok(OrderDetails {
            plan,
            order_number,
            billing_email,
            licenses,
        })
    }
}

/// Order numbers arrive as strings or numbers depending on the backend
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn scalar_to_u32(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
