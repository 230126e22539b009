//! Payment Service Client
//!
//! Thin `reqwest` wrapper around the backend that creates provider sessions
//! and looks up completed orders. Works natively and in the browser.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;

use checkout_core::{
    CheckoutError, CheckoutSession, OrderApi, OrderRequest, PaymentSuccessRequest,
    PaymentSuccessResponse, ProviderKind, PublicConfig, Result,
};

/// HTTP client for the payment service
#[derive(Clone, Debug)]
pub struct PaymentServiceClient {
    http: reqwest::Client,
    base_url: String,
    config: PublicConfig,
}

impl PaymentServiceClient {
    /// `base_url` resolves endpoints configured as paths (`/api/...`); the
    /// browser passes its own origin.
    pub fn new(base_url: impl Into<String>, config: PublicConfig) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, config)
    }

    pub fn with_client(
        http: reqwest::Client,
        base_url: impl Into<String>,
        config: PublicConfig,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            config,
        }
    }

    pub const fn config(&self) -> &PublicConfig {
        &self.config
    }

    /// Absolute URL for an endpoint
    pub fn url(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            endpoint.to_string()
        } else {
            format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
        }
    }

    /// Create a checkout session with the given provider's orders endpoint
    pub async fn create_order(
        &self,
        kind: ProviderKind,
        order: &OrderRequest,
    ) -> Result<CheckoutSession> {
        let url = self.url(self.config.orders_api(kind));
        let body = self.post_json(&url, order).await?;
        let session = CheckoutSession::from_body(&body)?;

        tracing::info!(
            provider = %kind,
            session_id = %session.session_id,
            "Checkout session created"
        );
        Ok(session)
    }

    async fn post_json<T: Serialize + ?Sized>(&self, url: &str, body: &T) -> Result<String> {
        tracing::debug!(url = %url, "POST");

        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| CheckoutError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| CheckoutError::Transport(e.to_string()))?;

        if status == StatusCode::UNAUTHORIZED {
            return Err(CheckoutError::Unauthorized);
        }
        if !status.is_success() {
            return Err(CheckoutError::Http {
                status: status.as_u16(),
                message: error_message(&text).unwrap_or_else(|| {
                    status.canonical_reason().unwrap_or("Request failed").to_string()
                }),
            });
        }
        Ok(text)
    }
}

#[async_trait(?Send)]
impl OrderApi for PaymentServiceClient {
    async fn payment_success(
        &self,
        request: &PaymentSuccessRequest,
    ) -> Result<PaymentSuccessResponse> {
        let url = self.url(&self.config.payment_success_api);
        let body = self.post_json(&url, request).await?;
        PaymentSuccessResponse::from_body(&body)
    }
}

/// Pull a message out of `{"error": "..."}`, `{"error": {"message": ...}}`
/// or `{"message": "..."}`
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let error = value.get("error");
    error
        .and_then(|e| e.as_str())
        .or_else(|| error.and_then(|e| e.get("message")).and_then(|m| m.as_str()))
        .or_else(|| value.get("message").and_then(|m| m.as_str()))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkout_core::{Address, Product};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn order() -> OrderRequest {
        OrderRequest {
            billing_email: "b@acme.io".into(),
            admin_email: "a@acme.io".into(),
            no_of_licenses: 3,
            company_name: "Acme".into(),
            product: Product::GoldenEdition,
            address: Address {
                address_line1: "1 Main St".into(),
                city: "Springfield".into(),
                state: "IL".into(),
                country: "US".into(),
                postal_code: "62701".into(),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_url_joining() {
        let client = PaymentServiceClient::new("http://localhost:3000/", PublicConfig::default());
        assert_eq!(client.url("/api/stripe/orders"), "http://localhost:3000/api/stripe/orders");
        assert_eq!(client.url("https://pay.example.com/orders"), "https://pay.example.com/orders");
    }

    #[test]
    fn test_error_message_shapes() {
        assert_eq!(error_message(r#"{"error":"nope"}"#).as_deref(), Some("nope"));
        assert_eq!(error_message(r#"{"error":{"message":"bad"}}"#).as_deref(), Some("bad"));
        assert_eq!(error_message(r#"{"message":"meh"}"#).as_deref(), Some("meh"));
        assert_eq!(error_message("<html>"), None);
    }

    #[tokio::test]
    async fn test_create_order_posts_camel_case_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/stripe/orders"))
            .and(body_json(json!({
                "billingEmail": "b@acme.io",
                "adminEmail": "a@acme.io",
                "noOfLicenses": 3,
                "companyName": "Acme",
                "product": "golden-edition-subscription",
                "address": {
                    "addressLine1": "1 Main St",
                    "addressLine2": "",
                    "city": "Springfield",
                    "state": "IL",
                    "country": "US",
                    "postalCode": "62701"
                }
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"sessionId": "cs_test_1"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = PaymentServiceClient::new(server.uri(), PublicConfig::default());
        let session = client.create_order(ProviderKind::Stripe, &order()).await.unwrap();
        assert_eq!(session.session_id, "cs_test_1");
    }

    #[tokio::test]
    async fn test_create_order_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/paypal/orders"))
            .respond_with(
                ResponseTemplate::new(502).set_body_json(json!({"error": "upstream down"})),
            )
            .mount(&server)
            .await;

        let client = PaymentServiceClient::new(server.uri(), PublicConfig::default());
        let err = client.create_order(ProviderKind::PayPal, &order()).await.unwrap_err();
        match err {
            CheckoutError::Http { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "upstream down");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_order_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = PaymentServiceClient::new(server.uri(), PublicConfig::default());
        let err = client.create_order(ProviderKind::Stripe, &order()).await.unwrap_err();
        assert!(matches!(err, CheckoutError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_transport_error() {
        let client = PaymentServiceClient::new("http://127.0.0.1:9", PublicConfig::default());
        let err = client.create_order(ProviderKind::Stripe, &order()).await.unwrap_err();
        assert!(matches!(err, CheckoutError::Transport(_)));
    }

    #[tokio::test]
    async fn test_payment_success_lookup() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/stripe/success"))
            .and(body_json(json!({"sessionId": "abc", "orderNumber": "123"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"subscription": {
                    "plan": "golden-edition-subscription",
                    "orderNumber": "123",
                    "billingEmail": "b@acme.io",
                    "licenses": 2
                }}
            })))
            .mount(&server)
            .await;

        let client = PaymentServiceClient::new(server.uri(), PublicConfig::default());
        let request = PaymentSuccessRequest {
            session_id: "abc".into(),
            order_number: "123".into(),
        };
        let details = client
            .payment_success(&request)
            .await
            .unwrap()
            .into_order_details()
            .unwrap();
        assert_eq!(details.order_number, "123");
        assert_eq!(details.licenses, 2);
    }

    #[tokio::test]
    async fn test_payment_success_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = PaymentServiceClient::new(server.uri(), PublicConfig::default());
        let request = PaymentSuccessRequest {
            session_id: "abc".into(),
            order_number: "123".into(),
        };
        assert!(matches!(
            client.payment_success(&request).await,
            Err(CheckoutError::Unauthorized)
        ));
    }
}
