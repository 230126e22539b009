//! HTTP Handlers

use axum::{
    Json,
    body::{Body, Bytes},
    extract::State,
    http::{HeaderMap, HeaderValue, Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use checkout_core::PublicConfig;

use crate::state::AppState;

/// Request headers passed through to the payment service
static FORWARDED_HEADERS: [header::HeaderName; 4] = [
    header::CONTENT_TYPE,
    header::ACCEPT,
    header::AUTHORIZATION,
    header::COOKIE,
];

pub const REQUEST_ID_HEADER: &str = "x-request-id";

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub stripe_configured: bool,
    pub paypal_configured: bool,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let public = &state.config.public;
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        stripe_configured: public.stripe_publishable_key.is_some(),
        paypal_configured: public.paypal_client_id.is_some(),
    })
}

/// Browser-safe configuration for the WASM frontend
pub async fn public_config(State(state): State<AppState>) -> Json<PublicConfig> {
    Json(state.config.public.clone())
}

/// Forward `/api/*` to the payment service unchanged
pub async fn proxy_api(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let path_and_query = uri.path_and_query().map_or_else(|| uri.path(), |pq| pq.as_str());
    let url = format!("{}{}", state.config.payment_service_url, path_and_query);

    let request_id = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| uuid::Uuid::new_v4().to_string(), str::to_string);

    let mut upstream = state
        .http
        .request(method.clone(), &url)
        .header(REQUEST_ID_HEADER, &request_id)
        .body(body);
    for name in &FORWARDED_HEADERS {
        if let Some(value) = headers.get(name) {
            upstream = upstream.header(name, value);
        }
    }

    let response = upstream.send().await.map_err(|e| {
        tracing::error!(
            request_id = %request_id,
            url = %url,
            error = %e,
            "Payment service unreachable"
        );
        (
            StatusCode::BAD_GATEWAY,
            Json(ErrorResponse {
                error: "Payment service unavailable".into(),
                code: "UPSTREAM_UNAVAILABLE".into(),
            }),
        )
    })?;

    let status = response.status();
    let content_type = response.headers().get(header::CONTENT_TYPE).cloned();
    let bytes = response.bytes().await.map_err(|e| {
        tracing::error!(request_id = %request_id, error = %e, "Payment service response truncated");
        (
            StatusCode::BAD_GATEWAY,
            Json(ErrorResponse {
                error: "Payment service response unreadable".into(),
                code: "UPSTREAM_BODY".into(),
            }),
        )
    })?;

    tracing::info!(
        request_id = %request_id,
        method = %method,
        path = %uri.path(),
        status = status.as_u16(),
        "Proxied payment service call"
    );

    let mut out = (status, Body::from(bytes)).into_response();
    if let Some(content_type) = content_type {
        out.headers_mut().insert(header::CONTENT_TYPE, content_type);
    }
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        out.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{router, state::AppState};
    use axum::http::Request;
    use checkout_core::CheckoutConfig;
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use wiremock::matchers::{
        body_json, header as has_header, method as http_method, path, query_param,
    };
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn state(payment_service_url: &str) -> AppState {
        let mut config = CheckoutConfig::default();
        config.payment_service_url = payment_service_url.to_string();
        config.public.stripe_publishable_key = Some("pk_test_1".into());
        AppState::new(config).unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = router(state("http://127.0.0.1:9"));
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["stripe_configured"], true);
        assert_eq!(body["paypal_configured"], false);
    }

    #[tokio::test]
    async fn test_public_config_hides_server_settings() {
        let app = router(state("http://payments.internal:4000"));
        let response = app
            .oneshot(Request::get("/api/config").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let body = json_body(response).await;
        assert_eq!(body["stripePublishableKey"], "pk_test_1");
        assert_eq!(body["stripeOrdersApi"], "/api/stripe/orders");
        assert!(body.get("paymentServiceUrl").is_none());
    }

    #[tokio::test]
    async fn test_proxy_forwards_body_and_status() {
        let upstream = MockServer::start().await;
        Mock::given(http_method("POST"))
            .and(path("/api/stripe/success"))
            .and(query_param("v", "2"))
            .and(has_header("content-type", "application/json"))
            .and(body_json(json!({"sessionId": "abc", "orderNumber": "123"})))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "not found"})))
            .expect(1)
            .mount(&upstream)
            .await;

        let app = router(state(&upstream.uri()));
        let request = Request::post("/api/stripe/success?v=2")
            .header("content-type", "application/json")
            .body(Body::from(json!({"sessionId": "abc", "orderNumber": "123"}).to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
        assert_eq!(json_body(response).await["error"], "not found");
    }

    #[tokio::test]
    async fn test_proxy_upstream_down() {
        let app = router(state("http://127.0.0.1:9"));
        let request = Request::post("/api/paypal/orders").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(json_body(response).await["code"], "UPSTREAM_UNAVAILABLE");
    }
}
