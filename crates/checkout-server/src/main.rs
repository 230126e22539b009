//! edition-checkout HTTP Server
//!
//! Axum-based server for the licence checkout frontend. Serves the WASM
//! bundle, hands the browser its public configuration, and forwards `/api/*`
//! to the payment service so the frontend only ever talks to its own origin.

mod handlers;
mod state;

use axum::{
    Router,
    routing::{any, get},
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use checkout_core::CheckoutConfig;

use crate::handlers::{health_check, proxy_api, public_config};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    let config = CheckoutConfig::from_env()?;
    let providers = config.public.enabled_providers();
    if providers.is_empty() {
        tracing::warn!("No payment provider configured - checkout disabled");
        tracing::warn!("  Set STRIPE_PUBLISHABLE_KEY and/or PAYPAL_CLIENT_ID in .env");
    }
    for provider in &providers {
        tracing::info!(provider = %provider, "Payment provider enabled");
    }
    tracing::info!(
        upstream = %config.payment_service_url,
        static_dir = %config.static_dir,
        "Payment service proxy configured"
    );

    let addr = config.bind_addr.clone();
    let state = AppState::new(config)?;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("edition-checkout server running on http://{}", addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health       - Health check");
    tracing::info!("  GET  /api/config   - Public checkout configuration");
    tracing::info!("  ANY  /api/*        - Proxied to the payment service");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the application router
fn router(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();
    let index = format!("{static_dir}/index.html");

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/config", get(public_config))
        .route("/api/{*path}", any(proxy_api))
        // Static files (WASM frontend); client-side routes fall back to index.html
        .fallback_service(ServeDir::new(static_dir).fallback(ServeFile::new(index)))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
