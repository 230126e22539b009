//! Browser Navigation
//!
//! `Navigator` backed by `window.location`, plus the Stripe.js
//! `redirectToCheckout` handoff for sessions without a hosted URL. Stripe.js
//! must be loaded by `index.html` (`<script src="https://js.stripe.com/v3/">`).

use async_trait::async_trait;
use js_sys::{Function, Object, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use checkout_core::{CheckoutError, Navigator, RedirectTarget, Result};

/// Navigates the real browser window
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserNavigator;

#[async_trait(?Send)]
impl Navigator for BrowserNavigator {
    async fn redirect(&self, target: &RedirectTarget) -> Result<()> {
        match target {
            RedirectTarget::Url(url) => set_href(url),
            RedirectTarget::StripeSession {
                publishable_key,
                session_id,
            } => redirect_to_stripe_checkout(publishable_key, session_id).await,
        }
    }

    fn go_to(&self, path: &str) -> Result<()> {
        set_href(path)
    }
}

fn set_href(url: &str) -> Result<()> {
    let window = web_sys::window().ok_or_else(|| CheckoutError::Provider("no window".into()))?;
    window
        .location()
        .set_href(url)
        .map_err(|e| CheckoutError::Provider(js_message(&e)))
}

/// `Stripe(key).redirectToCheckout({ sessionId })`
async fn redirect_to_stripe_checkout(publishable_key: &str, session_id: &str) -> Result<()> {
    let stripe_ctor: Function = Reflect::get(&js_sys::global(), &"Stripe".into())
        .ok()
        .and_then(|v| v.dyn_into().ok())
        .ok_or_else(|| CheckoutError::Provider("Stripe.js is not loaded".into()))?;

    let stripe = stripe_ctor
        .call1(&JsValue::NULL, &publishable_key.into())
        .map_err(|e| CheckoutError::Provider(js_message(&e)))?;

    let redirect: Function = Reflect::get(&stripe, &"redirectToCheckout".into())
        .ok()
        .and_then(|v| v.dyn_into().ok())
        .ok_or_else(|| CheckoutError::Provider("redirectToCheckout unavailable".into()))?;

    let options = Object::new();
    Reflect::set(&options, &"sessionId".into(), &session_id.into())
        .map_err(|e| CheckoutError::Provider(js_message(&e)))?;

    let promise: Promise = redirect
        .call1(&stripe, &options)
        .map_err(|e| CheckoutError::Provider(js_message(&e)))?
        .dyn_into()
        .map_err(|_| {
            CheckoutError::Provider("redirectToCheckout did not return a promise".into())
        })?;

    // Resolves only when the redirect failed; success unloads the page
    let outcome = JsFuture::from(promise)
        .await
        .map_err(|e| CheckoutError::Provider(js_message(&e)))?;

    match Reflect::get(&outcome, &"error".into()) {
        Ok(error) if !error.is_undefined() && !error.is_null() => {
            let message = js_message(&error);
            tracing::error!(session_id = %session_id, error = %message, "Stripe redirect failed");
            Err(CheckoutError::Provider(message))
        }
        _ => Ok(()),
    }
}

/// Best-effort text for a thrown JS value or a Stripe error object
fn js_message(value: &JsValue) -> String {
    Reflect::get(value, &"message".into())
        .ok()
        .and_then(|m| m.as_string())
        .or_else(|| value.as_string())
        .unwrap_or_else(|| "Unknown browser error".into())
}
