//! Payment Success Page
//!
//! Landing page after the hosted checkout. Reads `sessionId` and
//! `orderNumber` from the query string and looks the order up once.

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use checkout_core::{
    CheckoutError, Confirmation, ConfirmationState, Navigator, OrderSummary, ReturnParams,
    fetch_confirmation,
};

use crate::api;
use crate::browser::BrowserNavigator;
use crate::components::{BackToWebsite, OrderSummaryCard};

#[component]
pub fn PaymentSuccessPage() -> impl IntoView {
    let query = use_query_map();
    let (state, set_state) = signal(ConfirmationState::Pending);
    let (license_manager_url, set_license_manager_url) = signal(String::from("/license-manager"));
    let started = StoredValue::new(false);

    Effect::new(move |_| {
        let params = query.with(|q| {
            ReturnParams::from_query(q.get("sessionId").as_deref(), q.get("orderNumber").as_deref())
        });
        // Route params may arrive after first render; look up exactly once
        if params.is_none() || started.get_value() {
            return;
        }
        started.set_value(true);

        leptos::task::spawn_local(async move {
            let mut confirmation = Confirmation::new();
            let outcome = match api::load_config().await {
                Ok(config) => {
                    set_license_manager_url.set(config.license_manager_url.clone());
                    let client = api::client(&config);
                    fetch_confirmation(client.as_ref(), &mut confirmation, params.as_ref()).await
                }
                Err(e) => {
                    confirmation.begin(params.as_ref());
                    Ok(confirmation.resolve(Err(e)).clone())
                }
            };

            match outcome {
                Ok(next) => set_state.set(next),
                Err(CheckoutError::Unauthorized) => {
                    set_state.set(confirmation.state().clone());
                    if let Err(e) = BrowserNavigator.go_to("/") {
                        tracing::warn!(error = %e, "Navigation failed");
                    }
                }
                Err(e) => set_state.set(ConfirmationState::Error(e.user_message())),
            }
        });
    });

    view! {
        <div class="payment-success">
            <div class="card">
                <h1>"Payment Successful"</h1>
                {move || match state.get() {
                    ConfirmationState::Pending => {
                        view! { <p class="lead">"Fetching order details..."</p> }.into_any()
                    }
                    ConfirmationState::Error(message) => {
                        view! {
                            <div class="error">
                                <p class="checkout-error">{message}</p>
                                <BackToWebsite />
                            </div>
                        }
                        .into_any()
                    }
                    ConfirmationState::Success(details) => {
                        view! {
                            <OrderSummaryCard
                                summary=OrderSummary::from(&details)
                                license_manager_url=license_manager_url.get()
                            />
                        }
                        .into_any()
                    }
                }}
            </div>
        </div>
    }
}
