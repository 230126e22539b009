//! UI Components

use leptos::prelude::*;

use checkout_core::{COUNTRIES, FieldPath, FormState, Navigator, OrderSummary};

use crate::browser::BrowserNavigator;

/// Inline error under a field, shown after a failed submit
#[component]
pub fn FieldError(form: RwSignal<FormState>, path: FieldPath) -> impl IntoView {
    move || {
        form.with(|f| f.error(path))
            .map(|message| view! { <p class="field-error">{message}</p> })
    }
}

/// Labelled text input bound to one form field
#[component]
pub fn TextField(
    form: RwSignal<FormState>,
    path: FieldPath,
    label: &'static str,
    #[prop(default = "text")] input_type: &'static str,
) -> impl IntoView {
    let id = path.as_str();
    let has_error = move || form.with(|f| f.error(path).is_some());

    view! {
        <div class="field">
            <label for=id>{label}</label>
            <input
                type=input_type
                id=id
                name=id
                class:invalid=has_error
                prop:value=move || form.with(|f| f.values().value(path).to_string())
                on:input=move |ev| {
                    form.update(|f| {
                        f.set_field(path, event_target_value(&ev));
                    });
                }
            />
            <FieldError form=form path=path />
        </div>
    }
}

/// Country dropdown for the billing address
#[component]
pub fn CountrySelect(form: RwSignal<FormState>) -> impl IntoView {
    let path = FieldPath::Country;

    view! {
        <div class="field">
            <label for=path.as_str()>"Country"</label>
            <select
                id=path.as_str()
                name=path.as_str()
                class:invalid=move || form.with(|f| f.error(path).is_some())
                prop:value=move || form.with(|f| f.values().value(path).to_string())
                on:change=move |ev| {
                    form.update(|f| {
                        f.set_field(path, event_target_value(&ev));
                    });
                }
            >
                <option value="">"Select a country"</option>
                {COUNTRIES
                    .iter()
                    .map(|c| view! { <option value=c.code>{c.name}</option> })
                    .collect_view()}
            </select>
            <FieldError form=form path=path />
        </div>
    }
}

/// "Back to Website" button shown on both outcomes of the confirmation page
#[component]
pub fn BackToWebsite() -> impl IntoView {
    let go_home = move |_| {
        if let Err(e) = BrowserNavigator.go_to("/") {
            tracing::warn!(error = %e, "Navigation failed");
        }
    };

    view! {
        <button class="btn btn-primary" on:click=go_home>
            "Back to Website"
        </button>
    }
}

/// Confirmed order details
#[component]
pub fn OrderSummaryCard(summary: OrderSummary, license_manager_url: String) -> impl IntoView {
    let show_manager = summary.show_license_manager();

    view! {
        <div class="order-summary">
            <p class="lead">"Thank you for your purchase!"</p>
            <p>"Your order has been processed successfully."</p>

            <h2>"Order Details"</h2>
            <p class="plan">{summary.plan_label}</p>
            <p>"Order Number: " <span class="order-number">{summary.order_number}</span></p>

            <p>
                "Your order details have been successfully emailed to "
                <span class="email">{summary.billing_email}</span>
                "."
            </p>

            <Show when=move || show_manager>
                <p>
                    "You can manage your licenses "
                    <a href=license_manager_url.clone()>"here"</a>
                    "."
                </p>
            </Show>

            <BackToWebsite />
        </div>
    }
}
