//! Licence Purchase Page

use leptos::prelude::*;
use std::sync::Arc;

use checkout_core::{CheckoutError, FieldPath, FormState, Product, ProviderKind, PublicConfig};

use crate::api;
use crate::checkout::{PageInitiator, SelectedProvider};
use crate::components::{CountrySelect, FieldError, TextField};

#[component]
pub fn BuyEditionPage(product: Product) -> impl IntoView {
    let form = RwSignal::new(FormState::new(product));
    let (config, set_config) = signal(None::<PublicConfig>);
    let (provider, set_provider) = signal(ProviderKind::Stripe);
    let (submitting, set_submitting) = signal(false);
    let (error, set_error) = signal(None::<String>);
    let initiator = Arc::new(PageInitiator::new(SelectedProvider::new(config, provider)));

    leptos::task::spawn_local(async move {
        match api::load_config().await {
            Ok(loaded) => {
                if let Some(first) = loaded.enabled_providers().first() {
                    set_provider.set(*first);
                }
                set_config.set(Some(loaded));
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load checkout configuration");
                set_error.set(Some(e.user_message()));
            }
        }
    });

    let continue_to_payment = move |_| {
        set_error.set(None);

        let prepared = form
            .try_update(|f| initiator.prepare(f))
            .unwrap_or_else(|| Err(CheckoutError::Config("form unavailable".into())));
        let order = match prepared {
            Ok(order) => order,
            Err(e) => {
                set_error.set(Some(e.user_message()));
                return;
            }
        };

        set_submitting.set(true);
        let initiator = Arc::clone(&initiator);
        leptos::task::spawn_local(async move {
            if let Err(e) = initiator.checkout(&order).await {
                set_error.set(Some(e.user_message()));
            }
            set_submitting.set(false);
        });
    };

    let total = move || {
        form.with(FormState::total)
            .map_or_else(|| "-".to_string(), |t| format!("${t} USD"))
    };

    view! {
        <div class="buy-edition">
            <section class="card">
                <h2>{move || form.with(|f| f.values().product.name())}</h2>

                <TextField
                    form=form
                    path=FieldPath::BillingEmail
                    label="Billing Email Address"
                    input_type="email"
                />

                <div class="field">
                    <label for="adminEmail">"License Admin Email"</label>
                    <label class="checkbox">
                        <input
                            type="checkbox"
                            prop:checked=move || form.with(FormState::same_as_billing)
                            disabled=move || !form.with(FormState::can_toggle_same_as_billing)
                            on:change=move |_| {
                                form.update(|f| {
                                    f.toggle_same_as_billing();
                                });
                            }
                        />
                        <span>"Same as billing email"</span>
                    </label>
                    <input
                        type="email"
                        id="adminEmail"
                        name="adminEmail"
                        class:invalid=move || {
                            form.with(|f| f.error(FieldPath::AdminEmail).is_some())
                        }
                        disabled=move || !form.with(FormState::admin_email_editable)
                        prop:value=move || form.with(|f| f.values().admin_email.clone())
                        on:input=move |ev| {
                            form.update(|f| {
                                f.set_field(FieldPath::AdminEmail, event_target_value(&ev));
                            });
                        }
                    />
                    <FieldError form=form path=FieldPath::AdminEmail />
                </div>

                <TextField form=form path=FieldPath::CompanyName label="Company Name" />
                <TextField form=form path=FieldPath::AddressLine1 label="Address Line 1" />
                <TextField form=form path=FieldPath::AddressLine2 label="Address Line 2" />

                <div class="row">
                    <TextField form=form path=FieldPath::City label="City" />
                    <TextField form=form path=FieldPath::State label="State" />
                </div>

                <div class="row">
                    <CountrySelect form=form />
                    <TextField form=form path=FieldPath::PostalCode label="Postal Code" />
                </div>

                <TextField
                    form=form
                    path=FieldPath::NoOfLicenses
                    label="Number of Licenses"
                    input_type="number"
                />

                <Show when=move || {
                    config.with(|c| c.as_ref().is_some_and(|c| c.enabled_providers().len() > 1))
                }>
                    <div class="field providers">
                        <label>"Pay with"</label>
                        {config
                            .with(|c| {
                                c.as_ref().map(PublicConfig::enabled_providers).unwrap_or_default()
                            })
                            .into_iter()
                            .map(|kind| view! {
                                <label class="radio">
                                    <input
                                        type="radio"
                                        name="provider"
                                        prop:checked=move || provider.get() == kind
                                        disabled=move || submitting.get()
                                        on:change=move |_| set_provider.set(kind)
                                    />
                                    <span>{kind.display_name()}</span>
                                </label>
                            })
                            .collect_view()}
                    </div>
                </Show>

                <div class="total">
                    <h4>"Total: " {total}</h4>
                </div>

                {move || {
                    error.get().map(|message| view! { <p class="checkout-error">{message}</p> })
                }}

                <button
                    type="button"
                    class="btn btn-primary"
                    disabled=move || submitting.get() || config.with(Option::is_none)
                    on:click=continue_to_payment
                >
                    {move || {
                        if submitting.get() { "Redirecting..." } else { "Continue to Payment" }
                    }}
                </button>
            </section>
        </div>
    }
}
