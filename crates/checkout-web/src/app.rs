//! Main App Component

use leptos::prelude::*;
use leptos_router::{components::*, path};

use checkout_core::Product;

use crate::pages::{BuyEditionPage, HomePage, PaymentSuccessPage};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router>
            <main class="app">
                <Routes fallback=|| view! { <p>"Page not found"</p> }>
                    <Route path=path!("/") view=HomePage />
                    <Route
                        path=path!("/buy-golden-edition")
                        view=|| view! { <BuyEditionPage product=Product::GoldenEdition /> }
                    />
                    <Route
                        path=path!("/buy-ultimate-edition")
                        view=|| view! { <BuyEditionPage product=Product::UltimateEdition /> }
                    />
                    <Route path=path!("/stripe/success") view=PaymentSuccessPage />
                </Routes>
            </main>
        </Router>
    }
}
