//! Home Page

use leptos::prelude::*;

use checkout_core::Product;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="home">
            <header class="hero">
                <h1>"Choose your edition"</h1>
                <p class="tagline">"Licences for your whole team, billed per seat"</p>
            </header>

            <section class="editions">
                {Product::ALL
                    .into_iter()
                    .map(|product| view! {
                        <div class="edition">
                            <h3>{product.name()}</h3>
                            <div class="price">
                                {format!("${}", product.unit_price())}
                                <span>"/licence"</span>
                            </div>
                            <a href=edition_path(product) class="btn btn-primary">"Buy"</a>
                        </div>
                    })
                    .collect_view()}
            </section>
        </div>
    }
}

/// Route of the purchase page for an edition
pub const fn edition_path(product: Product) -> &'static str {
    match product {
        Product::GoldenEdition => "/buy-golden-edition",
        Product::UltimateEdition => "/buy-ultimate-edition",
    }
}
