//! edition-checkout Web Frontend
//!
//! Leptos-based WASM frontend: licence purchase form and the order
//! confirmation page the payment providers return to.

mod api;
mod app;
mod browser;
mod checkout;
mod components;
mod pages;

pub use app::App;
pub use browser::BrowserNavigator;

use wasm_bindgen::prelude::*;

/// WASM entry point
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(App);
}
