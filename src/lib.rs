//! Heropage - studio landing page
//!
//! Server-rendered Leptos site whose hero runs a scripted animation:
//! a typed headline with a cycling highlighted word and a decorative
//! pointer walking to the call-to-action. The motion logic lives in
//! [`core`] and is driven by the browser glue in [`ui::motion`].

pub mod app;
pub mod core;
pub mod ui;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    console_error_panic_hook::set_once();

    // No tracing subscriber in the browser: motion events reach the
    // console through tracing's `log` records
    _ = console_log::init_with_level(log::Level::Debug);

    leptos::mount::hydrate_body(App);
}
