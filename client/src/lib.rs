//! # webarchive
//!
//! Leptos + WASM frontend for the article archive.
//!
//! This crate contains the page, components, view state, network types, and
//! the REST helpers used to talk to the archive gateway. The gateway
//! (`webarchive-server`) renders it via SSR and the browser hydrates it
//! through [`hydrate`].

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: installs panic/log hooks and hydrates the SSR body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
