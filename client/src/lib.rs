//! # client
//!
//! Leptos + WASM front end for the pixel map.
//!
//! This crate contains the page, components, reactive state, REST helpers,
//! the chat WebSocket loop, and the wallet capability. It drives the `canvas`
//! crate through the `PixelMapHost` bridge component.
//!
//! Browser-only code sits behind the `csr` feature so the state and helper
//! modules build and test natively.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install logging and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&format!("console logger not installed: {e}").into());
    }
    leptos::mount::mount_to_body(app::App);
}
