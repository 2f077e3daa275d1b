//! Canvas viewport synchronization helpers shared by the map host.
//!
//! These helpers bridge the Leptos reactive world and the imperative canvas engine. They are all
//! `#[cfg(feature = "csr")]` because they depend on `web_sys` and only exist in the browser.

#[cfg(feature = "csr")]
use leptos::prelude::*;

#[cfg(feature = "csr")]
use canvas::engine::Engine;

/// Read the canvas element's CSS dimensions and device pixel ratio, then push them to the engine.
///
/// Must be called on every resize so that coordinate transforms stay accurate. Uses CSS pixel
/// dimensions (`client_width` / `client_height`); the engine multiplies by DPR when sizing the
/// backing store.
#[cfg(feature = "csr")]
pub fn sync_viewport(engine: &mut Engine, canvas_ref: &NodeRef<leptos::html::Canvas>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(canvas) = canvas_ref.get() else {
        return;
    };
    let width = f64::from(canvas.client_width()).max(1.0);
    let height = f64::from(canvas.client_height()).max(1.0);
    let dpr = window.device_pixel_ratio().max(1.0);
    engine.set_viewport(width, height, dpr);
}

/// Return the current wall-clock time in milliseconds via the JS `Date.now()` API.
#[cfg(feature = "csr")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}
