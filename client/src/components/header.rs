//! Top bar with the title and the pan/select mode toggle.

#[cfg(test)]
#[path = "header_test.rs"]
mod header_test;

use leptos::prelude::*;

use canvas::input::Mode;

use crate::state::map::MapState;

/// Label of the mode button: the mode a click switches to.
pub fn mode_toggle_label(mode: Mode) -> &'static str {
    match mode {
        Mode::Pan => "Select Area",
        Mode::Select => "Pan",
    }
}

/// Short description of the current mode.
pub fn mode_hint(mode: Mode) -> &'static str {
    match mode {
        Mode::Pan => "Drag to pan, scroll to zoom, click a pixel for details",
        Mode::Select => "Drag to select an area of pixels",
    }
}

/// Page header.
#[component]
pub fn Header() -> impl IntoView {
    let map = expect_context::<RwSignal<MapState>>();

    let mode = move || map.with(|m| m.mode);
    let on_toggle = move |_ev: leptos::ev::MouseEvent| {
        let Some(next) = map.try_update(MapState::toggle_mode) else {
            return;
        };
        leptos::logging::log!("map mode: {next:?}");
    };

    view! {
        <header class="header">
            <h1 class="header__title">"Pixel Map"</h1>
            <span class="header__hint">{move || mode_hint(mode())}</span>
            <button
                class="btn header__mode"
                class:header__mode--select=move || mode() == Mode::Select
                on:click=on_toggle
            >
                {move || mode_toggle_label(mode())}
            </button>
        </header>
    }
}
