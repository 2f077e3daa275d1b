//! Bridge component between Leptos state and the imperative `canvas::Engine`.
//!
//! ARCHITECTURE
//! ============
//! The canvas crate owns gesture classification and drawing. This host feeds
//! it browser events, the map image and the ownership index, and turns the
//! engine's actions into state updates for the side panels. Redraws are
//! coalesced into one per animation frame.

use leptos::prelude::*;

use crate::config::AppConfig;
use crate::state::map::MapState;
use crate::state::pixel_info::PixelInfoState;
use crate::state::wallet::WalletState;

#[cfg(feature = "csr")]
use std::cell::RefCell;
#[cfg(feature = "csr")]
use std::rc::Rc;

#[cfg(feature = "csr")]
use canvas::area::OwnerIndex;
#[cfg(feature = "csr")]
use canvas::engine::{Action, Engine};
#[cfg(feature = "csr")]
use canvas::grid::CellRect;
#[cfg(feature = "csr")]
use gloo_timers::callback::Interval;
#[cfg(feature = "csr")]
use wasm_bindgen::{JsCast, closure::Closure};

#[cfg(feature = "csr")]
use crate::components::pixel_info_card::load_pixel_info;
#[cfg(feature = "csr")]
use crate::net::api::{fetch_pixels, pixel_map_url};
#[cfg(feature = "csr")]
use crate::util::canvas_input::{map_button, pointer_point, wheel_delta, wheel_point};
#[cfg(feature = "csr")]
use crate::util::canvas_viewport::{now_ms, sync_viewport};

/// Ownership data is re-fetched on this period.
#[cfg(feature = "csr")]
const OWNER_REFRESH_MS: u32 = 30_000;

#[cfg(feature = "csr")]
type EngineSlot = Rc<RefCell<Option<Engine>>>;

#[cfg(feature = "csr")]
fn render_now(engine: &Engine) {
    if let Err(e) = engine.render() {
        leptos::logging::warn!("map render failed: {e:?}");
    }
}

#[cfg(feature = "csr")]
fn request_render(engine: &EngineSlot, raf_pending: RwSignal<bool>) {
    if raf_pending.get_untracked() {
        return;
    }
    raf_pending.set(true);

    let Some(window) = web_sys::window() else {
        raf_pending.set(false);
        if let Some(engine) = engine.borrow().as_ref() {
            render_now(engine);
        }
        return;
    };

    let engine_for_cb = Rc::clone(engine);
    let holder: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let holder_for_cb = Rc::clone(&holder);
    let cb = Closure::wrap(Box::new(move |_ts: f64| {
        raf_pending.set(false);
        if let Some(engine) = engine_for_cb.borrow().as_ref() {
            render_now(engine);
        }
        holder_for_cb.borrow_mut().take();
    }) as Box<dyn FnMut(f64)>);

    if window
        .request_animation_frame(cb.as_ref().unchecked_ref())
        .is_ok()
    {
        *holder.borrow_mut() = Some(cb);
    } else {
        raf_pending.set(false);
        if let Some(engine) = engine.borrow().as_ref() {
            render_now(engine);
        }
    }
}

/// Load the map image and hand it to the engine once decoded.
#[cfg(feature = "csr")]
fn load_map_image(
    engine: &EngineSlot,
    onload_slot: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
    api_base: &str,
    map: RwSignal<MapState>,
    raf_pending: RwSignal<bool>,
) {
    let image = match web_sys::HtmlImageElement::new() {
        Ok(image) => image,
        Err(e) => {
            leptos::logging::warn!("map image element: {e:?}");
            return;
        }
    };

    let engine_for_cb = Rc::clone(engine);
    let image_for_cb = image.clone();
    let onload = Closure::wrap(Box::new(move || {
        if let Some(engine) = engine_for_cb.borrow_mut().as_mut() {
            engine.set_image(image_for_cb.clone());
        }
        map.update(|m| m.load_error = None);
        request_render(&engine_for_cb, raf_pending);
    }) as Box<dyn FnMut()>);
    image.set_onload(Some(onload.as_ref().unchecked_ref()));

    let onerror = Closure::once_into_js(move || {
        leptos::logging::warn!("map image failed to load");
        map.update(|m| m.load_error = Some("Failed to load pixel map image".to_owned()));
    });
    image.set_onerror(Some(onerror.unchecked_ref()));

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let stamp = now_ms() as u64;
    image.set_src(&pixel_map_url(api_base, stamp));
    *onload_slot.borrow_mut() = Some(onload);
}

/// Re-fetch ownership and rebuild the engine's owner index.
#[cfg(feature = "csr")]
fn refresh_owners(engine: &EngineSlot, api_base: String, raf_pending: RwSignal<bool>) {
    let engine = Rc::clone(engine);
    leptos::task::spawn_local(async move {
        match fetch_pixels(&api_base).await {
            Ok(pixels) => {
                if let Some(engine) = engine.borrow_mut().as_mut() {
                    engine.core.set_owners(OwnerIndex::from_pixels(&pixels));
                }
                request_render(&engine, raf_pending);
            }
            Err(e) => leptos::logging::warn!("ownership refresh failed: {e}"),
        }
    });
}

/// Context handles an action may touch.
#[cfg(feature = "csr")]
#[derive(Clone, Copy)]
struct ActionTargets {
    map: RwSignal<MapState>,
    pixel_info: RwSignal<PixelInfoState>,
    wallet: RwSignal<WalletState>,
    cursor: RwSignal<String>,
    raf_pending: RwSignal<bool>,
}

#[cfg(feature = "csr")]
fn process_actions(actions: Vec<Action>, engine_slot: &EngineSlot, api_base: &str, targets: ActionTargets) {
    for action in actions {
        match action {
            Action::CellClicked(cell) => {
                let owned_area = {
                    let engine = engine_slot.borrow();
                    let address = targets.wallet.with_untracked(|w| w.address.clone());
                    match (engine.as_ref(), address) {
                        (Some(engine), Some(address)) => {
                            let area = engine.core.owned_area(cell, &address);
                            (!area.is_empty()).then_some(area)
                        }
                        _ => None,
                    }
                };
                targets.map.update(|m| m.select_cell(cell, owned_area));
                load_pixel_info(api_base.to_owned(), targets.pixel_info, cell);
            }
            Action::AreaSelected(cells) => {
                targets.map.update(|m| m.select_area(cells));
            }
            Action::SetCursor(cursor) => targets.cursor.set(cursor),
            Action::RenderNeeded => request_render(engine_slot, targets.raf_pending),
        }
    }
}

/// Map canvas host component.
///
/// Mounts `canvas::engine::Engine` on the canvas element, loads the map image
/// and ownership, and routes pointer input through the engine.
#[component]
pub fn PixelMapHost() -> impl IntoView {
    let config = expect_context::<AppConfig>();
    let map = expect_context::<RwSignal<MapState>>();
    let pixel_info = expect_context::<RwSignal<PixelInfoState>>();
    let wallet = expect_context::<RwSignal<WalletState>>();
    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
    let cursor = RwSignal::new(map.get_untracked().mode.idle_cursor().to_owned());
    #[cfg(not(feature = "csr"))]
    let _ = (&config, pixel_info, wallet);

    #[cfg(feature = "csr")]
    let raf_pending = RwSignal::new(false);
    #[cfg(feature = "csr")]
    let engine: EngineSlot = Rc::new(RefCell::new(None));
    #[cfg(feature = "csr")]
    let image_onload: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    #[cfg(feature = "csr")]
    let owner_tick = Rc::new(RefCell::new(None::<Interval>));
    #[cfg(feature = "csr")]
    let targets = ActionTargets { map, pixel_info, wallet, cursor, raf_pending };

    #[cfg(feature = "csr")]
    {
        let engine = Rc::clone(&engine);
        let canvas_ref_mount = canvas_ref;
        let owner_tick = Rc::clone(&owner_tick);
        let image_onload = Rc::clone(&image_onload);
        let api_base = config.api_base.clone();
        Effect::new(move || {
            let Some(canvas) = canvas_ref_mount.get() else {
                return;
            };
            if engine.borrow().is_some() {
                return;
            }

            let mut instance = Engine::new(canvas);
            sync_viewport(&mut instance, &canvas_ref_mount);
            instance.core.mode = map.get_untracked().mode;
            render_now(&instance);
            *engine.borrow_mut() = Some(instance);

            load_map_image(&engine, &image_onload, &api_base, map, raf_pending);
            refresh_owners(&engine, api_base.clone(), raf_pending);

            let engine_for_tick = Rc::clone(&engine);
            let api_base_for_tick = api_base.clone();
            let tick = Interval::new(OWNER_REFRESH_MS, move || {
                refresh_owners(&engine_for_tick, api_base_for_tick.clone(), raf_pending);
            });
            *owner_tick.borrow_mut() = Some(tick);
        });
    }

    // Reload image and ownership after an update.
    #[cfg(feature = "csr")]
    {
        let engine = Rc::clone(&engine);
        let image_onload = Rc::clone(&image_onload);
        let api_base = config.api_base.clone();
        Effect::new(move |prev: Option<u64>| {
            let seq = map.with(|m| m.reload_seq);
            if prev.is_some_and(|p| p != seq) && engine.borrow().is_some() {
                load_map_image(&engine, &image_onload, &api_base, map, raf_pending);
                refresh_owners(&engine, api_base.clone(), raf_pending);
            }
            seq
        });
    }

    #[cfg(feature = "csr")]
    {
        let engine = Rc::clone(&engine);
        Effect::new(move || {
            let address = wallet.with(|w| w.address.clone());
            if let Some(engine) = engine.borrow_mut().as_mut() {
                engine.core.set_highlight_owner(address.as_deref());
            }
            request_render(&engine, raf_pending);
        });
    }

    #[cfg(feature = "csr")]
    {
        let engine = Rc::clone(&engine);
        let api_base = config.api_base.clone();
        Effect::new(move || {
            let mode = map.with(|m| m.mode);
            let actions = match engine.borrow_mut().as_mut() {
                Some(engine) if engine.core.mode != mode => engine.core.set_mode(mode),
                _ => Vec::new(),
            };
            process_actions(actions, &engine, &api_base, targets);
        });
    }

    #[cfg(feature = "csr")]
    {
        let engine = Rc::clone(&engine);
        let api_base = config.api_base.clone();
        Effect::new(move |prev: Option<u64>| {
            let seq = map.with(|m| m.clear_selection_seq);
            if prev.is_some_and(|p| p != seq) {
                let actions = engine
                    .borrow_mut()
                    .as_mut()
                    .map(|e| e.core.clear_selection())
                    .unwrap_or_default();
                process_actions(actions, &engine, &api_base, targets);
            }
            seq
        });
    }

    // Draw the accepted area (or a finished drag) as the selection rectangle.
    #[cfg(feature = "csr")]
    {
        let engine = Rc::clone(&engine);
        let api_base = config.api_base.clone();
        Effect::new(move |prev: Option<Option<CellRect>>| {
            let outline = map.with(|m| m.outline);
            if prev.is_some_and(|p| p != outline) {
                let actions = match (engine.borrow_mut().as_mut(), outline) {
                    (Some(engine), Some(rect)) => {
                        engine.core.select_rect(rect);
                        vec![Action::RenderNeeded]
                    }
                    (Some(engine), None) => engine.core.clear_selection(),
                    (None, _) => Vec::new(),
                };
                process_actions(actions, &engine, &api_base, targets);
            }
            outline
        });
    }

    #[cfg(feature = "csr")]
    {
        let engine = Rc::clone(&engine);
        let handle = window_event_listener(leptos::ev::resize, move |_| {
            if let Some(engine) = engine.borrow_mut().as_mut() {
                sync_viewport(engine, &canvas_ref);
            }
            request_render(&engine, raf_pending);
        });
        on_cleanup(move || handle.remove());
    }

    let on_pointer_down = {
        #[cfg(feature = "csr")]
        {
            let engine = Rc::clone(&engine);
            let api_base = config.api_base.clone();
            move |ev: leptos::ev::PointerEvent| {
                ev.prevent_default();
                if let Some(canvas) = canvas_ref.get() {
                    if let Err(e) = canvas.set_pointer_capture(ev.pointer_id()) {
                        leptos::logging::warn!("pointer capture failed: {e:?}");
                    }
                }
                let actions = match engine.borrow_mut().as_mut() {
                    Some(engine) => engine.core.on_pointer_down(pointer_point(&ev), map_button(&ev), now_ms()),
                    None => return,
                };
                process_actions(actions, &engine, &api_base, targets);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            move |_ev: leptos::ev::PointerEvent| {}
        }
    };

    let on_pointer_move = {
        #[cfg(feature = "csr")]
        {
            let engine = Rc::clone(&engine);
            let api_base = config.api_base.clone();
            move |ev: leptos::ev::PointerEvent| {
                let actions = match engine.borrow_mut().as_mut() {
                    Some(engine) => engine.core.on_pointer_move(pointer_point(&ev)),
                    None => return,
                };
                process_actions(actions, &engine, &api_base, targets);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            move |_ev: leptos::ev::PointerEvent| {}
        }
    };

    let on_pointer_up = {
        #[cfg(feature = "csr")]
        {
            let engine = Rc::clone(&engine);
            let api_base = config.api_base.clone();
            move |ev: leptos::ev::PointerEvent| {
                if let Some(canvas) = canvas_ref.get() {
                    if canvas.has_pointer_capture(ev.pointer_id()) {
                        if let Err(e) = canvas.release_pointer_capture(ev.pointer_id()) {
                            leptos::logging::warn!("pointer release failed: {e:?}");
                        }
                    }
                }
                let actions = match engine.borrow_mut().as_mut() {
                    Some(engine) => engine.core.on_pointer_up(pointer_point(&ev), map_button(&ev), now_ms()),
                    None => return,
                };
                process_actions(actions, &engine, &api_base, targets);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            move |_ev: leptos::ev::PointerEvent| {}
        }
    };

    let on_pointer_leave = {
        #[cfg(feature = "csr")]
        {
            let engine = Rc::clone(&engine);
            let api_base = config.api_base.clone();
            move |_ev: leptos::ev::PointerEvent| {
                let actions = match engine.borrow_mut().as_mut() {
                    Some(engine) => engine.core.on_pointer_leave(),
                    None => return,
                };
                process_actions(actions, &engine, &api_base, targets);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            move |_ev: leptos::ev::PointerEvent| {}
        }
    };

    let on_wheel = {
        #[cfg(feature = "csr")]
        {
            let engine = Rc::clone(&engine);
            let api_base = config.api_base.clone();
            move |ev: leptos::ev::WheelEvent| {
                ev.prevent_default();
                let actions = match engine.borrow_mut().as_mut() {
                    Some(engine) => engine.core.on_wheel(wheel_point(&ev), wheel_delta(&ev)),
                    None => return,
                };
                process_actions(actions, &engine, &api_base, targets);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            move |_ev: leptos::ev::WheelEvent| {}
        }
    };

    view! {
        <div class="pixel-map">
            <canvas
                class="pixel-map__canvas"
                node_ref=canvas_ref
                style:cursor=move || cursor.get()
                on:pointerdown=on_pointer_down
                on:pointermove=on_pointer_move
                on:pointerup=on_pointer_up
                on:pointerleave=on_pointer_leave
                on:wheel=on_wheel
            >
                "Your browser does not support canvas."
            </canvas>
            {move || {
                map.with(|m| m.load_error.clone())
                    .map(|error| view! { <div class="pixel-map__error">{error}</div> })
            }}
        </div>
    }
}
