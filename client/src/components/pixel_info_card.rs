//! Details card for the clicked cell, the whole-area offer, and the
//! solid-colour update form for pixels the wallet owns.

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;

#[cfg(feature = "csr")]
use canvas::grid::Cell;

#[cfg(feature = "csr")]
use crate::config::AppConfig;
use crate::state::map::MapState;
use crate::state::pixel_info::{ColorForm, PixelInfoState, availability_text};
use crate::state::wallet::WalletState;
use crate::util::format::pixel_time;
use protocol::address::short_address;

/// Fetch `cell`'s record into `pixel_info`, discarding superseded answers.
#[cfg(feature = "csr")]
pub fn load_pixel_info(api_base: String, pixel_info: RwSignal<PixelInfoState>, cell: Cell) {
    let Some(ticket) = pixel_info.try_update(|p| p.begin(cell)) else {
        return;
    };
    leptos::task::spawn_local(async move {
        let result = crate::net::api::fetch_pixel(&api_base, cell.x, cell.y).await;
        if let Err(e) = &result {
            leptos::logging::warn!("pixel ({}, {}) lookup failed: {e}", cell.x, cell.y);
        }
        pixel_info.update(|p| {
            p.finish(ticket, result);
        });
    });
}

/// Paint the form's cell in its colour, then reload the map and the card.
#[cfg(feature = "csr")]
fn submit_color(
    api_base: String,
    form: RwSignal<ColorForm>,
    pixel_info: RwSignal<PixelInfoState>,
    map: RwSignal<MapState>,
    address: Option<String>,
) {
    use protocol::pixels::SingleUpdateRequest;

    let Some(address) = address else {
        form.update(|f| f.fail("Wallet not connected".to_owned()));
        return;
    };
    let Some((cell, color)) = form.try_update(ColorForm::begin).flatten() else {
        return;
    };
    leptos::task::spawn_local(async move {
        let result = match canvas::tiles::solid_tile(&color) {
            Ok(image) => {
                let body = SingleUpdateRequest::with_color(&address, cell.x, cell.y, image, &color);
                crate::net::api::update_single_pixel(&api_base, &body).await
            }
            Err(e) => Err(e.to_string()),
        };
        match result {
            Ok(()) => {
                leptos::logging::log!("pixel ({}, {}) painted {color}", cell.x, cell.y);
                form.update(ColorForm::succeed);
                map.update(MapState::request_reload);
                load_pixel_info(api_base, pixel_info, cell);
            }
            Err(e) => {
                leptos::logging::warn!("pixel ({}, {}) update failed: {e}", cell.x, cell.y);
                form.update(|f| f.fail(e));
            }
        }
    });
}

/// Pixel info card.
#[component]
pub fn PixelInfoCard() -> impl IntoView {
    let pixel_info = expect_context::<RwSignal<PixelInfoState>>();
    let wallet = expect_context::<RwSignal<WalletState>>();
    let map = expect_context::<RwSignal<MapState>>();
    #[cfg(feature = "csr")]
    let api_base = expect_context::<AppConfig>().api_base;
    let form = RwSignal::new(ColorForm::default());

    let on_paint = {
        #[cfg(feature = "csr")]
        {
            move |_ev: leptos::ev::MouseEvent| {
                let address = wallet.with_untracked(|w| w.address.clone());
                submit_color(api_base.clone(), form, pixel_info, map, address);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            move |_ev: leptos::ev::MouseEvent| {}
        }
    };

    let title = move || pixel_info.with(PixelInfoState::title);

    let body = move || {
        let info = pixel_info.get();
        if info.cell.is_none() {
            return view! { <p class="pixel-info__hint">"Select a pixel to view information"</p> }.into_any();
        }
        if info.loading {
            return view! { <p class="pixel-info__hint">"Loading information..."</p> }.into_any();
        }
        if let Some(error) = info.error.clone() {
            return view! { <p class="pixel-info__error">{error}</p> }.into_any();
        }
        let Some(pixel) = info.pixel.clone() else {
            return view! { <p class="pixel-info__hint">"No information available for this pixel"</p> }.into_any();
        };

        let owner = pixel.owner_address().map(str::to_owned);
        let is_mine = owner.as_deref().is_some_and(|o| wallet.with(|w| w.is_self(o)));
        let owner_text = owner.as_deref().map_or_else(|| "None".to_owned(), short_address);
        let metadata = info.metadata_json();
        let color = pixel.color.clone();
        let updated = pixel.updated_at().map(pixel_time);
        let show_availability = wallet.with(WalletState::is_connected) && !is_mine;

        view! {
            <dl class="pixel-info__fields">
                <dt>"Owner:"</dt>
                <dd>
                    {is_mine.then(|| view! { <span class="pixel-info__badge">"You"</span> })}
                    <span class="pixel-info__owner" title=owner.clone().unwrap_or_default()>{owner_text}</span>
                </dd>
                {color.map(|color| {
                    let swatch = format!("background-color: {color}");
                    view! {
                        <dt>"Color:"</dt>
                        <dd>
                            <span>{color}</span>
                            <span class="pixel-info__swatch" style=swatch></span>
                        </dd>
                    }
                })}
                {updated.map(|updated| view! {
                    <dt>"Last Updated:"</dt>
                    <dd>{updated}</dd>
                })}
            </dl>
            {metadata.map(|json| view! {
                <div class="pixel-info__metadata">
                    <div>"Metadata:"</div>
                    <pre>{json}</pre>
                </div>
            })}
            {show_availability.then(|| view! {
                <div class="pixel-info__availability">{availability_text(owner.as_deref())}</div>
            })}
            {is_mine.then(|| view! {
                <button
                    class="btn btn--primary"
                    on:click=move |_| {
                        if let Some(cell) = pixel_info.with_untracked(|p| p.cell) {
                            form.update(|f| f.open(cell));
                        }
                    }
                >
                    "Update Pixel"
                </button>
            })}
        }
        .into_any()
    };

    let form_open = Memo::new(move |_| {
        let cell = pixel_info.with(|p| p.cell);
        form.with(|f| f.is_open_for(cell))
    });

    let color_form = move || {
        if !form_open.get() {
            return None;
        }
        let swatch = move || format!("background-color: {}", form.with(|f| f.color.clone()));
        let busy = move || form.with(|f| f.busy);
        Some(view! {
            <div class="pixel-info__paint">
                <label class="pixel-info__paint-label">
                    "Choose Color"
                    <input
                        type="color"
                        prop:value=move || form.with(|f| f.color.clone())
                        disabled=busy
                        on:input=move |ev| form.update(|f| f.set_color(event_target_value(&ev)))
                    />
                </label>
                <div class="pixel-info__paint-preview" style=swatch></div>
                {move || form.with(|f| f.error.clone()).map(|e| view! { <p class="pixel-info__error">{e}</p> })}
                <div class="pixel-info__paint-actions">
                    <button class="btn" disabled=busy on:click=move |_| form.update(ColorForm::close)>
                        "Cancel"
                    </button>
                    <button class="btn btn--primary" disabled=busy on:click=on_paint.clone()>
                        {move || if busy() { "Updating..." } else { "Update" }}
                    </button>
                </div>
            </div>
        })
    };

    let offer = move || {
        map.with(|m| m.area_offer.as_ref().map(|o| o.area.len())).map(|n| {
            view! {
                <div class="pixel-info__offer">
                    <p>{format!("This pixel is part of an area of {n} pixels you own.")}</p>
                    <button class="btn btn--primary" on:click=move |_| map.update(MapState::accept_area)>
                        {format!("Update whole area ({n} pixels)")}
                    </button>
                    <button class="btn" on:click=move |_| map.update(MapState::decline_area)>
                        "Update this pixel only"
                    </button>
                </div>
            }
        })
    };

    view! {
        <section class="panel pixel-info">
            <h3 class="panel__title">{title}</h3>
            <div class="pixel-info__body">{body}</div>
            {color_form}
            {offer}
        </section>
    }
}
