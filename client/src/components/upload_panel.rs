//! Image upload panel: choose a file, preview it over the target area, and
//! write it onto the selected cells.
//!
//! ERROR HANDLING
//! ==============
//! Validation problems and ownership failures are shown inline and nothing is
//! sent. Per-cell failures pause the run behind a confirm prompt; the final
//! report lists what succeeded, failed and was skipped.

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;

use crate::state::map::MapState;
use crate::state::upload::{UploadState, preview_size};

#[cfg(feature = "csr")]
use crate::config::AppConfig;
#[cfg(feature = "csr")]
use crate::state::wallet::WalletState;
#[cfg(feature = "csr")]
use canvas::grid::Cell;
#[cfg(feature = "csr")]
use canvas::update::SubmitObserver;

/// Reports progress into the panel state and asks the user before
/// continuing past a failed cell.
#[cfg(feature = "csr")]
struct PanelObserver {
    upload: RwSignal<UploadState>,
}

#[cfg(feature = "csr")]
impl SubmitObserver for PanelObserver {
    fn on_progress(&mut self, index: usize, total: usize, _cell: Cell) {
        self.upload.update(|u| u.on_progress(index, total));
    }

    fn continue_after_failure(&mut self, cell: Cell, error: &str) -> bool {
        leptos::logging::warn!("pixel ({}, {}) update failed: {error}", cell.x, cell.y);
        let prompt = format!(
            "Failed to update pixel ({}, {}): {error}\n\nContinue with the remaining pixels?",
            cell.x, cell.y
        );
        web_sys::window()
            .and_then(|w| w.confirm_with_message(&prompt).ok())
            .unwrap_or(false)
    }
}

/// Release a preview object URL the panel no longer shows.
#[cfg(feature = "csr")]
fn revoke_preview(url: Option<String>) {
    if let Some(url) = url {
        if let Err(e) = web_sys::Url::revoke_object_url(&url) {
            leptos::logging::warn!("revoking preview url failed: {e:?}");
        }
    }
}

/// Read the chosen file into the panel state.
#[cfg(feature = "csr")]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn read_file(upload: RwSignal<UploadState>, file: web_sys::File) {
    use wasm_bindgen_futures::JsFuture;

    if let Err(e) = canvas::tiles::validate_upload(&file.type_(), file.size() as u64) {
        revoke_preview(upload.try_update(|u| u.reject_file(e.to_string())).flatten());
        return;
    }
    let name = file.name();
    leptos::task::spawn_local(async move {
        let buffer = match JsFuture::from(file.array_buffer()).await {
            Ok(buffer) => buffer,
            Err(e) => {
                leptos::logging::warn!("reading {name} failed: {e:?}");
                let released = upload.try_update(|u| u.reject_file("Failed to read the selected file".to_owned()));
                revoke_preview(released.flatten());
                return;
            }
        };
        let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
        let preview = web_sys::Url::create_object_url_with_blob(&file).ok();
        revoke_preview(upload.try_update(|u| u.set_file(name, preview, bytes)).flatten());
    });
}

/// Check ownership, tile the image and submit it cell by cell.
#[cfg(feature = "csr")]
async fn submit(api_base: String, upload: RwSignal<UploadState>, map: RwSignal<MapState>, address: Option<String>) {
    use canvas::area::OwnerIndex;
    use canvas::update::{check_ownership, submit_tiles};

    use crate::net::api::{BackendUpdater, fetch_pixels};
    use crate::state::upload::OWNERSHIP_CHECK_FAILED;

    let cells = map.with_untracked(|m| m.target_cells.clone());
    let Some(bytes) = upload.with_untracked(|u| u.bytes.clone()) else {
        return;
    };
    upload.update(UploadState::begin_submit);

    let owners = match fetch_pixels(&api_base).await {
        Ok(pixels) => OwnerIndex::from_pixels(&pixels),
        Err(e) => {
            leptos::logging::warn!("ownership lookup failed: {e}");
            upload.update(|u| u.abort(OWNERSHIP_CHECK_FAILED.to_owned()));
            return;
        }
    };
    let address = match check_ownership(address.as_deref(), &cells, &owners) {
        Ok(address) => address.to_owned(),
        Err(e) => {
            upload.update(|u| u.abort(e.to_string()));
            return;
        }
    };
    let tiles = match canvas::tiles::tile_upload(&bytes, &cells) {
        Ok(tiles) => tiles,
        Err(e) => {
            upload.update(|u| u.abort(e.to_string()));
            return;
        }
    };

    let updater = BackendUpdater::new(api_base);
    let mut observer = PanelObserver { upload };
    let report = submit_tiles(&updater, &address, tiles, &mut observer).await;
    leptos::logging::log!("upload finished: {}", report.summary());

    let any_succeeded = !report.succeeded.is_empty();
    revoke_preview(upload.try_update(|u| u.finish(report)).flatten());
    if any_succeeded {
        map.update(MapState::request_reload);
    }
}

/// Image upload panel.
#[component]
pub fn UploadPanel() -> impl IntoView {
    let upload = expect_context::<RwSignal<UploadState>>();
    let map = expect_context::<RwSignal<MapState>>();
    #[cfg(feature = "csr")]
    let wallet = expect_context::<RwSignal<WalletState>>();
    #[cfg(feature = "csr")]
    let api_base = expect_context::<AppConfig>().api_base;

    let on_file = {
        #[cfg(feature = "csr")]
        {
            move |ev: leptos::ev::Event| {
                let input = event_target::<web_sys::HtmlInputElement>(&ev);
                if let Some(file) = input.files().and_then(|files| files.get(0)) {
                    read_file(upload, file);
                }
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            move |_ev: leptos::ev::Event| {}
        }
    };

    let on_submit = {
        #[cfg(feature = "csr")]
        {
            move |_ev: leptos::ev::MouseEvent| {
                if !upload.with_untracked(UploadState::can_submit) {
                    return;
                }
                let address = wallet.with_untracked(|w| w.address.clone());
                let api_base = api_base.clone();
                leptos::task::spawn_local(submit(api_base, upload, map, address));
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            move |_ev: leptos::ev::MouseEvent| {}
        }
    };

    let on_clear = move |_ev: leptos::ev::MouseEvent| map.update(MapState::clear_targets);

    let summary = move || {
        map.with(MapState::target_summary)
            .map_or_else(|| "No pixels selected".to_owned(), |s| format!("Selected: {s}"))
    };

    let preview = move || {
        let url = upload.with(|u| u.preview_url.clone())?;
        let (w, h) = map.with(MapState::target_rect).map_or((0, 0), preview_size);
        let style = format!("width: {w}px; height: {h}px");
        Some(view! { <img class="upload-panel__preview" src=url style=style alt="Upload preview"/> })
    };

    let status = move || {
        upload.with(|u| {
            u.progress_label()
                .map(|p| view! { <p class="upload-panel__progress">{p}</p> }.into_any())
                .or_else(|| u.error.clone().map(|e| view! { <p class="upload-panel__error">{e}</p> }.into_any()))
                .or_else(|| {
                    u.result_message()
                        .map(|m| view! { <p class="upload-panel__result">{m}</p> }.into_any())
                })
        })
    };

    let submit_disabled =
        move || !upload.with(UploadState::can_submit) || map.with(|m| m.target_cells.is_empty());

    view! {
        <section class="panel upload-panel">
            <h3 class="panel__title">"Update Pixels"</h3>
            <div class="upload-panel__summary">
                <span>{summary}</span>
                <button
                    class="btn btn--small"
                    disabled=move || map.with(|m| m.target_cells.is_empty())
                    on:click=on_clear
                >
                    "Clear"
                </button>
            </div>
            <input
                type="file"
                accept="image/*"
                class="upload-panel__file"
                disabled=move || upload.with(|u| u.busy)
                on:change=on_file
            />
            {preview}
            <button class="btn btn--primary" disabled=submit_disabled on:click=on_submit>
                {move || if upload.with(|u| u.busy) { "Updating..." } else { "Update" }}
            </button>
            {status}
        </section>
    }
}
