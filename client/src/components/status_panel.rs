//! Wallet status panel: connect button, address and owned pixel count.
//!
//! SYSTEM CONTEXT
//! ==============
//! Connecting authorizes an account through the [`Wallet`] capability, then
//! registers the user with the backend and loads the owned pixel count.

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;

use crate::net::wallet::{InjectedWallet, Wallet};
use crate::state::map::MapState;
use crate::state::wallet::WalletState;

#[cfg(feature = "csr")]
use crate::config::AppConfig;
#[cfg(feature = "csr")]
use crate::net::wallet::WalletSession;

/// Register the connected account and load its user record.
#[cfg(feature = "csr")]
async fn sync_user(api_base: &str, wallet: RwSignal<WalletState>, session: &WalletSession) {
    use protocol::users::SaveUserRequest;

    let body = SaveUserRequest {
        address: session.address.clone(),
        ens_name: wallet.with_untracked(|w| w.ens_name.clone()),
        last_connected: chrono::Utc::now().to_rfc3339(),
    };
    if let Err(e) = crate::net::api::save_user(api_base, &body).await {
        leptos::logging::warn!("saving user failed: {e}");
    }
    match crate::net::api::fetch_user(api_base, &session.address).await {
        Ok(user) => wallet.update(|w| w.on_user_loaded(user)),
        Err(e) => {
            leptos::logging::warn!("loading user failed: {e}");
            wallet.update(|w| w.error = Some(e));
        }
    }
}

#[cfg(feature = "csr")]
async fn finish_connect(api_base: String, wallet: RwSignal<WalletState>, session: WalletSession) {
    leptos::logging::log!("wallet connected: {}", session.address);
    wallet.update(|w| w.on_connected(session.clone()));
    sync_user(&api_base, wallet, &session).await;
}

/// Wallet status panel.
#[component]
pub fn StatusPanel() -> impl IntoView {
    let wallet = expect_context::<RwSignal<WalletState>>();
    let map = expect_context::<RwSignal<MapState>>();
    let provider = expect_context::<InjectedWallet>();
    #[cfg(feature = "csr")]
    let api_base = expect_context::<AppConfig>().api_base;

    // Restore an already-authorized account without prompting.
    #[cfg(feature = "csr")]
    {
        let api_base = api_base.clone();
        leptos::task::spawn_local(async move {
            if let Some(session) = provider.current().await {
                finish_connect(api_base, wallet, session).await;
            }
        });
    }

    let on_connect = {
        #[cfg(feature = "csr")]
        {
            move |_ev: leptos::ev::MouseEvent| {
                if wallet.with(|w| w.connecting) {
                    return;
                }
                wallet.update(WalletState::begin_connect);
                let api_base = api_base.clone();
                leptos::task::spawn_local(async move {
                    match provider.connect().await {
                        Ok(session) => finish_connect(api_base, wallet, session).await,
                        Err(e) => {
                            leptos::logging::warn!("wallet connect failed: {e}");
                            wallet.update(|w| w.on_connect_failed(e));
                        }
                    }
                });
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            move |_ev: leptos::ev::MouseEvent| {}
        }
    };

    let on_disconnect = move |_ev: leptos::ev::MouseEvent| {
        provider.disconnect();
        wallet.update(WalletState::on_disconnected);
        map.update(MapState::clear_targets);
    };

    let body = move || {
        let state = wallet.get();
        match state.short_address() {
            Some(short) => {
                let full = state.address.clone().unwrap_or_default();
                let label = state.ens_name.clone().unwrap_or(short);
                view! {
                    <div class="status-panel__row">
                        <span class="status-panel__dot status-panel__dot--connected"></span>
                        <span>"Connected"</span>
                    </div>
                    <div class="status-panel__row">
                        <span class="status-panel__label">"Address:"</span>
                        <span class="status-panel__address" title=full>{label}</span>
                    </div>
                    <div class="status-panel__row">
                        <span class="status-panel__label">"Your pixels:"</span>
                        <span class="status-panel__count">{state.owned_pixels_label()}</span>
                    </div>
                    <button class="btn" on:click=on_disconnect>"Disconnect"</button>
                }
                .into_any()
            }
            None => view! {
                <p class="status-panel__hint">"Connect to view your pixels"</p>
                <button class="btn btn--primary" disabled=state.connecting on:click=on_connect.clone()>
                    {state.connect_label()}
                </button>
            }
            .into_any(),
        }
    };

    let error = move || {
        wallet
            .with(|w| w.error.clone())
            .map(|e| view! { <p class="status-panel__error">{e}</p> })
    };

    view! {
        <section class="panel status-panel">
            <h3 class="panel__title">"Wallet"</h3>
            {body}
            {error}
        </section>
    }
}
