//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::config::AppConfig;
use crate::net::wallet::InjectedWallet;
use crate::pages::home::HomePage;
use crate::state::{
    chat::ChatState, map::MapState, pixel_info::PixelInfoState, upload::UploadState, wallet::WalletState,
};

/// Handle for queueing outgoing chat text onto the socket loop.
///
/// Empty outside the browser and before the loop is spawned; sends are then
/// reported as failed.
#[derive(Clone, Debug, Default)]
pub struct ChatSender {
    #[cfg(feature = "csr")]
    tx: Option<futures::channel::mpsc::UnboundedSender<String>>,
}

impl ChatSender {
    #[cfg(feature = "csr")]
    pub fn new(tx: futures::channel::mpsc::UnboundedSender<String>) -> Self {
        Self { tx: Some(tx) }
    }

    /// Queue encoded JSON text. Returns `false` if the loop is gone.
    pub fn send(&self, text: String) -> bool {
        #[cfg(feature = "csr")]
        {
            self.tx.as_ref().is_some_and(|tx| tx.unbounded_send(text).is_ok())
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = text;
            false
        }
    }
}

/// Root application component.
///
/// Provides all shared state contexts, starts the chat socket loop, and sets
/// up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = AppConfig::from_env();

    // Provide reactive state contexts for all child components.
    let wallet = RwSignal::new(WalletState::default());
    let chat = RwSignal::new(ChatState::default());
    let map = RwSignal::new(MapState::default());
    let pixel_info = RwSignal::new(PixelInfoState::default());
    let upload = RwSignal::new(UploadState::default());
    let sender = RwSignal::new(ChatSender::default());

    #[cfg(feature = "csr")]
    {
        let tx = crate::net::chat_client::spawn_chat_client(config.ws_url.clone(), chat);
        sender.set(ChatSender::new(tx));
    }

    provide_context(config);
    provide_context(InjectedWallet);
    provide_context(wallet);
    provide_context(chat);
    provide_context(map);
    provide_context(pixel_info);
    provide_context(upload);
    provide_context(sender);

    view! {
        <Title text="Pixel Map"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=HomePage/>
            </Routes>
        </Router>
    }
}
