//! Live chat panel header and message list.

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;

use crate::state::chat::ChatState;
use crate::state::wallet::WalletState;
use crate::util::format::{author_class, clock_time};

/// Chat message list with connection status.
#[component]
pub fn ChatDisplay() -> impl IntoView {
    let chat = expect_context::<RwSignal<ChatState>>();
    let wallet = expect_context::<RwSignal<WalletState>>();
    let messages_ref = NodeRef::<leptos::html::Div>::new();

    // Keep the newest message in view.
    Effect::new(move || {
        let count = chat.with(|c| c.session.messages().len());

        #[cfg(feature = "csr")]
        {
            if count > 0 {
                if let Some(el) = messages_ref.get() {
                    el.set_scroll_top(el.scroll_height());
                }
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = count;
        }
    });

    let status = move || chat.with(ChatState::status_label);
    let connected = move || chat.with(ChatState::is_connected);

    let messages = move || {
        let me = wallet.with(|w| w.address.clone());
        chat.with(|c| {
            let messages = c.session.messages();
            if messages.is_empty() {
                return view! { <div class="chat__empty">"No messages yet"</div> }.into_any();
            }
            messages
                .iter()
                .map(|msg| {
                    let class = author_class(msg.full_address.as_deref(), me.as_deref());
                    let title = msg.full_address.clone().unwrap_or_default();
                    view! {
                        <div class="chat-message">
                            <div class="chat-message__header">
                                <span class=class title=title>{msg.user.clone()}</span>
                                <span class="chat-message__time">{clock_time(&msg.timestamp)}</span>
                            </div>
                            <div class="chat-message__text">{msg.message.clone()}</div>
                        </div>
                    }
                })
                .collect_view()
                .into_any()
        })
    };

    view! {
        <section class="panel chat">
            <div class="chat__header">
                <h3 class="panel__title">"Live Chat"</h3>
                <span class="chat__status" class:chat__status--connected=connected>{status}</span>
            </div>
            <div class="chat__messages" node_ref=messages_ref>
                {messages}
            </div>
        </section>
    }
}
