//! Chat composer: validates through the session, then queues onto the socket.

use leptos::prelude::*;

use crate::app::ChatSender;
use crate::state::chat::ChatState;
use crate::state::wallet::WalletState;
use protocol::session::MAX_MESSAGE_CHARS;

/// Chat input with send button and transient notice.
#[component]
pub fn ChatInput() -> impl IntoView {
    let chat = expect_context::<RwSignal<ChatState>>();
    let wallet = expect_context::<RwSignal<WalletState>>();
    let sender = expect_context::<RwSignal<ChatSender>>();

    let draft = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let text = draft.get_untracked();
        let address = wallet.with_untracked(|w| w.address.clone());

        #[cfg(feature = "csr")]
        let now = js_sys::Date::now();
        #[cfg(not(feature = "csr"))]
        let now = chat.with_untracked(|c| c.clock_ms);

        let prepared = chat.try_update(|c| {
            c.tick(now);
            c.session.prepare_send(&text, address.as_deref(), now)
        });
        let Some(prepared) = prepared else {
            return;
        };
        match prepared.map_err(|e| e.to_string()).and_then(|msg| {
            protocol::chat::encode_client_message(&msg).map_err(|e| e.to_string())
        }) {
            Ok(encoded) => {
                if sender.with_untracked(|s| s.send(encoded)) {
                    draft.set(String::new());
                } else {
                    leptos::logging::warn!("chat send dropped: socket loop is not running");
                }
            }
            Err(e) => {
                leptos::logging::log!("chat send rejected: {e}");
                #[cfg(feature = "csr")]
                crate::net::chat_client::schedule_notice_expiry(chat);
            }
        }
    };

    let enabled = move || chat.with(ChatState::input_enabled);
    let can_send = move || chat.with(|c| draft.with(|d| c.can_send(d)));
    let placeholder = move || chat.with(ChatState::placeholder);
    let notice = move || {
        chat.with(ChatState::notice)
            .map(|n| view! { <div class="chat__notice">{n}</div> })
    };

    view! {
        <form class="chat__form" on:submit=on_submit>
            {notice}
            <input
                class="chat__input"
                type="text"
                maxlength=MAX_MESSAGE_CHARS.to_string()
                placeholder=placeholder
                disabled=move || !enabled()
                prop:value=move || draft.get()
                on:input=move |ev| draft.set(event_target_value(&ev))
            />
            <button class="btn btn--primary" type="submit" disabled=move || !can_send()>
                "Send"
            </button>
        </form>
    }
}
