//! WebSocket chat client.
//!
//! Keeps one logical connection to the chat socket: connect, replay the
//! history the server pushes, append live messages, and reconnect with
//! growing backoff after every close. All protocol decisions (status,
//! backoff, cooldown, notices) live in `protocol::session::ChatSession`
//! inside [`ChatState`]; this module only moves bytes and time.
//!
//! All WebSocket logic is gated behind `#[cfg(feature = "csr")]` since it
//! requires a browser environment.
//!
//! ERROR HANDLING
//! ==============
//! Transport and decode failures are logged and end the current connection;
//! the outer loop always reconnects.

#[cfg(test)]
#[path = "chat_client_test.rs"]
mod chat_client_test;

#[cfg(feature = "csr")]
use crate::state::chat::ChatState;
#[cfg(feature = "csr")]
use leptos::prelude::{RwSignal, Update};

/// Spawn the chat client loop and return the sender for outgoing JSON text.
#[cfg(feature = "csr")]
pub fn spawn_chat_client(url: String, chat: RwSignal<ChatState>) -> futures::channel::mpsc::UnboundedSender<String> {
    use futures::channel::mpsc;

    let (tx, rx) = mpsc::unbounded::<String>();
    leptos::task::spawn_local(chat_client_loop(url, chat, rx));
    tx
}

/// Re-render chat views once the current notice has expired.
#[cfg(feature = "csr")]
pub fn schedule_notice_expiry(chat: RwSignal<ChatState>) {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let delay_ms = protocol::session::NOTICE_TTL_MS as u32 + 50;
    gloo_timers::callback::Timeout::new(delay_ms, move || {
        chat.update(|c| c.tick(js_sys::Date::now()));
    })
    .forget();
}

/// Main connection loop with reconnect logic.
#[cfg(feature = "csr")]
async fn chat_client_loop(
    url: String,
    chat: RwSignal<ChatState>,
    rx: futures::channel::mpsc::UnboundedReceiver<String>,
) {
    use std::cell::RefCell;
    use std::rc::Rc;

    let rx = Rc::new(RefCell::new(rx));

    loop {
        chat.update(|c| c.session.begin_connect());

        match connect_and_run(&url, chat, &rx).await {
            Ok(()) => {
                leptos::logging::log!("chat disconnected");
            }
            Err(e) => {
                leptos::logging::warn!("chat error: {e}");
            }
        }

        // Signal disposed: the app is gone, stop reconnecting.
        let Some(delay) = chat.try_update(|c| c.session.on_close()) else {
            return;
        };
        leptos::logging::log!("chat reconnecting in {} ms", delay.as_millis());
        gloo_timers::future::sleep(delay).await;
    }
}

/// Wait for the socket handshake to finish.
#[cfg(feature = "csr")]
async fn wait_for_open(ws: &gloo_net::websocket::futures::WebSocket) -> Result<(), String> {
    use gloo_net::websocket::State;

    loop {
        match ws.state() {
            State::Open => return Ok(()),
            State::Connecting => gloo_timers::future::sleep(std::time::Duration::from_millis(25)).await,
            State::Closing | State::Closed => return Err("connection refused".to_owned()),
        }
    }
}

/// Connect to the WebSocket and process messages until disconnect.
#[cfg(feature = "csr")]
async fn connect_and_run(
    url: &str,
    chat: RwSignal<ChatState>,
    rx: &std::rc::Rc<std::cell::RefCell<futures::channel::mpsc::UnboundedReceiver<String>>>,
) -> Result<(), String> {
    use futures::StreamExt;
    use gloo_net::websocket::Message;
    use gloo_net::websocket::futures::WebSocket;

    let ws = WebSocket::open(url).map_err(|e| e.to_string())?;
    wait_for_open(&ws).await?;
    let (mut ws_write, mut ws_read) = ws.split();

    chat.update(|c| c.session.on_open());
    leptos::logging::log!("chat connected to {url}");

    // Forward outgoing messages from our channel to the socket.
    let mut rx_borrow = rx.borrow_mut();
    let send_task = async {
        use futures::SinkExt;
        while let Some(text) = rx_borrow.next().await {
            if ws_write.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    };

    let recv_task = async {
        while let Some(msg) = ws_read.next().await {
            match msg {
                Ok(Message::Text(text)) => receive_text(chat, &text),
                Ok(Message::Bytes(_)) => {}
                Err(e) => {
                    leptos::logging::warn!("chat recv error: {e}");
                    break;
                }
            }
        }
    };

    // When either side finishes, the connection is done.
    futures::future::select(Box::pin(send_task), Box::pin(recv_task)).await;

    let dropped = discard_unsent(&mut *rx_borrow);
    if dropped > 0 {
        leptos::logging::warn!("chat: {dropped} unsent message(s) dropped on disconnect");
    }
    Ok(())
}

/// Empty the outgoing queue so nothing written for a dead connection is sent
/// on the next one. Returns how many messages were dropped.
#[cfg(any(test, feature = "csr"))]
fn discard_unsent<T>(rx: &mut futures::channel::mpsc::UnboundedReceiver<T>) -> usize {
    let mut dropped = 0;
    while let Ok(Some(_)) = rx.try_next() {
        dropped += 1;
    }
    dropped
}

#[cfg(feature = "csr")]
fn receive_text(chat: RwSignal<ChatState>, text: &str) {
    let now = js_sys::Date::now();
    let outcome = chat.try_update(|c| {
        c.tick(now);
        let before = c.session.notice(now).map(str::to_owned);
        let result = c.session.on_text(text, now);
        let new_notice = c.session.notice(now).is_some_and(|n| before.as_deref() != Some(n));
        (result, new_notice)
    });
    match outcome {
        Some((Err(e), _)) => leptos::logging::warn!("chat: dropping message: {e}"),
        Some((Ok(()), true)) => schedule_notice_expiry(chat),
        _ => {}
    }
}
