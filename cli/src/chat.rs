//! Chat over the backend WebSocket: a reconnecting tail and one-shot send.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use std::collections::HashSet;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use futures_util::{SinkExt, StreamExt};
use protocol::chat::{ChatMessage, ClientMessage, ServerMessage, decode_server_message, encode_client_message};
use protocol::session::ChatSession;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{info, warn};

use crate::CliError;

type ChatStream = tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>;

/// How long `send` waits for the server to echo the message back.
const ECHO_TIMEOUT: Duration = Duration::from_secs(10);

/// Remembers which messages were already printed, so replayed history after
/// a reconnect is not printed twice.
#[derive(Debug, Default)]
struct MessageLog {
    seen: HashSet<String>,
}

impl MessageLog {
    fn take_new<'a>(&mut self, messages: &'a [ChatMessage]) -> Vec<&'a ChatMessage> {
        messages.iter().filter(|m| self.seen.insert(m.id.clone())).collect()
    }
}

fn format_line(msg: &ChatMessage) -> String {
    format!("[{}] {}: {}", msg.timestamp, msg.user, msg.message)
}

fn now_ms() -> f64 {
    let Ok(duration) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0.0;
    };
    duration.as_secs_f64() * 1000.0
}

fn ws_error(error: tokio_tungstenite::tungstenite::Error) -> CliError {
    CliError::WsConnect(Box::new(error))
}

/// Print chat messages as they arrive until interrupted.
pub async fn tail(ws_url: &str) -> Result<(), CliError> {
    let mut session = ChatSession::new();
    let mut log = MessageLog::default();
    loop {
        session.begin_connect();
        info!(url = ws_url, "connecting to chat");
        match follow(ws_url, &mut session, &mut log).await {
            Ok(()) => info!("chat connection closed"),
            Err(error) => warn!(%error, "chat connection lost"),
        }
        let delay = session.on_close();
        info!(delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX), "reconnecting to chat");
        tokio::time::sleep(delay).await;
    }
}

async fn follow(ws_url: &str, session: &mut ChatSession, log: &mut MessageLog) -> Result<(), CliError> {
    let (mut stream, _) = connect_async(ws_url).await.map_err(ws_error)?;
    session.on_open();
    info!("connected to chat");

    let mut online = None;
    let mut last_notice: Option<String> = None;
    while let Some(message) = stream.next().await {
        match message.map_err(ws_error)? {
            Message::Text(text) => {
                let now = now_ms();
                if let Err(error) = session.on_text(&text, now) {
                    warn!(%error, "ignoring malformed chat frame");
                    continue;
                }
                for msg in log.take_new(session.messages()) {
                    println!("{}", format_line(msg));
                }
                if online != Some(session.user_count()) {
                    online = Some(session.user_count());
                    info!(online = session.user_count(), "chat users");
                }
                let notice = session.notice(now).map(str::to_owned);
                if notice.is_some() && notice != last_notice {
                    warn!(notice = notice.as_deref().unwrap_or_default(), "chat server notice");
                }
                last_notice = notice;
            }
            Message::Close(_) => return Ok(()),
            _ => {}
        }
    }
    Ok(())
}

/// Send one message and wait until the server broadcasts it back.
pub async fn send(ws_url: &str, text: &str, address: Option<&str>) -> Result<(), CliError> {
    let mut session = ChatSession::new();
    session.begin_connect();
    let (mut stream, _) = connect_async(ws_url).await.map_err(ws_error)?;
    session.on_open();

    let msg = session.prepare_send(text, address, now_ms())?;
    let ClientMessage::Chat { text: sent, .. } = &msg;
    let sent = sent.clone();
    stream
        .send(Message::Text(encode_client_message(&msg)?.into()))
        .await
        .map_err(ws_error)?;
    info!(chars = sent.chars().count(), "chat message sent");

    let echoed = tokio::time::timeout(ECHO_TIMEOUT, wait_for_echo(&mut stream, &sent))
        .await
        .map_err(|_| CliError::Timeout)?;
    if let Err(error) = stream.close(None).await {
        warn!(%error, "chat close failed");
    }
    let echoed = echoed?;
    println!("{}", format_line(&echoed));
    Ok(())
}

async fn wait_for_echo(stream: &mut ChatStream, sent: &str) -> Result<ChatMessage, CliError> {
    while let Some(message) = stream.next().await {
        let Message::Text(text) = message.map_err(ws_error)? else {
            continue;
        };
        match decode_server_message(&text)? {
            ServerMessage::Message { data } if data.message == sent => return Ok(data),
            ServerMessage::Error { message } => return Err(CliError::Backend(message)),
            _ => {}
        }
    }
    Err(CliError::WsClosed)
}
