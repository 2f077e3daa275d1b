//! Pure chat session state machine.
//!
//! `ChatSession` tracks one logical chat connection across reconnects: its
//! status, the message list, the online count, the local rate-limit cooldown
//! and the transient notice shown to the user. It performs no I/O. Transport
//! loops (browser and CLI) feed it lifecycle events and decoded server
//! messages, and ask it to validate outgoing text before sending.
//!
//! Time is injected as milliseconds since the Unix epoch so cooldowns can be
//! tested deterministically.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::time::Duration;

use crate::backoff::Backoff;
use crate::chat::{ChatMessage, ClientMessage, CodecError, ServerMessage, decode_server_message, is_rate_limit_message};

/// How long a server rate-limit signal blocks local sends.
pub const RATE_LIMIT_COOLDOWN_MS: f64 = 5_000.0;
/// How long an error notice stays visible.
pub const NOTICE_TTL_MS: f64 = 5_000.0;
/// Maximum accepted message length, in characters.
pub const MAX_MESSAGE_CHARS: usize = 500;

/// Chat connection lifecycle state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

/// Reasons an outgoing message is rejected before reaching the socket.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SendError {
    #[error("Not connected to chat")]
    NotConnected,
    #[error("You are sending messages too quickly. Please wait.")]
    RateLimited,
    #[error("Message is empty")]
    Empty,
    #[error("Message is too long (max {max} characters)")]
    TooLong { max: usize },
}

/// A user-visible notice with its expiry time.
#[derive(Debug, Clone, PartialEq)]
struct Notice {
    text: String,
    expires_at_ms: f64,
}

/// State for one chat session.
#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    status: ConnectionStatus,
    messages: Vec<ChatMessage>,
    user_count: u32,
    backoff: Backoff,
    rate_limited_until_ms: Option<f64>,
    notice: Option<Notice>,
}

impl ChatSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    /// Messages in arrival order.
    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    #[must_use]
    pub fn user_count(&self) -> u32 {
        self.user_count
    }

    /// Delay the next reconnect attempt would wait.
    #[must_use]
    pub fn pending_backoff(&self) -> Duration {
        self.backoff.current()
    }

    // --- Lifecycle ---

    /// A connection attempt is starting.
    pub fn begin_connect(&mut self) {
        self.status = ConnectionStatus::Connecting;
        self.notice = None;
    }

    /// The socket opened. Resets the reconnect backoff.
    pub fn on_open(&mut self) {
        self.status = ConnectionStatus::Connected;
        self.notice = None;
        self.backoff.reset();
    }

    /// The socket closed or failed to open.
    ///
    /// Returns how long to wait before the next attempt.
    pub fn on_close(&mut self) -> Duration {
        self.status = ConnectionStatus::Disconnected;
        self.backoff.next_delay()
    }

    // --- Incoming ---

    /// Decode and apply one text frame from the server.
    ///
    /// # Errors
    ///
    /// Returns the codec error for malformed frames; state is left untouched.
    pub fn on_text(&mut self, text: &str, now_ms: f64) -> Result<(), CodecError> {
        let msg = decode_server_message(text)?;
        self.on_server_message(msg, now_ms);
        Ok(())
    }

    /// Apply a decoded server message.
    pub fn on_server_message(&mut self, msg: ServerMessage, now_ms: f64) {
        match msg {
            ServerMessage::History { messages } => self.messages = messages,
            ServerMessage::Message { data } => self.messages.push(data),
            ServerMessage::UserCount { count } => self.user_count = count,
            ServerMessage::Error { message } => {
                if is_rate_limit_message(&message) {
                    self.rate_limited_until_ms = Some(now_ms + RATE_LIMIT_COOLDOWN_MS);
                }
                self.set_notice(message, now_ms);
            }
        }
    }

    // --- Outgoing ---

    /// Validate an outgoing message and build the frame to send.
    ///
    /// Rejections are also recorded as the current notice.
    ///
    /// # Errors
    ///
    /// Returns a [`SendError`] when the session is not connected, is inside a
    /// rate-limit cooldown, or the trimmed text is empty or too long.
    pub fn prepare_send(&mut self, text: &str, address: Option<&str>, now_ms: f64) -> Result<ClientMessage, SendError> {
        let result = self.check_send(text, now_ms);
        match result {
            Ok(text) => Ok(ClientMessage::Chat { text, address: address.map(str::to_owned) }),
            Err(err) => {
                self.set_notice(err.to_string(), now_ms);
                Err(err)
            }
        }
    }

    fn check_send(&self, text: &str, now_ms: f64) -> Result<String, SendError> {
        if self.status != ConnectionStatus::Connected {
            return Err(SendError::NotConnected);
        }
        if self.is_rate_limited(now_ms) {
            return Err(SendError::RateLimited);
        }
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(SendError::Empty);
        }
        if trimmed.chars().count() > MAX_MESSAGE_CHARS {
            return Err(SendError::TooLong { max: MAX_MESSAGE_CHARS });
        }
        Ok(trimmed.to_owned())
    }

    // --- Derived view state ---

    /// Whether a server rate-limit signal is still in effect.
    #[must_use]
    pub fn is_rate_limited(&self, now_ms: f64) -> bool {
        self.rate_limited_until_ms.is_some_and(|until| now_ms < until)
    }

    /// The notice to display at `now_ms`, if one has not yet expired.
    #[must_use]
    pub fn notice(&self, now_ms: f64) -> Option<&str> {
        self.notice
            .as_ref()
            .filter(|n| now_ms < n.expires_at_ms)
            .map(|n| n.text.as_str())
    }

    fn set_notice(&mut self, text: String, now_ms: f64) {
        self.notice = Some(Notice { text, expires_at_ms: now_ms + NOTICE_TTL_MS });
    }
}
