//! Chat panel state.
//!
//! Wraps the shared [`ChatSession`] with a view clock. Notices and the
//! rate-limit cooldown depend on the current time, so the views read them
//! against `clock_ms`, which the socket loop and expiry timers advance.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use protocol::session::{ChatSession, ConnectionStatus};

#[derive(Clone, Debug, Default)]
pub struct ChatState {
    pub session: ChatSession,
    /// Time of the last event the views should reflect, in epoch ms.
    pub clock_ms: f64,
}

impl ChatState {
    /// Advance the view clock.
    pub fn tick(&mut self, now_ms: f64) {
        if now_ms > self.clock_ms {
            self.clock_ms = now_ms;
        }
    }

    pub fn is_connected(&self) -> bool {
        self.session.status() == ConnectionStatus::Connected
    }

    pub fn is_rate_limited(&self) -> bool {
        self.session.is_rate_limited(self.clock_ms)
    }

    /// Current notice text, if not yet expired.
    pub fn notice(&self) -> Option<String> {
        self.session.notice(self.clock_ms).map(str::to_owned)
    }

    /// Header text: connection progress or the online count.
    pub fn status_label(&self) -> String {
        match self.session.status() {
            ConnectionStatus::Connecting => "Connecting...".to_owned(),
            ConnectionStatus::Connected => format!("{} online", self.session.user_count()),
            ConnectionStatus::Disconnected => "Reconnecting...".to_owned(),
        }
    }

    /// Input placeholder reflecting why sending may be unavailable.
    pub fn placeholder(&self) -> &'static str {
        match self.session.status() {
            ConnectionStatus::Connecting => "Connecting...",
            ConnectionStatus::Disconnected => "Reconnecting...",
            ConnectionStatus::Connected if self.is_rate_limited() => "Please wait...",
            ConnectionStatus::Connected => "Type your message...",
        }
    }

    /// Whether the input should be enabled at all.
    pub fn input_enabled(&self) -> bool {
        self.is_connected() && !self.is_rate_limited()
    }

    /// Whether the send button should be enabled for `draft`.
    pub fn can_send(&self, draft: &str) -> bool {
        self.input_enabled() && !draft.trim().is_empty()
    }
}
