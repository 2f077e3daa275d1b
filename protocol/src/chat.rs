//! Chat WebSocket messages.
//!
//! Every message is a JSON object tagged by a `type` field. The server sends
//! the full history once per connection, then individual messages, online
//! user counts and error notices. The client only ever sends `chat`.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use serde::{Deserialize, Serialize};

/// Error returned by the chat codec.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The payload was not valid JSON or did not match any known message.
    #[error("failed to decode chat message: {0}")]
    Decode(#[source] serde_json::Error),
    /// The message could not be serialized.
    #[error("failed to encode chat message: {0}")]
    Encode(#[source] serde_json::Error),
}

/// One chat line as stored by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    /// Display form of the sender (short address, ENS name, or "Anonymous").
    pub user: String,
    #[serde(rename = "fullAddress", default)]
    pub full_address: Option<String>,
    pub message: String,
    /// ISO-8601 timestamp assigned by the server.
    pub timestamp: String,
}

/// Messages sent from the client to the chat server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientMessage {
    Chat { text: String, address: Option<String> },
}

/// Messages pushed by the chat server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerMessage {
    /// Full history, sent once right after the connection opens.
    History {
        #[serde(default)]
        messages: Vec<ChatMessage>,
    },
    /// A single new message.
    Message { data: ChatMessage },
    /// Number of connected chat users.
    UserCount { count: u32 },
    /// Server-side rejection (rate limit, validation).
    Error {
        #[serde(default)]
        message: String,
    },
}

/// Serialize a client message to its JSON text form.
///
/// # Errors
///
/// Returns [`CodecError::Encode`] if serialization fails.
pub fn encode_client_message(msg: &ClientMessage) -> Result<String, CodecError> {
    serde_json::to_string(msg).map_err(CodecError::Encode)
}

/// Parse a server message from JSON text.
///
/// # Errors
///
/// Returns [`CodecError::Decode`] for malformed JSON or an unknown `type`.
pub fn decode_server_message(text: &str) -> Result<ServerMessage, CodecError> {
    serde_json::from_str(text).map_err(CodecError::Decode)
}

/// Whether a server error text signals rate limiting.
#[must_use]
pub fn is_rate_limit_message(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("rate") || lower.contains("limit")
}
