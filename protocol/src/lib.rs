//! Shared wire model for the pixel map front end and CLI.
//!
//! This crate owns the JSON shapes exchanged with the pixel map backend (REST
//! bodies and chat WebSocket messages) together with the small pure state
//! machines both the browser client and the native CLI drive: the chat
//! session and its reconnect backoff.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`chat`] | Chat message types and the JSON codec |
//! | [`session`] | Connection status, history, cooldown and notices for one chat session |
//! | [`backoff`] | Reconnect delay schedule |
//! | [`pixels`] | Pixel records and update request bodies |
//! | [`users`] | User records and the save-user request body |
//! | [`address`] | Wallet address validation and display helpers |
//! | [`endpoints`] | REST paths |

pub mod address;
pub mod backoff;
pub mod chat;
pub mod endpoints;
pub mod pixels;
pub mod session;
pub mod users;

pub use chat::{ChatMessage, ClientMessage, CodecError, ServerMessage, decode_server_message, encode_client_message};
pub use session::{ChatSession, ConnectionStatus, SendError};
