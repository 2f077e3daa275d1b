//! Networking modules for REST, the chat socket, and the wallet provider.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles REST calls, `chat_client` manages the websocket lifecycle,
//! and `wallet` wraps the injected account provider. Wire types live in the
//! shared `protocol` crate.

pub mod api;
pub mod chat_client;
pub mod wallet;
