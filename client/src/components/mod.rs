//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the map, its side panels and chat while reading/writing
//! shared state from Leptos context providers.

pub mod chat_display;
pub mod chat_input;
pub mod header;
pub mod pixel_info_card;
pub mod pixel_map_host;
pub mod status_panel;
pub mod upload_panel;
