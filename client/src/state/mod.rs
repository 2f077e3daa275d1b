//! Reactive state models provided through Leptos context.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each model is a plain struct wrapped in an `RwSignal` by `App`. Methods
//! hold the state transitions so they can be tested without a browser.

pub mod chat;
pub mod map;
pub mod pixel_info;
pub mod upload;
pub mod wallet;
