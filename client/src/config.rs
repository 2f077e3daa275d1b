//! Build-time endpoint configuration.
//!
//! `PIXELMAP_API_URL` and `PIXELMAP_WS_URL` are read with `option_env!` when
//! the WASM bundle is compiled. An unset API URL means same-origin requests;
//! an unset WebSocket URL is derived from the page location.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Path of the chat socket on the backend.
pub const CHAT_WS_PATH: &str = "/ws/chat";

/// Endpoint configuration shared through context.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL prepended to REST paths. Empty for same-origin.
    pub api_base: String,
    /// Full chat WebSocket URL.
    pub ws_url: String,
}

impl AppConfig {
    /// Resolve the configuration for the running page.
    pub fn from_env() -> Self {
        let (protocol, host) = page_location();
        Self {
            api_base: resolve_api_base(option_env!("PIXELMAP_API_URL")),
            ws_url: resolve_ws_url(option_env!("PIXELMAP_WS_URL"), &protocol, &host),
        }
    }
}

/// Normalize a configured API base, treating blank as same-origin.
pub fn resolve_api_base(configured: Option<&str>) -> String {
    configured
        .map(str::trim)
        .unwrap_or_default()
        .trim_end_matches('/')
        .to_owned()
}

/// Pick the chat socket URL: the configured one if set, else one derived from
/// the page's protocol (`https:` selects `wss`) and host.
pub fn resolve_ws_url(configured: Option<&str>, page_protocol: &str, page_host: &str) -> String {
    if let Some(url) = configured.map(str::trim).filter(|url| !url.is_empty()) {
        return url.to_owned();
    }
    let scheme = if page_protocol.starts_with("https") { "wss" } else { "ws" };
    let host = if page_host.is_empty() { "localhost:4321" } else { page_host };
    format!("{scheme}://{host}{CHAT_WS_PATH}")
}

#[cfg(feature = "csr")]
fn page_location() -> (String, String) {
    let location = web_sys::window().map(|w| w.location());
    let protocol = location
        .as_ref()
        .and_then(|l| l.protocol().ok())
        .unwrap_or_default();
    let host = location.and_then(|l| l.host().ok()).unwrap_or_default();
    (protocol, host)
}

#[cfg(not(feature = "csr"))]
fn page_location() -> (String, String) {
    (String::new(), String::new())
}
