//! REST paths exposed by the pixel map backend.
//!
//! Paths are relative; callers join them onto the configured API base.

#[cfg(test)]
#[path = "endpoints_test.rs"]
mod endpoints_test;

/// Rendered map image.
pub const PIXEL_MAP: &str = "/api/pixelmap";
/// Every owned pixel.
pub const PIXELS: &str = "/api/pixels";
/// Image update for one or more pixels.
pub const PIXELS_UPDATE: &str = "/api/pixels-update";
/// Create or refresh a user record.
pub const USERS: &str = "/api/users";

/// Path of one pixel.
#[must_use]
pub fn pixel(x: i32, y: i32) -> String {
    format!("{PIXELS}/{x}/{y}")
}

/// Path of one user record.
#[must_use]
pub fn user(address: &str) -> String {
    format!("{USERS}/{address}")
}

/// Join an API base URL and a path, tolerating a trailing slash on the base.
#[must_use]
pub fn join(base: &str, path: &str) -> String {
    format!("{}{path}", base.trim_end_matches('/'))
}

/// Error body returned by the backend on non-2xx responses.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}

/// Human-readable reason for a failed request.
///
/// Prefers the backend's `{error}` text, falls back to the status code, and
/// flags bodies that are not JSON at all (typically a proxy error page).
#[must_use]
pub fn failure_message(what: &str, status: u16, body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => match serde_json::from_value::<ApiErrorBody>(value) {
            Ok(err) if !err.error.is_empty() => err.error,
            _ => format!("{what} failed: {status}"),
        },
        Err(_) => "Backend server error - non-JSON response".to_owned(),
    }
}
