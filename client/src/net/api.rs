//! REST helpers for the pixel map backend.
//!
//! Browser builds (csr): real HTTP calls via `gloo-net`.
//! Native builds: stubs returning an error, since these endpoints are only
//! reachable from the page.
//!
//! ERROR HANDLING
//! ==============
//! Every helper returns `Result<_, String>` with a message suitable for
//! inline display. A 404 on single-record lookups is not an error; it maps
//! to `Ok(None)`.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use canvas::update::CellUpdater;
use protocol::endpoints;
use protocol::pixels::{PixelRecord, PixelUpdate, SingleUpdateRequest, UpdateRequest};
#[cfg(feature = "csr")]
use protocol::pixels::records_from_values;
use protocol::users::{SaveUserRequest, UserRecord};

#[cfg(not(feature = "csr"))]
const NOT_AVAILABLE: &str = "not available outside the browser";

#[cfg(any(test, feature = "csr"))]
fn is_not_found(status: u16) -> bool {
    status == 404
}

#[cfg(any(test, feature = "csr"))]
fn request_failed_message(what: &str, error: &str) -> String {
    format!("{what} request failed: {error}")
}

/// URL of the rendered map image, with a cache-busting stamp so a reload
/// after an update is not served from cache.
pub fn pixel_map_url(api_base: &str, stamp: u64) -> String {
    format!("{}?t={stamp}", endpoints::join(api_base, endpoints::PIXEL_MAP))
}

#[cfg(feature = "csr")]
async fn failure(what: &str, resp: gloo_net::http::Response) -> String {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    endpoints::failure_message(what, status, &body)
}

/// Fetch every owned pixel from `GET /api/pixels`.
///
/// # Errors
///
/// Returns a display message on transport failure or a non-2xx status.
pub async fn fetch_pixels(api_base: &str) -> Result<Vec<PixelRecord>, String> {
    #[cfg(feature = "csr")]
    {
        let url = endpoints::join(api_base, endpoints::PIXELS);
        let resp = gloo_net::http::Request::get(&url)
            .send()
            .await
            .map_err(|e| request_failed_message("pixels", &e.to_string()))?;
        if !resp.ok() {
            return Err(failure("Fetching pixels", resp).await);
        }
        let rows = resp.json::<Vec<serde_json::Value>>().await.map_err(|e| e.to_string())?;
        let (records, dropped) = records_from_values(rows);
        if dropped > 0 {
            leptos::logging::warn!("skipped {dropped} malformed pixel rows");
        }
        Ok(records)
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = api_base;
        Err(NOT_AVAILABLE.to_owned())
    }
}

/// Fetch one pixel from `GET /api/pixels/{x}/{y}`. `Ok(None)` on 404.
///
/// # Errors
///
/// Returns a display message on transport failure or a non-2xx, non-404 status.
pub async fn fetch_pixel(api_base: &str, x: i32, y: i32) -> Result<Option<PixelRecord>, String> {
    #[cfg(feature = "csr")]
    {
        let url = endpoints::join(api_base, &endpoints::pixel(x, y));
        let resp = gloo_net::http::Request::get(&url)
            .send()
            .await
            .map_err(|e| request_failed_message("pixel", &e.to_string()))?;
        if is_not_found(resp.status()) {
            return Ok(None);
        }
        if !resp.ok() {
            return Err(failure("Fetching pixel", resp).await);
        }
        resp.json::<PixelRecord>().await.map(Some).map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (api_base, x, y);
        Err(NOT_AVAILABLE.to_owned())
    }
}

/// Create or refresh the user record via `POST /api/users`.
///
/// # Errors
///
/// Returns a display message on transport failure or a non-2xx status.
pub async fn save_user(api_base: &str, body: &SaveUserRequest) -> Result<(), String> {
    #[cfg(feature = "csr")]
    {
        let url = endpoints::join(api_base, endpoints::USERS);
        let resp = gloo_net::http::Request::post(&url)
            .json(body)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| request_failed_message("user", &e.to_string()))?;
        if !resp.ok() {
            return Err(failure("Saving user", resp).await);
        }
        Ok(())
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (api_base, body);
        Err(NOT_AVAILABLE.to_owned())
    }
}

/// Fetch a user record from `GET /api/users/{address}`. `Ok(None)` on 404.
///
/// # Errors
///
/// Returns a display message on transport failure or a non-2xx, non-404 status.
pub async fn fetch_user(api_base: &str, address: &str) -> Result<Option<UserRecord>, String> {
    #[cfg(feature = "csr")]
    {
        let url = endpoints::join(api_base, &endpoints::user(address));
        let resp = gloo_net::http::Request::get(&url)
            .send()
            .await
            .map_err(|e| request_failed_message("user", &e.to_string()))?;
        if is_not_found(resp.status()) {
            return Ok(None);
        }
        if !resp.ok() {
            return Err(failure("Fetching user", resp).await);
        }
        resp.json::<UserRecord>().await.map(Some).map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (api_base, address);
        Err(NOT_AVAILABLE.to_owned())
    }
}

/// Submit an image update via `POST /api/pixels-update`.
///
/// # Errors
///
/// Returns the request's validation error, or a display message on transport
/// failure or a non-2xx status.
pub async fn update_pixels(api_base: &str, body: &UpdateRequest) -> Result<(), String> {
    body.validate().map_err(|e| e.to_string())?;
    #[cfg(feature = "csr")]
    {
        let url = endpoints::join(api_base, endpoints::PIXELS_UPDATE);
        let resp = gloo_net::http::Request::post(&url)
            .json(body)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| request_failed_message("update", &e.to_string()))?;
        if !resp.ok() {
            return Err(failure("Update", resp).await);
        }
        Ok(())
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = api_base;
        Err(NOT_AVAILABLE.to_owned())
    }
}

/// Submit a single-pixel update with metadata via `POST /api/pixels-update`.
///
/// # Errors
///
/// Returns the request's validation error, or a display message on transport
/// failure or a non-2xx status.
pub async fn update_single_pixel(api_base: &str, body: &SingleUpdateRequest) -> Result<(), String> {
    body.validate().map_err(|e| e.to_string())?;
    #[cfg(feature = "csr")]
    {
        let url = endpoints::join(api_base, endpoints::PIXELS_UPDATE);
        let resp = gloo_net::http::Request::post(&url)
            .json(body)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| request_failed_message("update", &e.to_string()))?;
        if !resp.ok() {
            return Err(failure("Update", resp).await);
        }
        Ok(())
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = api_base;
        Err(NOT_AVAILABLE.to_owned())
    }
}

/// Per-cell updater backed by `POST /api/pixels-update`.
#[derive(Clone, Debug)]
pub struct BackendUpdater {
    api_base: String,
}

impl BackendUpdater {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self { api_base: api_base.into() }
    }
}

impl CellUpdater for BackendUpdater {
    async fn update_cell(&self, address: &str, update: PixelUpdate) -> Result<(), String> {
        update_pixels(&self.api_base, &UpdateRequest::single(address, update)).await
    }
}
