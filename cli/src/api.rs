//! REST client for the pixel map backend.

use canvas::update::CellUpdater;
use protocol::endpoints;
use protocol::pixels::{PixelRecord, PixelUpdate, SingleUpdateRequest, UpdateRequest, records_from_values};
use protocol::users::{SaveUserRequest, UserRecord};
use reqwest::{Response, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use crate::CliError;

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: String,
}

impl ApiClient {
    pub fn new(base: &str) -> Self {
        Self { http: reqwest::Client::new(), base: base.trim().trim_end_matches('/').to_owned() }
    }

    fn url(&self, path: &str) -> String {
        endpoints::join(&self.base, path)
    }

    pub async fn pixels(&self) -> Result<Vec<PixelRecord>, CliError> {
        let response = self.http.get(self.url(endpoints::PIXELS)).send().await?;
        let rows: Vec<Value> = ensure_success("Fetching pixels", response).await?.json().await?;
        let (records, dropped) = records_from_values(rows);
        if dropped > 0 {
            warn!(dropped, "skipped malformed pixel rows");
        }
        Ok(records)
    }

    /// One pixel, or `None` when the backend has no record for it.
    pub async fn pixel(&self, x: i32, y: i32) -> Result<Option<PixelRecord>, CliError> {
        let response = self.http.get(self.url(&endpoints::pixel(x, y))).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(ensure_success("Fetching pixel", response).await?.json().await?))
    }

    pub async fn user(&self, address: &str) -> Result<Option<UserRecord>, CliError> {
        let response = self.http.get(self.url(&endpoints::user(address))).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(ensure_success("Fetching user", response).await?.json().await?))
    }

    pub async fn save_user(&self, body: &SaveUserRequest) -> Result<Value, CliError> {
        let response = self.http.post(self.url(endpoints::USERS)).json(body).send().await?;
        Ok(ensure_success("Saving user", response).await?.json().await?)
    }

    /// Raw bytes of the rendered map image.
    pub async fn pixel_map(&self) -> Result<Vec<u8>, CliError> {
        let response = self.http.get(self.url(endpoints::PIXEL_MAP)).send().await?;
        Ok(ensure_success("Fetching pixel map", response).await?.bytes().await?.to_vec())
    }

    pub async fn update_pixels(&self, body: &UpdateRequest) -> Result<(), CliError> {
        body.validate()?;
        debug!(address = %body.address, pixels = body.pixels.len(), "posting pixel update");
        let response = self.http.post(self.url(endpoints::PIXELS_UPDATE)).json(body).send().await?;
        ensure_success("Update", response).await?;
        Ok(())
    }

    pub async fn update_single_pixel(&self, body: &SingleUpdateRequest) -> Result<(), CliError> {
        body.validate()?;
        debug!(address = %body.address, x = body.x, y = body.y, "posting single pixel update");
        let response = self.http.post(self.url(endpoints::PIXELS_UPDATE)).json(body).send().await?;
        ensure_success("Update", response).await?;
        Ok(())
    }
}

impl CellUpdater for ApiClient {
    async fn update_cell(&self, address: &str, update: PixelUpdate) -> Result<(), String> {
        self.update_pixels(&UpdateRequest::single(address, update))
            .await
            .map_err(|e| e.to_string())
    }
}

async fn ensure_success(what: &str, response: Response) -> Result<Response, CliError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(CliError::Backend(endpoints::failure_message(what, status.as_u16(), &body)))
}
