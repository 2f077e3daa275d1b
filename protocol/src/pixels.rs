//! Pixel records and update request bodies.

#[cfg(test)]
#[path = "pixels_test.rs"]
mod pixels_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::address::{is_valid_address, same_address};

/// Update time of a pixel: an ISO-8601 string or a number of epoch
/// milliseconds, depending on which backend route produced the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Text(String),
    Millis(serde_json::Number),
}

impl Timestamp {
    /// Epoch milliseconds of a numeric stamp.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn as_millis(&self) -> Option<i64> {
        match self {
            Self::Text(_) => None,
            Self::Millis(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        }
    }
}

/// One pixel as reported by the backend.
///
/// `GET /api/pixels` names the owner `current_owner` and the update time
/// `timestamp`; the single-pixel endpoint may use `owner` and `lastUpdated`.
/// Both spellings are kept; read them through [`PixelRecord::owner_address`]
/// and [`PixelRecord::updated_at`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PixelRecord {
    pub x: i32,
    pub y: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
    #[serde(rename = "lastUpdated", default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<Timestamp>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub metadata: Option<Value>,
}

impl PixelRecord {
    /// Owner address, preferring `current_owner` over `owner`.
    #[must_use]
    pub fn owner_address(&self) -> Option<&str> {
        self.current_owner.as_deref().or(self.owner.as_deref())
    }

    /// Update time, preferring `timestamp` over `lastUpdated`.
    #[must_use]
    pub fn updated_at(&self) -> Option<&Timestamp> {
        self.timestamp.as_ref().or(self.last_updated.as_ref())
    }

    /// Whether `address` owns this pixel.
    #[must_use]
    pub fn is_owned_by(&self, address: &str) -> bool {
        self.owner_address().is_some_and(|owner| same_address(owner, address))
    }
}

/// Decode a `GET /api/pixels` array row by row.
///
/// Rows that do not decode are dropped instead of failing the whole list.
/// Returns the records and the number of rows dropped.
#[must_use]
pub fn records_from_values(rows: Vec<Value>) -> (Vec<PixelRecord>, usize) {
    let total = rows.len();
    let records: Vec<PixelRecord> = rows.into_iter().filter_map(|row| serde_json::from_value(row).ok()).collect();
    let dropped = total - records.len();
    (records, dropped)
}

/// Image for one pixel in an update request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelUpdate {
    pub x: i32,
    pub y: i32,
    /// `data:image/png;base64,...` tile.
    pub image: String,
}

/// Body of `POST /api/pixels-update`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRequest {
    pub address: String,
    pub pixels: Vec<PixelUpdate>,
}

/// Local rejection of an update request before it is sent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpdateRequestError {
    #[error("Invalid or missing Ethereum address")]
    InvalidAddress,
    #[error("Invalid or missing pixels data")]
    NoPixels,
    #[error("Image data is required for each pixel")]
    MissingImage,
    #[error("Invalid pixel coordinates")]
    InvalidCoordinates,
}

impl UpdateRequest {
    /// Request updating a single pixel.
    #[must_use]
    pub fn single(address: &str, update: PixelUpdate) -> Self {
        Self { address: address.to_owned(), pixels: vec![update] }
    }

    /// Check the request shape the backend would otherwise reject with 400.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), UpdateRequestError> {
        if !is_valid_address(&self.address) {
            return Err(UpdateRequestError::InvalidAddress);
        }
        if self.pixels.is_empty() {
            return Err(UpdateRequestError::NoPixels);
        }
        if self.pixels.iter().any(|p| p.image.is_empty()) {
            return Err(UpdateRequestError::MissingImage);
        }
        Ok(())
    }
}

/// Single-pixel body of `POST /api/pixels-update`, carrying metadata such as
/// the chosen colour alongside the image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleUpdateRequest {
    pub address: String,
    pub x: i32,
    pub y: i32,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl SingleUpdateRequest {
    /// Solid-colour update for one pixel, recording `color` in the metadata.
    #[must_use]
    pub fn with_color(address: &str, x: i32, y: i32, image: String, color: &str) -> Self {
        Self {
            address: address.to_owned(),
            x,
            y,
            image,
            metadata: Some(serde_json::json!({ "color": color })),
        }
    }

    /// Check the request shape the backend would otherwise reject with 400.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), UpdateRequestError> {
        if !is_valid_address(&self.address) {
            return Err(UpdateRequestError::InvalidAddress);
        }
        if self.x < 0 || self.y < 0 {
            return Err(UpdateRequestError::InvalidCoordinates);
        }
        if self.image.is_empty() {
            return Err(UpdateRequestError::MissingImage);
        }
        Ok(())
    }
}
