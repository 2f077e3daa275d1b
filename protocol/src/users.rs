//! User records kept by the backend for connected wallets.

#[cfg(test)]
#[path = "users_test.rs"]
mod users_test;

use serde::{Deserialize, Serialize};

/// A user as returned by `GET /api/users/{address}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default)]
    pub id: Option<i64>,
    pub address: String,
    #[serde(rename = "ensName", default)]
    pub ens_name: Option<String>,
    #[serde(rename = "firstConnected", default)]
    pub first_connected: Option<String>,
    #[serde(rename = "lastConnected", default)]
    pub last_connected: Option<String>,
    #[serde(default)]
    pub owned_pixels: Option<u32>,
}

impl UserRecord {
    /// Owned pixel count, zero when the backend omits it.
    #[must_use]
    pub fn owned_pixels(&self) -> u32 {
        self.owned_pixels.unwrap_or(0)
    }
}

/// Body of `POST /api/users`, sent when a wallet connects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveUserRequest {
    pub address: String,
    #[serde(rename = "ensName")]
    pub ens_name: Option<String>,
    /// ISO-8601 connection time.
    #[serde(rename = "lastConnected")]
    pub last_connected: String,
}
