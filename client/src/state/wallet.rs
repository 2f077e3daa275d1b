//! Connected wallet and its user record.

#[cfg(test)]
#[path = "wallet_test.rs"]
mod wallet_test;

use protocol::address::{same_address, short_address};
use protocol::users::UserRecord;

use crate::net::wallet::WalletSession;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WalletState {
    pub address: Option<String>,
    pub chain_id: Option<u64>,
    pub ens_name: Option<String>,
    /// `None` until the user record has loaded.
    pub owned_pixels: Option<u32>,
    pub connecting: bool,
    pub error: Option<String>,
}

impl WalletState {
    pub fn is_connected(&self) -> bool {
        self.address.is_some()
    }

    /// Address in `0x1234...abcd` form.
    pub fn short_address(&self) -> Option<String> {
        self.address.as_deref().map(short_address)
    }

    /// Whether `owner` is this wallet.
    pub fn is_self(&self, owner: &str) -> bool {
        self.address.as_deref().is_some_and(|a| same_address(a, owner))
    }

    /// Owned pixel count for display, `-` while unknown.
    pub fn owned_pixels_label(&self) -> String {
        self.owned_pixels.map_or_else(|| "-".to_owned(), |n| n.to_string())
    }

    pub fn connect_label(&self) -> &'static str {
        if self.connecting { "Connecting..." } else { "Connect Wallet" }
    }

    pub fn begin_connect(&mut self) {
        self.connecting = true;
        self.error = None;
    }

    pub fn on_connected(&mut self, session: WalletSession) {
        let changed = !self.is_self(&session.address);
        self.address = Some(session.address);
        self.chain_id = session.chain_id;
        self.connecting = false;
        self.error = None;
        if changed {
            self.ens_name = None;
            self.owned_pixels = None;
        }
    }

    pub fn on_connect_failed(&mut self, error: String) {
        self.connecting = false;
        self.error = Some(error);
    }

    /// Apply the user record. A missing record means nothing owned yet.
    pub fn on_user_loaded(&mut self, user: Option<UserRecord>) {
        match user {
            Some(user) => {
                self.owned_pixels = Some(user.owned_pixels());
                if user.ens_name.is_some() {
                    self.ens_name = user.ens_name;
                }
            }
            None => self.owned_pixels = Some(0),
        }
    }

    pub fn on_disconnected(&mut self) {
        *self = Self::default();
    }
}
