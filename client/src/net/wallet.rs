//! Wallet capability.
//!
//! The UI talks to a [`Wallet`] handed down through context. The one shipped
//! implementation, [`InjectedWallet`], drives an EIP-1193 provider at
//! `window.ethereum` (browser extension wallets).
//!
//! EIP-1193 has no disconnect request, so `disconnect` only forgets the
//! session locally; the extension keeps its own permission until revoked.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "wallet_test.rs"]
mod wallet_test;

use std::future::Future;

use protocol::address::is_valid_address;

/// Message shown when no provider is injected into the page.
pub const NO_PROVIDER: &str = "No wallet found. Please install a browser wallet extension.";

/// An active wallet connection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WalletSession {
    pub address: String,
    pub chain_id: Option<u64>,
}

/// Connect, query and forget a wallet account.
pub trait Wallet {
    /// Ask the user to authorize an account.
    fn connect(&self) -> impl Future<Output = Result<WalletSession, String>>;

    /// The already-authorized account, without prompting.
    fn current(&self) -> impl Future<Output = Option<WalletSession>>;

    /// Drop the local session.
    fn disconnect(&self);
}

/// First valid account from a provider's account list.
pub fn pick_account(accounts: &[String]) -> Option<String> {
    accounts.iter().find(|a| is_valid_address(a)).cloned()
}

/// Parse an `eth_chainId` result (`"0x1"`) into a number.
pub fn parse_chain_id(raw: &str) -> Option<u64> {
    let digits = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X"))?;
    u64::from_str_radix(digits, 16).ok()
}

/// Wallet backed by the page's injected EIP-1193 provider.
#[derive(Clone, Copy, Debug, Default)]
pub struct InjectedWallet;

impl Wallet for InjectedWallet {
    async fn connect(&self) -> Result<WalletSession, String> {
        #[cfg(feature = "csr")]
        {
            let accounts = provider::request_accounts("eth_requestAccounts").await?;
            let address = pick_account(&accounts).ok_or_else(|| "Wallet returned no account".to_owned())?;
            let chain_id = provider::chain_id().await;
            Ok(WalletSession { address, chain_id })
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(NO_PROVIDER.to_owned())
        }
    }

    async fn current(&self) -> Option<WalletSession> {
        #[cfg(feature = "csr")]
        {
            let accounts = match provider::request_accounts("eth_accounts").await {
                Ok(accounts) => accounts,
                Err(e) => {
                    leptos::logging::log!("wallet: no restored session ({e})");
                    return None;
                }
            };
            let address = pick_account(&accounts)?;
            let chain_id = provider::chain_id().await;
            Some(WalletSession { address, chain_id })
        }
        #[cfg(not(feature = "csr"))]
        {
            None
        }
    }

    fn disconnect(&self) {}
}

#[cfg(feature = "csr")]
mod provider {
    use js_sys::{Array, Function, Object, Promise, Reflect};
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;

    use super::{NO_PROVIDER, parse_chain_id};

    fn js_error(err: &JsValue) -> String {
        err.as_string()
            .or_else(|| {
                Reflect::get(err, &JsValue::from_str("message"))
                    .ok()
                    .and_then(|m| m.as_string())
            })
            .unwrap_or_else(|| "Wallet request failed".to_owned())
    }

    /// Call `window.ethereum.request({ method })` and await the result.
    async fn request(method: &str) -> Result<JsValue, String> {
        let window = web_sys::window().ok_or_else(|| NO_PROVIDER.to_owned())?;
        let ethereum = Reflect::get(&window, &JsValue::from_str("ethereum")).map_err(|e| js_error(&e))?;
        if ethereum.is_undefined() || ethereum.is_null() {
            return Err(NO_PROVIDER.to_owned());
        }
        let request = Reflect::get(&ethereum, &JsValue::from_str("request"))
            .map_err(|e| js_error(&e))?
            .dyn_into::<Function>()
            .map_err(|_| NO_PROVIDER.to_owned())?;

        let args = Object::new();
        Reflect::set(&args, &JsValue::from_str("method"), &JsValue::from_str(method)).map_err(|e| js_error(&e))?;
        let promise = request
            .call1(&ethereum, &args)
            .map_err(|e| js_error(&e))?
            .dyn_into::<Promise>()
            .map_err(|_| "Wallet did not return a promise".to_owned())?;
        JsFuture::from(promise).await.map_err(|e| js_error(&e))
    }

    pub(super) async fn request_accounts(method: &str) -> Result<Vec<String>, String> {
        let value = request(method).await?;
        Ok(Array::from(&value).iter().filter_map(|v| v.as_string()).collect())
    }

    pub(super) async fn chain_id() -> Option<u64> {
        match request("eth_chainId").await {
            Ok(value) => value.as_string().as_deref().and_then(parse_chain_id),
            Err(e) => {
                leptos::logging::warn!("wallet: eth_chainId failed: {e}");
                None
            }
        }
    }
}
