// Copyright 2025 Chris Custine
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Wallet connection capability.
//!
//! The dashboard only needs "something that, given a target chain, shows
//! connection UI and exposes the connected account". [`WalletConnector`] is
//! that seam; [`ManualWallet`] is the built-in implementation where the user
//! pastes the account they want to watch. Nothing in the polling path reads
//! wallet state.

use std::fmt;

use log::info;
use thiserror::Error;

/// EVM chain identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl ChainId {
    pub const POLYGON: Self = Self(137);

    pub fn name(self) -> &'static str {
        match self.0 {
            1 => "Ethereum",
            137 => "Polygon",
            _ => "Unknown chain",
        }
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.0)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WalletError {
    #[error("invalid account address: {0}")]
    InvalidAccount(String),
}

/// Connection state exposed to the UI.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WalletState {
    #[default]
    Disconnected,
    Connected { account: String, chain: ChainId },
}

impl WalletState {
    pub fn account(&self) -> Option<&str> {
        match self {
            Self::Disconnected => None,
            Self::Connected { account, .. } => Some(account),
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected { .. })
    }
}

/// A wallet connection provider.
pub trait WalletConnector {
    /// Chain the connection is made against.
    fn target_chain(&self) -> ChainId;

    fn state(&self) -> &WalletState;

    /// Provider credential the connector was configured with, if any.
    fn provider_url(&self) -> Option<&str>;

    fn connect(&mut self, account: &str) -> Result<(), WalletError>;

    fn disconnect(&mut self);
}

/// Connector where the account is entered by hand.
#[derive(Debug, Clone)]
pub struct ManualWallet {
    chain: ChainId,
    provider_url: Option<String>,
    state: WalletState,
}

impl ManualWallet {
    pub fn new(chain: ChainId, provider_url: Option<String>) -> Self {
        Self {
            chain,
            provider_url,
            state: WalletState::Disconnected,
        }
    }
}

impl WalletConnector for ManualWallet {
    fn target_chain(&self) -> ChainId {
        self.chain
    }

    fn state(&self) -> &WalletState {
        &self.state
    }

    fn provider_url(&self) -> Option<&str> {
        self.provider_url.as_deref()
    }

    fn connect(&mut self, account: &str) -> Result<(), WalletError> {
        let account = account.trim();
        if !is_valid_account(account) {
            return Err(WalletError::InvalidAccount(account.to_string()));
        }

        info!("Wallet connected: {} on {}", shorten_account(account), self.chain);
        self.state = WalletState::Connected {
            account: account.to_string(),
            chain: self.chain,
        };
        Ok(())
    }

    fn disconnect(&mut self) {
        if self.state.is_connected() {
            info!("Wallet disconnected");
        }
        self.state = WalletState::Disconnected;
    }
}

/// `0x` followed by exactly 40 hex digits.
pub fn is_valid_account(account: &str) -> bool {
    account
        .strip_prefix("0x")
        .is_some_and(|hex| hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

/// `0x1234…abcd` style label for buttons.
pub fn shorten_account(account: &str) -> String {
    if account.len() <= 10 || !account.is_ascii() {
        return account.to_string();
    }
    format!("{}…{}", &account[..6], &account[account.len() - 4..])
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACCOUNT: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";

    #[test]
    fn test_connect_and_disconnect() {
        let mut wallet = ManualWallet::new(ChainId::POLYGON, None);
        assert_eq!(wallet.state(), &WalletState::Disconnected);

        wallet.connect(&format!("  {ACCOUNT} ")).unwrap();
        assert_eq!(wallet.state().account(), Some(ACCOUNT));
        assert_eq!(
            wallet.state(),
            &WalletState::Connected {
                account: ACCOUNT.to_string(),
                chain: ChainId::POLYGON
            }
        );

        wallet.disconnect();
        assert!(!wallet.state().is_connected());
    }

    #[test]
    fn test_invalid_accounts_rejected() {
        let mut wallet = ManualWallet::new(ChainId::POLYGON, None);
        let too_long = format!("{ACCOUNT}0");
        let candidates = [
            "",
            "0x",
            "5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
            "0x1234",
            too_long.as_str(),
            "0xZZAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
        ];
        for bad in candidates {
            assert!(matches!(wallet.connect(bad), Err(WalletError::InvalidAccount(_))), "{bad}");
        }
        assert!(!wallet.state().is_connected());
    }

    #[test]
    fn test_chain_names() {
        assert_eq!(ChainId::POLYGON.name(), "Polygon");
        assert_eq!(ChainId(80001).name(), "Unknown chain");
        assert_eq!(ChainId::POLYGON.to_string(), "Polygon (137)");
    }

    #[test]
    fn test_shorten_account() {
        assert_eq!(shorten_account(ACCOUNT), "0x5aAe…eAed");
        assert_eq!(shorten_account("0x1234"), "0x1234");
    }

    #[test]
    fn test_provider_url_is_kept() {
        let wallet = ManualWallet::new(ChainId::POLYGON, Some("https://polygon-rpc.com".to_string()));
        assert_eq!(wallet.provider_url(), Some("https://polygon-rpc.com"));
        assert_eq!(wallet.target_chain(), ChainId::POLYGON);
    }
}
