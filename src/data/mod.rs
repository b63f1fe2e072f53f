//! State shapes held by the bot engine and published to the dashboard

use crate::config::BotConfig;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::str::FromStr;

pub mod notification;
pub mod status;
pub mod token;
pub mod transaction;
pub mod wallet;

pub use notification::{Notification, NotificationType};
pub use status::{BotMode, BotStatus};
pub use token::{TokenData, TokenStatus};
pub use transaction::{TradeOutcome, Transaction, TransactionStatus, TransactionType};
pub use wallet::WalletInfo;

/// Supported chains
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    #[default]
    Solana,
}

impl Chain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Chain::Solana => "solana",
        }
    }
}

impl std::fmt::Display for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Chain {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "solana" | "sol" => Ok(Chain::Solana),
            other => Err(format!("Unsupported chain: {}", other)),
        }
    }
}

/// Complete snapshot of the dashboard state.
///
/// Tokens and notifications are ordered newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotState {
    pub status: BotStatus,
    pub config: BotConfig,
    pub tokens: VecDeque<TokenData>,
    pub transactions: Vec<Transaction>,
    pub notifications: VecDeque<Notification>,
    pub wallets: Vec<WalletInfo>,
}

impl BotState {
    pub fn new(config: BotConfig) -> Self {
        Self {
            status: BotStatus::default(),
            config,
            tokens: VecDeque::new(),
            transactions: Vec::new(),
            notifications: VecDeque::new(),
            wallets: Vec::new(),
        }
    }

    /// Number of notifications not yet marked as read
    pub fn unread_notifications(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    /// Wallet connected on the given chain, if any
    pub fn wallet_for(&self, chain: Chain) -> Option<&WalletInfo> {
        self.wallets.iter().find(|w| w.chain == chain)
    }

    /// Look up a discovered token by address
    pub fn token(&self, address: &str) -> Option<&TokenData> {
        self.tokens.iter().find(|t| t.address == address)
    }

    /// Serialize the snapshot for presentation code
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for BotState {
    fn default() -> Self {
        Self::new(BotConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;

    #[test]
    fn test_chain_parsing() {
        assert_eq!("solana".parse::<Chain>().unwrap(), Chain::Solana);
        assert_eq!("SOL".parse::<Chain>().unwrap(), Chain::Solana);
        assert!("ethereum".parse::<Chain>().is_err());
        assert_eq!(Chain::Solana.to_string(), "solana");
    }

    #[test]
    fn test_default_state_is_empty_and_idle() {
        let state = BotState::default();
        assert!(!state.status.is_running);
        assert_eq!(state.status.mode, BotMode::Idle);
        assert!(state.tokens.is_empty());
        assert!(state.notifications.is_empty());
        assert!(state.wallets.is_empty());
        assert_eq!(state.unread_notifications(), 0);
    }

    #[test]
    fn test_wallet_lookup_and_unread_count() {
        let mut state = BotState::default();
        state.wallets.push(WalletInfo {
            address: "abc".to_string(),
            chain: Chain::Solana,
            balance: Decimal::ONE,
            connected_at: Utc::now(),
        });
        let mut read = Notification::new(NotificationType::Success, "Bought", "ok");
        read.read = true;
        state.notifications.push_front(read);
        state
            .notifications
            .push_front(Notification::new(NotificationType::Info, "Found", "new"));

        assert_eq!(state.wallet_for(Chain::Solana).unwrap().address, "abc");
        assert_eq!(state.unread_notifications(), 1);
    }

    #[test]
    fn test_snapshot_json_field_names() {
        let json = BotState::default().to_json().unwrap();
        assert!(json.contains("\"is_running\": false"));
        assert!(json.contains("\"mode\": \"idle\""));
        assert!(json.contains("\"current_chain\": \"solana\""));
    }
}
