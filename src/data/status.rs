//! Bot run status

use super::Chain;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Operating mode of the bot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BotMode {
    /// Scanning for newly launched tokens
    Discovery,
    /// Reserved: buying an approved token
    Snipe,
    /// Reserved: exiting a held position
    Sell,
    #[default]
    Idle,
}

impl std::fmt::Display for BotMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BotMode::Discovery => write!(f, "discovery"),
            BotMode::Snipe => write!(f, "snipe"),
            BotMode::Sell => write!(f, "sell"),
            BotMode::Idle => write!(f, "idle"),
        }
    }
}

/// Run state of the bot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotStatus {
    pub is_running: bool,
    pub current_chain: Chain,
    pub mode: BotMode,
    pub last_scan: Option<DateTime<Utc>>,
    pub discovered_tokens: u64,
    pub analyzed_tokens: u64,
    pub purchased_tokens: u64,
    pub sold_tokens: u64,
    pub total_profit: Decimal,
    /// Seconds spent running, one per simulation tick
    pub uptime: u64,
}

impl BotStatus {
    /// Uptime rendered as `HH:MM:SS`
    pub fn uptime_display(&self) -> String {
        let hours = self.uptime / 3600;
        let minutes = (self.uptime % 3600) / 60;
        let seconds = self.uptime % 60;
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    }
}

impl Default for BotStatus {
    fn default() -> Self {
        Self {
            is_running: false,
            current_chain: Chain::Solana,
            mode: BotMode::Idle,
            last_scan: None,
            discovered_tokens: 0,
            analyzed_tokens: 0,
            purchased_tokens: 0,
            sold_tokens: 0,
            total_profit: Decimal::ZERO,
            uptime: 0,
        }
    }
}
