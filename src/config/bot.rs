//! Dashboard bot configuration and shallow-merge updates

use crate::data::Chain;
use crate::error::Result;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Connection settings for a single chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainSettings {
    pub enabled: bool,
    pub rpc_url: String,
}

impl Default for ChainSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            rpc_url: crate::defaults::SOLANA_RPC_URL.to_string(),
        }
    }
}

/// Per-chain settings, one entry per supported chain
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainsConfig {
    pub solana: ChainSettings,
}

impl ChainsConfig {
    pub fn get(&self, chain: Chain) -> &ChainSettings {
        match chain {
            Chain::Solana => &self.solana,
        }
    }
}

/// Sniping strategy thresholds.
///
/// Percentages are whole numbers (60 = 60%). Ranges are not enforced here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    pub min_liquidity: Decimal,
    pub max_whale_percentage: Decimal,
    pub target_profit: Decimal,
    pub stop_loss: Decimal,
    pub buy_amount: Decimal,
    pub slippage: Decimal,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            min_liquidity: crate::defaults::MIN_LIQUIDITY,
            max_whale_percentage: crate::defaults::MAX_WHALE_PERCENTAGE,
            target_profit: crate::defaults::TARGET_PROFIT,
            stop_loss: crate::defaults::STOP_LOSS,
            buy_amount: crate::defaults::BUY_AMOUNT,
            slippage: crate::defaults::SLIPPAGE,
        }
    }
}

/// Notification channel toggles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    pub telegram: bool,
    pub discord: bool,
    pub email: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            telegram: true,
            discord: false,
            email: false,
        }
    }
}

/// Configuration shown and edited on the dashboard
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    pub chains: ChainsConfig,
    pub strategy: StrategyConfig,
    pub notifications: NotificationSettings,
}

impl BotConfig {
    /// Shallow merge: every section present in `update` replaces the current section
    /// wholesale, absent sections are kept.
    pub fn apply(&mut self, update: BotConfigUpdate) {
        if let Some(chains) = update.chains {
            self.chains = chains;
        }
        if let Some(strategy) = update.strategy {
            self.strategy = strategy;
        }
        if let Some(notifications) = update.notifications {
            self.notifications = notifications;
        }
    }

    /// Return a merged copy, leaving `self` untouched
    pub fn merged(&self, update: BotConfigUpdate) -> Self {
        let mut merged = self.clone();
        merged.apply(update);
        merged
    }
}

/// Partial update for [`BotConfig`].
///
/// A section given in JSON with missing fields is completed from defaults,
/// never from the current configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BotConfigUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chains: Option<ChainsConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<StrategyConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notifications: Option<NotificationSettings>,
}

impl BotConfigUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chains(mut self, chains: ChainsConfig) -> Self {
        self.chains = Some(chains);
        self
    }

    pub fn strategy(mut self, strategy: StrategyConfig) -> Self {
        self.strategy = Some(strategy);
        self
    }

    pub fn notifications(mut self, notifications: NotificationSettings) -> Self {
        self.notifications = Some(notifications);
        self
    }

    /// Parse an update sent by presentation code
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_none() && self.strategy.is_none() && self.notifications.is_none()
    }
}
