//! Initial dashboard data

use crate::config::{SeedConfig, SeedSource};
use crate::data::{
    Chain, Notification, NotificationType, TokenData, TokenStatus, TradeOutcome, Transaction,
    TransactionStatus, TransactionType,
};
use crate::error::{Result, WraithError};
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Tokens, transactions and notifications present when the engine starts.
/// Each list is ordered newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedData {
    pub tokens: Vec<TokenData>,
    pub transactions: Vec<Transaction>,
    pub notifications: Vec<Notification>,
}

impl SeedData {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load seed data from a JSON document
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let seed: SeedData = serde_json::from_str(&content)?;
        info!(
            "Loaded seed from {}: {} tokens, {} transactions, {} notifications",
            path.display(),
            seed.tokens.len(),
            seed.transactions.len(),
            seed.notifications.len()
        );
        Ok(seed)
    }

    /// Resolve the seed named by configuration
    pub fn from_config(config: &SeedConfig) -> Result<Self> {
        match config.source {
            SeedSource::Mock => Ok(MockSeedProvider.seed()),
            SeedSource::Empty => Ok(Self::empty()),
            SeedSource::File => {
                let path = config.file.as_ref().ok_or_else(|| {
                    WraithError::Config(config::ConfigError::Message(
                        "seed.file is not set".to_string(),
                    ))
                })?;
                Self::from_json_file(path)
            }
        }
    }
}

/// Supplier of initial dashboard data
pub trait SeedProvider {
    fn seed(&self) -> SeedData;
}

impl SeedProvider for SeedData {
    fn seed(&self) -> SeedData {
        self.clone()
    }
}

/// Built-in fixtures shown on a fresh dashboard
#[derive(Debug, Clone, Copy, Default)]
pub struct MockSeedProvider;

impl MockSeedProvider {
    #[allow(clippy::too_many_arguments)]
    fn token(
        address: &str,
        symbol: &str,
        name: &str,
        price: Decimal,
        change: Decimal,
        liquidity: Decimal,
        whale: Decimal,
        status: TokenStatus,
        created_at: DateTime<Utc>,
    ) -> TokenData {
        TokenData {
            address: address.to_string(),
            symbol: symbol.to_string(),
            name: name.to_string(),
            chain: Chain::Solana,
            price,
            price_change_24h: change,
            liquidity,
            created_at,
            is_analyzed: status != TokenStatus::Pending && status != TokenStatus::Analyzing,
            is_honeypot: status == TokenStatus::Rejected,
            whale_percentage: whale,
            status,
        }
    }
}

impl SeedProvider for MockSeedProvider {
    fn seed(&self) -> SeedData {
        let now = Utc::now();

        let tokens = vec![
            Self::token(
                "SOLx7f3kqa",
                "MOON",
                "Moon Rocket",
                Decimal::new(42, 6),
                Decimal::new(15_230, 2),
                Decimal::new(4_512_050, 2),
                Decimal::new(2_340, 2),
                TokenStatus::Purchased,
                now - Duration::minutes(5),
            ),
            Self::token(
                "SOLq9m2ntv",
                "RUGME",
                "Totally Safe",
                Decimal::new(7, 7),
                Decimal::new(-8_810, 2),
                Decimal::new(1_204_000, 2),
                Decimal::new(8_150, 2),
                TokenStatus::Rejected,
                now - Duration::minutes(12),
            ),
            Self::token(
                "SOLb4c8wzd",
                "FROG",
                "Frog Coin",
                Decimal::new(315, 6),
                Decimal::new(4_120, 2),
                Decimal::new(2_875_500, 2),
                Decimal::new(3_110, 2),
                TokenStatus::Sold,
                now - Duration::minutes(47),
            ),
            Self::token(
                "SOLr1p5hey",
                "CHAD",
                "Chad Token",
                Decimal::new(91, 6),
                Decimal::new(-1_275, 2),
                Decimal::new(1_830_025, 2),
                Decimal::new(5_500, 2),
                TokenStatus::Pending,
                now - Duration::hours(2),
            ),
        ];

        let transactions = vec![
            Transaction {
                id: "tx-0003".to_string(),
                token_address: "SOLx7f3kqa".to_string(),
                token_symbol: "MOON".to_string(),
                chain: Chain::Solana,
                kind: TransactionType::Buy,
                amount: Decimal::new(5, 1),
                price: Decimal::new(38, 6),
                timestamp: now - Duration::minutes(4),
                status: TransactionStatus::Confirmed,
                tx_hash: "4vJ9kQ2sWmBfNx7aLr3HpT6cYe8ZuD1gKo5iRb2nMq".to_string(),
                outcome: None,
            },
            Transaction {
                id: "tx-0002".to_string(),
                token_address: "SOLb4c8wzd".to_string(),
                token_symbol: "FROG".to_string(),
                chain: Chain::Solana,
                kind: TransactionType::Sell,
                amount: Decimal::new(5, 1),
                price: Decimal::new(315, 6),
                timestamp: now - Duration::minutes(20),
                status: TransactionStatus::Confirmed,
                tx_hash: "2kPz8YtQwE5rNm3xVb7cJh1sLd9fGa4uTo6iWe2nRq".to_string(),
                outcome: Some(TradeOutcome {
                    profit: Decimal::new(175, 3),
                    profit_percentage: Decimal::new(35, 0),
                }),
            },
            Transaction {
                id: "tx-0001".to_string(),
                token_address: "SOLb4c8wzd".to_string(),
                token_symbol: "FROG".to_string(),
                chain: Chain::Solana,
                kind: TransactionType::Buy,
                amount: Decimal::new(5, 1),
                price: Decimal::new(233, 6),
                timestamp: now - Duration::minutes(45),
                status: TransactionStatus::Confirmed,
                tx_hash: "5nRt2WqE8yUi4oPa6sDf1gHj3kLz9xCv7bNm5QwErT".to_string(),
                outcome: None,
            },
        ];

        let mut sold = Notification::new(
            NotificationType::Success,
            "Position Closed",
            "Sold FROG for +35.00% profit",
        );
        sold.timestamp = now - Duration::minutes(20);
        sold.read = true;

        let mut honeypot = Notification::new(
            NotificationType::Warning,
            "Honeypot Detected",
            "RUGME failed the sell simulation and was rejected",
        );
        honeypot.timestamp = now - Duration::minutes(11);

        let mut bought = Notification::new(
            NotificationType::Success,
            "Token Purchased",
            "Bought MOON for 0.5 SOL",
        );
        bought.timestamp = now - Duration::minutes(4);

        SeedData {
            tokens,
            transactions,
            notifications: vec![bought, honeypot, sold],
        }
    }
}
