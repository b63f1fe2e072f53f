//! Trade history records

use super::Chain;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Transaction direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Buy,
    Sell,
}

/// Transaction status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Confirmed,
    Failed,
}

/// Realized result of a closed trade
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeOutcome {
    pub profit: Decimal,
    pub profit_percentage: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub token_address: String,
    pub token_symbol: String,
    pub chain: Chain,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: Decimal,
    pub price: Decimal,
    pub timestamp: DateTime<Utc>,
    pub status: TransactionStatus,
    pub tx_hash: String,
    /// Present once a position has been closed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<TradeOutcome>,
}

impl Transaction {
    pub fn profit(&self) -> Option<Decimal> {
        self.outcome.map(|o| o.profit)
    }

    pub fn is_settled(&self) -> bool {
        self.status == TransactionStatus::Confirmed
    }
}
