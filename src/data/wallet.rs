//! Connected wallet records

use super::Chain;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A wallet connected for one chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletInfo {
    pub address: String,
    pub chain: Chain,
    pub balance: Decimal,
    pub connected_at: DateTime<Utc>,
}
