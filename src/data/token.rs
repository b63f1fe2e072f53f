//! Discovered token records

use super::Chain;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle of a discovered token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenStatus {
    Pending,
    Analyzing,
    Approved,
    Rejected,
    Purchased,
    Sold,
}

/// A token surfaced by the discovery scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenData {
    pub address: String,
    pub symbol: String,
    pub name: String,
    pub chain: Chain,
    pub price: Decimal,
    pub price_change_24h: Decimal,
    pub liquidity: Decimal,
    pub created_at: DateTime<Utc>,
    pub is_analyzed: bool,
    pub is_honeypot: bool,
    pub whale_percentage: Decimal,
    pub status: TokenStatus,
}

impl TokenData {
    /// Liquidity rounded to cents for display
    pub fn liquidity_display(&self) -> String {
        format!("{:.2}", self.liquidity.round_dp(2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_liquidity_display_two_decimals() {
        let token = TokenData {
            address: "SOLabc123".to_string(),
            symbol: "TOKEN7".to_string(),
            name: "New Token".to_string(),
            chain: Chain::Solana,
            price: Decimal::from_str("0.0004").unwrap(),
            price_change_24h: Decimal::from_str("-12.5").unwrap(),
            liquidity: Decimal::from_str("12345.678").unwrap(),
            created_at: Utc::now(),
            is_analyzed: false,
            is_honeypot: false,
            whale_percentage: Decimal::from(40),
            status: TokenStatus::Analyzing,
        };
        assert_eq!(token.liquidity_display(), "12345.68");

        let json = serde_json::to_value(&token).unwrap();
        assert_eq!(json["status"], "analyzing");
        assert_eq!(json["price_change_24h"], "-12.5");
    }
}
