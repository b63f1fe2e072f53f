//! Wallet connection providers

use crate::data::{Chain, WalletInfo};
use crate::error::Result;
use chrono::Utc;
use rust_decimal::Decimal;
use std::time::Duration;
use tracing::debug;

/// Source of connected wallets.
///
/// Real providers (browser extension, hardware signer) may fail; the engine
/// propagates their errors unchanged.
#[async_trait::async_trait]
pub trait WalletProvider: Send + Sync {
    /// Connect a wallet for `chain` and report its address and balance
    async fn connect(&self, chain: Chain) -> Result<WalletInfo>;

    /// Provider name for logs
    fn name(&self) -> &str;
}

/// Always-succeeding provider returning a fixed wallet
#[derive(Debug, Clone)]
pub struct MockWalletProvider {
    address: String,
    balance: Decimal,
    latency: Duration,
}

impl MockWalletProvider {
    pub fn new() -> Self {
        Self {
            address: crate::defaults::MOCK_WALLET_ADDRESS.to_string(),
            balance: crate::defaults::MOCK_WALLET_BALANCE,
            latency: Duration::ZERO,
        }
    }

    pub fn with_account(address: impl Into<String>, balance: Decimal) -> Self {
        Self {
            address: address.into(),
            balance,
            latency: Duration::ZERO,
        }
    }

    /// Simulated handshake delay before the wallet reports back
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

impl Default for MockWalletProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl WalletProvider for MockWalletProvider {
    async fn connect(&self, chain: Chain) -> Result<WalletInfo> {
        if self.latency.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(self.latency).await;
        }

        debug!("Mock wallet {} connected on {}", self.address, chain);
        Ok(WalletInfo {
            address: self.address.clone(),
            chain,
            balance: self.balance,
            connected_at: Utc::now(),
        })
    }

    fn name(&self) -> &str {
        "mock"
    }
}
