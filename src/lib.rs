//! The Wraith - Simulated Solana Token Sniper
//!
//! An in-memory state engine backing a sniper-bot dashboard. It holds the bot status,
//! configuration, discovered tokens, transactions, notifications and connected wallets,
//! and drives a randomized discovery simulation from a single periodic task.

pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod monitoring;
pub mod seed;
pub mod simulation;
pub mod wallet;

// Re-export commonly used types
pub use config::Config;
pub use data::{BotState, Chain};
pub use engine::{BotEngine, BotHandle};
pub use error::{Result, WraithError};

/// Crate version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Default configuration values
pub mod defaults {
    use rust_decimal::Decimal;
    use std::time::Duration;

    /// Default Solana RPC endpoint
    pub const SOLANA_RPC_URL: &str = "https://api.mainnet-beta.solana.com";

    /// Minimum pool liquidity in USD
    pub const MIN_LIQUIDITY: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

    /// Maximum share of supply held by whales, in percent
    pub const MAX_WHALE_PERCENTAGE: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

    /// Take-profit target, in percent
    pub const TARGET_PROFIT: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

    /// Stop-loss, in percent
    pub const STOP_LOSS: Decimal = Decimal::from_parts(15, 0, 0, false, 0);

    /// Buy size in SOL (0.5)
    pub const BUY_AMOUNT: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

    /// Slippage tolerance, in percent
    pub const SLIPPAGE: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

    /// Simulation tick period
    pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

    /// Chance that a tick discovers a token
    pub const DISCOVERY_PROBABILITY: f64 = 0.2;

    /// Address reported by the mock wallet provider
    pub const MOCK_WALLET_ADDRESS: &str = "6x3F...4k2";

    /// Balance reported by the mock wallet provider (5.2 SOL)
    pub const MOCK_WALLET_BALANCE: Decimal = Decimal::from_parts(52, 0, 0, false, 1);
}
