//! Monitoring: metrics derived from dashboard snapshots

use crate::data::{BotState, TokenStatus, TransactionStatus};
use crate::engine::BotHandle;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Point-in-time counters computed from a [`BotState`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateMetrics {
    pub timestamp: DateTime<Utc>,
    pub is_running: bool,
    pub mode: String,
    pub uptime_secs: u64,
    pub tokens_total: usize,
    pub tokens_analyzing: usize,
    pub tokens_rejected: usize,
    pub transactions_total: usize,
    pub transactions_confirmed: usize,
    pub transactions_failed: usize,
    /// Sum of realized profit across closed trades
    pub realized_profit: Decimal,
    pub notifications_unread: usize,
    pub wallets_connected: usize,
}

impl StateMetrics {
    pub fn from_state(state: &BotState) -> Self {
        let count_tokens =
            |status: TokenStatus| state.tokens.iter().filter(|t| t.status == status).count();
        let count_txs = |status: TransactionStatus| {
            state
                .transactions
                .iter()
                .filter(|tx| tx.status == status)
                .count()
        };

        Self {
            timestamp: Utc::now(),
            is_running: state.status.is_running,
            mode: state.status.mode.to_string(),
            uptime_secs: state.status.uptime,
            tokens_total: state.tokens.len(),
            tokens_analyzing: count_tokens(TokenStatus::Analyzing),
            tokens_rejected: count_tokens(TokenStatus::Rejected),
            transactions_total: state.transactions.len(),
            transactions_confirmed: count_txs(TransactionStatus::Confirmed),
            transactions_failed: count_txs(TransactionStatus::Failed),
            realized_profit: state.transactions.iter().filter_map(|tx| tx.profit()).sum(),
            notifications_unread: state.unread_notifications(),
            wallets_connected: state.wallets.len(),
        }
    }

    pub fn log(&self) {
        info!(
            running = self.is_running,
            mode = %self.mode,
            uptime_secs = self.uptime_secs,
            tokens = self.tokens_total,
            analyzing = self.tokens_analyzing,
            transactions = self.transactions_total,
            realized_profit = %self.realized_profit,
            unread = self.notifications_unread,
            wallets = self.wallets_connected,
            "Bot metrics"
        );
    }
}

/// Log metrics every `interval` until the engine behind `handle` goes away
pub fn spawn_metrics_reporter(handle: BotHandle, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately; skip it so the first report
        // reflects a full interval.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            match handle.get() {
                Ok(engine) => StateMetrics::from_state(&engine.snapshot()).log(),
                Err(_) => break,
            }
        }

        debug!("Metrics reporter stopped");
    })
}
