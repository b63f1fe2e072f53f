//! Randomized token discovery used in place of a live chain scanner

use crate::config::{DecimalRange, SimulationConfig};
use crate::data::{Chain, Notification, NotificationType, TokenData, TokenStatus};
use crate::error::Result;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use rust_decimal::Decimal;
use tracing::{debug, trace, warn};

const ADDRESS_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Re-rolls allowed before a colliding address gives up the discovery
const MAX_ADDRESS_ATTEMPTS: usize = 64;

pub const DISCOVERY_TITLE: &str = "New Token Found";

/// A synthesized token together with the notification announcing it
#[derive(Debug, Clone)]
pub struct Discovery {
    pub token: TokenData,
    pub notification: Notification,
}

/// Produces fake token launches from a configurable random source
pub struct DiscoverySimulator {
    config: SimulationConfig,
    rng: Box<dyn RngCore + Send>,
}

impl DiscoverySimulator {
    /// Seeded from `config.seed` when set, otherwise from OS entropy
    pub fn new(config: SimulationConfig) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    pub fn with_rng(config: SimulationConfig, rng: impl RngCore + Send + 'static) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rng: Box::new(rng),
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Roll for a discovery. `is_known` reports addresses already held so the
    /// synthesized address stays unique; the tick yields nothing when no free
    /// address turns up.
    pub fn maybe_discover(
        &mut self,
        now: DateTime<Utc>,
        is_known: impl Fn(&str) -> bool,
    ) -> Option<Discovery> {
        if !self.rng.gen_bool(self.config.discovery_probability) {
            trace!("No discovery this tick");
            return None;
        }
        self.synthesize(now, is_known)
    }

    /// Synthesize one token and its notification, or `None` when every
    /// attempted address is already known
    pub fn synthesize(
        &mut self,
        now: DateTime<Utc>,
        is_known: impl Fn(&str) -> bool,
    ) -> Option<Discovery> {
        let Some(address) = (0..MAX_ADDRESS_ATTEMPTS)
            .map(|_| self.random_address())
            .find(|address| !is_known(address))
        else {
            warn!(
                "No unused token address after {} attempts, skipping discovery",
                MAX_ADDRESS_ATTEMPTS
            );
            return None;
        };

        let symbol = format!("TOKEN{}", self.rng.gen_range(0..self.config.symbol_number_bound));
        let price = self.sample(self.config.price);
        let price_change_24h = self.sample(self.config.price_change_24h);
        let liquidity = self.sample(self.config.liquidity);
        let whale_percentage = self.sample(self.config.whale_percentage);

        let token = TokenData {
            address,
            symbol,
            name: self.config.token_name.clone(),
            chain: Chain::Solana,
            price,
            price_change_24h,
            liquidity,
            created_at: now,
            is_analyzed: false,
            is_honeypot: false,
            whale_percentage,
            status: TokenStatus::Analyzing,
        };

        let id = uuid::Builder::from_random_bytes(self.rng.gen()).into_uuid();
        let notification = Notification::with_id(
            id,
            NotificationType::Info,
            DISCOVERY_TITLE,
            format!(
                "Discovered {} with ${} liquidity",
                token.symbol,
                token.liquidity_display()
            ),
            now,
        );

        debug!(
            "Synthesized token {} ({}) with liquidity {}",
            token.symbol, token.address, token.liquidity
        );

        Some(Discovery {
            token,
            notification,
        })
    }

    fn random_address(&mut self) -> String {
        let mut address = self.config.address_prefix.clone();
        for _ in 0..self.config.address_suffix_len {
            let idx = self.rng.gen_range(0..ADDRESS_ALPHABET.len());
            address.push(ADDRESS_ALPHABET[idx] as char);
        }
        address
    }

    /// Uniform draw from `[min, max)` on the range's decimal grid
    fn sample(&mut self, range: DecimalRange) -> Decimal {
        match range.grid_bounds() {
            Some((low, high)) if high > low => {
                Decimal::from_i128_with_scale(self.rng.gen_range(low..high), range.scale)
            }
            _ => range.min,
        }
    }
}

impl std::fmt::Debug for DiscoverySimulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscoverySimulator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
