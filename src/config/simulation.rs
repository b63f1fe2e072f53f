//! Discovery simulation parameters

use crate::error::{Result, WraithError};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Half-open range `[min, max)` sampled at a fixed number of decimal places
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecimalRange {
    pub min: Decimal,
    pub max: Decimal,
    /// Decimal places kept when sampling
    pub scale: u32,
}

impl DecimalRange {
    pub const fn new(min: Decimal, max: Decimal, scale: u32) -> Self {
        Self { min, max, scale }
    }

    pub fn contains(&self, value: Decimal) -> bool {
        value >= self.min && value < self.max
    }

    /// Integer bounds of the sampling grid, `None` when they overflow `Decimal`
    pub fn grid_bounds(&self) -> Option<(i128, i128)> {
        if self.scale > 18 {
            return None;
        }
        let factor = Decimal::from(10u64.pow(self.scale));
        let low = self.min.checked_mul(factor)?.ceil().to_i128()?;
        let high = self.max.checked_mul(factor)?.ceil().to_i128()?;
        Some((low, high))
    }

    fn validate(&self, name: &str) -> Result<()> {
        if self.min >= self.max {
            return Err(WraithError::InvalidSimulation(format!(
                "{} range is empty: min {} must be below max {}",
                name, self.min, self.max
            )));
        }
        if self.scale > 18 {
            return Err(WraithError::InvalidSimulation(format!(
                "{} scale {} exceeds 18 decimal places",
                name, self.scale
            )));
        }
        match self.grid_bounds() {
            Some((low, high)) if high > low => Ok(()),
            Some(_) => Err(WraithError::InvalidSimulation(format!(
                "{} range [{}, {}) holds no value at {} decimal places",
                name, self.min, self.max, self.scale
            ))),
            None => Err(WraithError::InvalidSimulation(format!(
                "{} range [{}, {}) overflows at {} decimal places",
                name, self.min, self.max, self.scale
            ))),
        }
    }
}

/// Parameters of the randomized discovery scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Tick period in milliseconds
    pub tick_interval_ms: u64,

    /// Chance in `[0, 1]` that a tick discovers a token
    pub discovery_probability: f64,

    /// Fixed RNG seed for reproducible runs
    pub seed: Option<u64>,

    pub price: DecimalRange,
    pub price_change_24h: DecimalRange,
    pub liquidity: DecimalRange,
    pub whale_percentage: DecimalRange,

    /// Symbols are `TOKEN{n}` with `n` below this bound
    pub symbol_number_bound: u32,

    pub address_prefix: String,
    pub address_suffix_len: usize,
    pub token_name: String,
}

impl SimulationConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Convenience for tests and demos: fixed seed and discovery chance
    pub fn deterministic(seed: u64, discovery_probability: f64) -> Self {
        Self {
            seed: Some(seed),
            discovery_probability,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(WraithError::InvalidSimulation(
                "Tick interval must be positive".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.discovery_probability) {
            return Err(WraithError::InvalidSimulation(format!(
                "Discovery probability must be between 0 and 1, got {}",
                self.discovery_probability
            )));
        }

        self.price.validate("price")?;
        self.price_change_24h.validate("price_change_24h")?;
        self.liquidity.validate("liquidity")?;
        self.whale_percentage.validate("whale_percentage")?;

        if self.symbol_number_bound == 0 {
            return Err(WraithError::InvalidSimulation(
                "Symbol number bound must be positive".to_string(),
            ));
        }

        if self.address_suffix_len == 0 {
            return Err(WraithError::InvalidSimulation(
                "Address suffix length must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: crate::defaults::TICK_INTERVAL.as_millis() as u64,
            discovery_probability: crate::defaults::DISCOVERY_PROBABILITY,
            seed: None,
            price: DecimalRange::new(Decimal::ZERO, Decimal::from_parts(1, 0, 0, false, 3), 12),
            price_change_24h: DecimalRange::new(Decimal::from(-100), Decimal::from(100), 2),
            liquidity: DecimalRange::new(Decimal::from(10_000), Decimal::from(60_000), 2),
            whale_percentage: DecimalRange::new(Decimal::ZERO, Decimal::from(100), 2),
            symbol_number_bound: 1000,
            address_prefix: "SOL".to_string(),
            address_suffix_len: 6,
            token_name: "New Token".to_string(),
        }
    }
}
