//! Configuration management for The Wraith

use crate::error::{Result, WraithError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub mod bot;
pub mod simulation;

pub use bot::{
    BotConfig, BotConfigUpdate, ChainSettings, ChainsConfig, NotificationSettings, StrategyConfig,
};
pub use simulation::{DecimalRange, SimulationConfig};

/// Main configuration structure for The Wraith
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Initial dashboard configuration
    pub bot: BotConfig,

    /// Discovery simulation parameters
    pub simulation: SimulationConfig,

    /// Logging and metrics
    pub monitoring: MonitoringConfig,

    /// Where the initial tokens, transactions and notifications come from
    pub seed: SeedConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitoringConfig {
    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Enable JSON logging
    pub json_logging: bool,

    /// Metrics logging interval in seconds
    pub metrics_interval_secs: u64,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logging: false,
            metrics_interval_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeedSource {
    /// Built-in dashboard fixtures
    #[default]
    Mock,
    /// Start with no tokens, transactions or notifications
    Empty,
    /// JSON file at `seed.file`
    File,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    pub source: SeedSource,
    pub file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the `config/` directory and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from("config")
    }

    /// Layered load: `default`, then `$WRAITH_ENV`, then `local` from `dir`, then
    /// `WRAITH_`-prefixed environment variables (`__` separates nested keys).
    pub fn load_from<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let layer = |name: &str| {
            config::File::with_name(&dir.join(name).to_string_lossy()).required(false)
        };

        let mut settings = config::Config::builder().add_source(layer("default"));

        if let Ok(env) = std::env::var("WRAITH_ENV") {
            settings = settings.add_source(layer(&env));
        }

        settings = settings
            .add_source(layer("local"))
            .add_source(
                config::Environment::with_prefix("WRAITH")
                    .prefix_separator("_")
                    .separator("__"),
            );

        let config: Config = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        self.simulation.validate()?;

        if self.bot.chains.solana.enabled && self.bot.chains.solana.rpc_url.trim().is_empty() {
            return Err(WraithError::Config(config::ConfigError::Message(
                "Enabled chain solana has no RPC URL".to_string(),
            )));
        }

        if self.monitoring.metrics_interval_secs == 0 {
            return Err(WraithError::Config(config::ConfigError::Message(
                "Metrics interval must be positive".to_string(),
            )));
        }

        if self.seed.source == SeedSource::File && self.seed.file.is_none() {
            return Err(WraithError::Config(config::ConfigError::Message(
                "Seed source is 'file' but no seed.file path is set".to_string(),
            )));
        }

        Ok(())
    }

    /// Get tick period as Duration
    pub fn tick_interval(&self) -> Duration {
        self.simulation.tick_interval()
    }

    /// Get metrics logging interval as Duration
    pub fn metrics_interval(&self) -> Duration {
        Duration::from_secs(self.monitoring.metrics_interval_secs)
    }
}
