use anyhow::Context;
use the_wraith::config::MonitoringConfig;
use the_wraith::monitoring::{spawn_metrics_reporter, StateMetrics};
use the_wraith::seed::SeedData;
use the_wraith::simulation::DISCOVERY_TITLE;
use the_wraith::{BotEngine, Chain, Config};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration first so logging can honour it
    let config = Config::load().context("Failed to load configuration")?;

    init_logging(&config.monitoring)?;

    info!("Starting The Wraith v{}", the_wraith::VERSION);
    info!("Bot configuration:");
    info!("  Seed source: {:?}", config.seed.source);
    info!("  Tick interval: {:?}", config.tick_interval());
    info!(
        "  Discovery probability: {}",
        config.simulation.discovery_probability
    );
    info!(
        "  Min liquidity: ${}",
        config.bot.strategy.min_liquidity
    );

    let seed = SeedData::from_config(&config.seed).context("Failed to load seed data")?;
    let engine = BotEngine::new(&config, seed)?;

    if let Err(e) = engine.connect_wallet(Chain::Solana).await {
        warn!("Wallet connection failed, continuing without wallet: {}", e);
    }

    let reporter = spawn_metrics_reporter(engine.handle(), config.metrics_interval());

    let mut updates = engine.subscribe();
    let mut last_seen = updates.borrow_and_update().notifications.front().map(|n| n.id.clone());

    engine.start_bot();
    info!("The Wraith is scanning for new tokens");
    info!("Press Ctrl+C to stop the bot");

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    error!("State channel closed unexpectedly");
                    break;
                }
                let state = updates.borrow_and_update().clone();
                for notification in state.notifications.iter() {
                    if Some(&notification.id) == last_seen.as_ref() {
                        break;
                    }
                    if notification.title == DISCOVERY_TITLE {
                        info!("{}", notification.message);
                    }
                }
                last_seen = state.notifications.front().map(|n| n.id.clone());
            }
            signal = &mut shutdown => {
                if let Err(e) = signal {
                    error!("Failed to listen for Ctrl+C: {}", e);
                }
                info!("Shutdown signal received. Stopping The Wraith...");
                break;
            }
        }
    }

    engine.stop_bot();
    StateMetrics::from_state(&engine.snapshot()).log();

    drop(engine);
    reporter.abort();

    info!("The Wraith has been stopped successfully");
    Ok(())
}

fn init_logging(monitoring: &MonitoringConfig) -> anyhow::Result<()> {
    // Environment overrides the configured level
    let log_level =
        std::env::var("WRAITH_LOG_LEVEL").unwrap_or_else(|_| monitoring.log_level.clone());

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&log_level))
        .context("Invalid log level")?;

    let registry = tracing_subscriber::registry().with(env_filter);

    if monitoring.json_logging {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(false))
            .try_init()?;
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .try_init()?;
    }

    Ok(())
}
