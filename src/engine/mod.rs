//! Bot engine: owns the dashboard state and the discovery simulation task

use crate::config::{BotConfig, BotConfigUpdate, Config};
use crate::data::{
    BotMode, BotState, BotStatus, Chain, Notification, TokenData, Transaction, WalletInfo,
};
use crate::error::{Result, WraithError};
use crate::seed::SeedData;
use crate::simulation::DiscoverySimulator;
use crate::wallet::{MockWalletProvider, WalletProvider};
use chrono::Utc;
use std::ops::Deref;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tracing::{debug, info, warn};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Shared engine internals.
///
/// All six state collections live in one [`BotState`] behind a watch channel, so
/// every mutation is serialized and computed from the latest state.
pub struct EngineCore {
    state: watch::Sender<BotState>,
    simulator: Mutex<DiscoverySimulator>,
    wallet_provider: Arc<dyn WalletProvider>,
    tick_interval: Duration,

    /// At most one simulation task; never part of the published state
    ticker: Mutex<Option<JoinHandle<()>>>,

    /// Bumped on every start and stop, inside the same locked update. A tick
    /// only commits when its epoch is still current.
    run_epoch: AtomicU64,

    closed: AtomicBool,
}

impl EngineCore {
    /// Start the discovery simulation.
    ///
    /// Any task left from a previous start is cancelled first. Must be called
    /// from within a Tokio runtime.
    pub fn start_bot(self: &Arc<Self>) {
        if self.is_closed() {
            warn!("Ignoring start: bot engine has been shut down");
            return;
        }

        let mut ticker = lock(&self.ticker);
        if let Some(previous) = ticker.take() {
            debug!("Cancelling previous simulation task before restart");
            previous.abort();
        }

        let mut epoch = 0;
        self.state.send_modify(|state| {
            epoch = self.run_epoch.fetch_add(1, Ordering::AcqRel) + 1;
            state.status.is_running = true;
            state.status.mode = BotMode::Discovery;
            state.status.last_scan = Some(Utc::now());
        });

        *ticker = Some(self.spawn_ticker(epoch));
        info!(
            "Bot started in discovery mode (tick every {:?})",
            self.tick_interval
        );
    }

    /// Stop the simulation. No tick commits after this returns.
    pub fn stop_bot(&self) {
        let mut ticker = lock(&self.ticker);

        self.state.send_modify(|state| {
            self.run_epoch.fetch_add(1, Ordering::AcqRel);
            state.status.is_running = false;
            state.status.mode = BotMode::Idle;
        });

        if let Some(handle) = ticker.take() {
            handle.abort();
            info!("Bot stopped after {}s uptime", self.state.borrow().status.uptime);
        } else {
            debug!("Stop requested while no simulation task was running");
        }
    }

    /// Shallow-merge `update` into the dashboard configuration
    pub fn update_config(&self, update: BotConfigUpdate) {
        if update.is_empty() {
            debug!("Empty configuration update ignored");
            return;
        }
        self.state.send_modify(|state| state.config.apply(update));
        info!("Bot configuration updated");
    }

    pub fn clear_notifications(&self) {
        self.state.send_if_modified(|state| {
            let had_any = !state.notifications.is_empty();
            state.notifications.clear();
            had_any
        });
        debug!("Notifications cleared");
    }

    /// Mark one notification read. Unknown ids are ignored.
    pub fn mark_notification_as_read(&self, id: &str) {
        let changed = self.state.send_if_modified(|state| {
            match state.notifications.iter_mut().find(|n| n.id == id) {
                Some(notification) if !notification.read => {
                    notification.mark_read();
                    true
                }
                _ => false,
            }
        });
        if changed {
            debug!("Notification {} marked as read", id);
        }
    }

    /// Connect a wallet for `chain`, replacing any wallet already connected there
    pub async fn connect_wallet(&self, chain: Chain) -> Result<bool> {
        let wallet = self.wallet_provider.connect(chain).await?;
        let address = wallet.address.clone();

        self.state.send_modify(|state| {
            state.wallets.retain(|w| w.chain != chain);
            state.wallets.push(wallet);
        });

        info!(
            "Wallet {} connected on {} via {} provider",
            address,
            chain,
            self.wallet_provider.name()
        );
        Ok(true)
    }

    pub fn disconnect_wallet(&self, chain: Chain) {
        let removed = self.state.send_if_modified(|state| {
            let before = state.wallets.len();
            state.wallets.retain(|w| w.chain != chain);
            state.wallets.len() != before
        });
        if removed {
            info!("Wallet disconnected on {}", chain);
        }
    }

    /// Full copy of the current state
    pub fn snapshot(&self) -> BotState {
        self.state.borrow().clone()
    }

    pub fn status(&self) -> BotStatus {
        self.state.borrow().status.clone()
    }

    pub fn config(&self) -> BotConfig {
        self.state.borrow().config.clone()
    }

    pub fn tokens(&self) -> Vec<TokenData> {
        self.state.borrow().tokens.iter().cloned().collect()
    }

    pub fn transactions(&self) -> Vec<Transaction> {
        self.state.borrow().transactions.clone()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.state.borrow().notifications.iter().cloned().collect()
    }

    pub fn wallets(&self) -> Vec<WalletInfo> {
        self.state.borrow().wallets.clone()
    }

    pub fn is_running(&self) -> bool {
        self.state.borrow().status.is_running
    }

    /// Receive every published state change
    pub fn subscribe(&self) -> watch::Receiver<BotState> {
        self.state.subscribe()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Cancel the simulation task and refuse further starts
    pub fn shutdown(&self) {
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }
        self.stop_bot();
        info!("Bot engine shut down");
    }

    fn spawn_ticker(self: &Arc<Self>, epoch: u64) -> JoinHandle<()> {
        let engine = Arc::downgrade(self);
        let period = self.tick_interval;
        let first_tick = Instant::now() + period;

        tokio::spawn(async move {
            let mut interval = interval_at(first_tick, period);

            loop {
                interval.tick().await;

                let Some(core) = engine.upgrade() else {
                    break;
                };
                if !core.apply_tick(epoch) {
                    break;
                }
            }

            debug!("Simulation task for run {} exited", epoch);
        })
    }

    /// Apply one simulation tick. Returns false when the run was cancelled.
    fn apply_tick(&self, epoch: u64) -> bool {
        let mut current = true;

        self.state.send_if_modified(|state| {
            if self.run_epoch.load(Ordering::Acquire) != epoch || !state.status.is_running {
                current = false;
                return false;
            }

            state.status.uptime += 1;

            let discovery = lock(&self.simulator).maybe_discover(Utc::now(), |address| {
                state.tokens.iter().any(|t| t.address == address)
            });

            if let Some(discovery) = discovery {
                debug!(
                    "Discovered {} at uptime {}s",
                    discovery.token.symbol, state.status.uptime
                );
                state.tokens.push_front(discovery.token);
                state.notifications.push_front(discovery.notification);
            }

            true
        });

        current
    }
}

/// Owning scope of the bot engine.
///
/// Dropping it cancels the simulation task and invalidates every [`BotHandle`].
pub struct BotEngine {
    core: Arc<EngineCore>,
}

impl BotEngine {
    /// Create an engine with the mock wallet provider
    pub fn new(config: &Config, seed: SeedData) -> Result<Self> {
        Self::with_wallet_provider(config, seed, Arc::new(MockWalletProvider::new()))
    }

    pub fn with_wallet_provider(
        config: &Config,
        seed: SeedData,
        wallet_provider: Arc<dyn WalletProvider>,
    ) -> Result<Self> {
        let simulator = DiscoverySimulator::new(config.simulation.clone())?;
        Ok(Self::from_parts(
            config.bot.clone(),
            seed,
            simulator,
            wallet_provider,
        ))
    }

    pub fn from_parts(
        bot_config: BotConfig,
        seed: SeedData,
        simulator: DiscoverySimulator,
        wallet_provider: Arc<dyn WalletProvider>,
    ) -> Self {
        let mut state = BotState::new(bot_config);
        state.tokens = seed.tokens.into();
        state.transactions = seed.transactions;
        state.notifications = seed.notifications.into();

        debug!(
            "Bot engine seeded with {} tokens, {} transactions, {} notifications",
            state.tokens.len(),
            state.transactions.len(),
            state.notifications.len()
        );

        let tick_interval = simulator.config().tick_interval();
        let (state, _) = watch::channel(state);

        Self {
            core: Arc::new(EngineCore {
                state,
                simulator: Mutex::new(simulator),
                wallet_provider,
                tick_interval,
                ticker: Mutex::new(None),
                run_epoch: AtomicU64::new(0),
                closed: AtomicBool::new(false),
            }),
        }
    }

    /// Weak handle for presentation code
    pub fn handle(&self) -> BotHandle {
        BotHandle {
            core: Arc::downgrade(&self.core),
        }
    }
}

impl Deref for BotEngine {
    type Target = Arc<EngineCore>;

    fn deref(&self) -> &Self::Target {
        &self.core
    }
}

impl Drop for BotEngine {
    fn drop(&mut self) {
        self.core.shutdown();
    }
}

/// Cloneable, non-owning access to a [`BotEngine`]
#[derive(Clone)]
pub struct BotHandle {
    core: Weak<EngineCore>,
}

impl BotHandle {
    /// The live engine, or [`WraithError::EngineUnavailable`] once its owner is gone
    pub fn get(&self) -> Result<Arc<EngineCore>> {
        match self.core.upgrade() {
            Some(core) if !core.is_closed() => Ok(core),
            _ => Err(WraithError::EngineUnavailable),
        }
    }

    pub fn is_available(&self) -> bool {
        self.get().is_ok()
    }
}

impl std::fmt::Debug for BotHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotHandle")
            .field("available", &self.is_available())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SimulationConfig, StrategyConfig};
    use crate::data::{NotificationType, TokenStatus};
    use crate::seed::{MockSeedProvider, SeedProvider};
    use crate::simulation::DISCOVERY_TITLE;
    use rust_decimal::Decimal;

    fn engine(discovery_probability: f64, seed: SeedData) -> BotEngine {
        let config = Config {
            simulation: SimulationConfig::deterministic(7, discovery_probability),
            ..Config::default()
        };
        BotEngine::new(&config, seed).unwrap()
    }

    /// Let `n` one-second ticks elapse on the paused clock
    async fn elapse_ticks(n: u64) {
        tokio::time::sleep(Duration::from_millis(n * 1000 + 500)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_and_stop_toggle_status() {
        let engine = engine(0.0, SeedData::empty());

        engine.start_bot();
        let status = engine.status();
        assert!(status.is_running);
        assert_eq!(status.mode, BotMode::Discovery);
        assert!(status.last_scan.is_some());

        engine.stop_bot();
        let status = engine.status();
        assert!(!status.is_running);
        assert_eq!(status.mode, BotMode::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_uptime_counts_ticks() {
        let engine = engine(0.0, SeedData::empty());
        engine.start_bot();

        elapse_ticks(5).await;

        let state = engine.snapshot();
        assert_eq!(state.status.uptime, 5);
        assert!(state.tokens.is_empty());
        assert!(state.notifications.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_uptime_after_stop() {
        let engine = engine(1.0, SeedData::empty());
        engine.start_bot();
        elapse_ticks(3).await;
        engine.stop_bot();

        let frozen = engine.snapshot();
        elapse_ticks(10).await;

        let later = engine.snapshot();
        assert_eq!(later.status.uptime, 3);
        assert_eq!(later.tokens.len(), frozen.tokens.len());
        assert_eq!(later.notifications.len(), frozen.notifications.len());
    }

    #[tokio::test(start_paused = true)]
    async fn test_every_discovery_has_matching_notification() {
        let engine = engine(1.0, SeedData::empty());
        engine.start_bot();
        elapse_ticks(4).await;

        let state = engine.snapshot();
        assert_eq!(state.status.uptime, 4);
        assert_eq!(state.tokens.len(), 4);
        assert_eq!(state.notifications.len(), 4);

        for (token, notification) in state.tokens.iter().zip(state.notifications.iter()) {
            assert_eq!(token.status, TokenStatus::Analyzing);
            assert!(!token.is_analyzed);
            assert_eq!(notification.kind, NotificationType::Info);
            assert_eq!(notification.title, DISCOVERY_TITLE);
            assert!(notification.message.contains(&token.symbol));
            assert!(notification.message.contains(&token.liquidity_display()));
            assert!(!notification.read);
        }

        // Newest first
        assert!(state
            .tokens
            .iter()
            .zip(state.tokens.iter().skip(1))
            .all(|(newer, older)| newer.created_at >= older.created_at));
    }

    #[tokio::test(start_paused = true)]
    async fn test_discoveries_prepend_to_seed() {
        let seed = MockSeedProvider.seed();
        let seeded_head = seed.tokens[0].address.clone();
        let seeded_tokens = seed.tokens.len();
        let seeded_notifications = seed.notifications.len();

        let engine = engine(1.0, seed);
        engine.start_bot();
        elapse_ticks(1).await;

        let state = engine.snapshot();
        assert_eq!(state.tokens.len(), seeded_tokens + 1);
        assert_eq!(state.tokens[1].address, seeded_head);
        assert_eq!(state.notifications.len(), seeded_notifications + 1);
        assert_eq!(state.notifications[0].title, DISCOVERY_TITLE);
    }

    #[tokio::test(start_paused = true)]
    async fn test_intermittent_discoveries_pair_with_notifications() {
        let engine = engine(0.2, SeedData::empty());
        engine.start_bot();
        tokio::time::sleep(Duration::from_millis(500)).await;

        let mut discoveries = 0;
        let mut previous = engine.snapshot();
        for tick in 1..=40u64 {
            tokio::time::sleep(Duration::from_secs(1)).await;
            let state = engine.snapshot();
            assert_eq!(state.status.uptime, tick);
            assert_eq!(state.tokens.len(), state.notifications.len());

            if state.tokens.len() > previous.tokens.len() {
                assert_eq!(state.tokens.len(), previous.tokens.len() + 1);
                let token = &state.tokens[0];
                let notification = &state.notifications[0];
                assert_eq!(notification.kind, NotificationType::Info);
                assert_eq!(notification.title, DISCOVERY_TITLE);
                assert!(notification.message.contains(&token.symbol));
                discoveries += 1;
            } else {
                assert_eq!(state.notifications.len(), previous.notifications.len());
            }
            previous = state;
        }

        assert!(discoveries > 0);
        assert!(discoveries < 40);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tiny_address_space_keeps_ticking() {
        let config = Config {
            simulation: SimulationConfig {
                address_suffix_len: 1,
                ..SimulationConfig::deterministic(5, 1.0)
            },
            ..Config::default()
        };
        let engine = BotEngine::new(&config, SeedData::empty()).unwrap();
        engine.start_bot();

        elapse_ticks(80).await;

        let state = engine.snapshot();
        assert_eq!(state.status.uptime, 80);
        assert!(state.tokens.len() <= 36);
        let mut addresses: Vec<_> = state.tokens.iter().map(|t| t.address.clone()).collect();
        addresses.sort();
        addresses.dedup();
        assert_eq!(addresses.len(), state.tokens.len());

        engine.stop_bot();
        assert!(!engine.is_running());
    }

    #[test]
    fn test_engine_rejects_unusable_simulation() {
        let no_suffix = Config {
            simulation: SimulationConfig {
                address_suffix_len: 0,
                ..SimulationConfig::default()
            },
            ..Config::default()
        };
        assert!(matches!(
            BotEngine::new(&no_suffix, SeedData::empty()),
            Err(WraithError::InvalidSimulation(_))
        ));

        let mut overflowing = Config::default();
        overflowing.simulation.liquidity = crate::config::DecimalRange::new(
            Decimal::from(10_000_000_000_000u64),
            Decimal::from(20_000_000_000_000u64),
            18,
        );
        assert!(matches!(
            BotEngine::new(&overflowing, SeedData::empty()),
            Err(WraithError::InvalidSimulation(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_start_keeps_single_task() {
        let engine = engine(0.0, SeedData::empty());
        engine.start_bot();
        engine.start_bot();
        engine.start_bot();

        elapse_ticks(4).await;
        assert_eq!(engine.status().uptime, 4);

        engine.stop_bot();
        elapse_ticks(3).await;
        assert_eq!(engine.status().uptime, 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_resumes_uptime() {
        let engine = engine(0.0, SeedData::empty());
        engine.start_bot();
        elapse_ticks(2).await;
        engine.stop_bot();
        elapse_ticks(2).await;
        engine.start_bot();
        elapse_ticks(3).await;

        let status = engine.status();
        assert!(status.is_running);
        assert_eq!(status.uptime, 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_tick_is_rejected() {
        let engine = engine(1.0, SeedData::empty());
        engine.start_bot();
        let epoch = engine.run_epoch.load(Ordering::Acquire);

        assert!(engine.apply_tick(epoch));
        assert_eq!(engine.status().uptime, 1);

        engine.stop_bot();
        assert!(!engine.apply_tick(epoch));
        assert_eq!(engine.status().uptime, 1);
        assert_eq!(engine.tokens().len(), 1);

        // A tick from the previous run cannot leak into a new one either.
        engine.start_bot();
        assert!(!engine.apply_tick(epoch));
        assert_eq!(engine.status().uptime, 1);
    }

    #[tokio::test]
    async fn test_stop_without_start() {
        let engine = engine(0.0, MockSeedProvider.seed());
        let before = engine.snapshot();

        engine.stop_bot();

        let after = engine.snapshot();
        assert!(!after.status.is_running);
        assert_eq!(after.status.mode, BotMode::Idle);
        assert_eq!(after, before);
    }

    #[tokio::test]
    async fn test_update_config_is_shallow() {
        let engine = engine(0.0, SeedData::empty());
        let original = engine.config();

        engine.update_config(BotConfigUpdate::new().strategy(StrategyConfig {
            min_liquidity: Decimal::from(5_000),
            ..StrategyConfig::default()
        }));

        let config = engine.config();
        assert_eq!(config.strategy.min_liquidity, Decimal::from(5_000));
        assert_eq!(config.chains, original.chains);
        assert_eq!(config.notifications, original.notifications);

        let update = BotConfigUpdate::from_json(r#"{"notifications": {"discord": true}}"#).unwrap();
        engine.update_config(update);
        let config = engine.config();
        assert!(config.notifications.discord);
        assert_eq!(config.strategy.min_liquidity, Decimal::from(5_000));
    }

    #[tokio::test]
    async fn test_mark_notification_as_read_is_idempotent() {
        let engine = engine(0.0, MockSeedProvider.seed());
        let target = engine
            .notifications()
            .into_iter()
            .find(|n| !n.read)
            .unwrap();

        engine.mark_notification_as_read(&target.id);
        let once = engine.notifications();
        engine.mark_notification_as_read(&target.id);
        let twice = engine.notifications();

        assert_eq!(once, twice);
        assert!(once.iter().find(|n| n.id == target.id).unwrap().read);

        engine.mark_notification_as_read("does-not-exist");
        assert_eq!(engine.notifications(), twice);
    }

    #[tokio::test]
    async fn test_clear_notifications() {
        let engine = engine(0.0, MockSeedProvider.seed());
        assert!(!engine.notifications().is_empty());
        engine.clear_notifications();
        assert!(engine.notifications().is_empty());
        engine.clear_notifications();
        assert!(engine.notifications().is_empty());
    }

    #[tokio::test]
    async fn test_connect_wallet_replaces_per_chain() {
        let engine = engine(0.0, SeedData::empty());

        assert!(engine.connect_wallet(Chain::Solana).await.unwrap());
        assert!(engine.connect_wallet(Chain::Solana).await.unwrap());

        let wallets = engine.wallets();
        assert_eq!(wallets.iter().filter(|w| w.chain == Chain::Solana).count(), 1);
        assert_eq!(wallets[0].address, crate::defaults::MOCK_WALLET_ADDRESS);
        assert_eq!(wallets[0].balance, crate::defaults::MOCK_WALLET_BALANCE);

        engine.disconnect_wallet(Chain::Solana);
        assert!(engine.wallets().is_empty());
        engine.disconnect_wallet(Chain::Solana);
        assert!(engine.wallets().is_empty());
    }

    struct RejectingProvider;

    #[async_trait::async_trait]
    impl WalletProvider for RejectingProvider {
        async fn connect(&self, _chain: Chain) -> Result<WalletInfo> {
            Err(WraithError::Wallet("user rejected the request".to_string()))
        }

        fn name(&self) -> &str {
            "rejecting"
        }
    }

    #[tokio::test]
    async fn test_wallet_provider_error_leaves_wallets_untouched() {
        let engine = BotEngine::with_wallet_provider(
            &Config::default(),
            SeedData::empty(),
            Arc::new(RejectingProvider),
        )
        .unwrap();

        let result = engine.connect_wallet(Chain::Solana).await;
        assert!(matches!(result, Err(WraithError::Wallet(_))));
        assert!(engine.wallets().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscribers_see_ticks() {
        let engine = engine(0.0, SeedData::empty());
        let mut rx = engine.subscribe();
        rx.borrow_and_update();

        engine.start_bot();
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().status.is_running);

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().status.uptime, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_handle_fails_after_engine_dropped() {
        let engine = engine(0.0, SeedData::empty());
        let handle = engine.handle();
        let rx = engine.subscribe();

        handle.get().unwrap().start_bot();
        elapse_ticks(2).await;
        assert_eq!(handle.get().unwrap().status().uptime, 2);

        drop(engine);
        elapse_ticks(3).await;

        assert!(matches!(handle.get(), Err(WraithError::EngineUnavailable)));
        assert!(!handle.is_available());
        let last = rx.borrow();
        assert_eq!(last.status.uptime, 2);
        assert!(!last.status.is_running);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_refuses_restart() {
        let engine = engine(0.0, SeedData::empty());
        let handle = engine.handle();
        engine.start_bot();
        engine.shutdown();

        assert!(!engine.is_running());
        assert!(handle.get().is_err());

        engine.start_bot();
        elapse_ticks(2).await;
        assert!(!engine.is_running());
        assert_eq!(engine.status().uptime, 0);
    }
}
