//! Shared application state and its component stores.

pub mod cache;
pub mod game;
pub mod leaderboard;
pub mod metrics;
pub mod session;

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use crate::{catalog::Catalog, config::AppConfig};

use self::{
    cache::TtlCache, leaderboard::LeaderboardLedger, metrics::MetricsTracker,
    session::SessionStore,
};

/// Cheaply clonable handle to the application state.
pub type SharedState = Arc<AppState>;

/// Central application state owning every in-memory component.
///
/// Each component owns its own locking discipline; nothing here is a
/// process-wide global, so tests can build isolated instances.
pub struct AppState {
    config: AppConfig,
    catalog: Arc<dyn Catalog>,
    sessions: SessionStore,
    leaderboard: LeaderboardLedger,
    search_cache: TtlCache<String, serde_json::Value>,
    metrics: MetricsTracker,
    started_at: Instant,
}

impl AppState {
    /// Construct the application state wrapped in an [`Arc`].
    pub fn new(config: AppConfig, catalog: Arc<dyn Catalog>) -> SharedState {
        let leaderboard = LeaderboardLedger::new(config.submit_cooldown);
        let search_cache = TtlCache::new(config.search_cache_capacity, config.search_cache_ttl);

        Arc::new(Self {
            config,
            catalog,
            sessions: SessionStore::new(),
            leaderboard,
            search_cache,
            metrics: MetricsTracker::new(),
            started_at: Instant::now(),
        })
    }

    /// Runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Upstream catalog client.
    pub fn catalog(&self) -> &Arc<dyn Catalog> {
        &self.catalog
    }

    /// Store of live game sessions.
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Ranked score ledger.
    pub fn leaderboard(&self) -> &LeaderboardLedger {
        &self.leaderboard
    }

    /// Memoized artist-search results.
    pub fn search_cache(&self) -> &TtlCache<String, serde_json::Value> {
        &self.search_cache
    }

    /// Game metrics counters.
    pub fn metrics(&self) -> &MetricsTracker {
        &self.metrics
    }

    /// Time elapsed since the state was constructed.
    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}
