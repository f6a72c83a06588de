//! Background sweeps over cache entries, cooldown records and idle sessions.

use tokio::time::interval;
use tracing::{debug, info};

use crate::state::SharedState;

/// Run the periodic maintenance loop until the process shuts down.
///
/// Each tick sweeps expired search-cache entries, stale cooldown records and
/// idle game sessions. Sweeps take only short per-component locks, so they
/// never contend with foreground requests for long.
pub async fn run_sweeper(state: SharedState) {
    let mut ticker = interval(state.config().sweep_interval);
    // The first tick fires immediately; skip it so a fresh process does not
    // sweep empty stores.
    ticker.tick().await;

    loop {
        ticker.tick().await;

        let expired_cache = state.search_cache().sweep();
        let expired_cooldowns = state.leaderboard().sweep_cooldowns();
        let idle_sessions = state
            .sessions()
            .sweep_idle(state.config().session_idle_ttl);

        if expired_cache + expired_cooldowns + idle_sessions > 0 {
            info!(
                expired_cache,
                expired_cooldowns, idle_sessions, "maintenance sweep removed entries"
            );
        } else {
            debug!("maintenance sweep found nothing to remove");
        }
    }
}
