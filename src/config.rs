//! Environment-driven runtime configuration.

use std::{env, time::Duration};

use rand::RngCore;
use tracing::{info, warn};

/// Default TCP port the server listens on.
const DEFAULT_PORT: u16 = 3001;
/// Default bound on the number of cached artist-search results.
const DEFAULT_SEARCH_CACHE_CAPACITY: usize = 100;
/// Default time-to-live for cached artist-search results.
const DEFAULT_SEARCH_CACHE_TTL: Duration = Duration::from_secs(5 * 60);
/// Default cooldown between leaderboard submissions for the same session/name pair.
const DEFAULT_SUBMIT_COOLDOWN: Duration = Duration::from_secs(5 * 60);
/// Default idle time after which an abandoned game session is evicted.
const DEFAULT_SESSION_IDLE_TTL: Duration = Duration::from_secs(60 * 60);
/// Default cadence of the background maintenance sweep.
const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);
/// Default upper bound on any single upstream catalog call.
const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    /// Port the HTTP listener binds to.
    pub port: u16,
    /// Server-held secret used to sign round answer-commitments.
    pub session_secret: String,
    /// Spotify application client id, if configured.
    pub spotify_client_id: Option<String>,
    /// Spotify application client secret, if configured.
    pub spotify_client_secret: Option<String>,
    /// Capacity of the artist-search cache.
    pub search_cache_capacity: usize,
    /// TTL applied to every artist-search cache entry.
    pub search_cache_ttl: Duration,
    /// Cooldown window enforced on leaderboard submissions.
    pub submit_cooldown: Duration,
    /// Idle TTL after which game sessions are swept.
    pub session_idle_ttl: Duration,
    /// Interval between background maintenance sweeps.
    pub sweep_interval: Duration,
    /// Timeout applied to upstream catalog requests.
    pub upstream_timeout: Duration,
}

impl AppConfig {
    /// Load the configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let port = read_parsed("PORT", DEFAULT_PORT);

        let session_secret = match env::var("SESSION_SECRET") {
            Ok(value) if !value.trim().is_empty() => value,
            _ => {
                warn!(
                    "SESSION_SECRET is not set; using a random per-process secret \
                     (round signatures will not survive a restart)"
                );
                random_secret()
            }
        };

        let spotify_client_id = env::var("SPOTIFY_CLIENT_ID").ok().filter(|v| !v.is_empty());
        let spotify_client_secret = env::var("SPOTIFY_CLIENT_SECRET")
            .ok()
            .filter(|v| !v.is_empty());
        if spotify_client_id.is_none() || spotify_client_secret.is_none() {
            warn!("Spotify credentials not configured; catalog-backed modes will fail");
        }

        let config = Self {
            port,
            session_secret,
            spotify_client_id,
            spotify_client_secret,
            search_cache_capacity: read_parsed(
                "SEARCH_CACHE_CAPACITY",
                DEFAULT_SEARCH_CACHE_CAPACITY,
            ),
            search_cache_ttl: read_secs("SEARCH_CACHE_TTL_SECS", DEFAULT_SEARCH_CACHE_TTL),
            submit_cooldown: read_secs("SUBMIT_COOLDOWN_SECS", DEFAULT_SUBMIT_COOLDOWN),
            session_idle_ttl: read_secs("SESSION_IDLE_TTL_SECS", DEFAULT_SESSION_IDLE_TTL),
            sweep_interval: read_secs("SWEEP_INTERVAL_SECS", DEFAULT_SWEEP_INTERVAL),
            upstream_timeout: read_secs("UPSTREAM_TIMEOUT_SECS", DEFAULT_UPSTREAM_TIMEOUT),
        };

        info!(
            port = config.port,
            cache_capacity = config.search_cache_capacity,
            "loaded configuration"
        );

        config
    }
}

/// Read an environment variable and parse it, falling back to `default`.
fn read_parsed<T: std::str::FromStr + Copy>(var: &str, default: T) -> T {
    match env::var(var) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(var, value = %raw, "unparseable value; using default");
            default
        }),
        Err(_) => default,
    }
}

/// Read a duration expressed in whole seconds, falling back to `default`.
fn read_secs(var: &str, default: Duration) -> Duration {
    match env::var(var) {
        Ok(raw) => raw.parse::<u64>().map(Duration::from_secs).unwrap_or_else(|_| {
            warn!(var, value = %raw, "unparseable duration; using default");
            default
        }),
        Err(_) => default,
    }
}

/// Generate a random hex secret for processes started without one.
fn random_secret() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
