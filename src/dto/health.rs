//! Health check payload.

use serde::Serialize;
use utoipa::ToSchema;

/// Simple health response returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status; this process is either up or not responding at all.
    pub status: String,
    /// Seconds since the server started.
    pub uptime_seconds: u64,
    /// Number of live game sessions.
    pub active_sessions: usize,
}

impl HealthResponse {
    /// Create a healthy response.
    pub fn ok(uptime_seconds: u64, active_sessions: usize) -> Self {
        Self {
            status: "ok".to_string(),
            uptime_seconds,
            active_sessions,
        }
    }
}
