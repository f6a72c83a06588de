//! Health check service.

use crate::{dto::health::HealthResponse, state::SharedState};

/// Report process health along with a couple of liveness hints.
pub fn health_status(state: &SharedState) -> HealthResponse {
    HealthResponse::ok(state.uptime().as_secs(), state.sessions().len())
}
