use axum::{Json, Router, extract::State, routing::get};

use crate::{dto::metrics::MetricsSummary, services::metrics_service, state::SharedState};

/// Routes exposing game metrics.
pub fn router() -> Router<SharedState> {
    Router::new().route("/metrics/summary", get(metrics_summary))
}

/// Snapshot of all game metrics counters.
#[utoipa::path(
    get,
    path = "/metrics/summary",
    tag = "metrics",
    responses((status = 200, description = "Current counters", body = MetricsSummary))
)]
pub async fn metrics_summary(State(state): State<SharedState>) -> Json<MetricsSummary> {
    Json(metrics_service::summary(&state))
}
