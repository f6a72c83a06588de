//! Metrics summary service.

use crate::{dto::metrics::MetricsSummary, state::SharedState};

/// Snapshot all game metrics.
pub fn summary(state: &SharedState) -> MetricsSummary {
    state.metrics().snapshot().into()
}
