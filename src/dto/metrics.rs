//! Metrics summary payload.

use std::collections::HashMap;

use serde::Serialize;
use utoipa::ToSchema;

use crate::state::metrics::MetricsSnapshot;

/// Snapshot of game metrics returned by the summary route.
#[derive(Debug, Serialize, ToSchema)]
pub struct MetricsSummary {
    /// Total number of sessions started.
    pub total_games_played: u64,
    /// Session starts broken down by mode tag.
    pub mode_breakdown: HashMap<String, u64>,
    /// Total number of leaderboard submissions.
    pub total_scores_submitted: u64,
    /// Mean submitted score.
    pub average_score: f64,
    /// Highest score submitted so far.
    pub top_score: u32,
    /// Number of distinct players seen.
    pub total_players: usize,
}

impl From<MetricsSnapshot> for MetricsSummary {
    fn from(snapshot: MetricsSnapshot) -> Self {
        Self {
            total_games_played: snapshot.total_games_played,
            mode_breakdown: snapshot
                .mode_breakdown
                .into_iter()
                .map(|(tag, count)| (tag.to_string(), count))
                .collect(),
            total_scores_submitted: snapshot.total_scores_submitted,
            average_score: snapshot.average_score,
            top_score: snapshot.top_score,
            total_players: snapshot.total_players,
        }
    }
}
