//! In-process counters over game starts and score submissions.

use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
};

use crate::state::game::GameMode;

#[derive(Default)]
struct MetricsInner {
    games_played: u64,
    mode_breakdown: HashMap<&'static str, u64>,
    scores_submitted: u64,
    total_score: u64,
    top_score: u32,
    players: HashSet<String>,
}

/// Point-in-time copy of all counters.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSnapshot {
    /// Total number of sessions started.
    pub total_games_played: u64,
    /// Session starts broken down by mode tag.
    pub mode_breakdown: HashMap<&'static str, u64>,
    /// Total number of leaderboard submissions.
    pub total_scores_submitted: u64,
    /// Mean submitted score, 0 when nothing was submitted.
    pub average_score: f64,
    /// Highest score submitted so far.
    pub top_score: u32,
    /// Number of distinct normalized player names seen.
    pub total_players: usize,
}

/// Aggregates simple game metrics behind a single lock.
#[derive(Default)]
pub struct MetricsTracker {
    inner: Mutex<MetricsInner>,
}

impl MetricsTracker {
    /// Create a tracker with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a session start for `mode`.
    pub fn record_game_start(&self, mode: GameMode) {
        let mut inner = self.inner.lock().expect("metrics mutex poisoned");
        inner.games_played += 1;
        *inner.mode_breakdown.entry(mode.tag()).or_default() += 1;
    }

    /// Count a leaderboard submission of `score` by `player_name`.
    pub fn record_score_submission(&self, score: u32, player_name: &str) {
        let mut inner = self.inner.lock().expect("metrics mutex poisoned");
        inner.scores_submitted += 1;
        inner.total_score += u64::from(score);
        inner.players.insert(player_name.trim().to_lowercase());
        if score > inner.top_score {
            inner.top_score = score;
        }
    }

    /// Snapshot every counter.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let inner = self.inner.lock().expect("metrics mutex poisoned");
        let average_score = if inner.scores_submitted > 0 {
            inner.total_score as f64 / inner.scores_submitted as f64
        } else {
            0.0
        };

        MetricsSnapshot {
            total_games_played: inner.games_played,
            mode_breakdown: inner.mode_breakdown.clone(),
            total_scores_submitted: inner.scores_submitted,
            average_score,
            top_score: inner.top_score,
            total_players: inner.players.len(),
        }
    }
}
