//! Payloads for leaderboard submission and queries.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{format_system_time, validation::validate_player_name},
    state::{game::GameMode, leaderboard::LeaderboardEntry},
};

/// Payload used to submit a finished session's score.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct SubmitScoreRequest {
    /// Session whose score is being submitted.
    pub session_id: Uuid,
    /// Player display name.
    #[validate(custom(function = validate_player_name))]
    pub name: String,
}

/// Response returned after a successful score submission.
#[derive(Debug, Serialize, ToSchema)]
pub struct SubmitScoreResponse {
    /// 1-based rank of the submitted entry.
    pub rank: usize,
    /// The submitted score.
    pub score: u32,
}

/// Query parameters accepted by the top-scores route.
#[derive(Debug, Deserialize, IntoParams)]
pub struct TopScoresQuery {
    /// Maximum number of entries to return (capped at 100).
    #[serde(default)]
    pub limit: Option<usize>,
    /// Restrict results to a single game mode.
    #[serde(default)]
    pub mode: Option<GameMode>,
}

/// One leaderboard row as exposed to clients.
#[derive(Debug, Serialize, ToSchema)]
pub struct LeaderboardEntryDto {
    /// Player display name.
    pub name: String,
    /// Submitted score.
    pub score: u32,
    /// Mode the score was achieved in.
    pub mode: GameMode,
    /// RFC3339 submission timestamp.
    pub submitted_at: String,
}

impl From<LeaderboardEntry> for LeaderboardEntryDto {
    fn from(entry: LeaderboardEntry) -> Self {
        Self {
            name: entry.name,
            score: entry.score,
            mode: entry.mode,
            submitted_at: format_system_time(entry.submitted_at),
        }
    }
}

/// Response wrapper for the top-scores route.
#[derive(Debug, Serialize, ToSchema)]
pub struct TopScoresResponse {
    /// Entries in ledger order.
    pub entries: Vec<LeaderboardEntryDto>,
}
