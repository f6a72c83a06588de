//! Payloads for session creation and answer submission.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::state::{
    game::{Choice, GameMode, Round},
    session::AnswerOutcome,
};

/// Payload used to start a new game session.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSessionRequest {
    /// Mode to start the session in.
    pub mode: GameMode,
    /// Artist to draw tracks from; required for artist mode.
    #[serde(default)]
    pub artist_id: Option<String>,
    /// Playlist to draw tracks from; required for playlist mode.
    #[serde(default)]
    pub playlist_id: Option<String>,
}

/// One answer option as exposed to the client.
#[derive(Debug, Serialize, ToSchema)]
pub struct ChoiceDto {
    /// Identifier to submit back when answering.
    pub id: String,
    /// Track name shown to the player.
    pub track_name: String,
    /// Artist name shown to the player.
    pub artist_name: String,
}

impl From<Choice> for ChoiceDto {
    fn from(choice: Choice) -> Self {
        Self {
            id: choice.id,
            track_name: choice.track_name,
            artist_name: choice.artist_name,
        }
    }
}

/// Public projection of a quiz round.
///
/// Carries the opaque signature but nothing that identifies the correct
/// choice.
#[derive(Debug, Serialize, ToSchema)]
pub struct RoundDto {
    /// Round identifier, echoed back on answer submission.
    pub round_id: Uuid,
    /// Playable clip URL.
    pub preview_url: String,
    /// Clip start offset in milliseconds.
    pub preview_start_ms: u64,
    /// Clip duration in milliseconds.
    pub preview_duration_ms: u64,
    /// Shuffled answer choices.
    pub choices: Vec<ChoiceDto>,
    /// Album art URL, when available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album_art: Option<String>,
    /// Answer-commitment signature.
    pub signature: String,
}

impl From<Round> for RoundDto {
    fn from(round: Round) -> Self {
        Self {
            round_id: round.round_id,
            preview_url: round.preview_url,
            preview_start_ms: round.start_offset_ms,
            preview_duration_ms: round.clip_duration_ms,
            choices: round.choices.into_iter().map(Into::into).collect(),
            album_art: round.album_art,
            signature: round.signature,
        }
    }
}

/// Response returned when a session is created.
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    /// Opaque session identifier.
    pub session_id: Uuid,
    /// Mode the session runs in.
    pub mode: GameMode,
    /// The issued round.
    pub round: RoundDto,
    /// Starting score.
    pub score: u32,
    /// Starting rounds-played counter.
    pub rounds_played: u32,
}

/// Payload used to submit an answer for the current round.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AnswerRequest {
    /// Session the answer belongs to.
    pub session_id: Uuid,
    /// Round the answer targets; must match the session's current round.
    pub round_id: Uuid,
    /// Identifier of the chosen answer.
    pub choice_id: String,
}

/// Verifier result returned after an answer has been committed.
#[derive(Debug, Serialize, ToSchema)]
pub struct AnswerResponse {
    /// Whether the submitted choice was correct.
    pub correct: bool,
    /// The correct choice identifier, revealed only now.
    pub correct_answer_id: String,
    /// Updated score.
    pub score: u32,
    /// Updated rounds-played counter.
    pub rounds_played: u32,
}

impl From<AnswerOutcome> for AnswerResponse {
    fn from(outcome: AnswerOutcome) -> Self {
        Self {
            correct: outcome.correct,
            correct_answer_id: outcome.correct_answer_id,
            score: outcome.score,
            rounds_played: outcome.rounds_played,
        }
    }
}
