//! Leaderboard submission and query orchestration.

use validator::Validate;

use crate::{
    dto::leaderboard::{
        LeaderboardEntryDto, SubmitScoreRequest, SubmitScoreResponse, TopScoresQuery,
        TopScoresResponse,
    },
    error::ServiceError,
    state::{SharedState, leaderboard::LEDGER_CAPACITY},
};

/// Default number of entries returned when the query omits a limit.
const DEFAULT_TOP_LIMIT: usize = 10;

/// Submit a finished session's score to the ledger.
///
/// Checks run in order: name validity, session existence, cooldown. A
/// failure at any step leaves the ledger and cooldown map untouched.
pub fn submit_score(
    state: &SharedState,
    request: SubmitScoreRequest,
) -> Result<SubmitScoreResponse, ServiceError> {
    request
        .validate()
        .map_err(|err| ServiceError::InvalidInput(format!("invalid name: {err}")))?;

    let Some(session) = state.sessions().get(&request.session_id) else {
        return Err(ServiceError::NotFound("unknown or expired session".into()));
    };

    let (rank, score) = state.leaderboard().submit(
        &request.session_id,
        &request.name,
        session.score,
        session.mode,
    )?;

    state
        .metrics()
        .record_score_submission(score, &request.name);

    tracing::info!(rank, score, mode = %session.mode, "leaderboard submission accepted");

    Ok(SubmitScoreResponse { rank, score })
}

/// Return the top ledger entries, optionally filtered by mode.
pub fn top_scores(state: &SharedState, query: TopScoresQuery) -> TopScoresResponse {
    let limit = query.limit.unwrap_or(DEFAULT_TOP_LIMIT).min(LEDGER_CAPACITY);
    let entries = state
        .leaderboard()
        .query(limit, query.mode)
        .into_iter()
        .map(LeaderboardEntryDto::from)
        .collect();

    TopScoresResponse { entries }
}
