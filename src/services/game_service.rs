//! Session creation and answer submission orchestration.

use rand::SeedableRng;
use uuid::Uuid;

use crate::{
    dto::game::{AnswerRequest, AnswerResponse, CreateSessionRequest, SessionResponse},
    error::ServiceError,
    services::{round, round::CatalogDistractors, selection},
    state::{SharedState, game::GameMode},
};

/// How many tracks to request from paged catalog endpoints.
const TRACK_FETCH_LIMIT: u32 = 50;

/// Start a new game session: pick a playable track, build a signed round
/// and register the session.
///
/// Personal modes require `bearer`, the player's own catalog access token.
pub async fn create_session(
    state: &SharedState,
    request: CreateSessionRequest,
    bearer: Option<String>,
) -> Result<SessionResponse, ServiceError> {
    let CreateSessionRequest {
        mode,
        artist_id,
        playlist_id,
    } = request;

    // Personal modes read the player's own catalog; reject missing tokens
    // before any upstream call.
    let bearer = if mode.is_personal() {
        Some(require_bearer(bearer)?)
    } else {
        None
    };

    let mut requested_artist = None;
    let tracks = match mode {
        GameMode::Artist => {
            let artist_id = artist_id.filter(|id| !id.trim().is_empty()).ok_or_else(|| {
                ServiceError::InvalidInput("artist_id is required for artist mode".into())
            })?;
            requested_artist = Some(artist_id.clone());
            state.catalog().artist_top_tracks(artist_id).await?
        }
        GameMode::Playlist => {
            let playlist_id = playlist_id.filter(|id| !id.trim().is_empty()).ok_or_else(|| {
                ServiceError::InvalidInput("playlist_id is required for playlist mode".into())
            })?;
            state
                .catalog()
                .playlist_tracks(playlist_id, TRACK_FETCH_LIMIT)
                .await?
        }
        GameMode::PersonalTop => {
            let bearer = bearer.unwrap_or_default();
            state
                .catalog()
                .user_top_tracks(bearer, TRACK_FETCH_LIMIT)
                .await?
        }
        GameMode::PersonalSaved => {
            let bearer = bearer.unwrap_or_default();
            state
                .catalog()
                .user_saved_tracks(bearer, TRACK_FETCH_LIMIT)
                .await?
        }
    };

    // ThreadRng is not Send; a seedable rng keeps this future spawnable.
    let mut rng = rand::rngs::StdRng::from_os_rng();

    let Some(correct) = selection::select_preview_track(&tracks, &mut rng) else {
        return Err(ServiceError::NotFound(
            "no track with a playable preview found for this source".into(),
        ));
    };
    let correct = correct.clone();

    // Distractors come from the requested artist in artist mode, otherwise
    // from the correct track's own artist catalog.
    let distractor_source_id = requested_artist
        .or_else(|| correct.primary_artist_id().map(str::to_string))
        .unwrap_or_default();
    let distractors = CatalogDistractors::new(state.catalog().clone());

    let round = round::build_round(
        &correct,
        &distractor_source_id,
        &state.config().session_secret,
        &distractors,
        state.config().upstream_timeout,
        &mut rng,
    )
    .await;

    let session_id = Uuid::new_v4();
    state
        .sessions()
        .create(session_id, mode, round.round_id, correct.id.clone());
    state.metrics().record_game_start(mode);

    tracing::info!(%session_id, mode = %mode, round_id = %round.round_id, "session created");

    Ok(SessionResponse {
        session_id,
        mode,
        round: round.into(),
        score: 0,
        rounds_played: 0,
    })
}

/// Verify a submitted answer against the session's current round.
pub fn submit_answer(
    state: &SharedState,
    request: AnswerRequest,
) -> Result<AnswerResponse, ServiceError> {
    let outcome = state.sessions().submit_answer(
        &request.session_id,
        &request.round_id,
        &request.choice_id,
    )?;
    Ok(outcome.into())
}

fn require_bearer(bearer: Option<String>) -> Result<String, ServiceError> {
    bearer.filter(|token| !token.is_empty()).ok_or_else(|| {
        ServiceError::Unauthorized("personal modes require a catalog access token".into())
    })
}
