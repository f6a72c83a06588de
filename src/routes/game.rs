use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, header},
    routing::post,
};

use crate::{
    dto::game::{AnswerRequest, AnswerResponse, CreateSessionRequest, SessionResponse},
    error::AppError,
    services::game_service,
    state::SharedState,
};

/// Routes handling the game session lifecycle.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/game/session", post(create_session))
        .route("/game/answer", post(submit_answer))
}

/// Start a new game session and issue its first round.
#[utoipa::path(
    post,
    path = "/game/session",
    tag = "game",
    request_body = CreateSessionRequest,
    responses(
        (status = 200, description = "Session created", body = SessionResponse),
        (status = 400, description = "Missing or invalid mode parameters"),
        (status = 401, description = "Personal mode without an access token"),
        (status = 404, description = "No playable track for the source")
    )
)]
pub async fn create_session(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(payload): Json<CreateSessionRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let bearer = bearer_token(&headers);
    let session = game_service::create_session(&state, payload, bearer).await?;
    Ok(Json(session))
}

/// Submit an answer for the session's current round.
#[utoipa::path(
    post,
    path = "/game/answer",
    tag = "game",
    request_body = AnswerRequest,
    responses(
        (status = 200, description = "Answer verified", body = AnswerResponse),
        (status = 400, description = "Round id does not match the current round"),
        (status = 404, description = "Unknown session")
    )
)]
pub async fn submit_answer(
    State(state): State<SharedState>,
    Json(payload): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>, AppError> {
    let response = game_service::submit_answer(&state, payload)?;
    Ok(Json(response))
}

/// Extract a bearer token from the Authorization header, if present.
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
}
