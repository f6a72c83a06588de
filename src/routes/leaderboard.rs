use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{get, post},
};

use crate::{
    dto::leaderboard::{
        SubmitScoreRequest, SubmitScoreResponse, TopScoresQuery, TopScoresResponse,
    },
    error::AppError,
    services::leaderboard_service,
    state::SharedState,
};

/// Routes handling leaderboard submissions and queries.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/leaderboard/submit", post(submit_score))
        .route("/leaderboard/top", get(top_scores))
}

/// Submit a finished session's score.
#[utoipa::path(
    post,
    path = "/leaderboard/submit",
    tag = "leaderboard",
    request_body = SubmitScoreRequest,
    responses(
        (status = 200, description = "Score recorded", body = SubmitScoreResponse),
        (status = 400, description = "Invalid name"),
        (status = 404, description = "Unknown session"),
        (status = 429, description = "Submission cooldown active")
    )
)]
pub async fn submit_score(
    State(state): State<SharedState>,
    Json(payload): Json<SubmitScoreRequest>,
) -> Result<Json<SubmitScoreResponse>, AppError> {
    let response = leaderboard_service::submit_score(&state, payload)?;
    Ok(Json(response))
}

/// Return the top leaderboard entries.
#[utoipa::path(
    get,
    path = "/leaderboard/top",
    tag = "leaderboard",
    params(TopScoresQuery),
    responses(
        (status = 200, description = "Top entries in rank order", body = TopScoresResponse)
    )
)]
pub async fn top_scores(
    State(state): State<SharedState>,
    Query(query): Query<TopScoresQuery>,
) -> Json<TopScoresResponse> {
    Json(leaderboard_service::top_scores(&state, query))
}
