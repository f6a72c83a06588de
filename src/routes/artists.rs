use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    dto::search::{SearchQuery, SearchResponse},
    error::AppError,
    services::search_service,
    state::SharedState,
};

/// Routes for catalog artist lookups.
pub fn router() -> Router<SharedState> {
    Router::new().route("/artists/search", get(search_artists))
}

/// Search the catalog for artists, memoized through the expiring cache.
#[utoipa::path(
    get,
    path = "/artists/search",
    tag = "artists",
    params(SearchQuery),
    responses(
        (status = 200, description = "Search results", body = SearchResponse),
        (status = 400, description = "Empty query")
    )
)]
pub async fn search_artists(
    State(state): State<SharedState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, AppError> {
    let response = search_service::search_artists(&state, query).await?;
    Ok(Json(response))
}
