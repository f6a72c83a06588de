//! Artist search with cache memoization in front of the catalog.

use tracing::debug;

use crate::{
    dto::search::{SearchQuery, SearchResponse},
    error::ServiceError,
    state::SharedState,
};

/// Default number of search results requested upstream.
const DEFAULT_SEARCH_LIMIT: u32 = 10;
/// Upper bound accepted from clients.
const MAX_SEARCH_LIMIT: u32 = 50;

/// Search the catalog for artists, serving repeated queries from the cache.
pub async fn search_artists(
    state: &SharedState,
    query: SearchQuery,
) -> Result<SearchResponse, ServiceError> {
    let term = query.q.trim();
    if term.is_empty() {
        return Err(ServiceError::InvalidInput(
            "query parameter 'q' is required".into(),
        ));
    }

    let limit = query
        .limit
        .unwrap_or(DEFAULT_SEARCH_LIMIT)
        .clamp(1, MAX_SEARCH_LIMIT);
    let cache_key = format!("search:{}:{limit}", term.to_lowercase());

    if let Some(results) = state.search_cache().get(&cache_key) {
        debug!(%cache_key, "artist search served from cache");
        return Ok(SearchResponse {
            results,
            cached: true,
        });
    }

    let results = state
        .catalog()
        .search_artists(term.to_string(), limit)
        .await?;
    state.search_cache().set(cache_key, results.clone());

    Ok(SearchResponse {
        results,
        cached: false,
    })
}
