//! Artist search payloads.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Query parameters accepted by the artist search route.
#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Search term; must be non-empty.
    pub q: String,
    /// Maximum number of results to request upstream.
    #[serde(default)]
    pub limit: Option<u32>,
}

/// Response wrapper for artist search results.
#[derive(Debug, Serialize, ToSchema)]
pub struct SearchResponse {
    /// Raw provider search payload.
    #[schema(value_type = Object)]
    pub results: serde_json::Value,
    /// Whether the payload was served from the cache.
    pub cached: bool,
}
