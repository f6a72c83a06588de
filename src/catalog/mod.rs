//! Upstream music-catalog integration: trait boundary, models and the Spotify client.

pub mod error;
pub mod models;
pub mod spotify;

use futures::future::BoxFuture;

use crate::state::game::Track;

pub use self::error::{CatalogError, CatalogResult};
pub use self::spotify::SpotifyCatalog;

/// Abstraction over the upstream catalog provider.
///
/// Personal endpoints take a caller-supplied bearer token; the remaining
/// endpoints authenticate with the application's own credentials.
pub trait Catalog: Send + Sync {
    /// Search for artists matching `query`, returning the raw provider payload.
    fn search_artists(
        &self,
        query: String,
        limit: u32,
    ) -> BoxFuture<'static, CatalogResult<serde_json::Value>>;

    /// Top tracks for an artist.
    fn artist_top_tracks(&self, artist_id: String) -> BoxFuture<'static, CatalogResult<Vec<Track>>>;

    /// The authenticated user's top tracks.
    fn user_top_tracks(
        &self,
        bearer: String,
        limit: u32,
    ) -> BoxFuture<'static, CatalogResult<Vec<Track>>>;

    /// The authenticated user's saved tracks.
    fn user_saved_tracks(
        &self,
        bearer: String,
        limit: u32,
    ) -> BoxFuture<'static, CatalogResult<Vec<Track>>>;

    /// Tracks of a public playlist.
    fn playlist_tracks(
        &self,
        playlist_id: String,
        limit: u32,
    ) -> BoxFuture<'static, CatalogResult<Vec<Track>>>;
}
