//! Spotify Web API client implementing the [`Catalog`] boundary.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use futures::future::BoxFuture;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::debug;

use crate::{
    catalog::{
        Catalog, CatalogError, CatalogResult,
        models::{
            NestedTrackPage, TokenResponse, TopTracksResponse, TrackPage, map_track,
        },
    },
    state::game::Track,
};

const API_BASE: &str = "https://api.spotify.com/v1";
const AUTH_BASE: &str = "https://accounts.spotify.com";
/// Refresh the app token this long before it actually expires.
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);

struct CachedToken {
    value: String,
    expires_at: Instant,
}

/// Spotify-backed catalog client with a cached client-credentials token.
#[derive(Clone)]
pub struct SpotifyCatalog {
    client: Client,
    api_base: Arc<str>,
    auth_base: Arc<str>,
    credentials: Option<(Arc<str>, Arc<str>)>,
    app_token: Arc<Mutex<Option<CachedToken>>>,
}

impl SpotifyCatalog {
    /// Build a client from optional application credentials.
    ///
    /// `timeout` bounds every request; catalog calls made during round
    /// construction must never block indefinitely.
    pub fn new(
        client_id: Option<String>,
        client_secret: Option<String>,
        timeout: Duration,
    ) -> CatalogResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| CatalogError::ClientBuilder { source })?;

        let credentials = client_id
            .zip(client_secret)
            .map(|(id, secret)| (Arc::<str>::from(id), Arc::<str>::from(secret)));

        Ok(Self {
            client,
            api_base: Arc::from(API_BASE),
            auth_base: Arc::from(AUTH_BASE),
            credentials,
            app_token: Arc::new(Mutex::new(None)),
        })
    }

    /// Obtain a client-credentials token, reusing the cached one while valid.
    async fn app_token(&self) -> CatalogResult<String> {
        let mut guard = self.app_token.lock().await;
        if let Some(token) = guard.as_ref() {
            if Instant::now() < token.expires_at {
                return Ok(token.value.clone());
            }
        }

        let (id, secret) = self
            .credentials
            .as_ref()
            .ok_or(CatalogError::MissingCredentials)?;

        let url = format!("{}/api/token", self.auth_base);
        let response = self
            .client
            .post(&url)
            .basic_auth(id.as_ref(), Some(secret.as_ref()))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|source| CatalogError::RequestSend {
                path: "api/token".into(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(CatalogError::TokenExchange {
                status: response.status(),
            });
        }

        let token: TokenResponse =
            response
                .json()
                .await
                .map_err(|source| CatalogError::DecodeResponse {
                    path: "api/token".into(),
                    source,
                })?;

        debug!(expires_in = token.expires_in, "refreshed catalog app token");

        let expires_at = Instant::now()
            + Duration::from_secs(token.expires_in).saturating_sub(TOKEN_REFRESH_MARGIN);
        let value = token.access_token.clone();
        *guard = Some(CachedToken {
            value: token.access_token,
            expires_at,
        });

        Ok(value)
    }

    /// Issue an authenticated GET against the API and decode the JSON body.
    async fn get_json<T>(
        &self,
        path: &str,
        query: &[(&str, String)],
        bearer: &str,
    ) -> CatalogResult<T>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}/{}", self.api_base, path);
        let response = self
            .client
            .get(&url)
            .bearer_auth(bearer)
            .query(query)
            .send()
            .await
            .map_err(|source| CatalogError::RequestSend {
                path: path.to_string(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(CatalogError::RequestStatus {
                path: path.to_string(),
                status: response.status(),
            });
        }

        response
            .json()
            .await
            .map_err(|source| CatalogError::DecodeResponse {
                path: path.to_string(),
                source,
            })
    }
}

impl Catalog for SpotifyCatalog {
    fn search_artists(
        &self,
        query: String,
        limit: u32,
    ) -> BoxFuture<'static, CatalogResult<serde_json::Value>> {
        let catalog = self.clone();
        Box::pin(async move {
            let token = catalog.app_token().await?;
            catalog
                .get_json(
                    "search",
                    &[
                        ("q", query),
                        ("type", "artist".into()),
                        ("limit", limit.to_string()),
                    ],
                    &token,
                )
                .await
        })
    }

    fn artist_top_tracks(&self, artist_id: String) -> BoxFuture<'static, CatalogResult<Vec<Track>>> {
        let catalog = self.clone();
        Box::pin(async move {
            let token = catalog.app_token().await?;
            let path = format!("artists/{artist_id}/top-tracks");
            let page: TopTracksResponse = catalog
                .get_json(&path, &[("market", "US".into())], &token)
                .await?;
            Ok(page.tracks.into_iter().map(map_track).collect())
        })
    }

    fn user_top_tracks(
        &self,
        bearer: String,
        limit: u32,
    ) -> BoxFuture<'static, CatalogResult<Vec<Track>>> {
        let catalog = self.clone();
        Box::pin(async move {
            let page: TrackPage = catalog
                .get_json(
                    "me/top/tracks",
                    &[
                        ("limit", limit.to_string()),
                        ("time_range", "medium_term".into()),
                    ],
                    &bearer,
                )
                .await?;
            Ok(page.items.into_iter().map(map_track).collect())
        })
    }

    fn user_saved_tracks(
        &self,
        bearer: String,
        limit: u32,
    ) -> BoxFuture<'static, CatalogResult<Vec<Track>>> {
        let catalog = self.clone();
        Box::pin(async move {
            let page: NestedTrackPage = catalog
                .get_json("me/tracks", &[("limit", limit.to_string())], &bearer)
                .await?;
            Ok(page
                .items
                .into_iter()
                .filter_map(|item| item.track)
                .map(map_track)
                .collect())
        })
    }

    fn playlist_tracks(
        &self,
        playlist_id: String,
        limit: u32,
    ) -> BoxFuture<'static, CatalogResult<Vec<Track>>> {
        let catalog = self.clone();
        Box::pin(async move {
            let token = catalog.app_token().await?;
            let path = format!("playlists/{playlist_id}/tracks");
            let page: NestedTrackPage = catalog
                .get_json(&path, &[("limit", limit.to_string())], &token)
                .await?;
            Ok(page
                .items
                .into_iter()
                .filter_map(|item| item.track)
                .map(map_track)
                .collect())
        })
    }
}
