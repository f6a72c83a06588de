//! Raw provider records and their normalization into domain [`Track`]s.

use serde::Deserialize;

use crate::state::game::{Album, AlbumImage, ArtistStub, Track};

/// Raw track record as returned by the provider's track endpoints.
#[derive(Debug, Deserialize)]
pub struct RawTrack {
    /// Provider identifier.
    pub id: String,
    /// Track name.
    #[serde(default)]
    pub name: String,
    /// Preview clip URL; commonly null.
    #[serde(default)]
    pub preview_url: Option<String>,
    /// Duration in milliseconds.
    #[serde(default)]
    pub duration_ms: Option<u64>,
    /// Credited artists.
    #[serde(default)]
    pub artists: Vec<RawArtist>,
    /// Album the track belongs to.
    #[serde(default)]
    pub album: Option<RawAlbum>,
}

/// Raw artist stub embedded in a track record.
#[derive(Debug, Deserialize)]
pub struct RawArtist {
    /// Provider identifier.
    #[serde(default)]
    pub id: Option<String>,
    /// Artist name.
    #[serde(default)]
    pub name: String,
}

/// Raw album embedded in a track record.
#[derive(Debug, Default, Deserialize)]
pub struct RawAlbum {
    /// Provider identifier.
    #[serde(default)]
    pub id: Option<String>,
    /// Album name.
    #[serde(default)]
    pub name: String,
    /// Art variants, typically largest first.
    #[serde(default)]
    pub images: Vec<RawImage>,
}

/// Raw album art variant.
#[derive(Debug, Deserialize)]
pub struct RawImage {
    /// Image URL.
    pub url: String,
    /// Height in pixels; may be absent.
    #[serde(default)]
    pub height: Option<u32>,
    /// Width in pixels; may be absent.
    #[serde(default)]
    pub width: Option<u32>,
}

/// Response wrapper for `GET /artists/{id}/top-tracks`.
#[derive(Debug, Deserialize)]
pub struct TopTracksResponse {
    /// Track records.
    #[serde(default)]
    pub tracks: Vec<RawTrack>,
}

/// Paged response wrapper for user top tracks.
#[derive(Debug, Deserialize)]
pub struct TrackPage {
    /// Page of track records.
    #[serde(default)]
    pub items: Vec<RawTrack>,
}

/// Paged response wrapper for saved-track and playlist items, where each
/// item nests the track record.
#[derive(Debug, Deserialize)]
pub struct NestedTrackPage {
    /// Page of wrapped track records.
    #[serde(default)]
    pub items: Vec<NestedTrackItem>,
}

/// A single saved-track or playlist item.
#[derive(Debug, Deserialize)]
pub struct NestedTrackItem {
    /// The wrapped track; playlists may contain removed (null) tracks.
    #[serde(default)]
    pub track: Option<RawTrack>,
}

/// Token endpoint response for the client-credentials flow.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    /// Bearer token value.
    pub access_token: String,
    /// Token lifetime in seconds.
    pub expires_in: u64,
}

/// Normalize a raw provider record into the domain [`Track`] shape.
///
/// Missing preview URL maps to an empty string, missing duration to 0.
pub fn map_track(raw: RawTrack) -> Track {
    let album = raw.album.unwrap_or_default();

    Track {
        id: raw.id,
        name: raw.name,
        preview_url: raw.preview_url.unwrap_or_default(),
        duration_ms: raw.duration_ms.unwrap_or(0),
        artists: raw
            .artists
            .into_iter()
            .map(|artist| ArtistStub {
                id: artist.id.unwrap_or_default(),
                name: artist.name,
            })
            .collect(),
        album: Album {
            id: album.id.unwrap_or_default(),
            name: album.name,
            images: album
                .images
                .into_iter()
                .map(|image| AlbumImage {
                    url: image.url,
                    height: image.height.unwrap_or(0),
                    width: image.width.unwrap_or(0),
                })
                .collect(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_track_normalizes_missing_fields() {
        let raw: RawTrack = serde_json::from_value(serde_json::json!({
            "id": "t1",
            "name": "Song",
            "preview_url": null,
            "artists": [{"id": "a1", "name": "Artist"}]
        }))
        .unwrap();

        let track = map_track(raw);
        assert_eq!(track.id, "t1");
        assert_eq!(track.preview_url, "");
        assert_eq!(track.duration_ms, 0);
        assert_eq!(track.artists[0].name, "Artist");
        assert!(track.album.images.is_empty());
    }

    #[test]
    fn map_track_keeps_present_fields() {
        let raw: RawTrack = serde_json::from_value(serde_json::json!({
            "id": "t2",
            "name": "Other",
            "preview_url": "https://cdn.example/p.mp3",
            "duration_ms": 215000,
            "artists": [],
            "album": {
                "id": "al1",
                "name": "Album",
                "images": [{"url": "https://cdn.example/640.jpg", "height": 640, "width": 640}]
            }
        }))
        .unwrap();

        let track = map_track(raw);
        assert_eq!(track.preview_url, "https://cdn.example/p.mp3");
        assert_eq!(track.duration_ms, 215000);
        assert_eq!(track.album.images[0].height, 640);
    }
}
