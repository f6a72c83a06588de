//! Runtime domain types for tracks, answer choices and quiz rounds.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Minimal artist information attached to a track.
#[derive(Debug, Clone)]
pub struct ArtistStub {
    /// Catalog identifier of the artist.
    pub id: String,
    /// Display name of the artist.
    pub name: String,
}

/// Album art variant with its pixel dimensions.
#[derive(Debug, Clone)]
pub struct AlbumImage {
    /// URL of the image.
    pub url: String,
    /// Image height in pixels (0 when the catalog omits it).
    pub height: u32,
    /// Image width in pixels (0 when the catalog omits it).
    pub width: u32,
}

/// Album metadata attached to a track.
#[derive(Debug, Clone, Default)]
pub struct Album {
    /// Catalog identifier of the album.
    pub id: String,
    /// Display name of the album.
    pub name: String,
    /// Available art variants, largest first as returned by the catalog.
    pub images: Vec<AlbumImage>,
}

/// A normalized catalog track, immutable once fetched.
#[derive(Debug, Clone)]
pub struct Track {
    /// Catalog identifier of the track.
    pub id: String,
    /// Display name of the track.
    pub name: String,
    /// Playable clip URL; empty when the catalog has no preview.
    pub preview_url: String,
    /// Track duration in milliseconds; 0 when unknown.
    pub duration_ms: u64,
    /// Credited artists, primary first.
    pub artists: Vec<ArtistStub>,
    /// Album the track belongs to.
    pub album: Album,
}

impl Track {
    /// Name of the primary credited artist, if any.
    pub fn primary_artist_name(&self) -> Option<&str> {
        self.artists.first().map(|artist| artist.name.as_str())
    }

    /// Catalog id of the primary credited artist, if any.
    pub fn primary_artist_id(&self) -> Option<&str> {
        self.artists.first().map(|artist| artist.id.as_str())
    }
}

/// One answer option presented to the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Identifier submitted back by the client when answering.
    pub id: String,
    /// Track name shown to the player.
    pub track_name: String,
    /// Artist name shown to the player.
    pub artist_name: String,
}

/// A fully built quiz round, safe to hand to an untrusted client.
///
/// The correct answer is committed to via `signature` and never appears in
/// the payload in any other form.
#[derive(Debug, Clone)]
pub struct Round {
    /// Unique identifier of this round.
    pub round_id: Uuid,
    /// URL of the playable clip.
    pub preview_url: String,
    /// Randomized clip start offset in milliseconds.
    pub start_offset_ms: u64,
    /// Fixed clip duration in milliseconds.
    pub clip_duration_ms: u64,
    /// Shuffled answer choices, exactly one of which is correct.
    pub choices: Vec<Choice>,
    /// Album art URL, when a usable variant exists.
    pub album_art: Option<String>,
    /// Hex SHA-256 answer-commitment over round id, correct id and server secret.
    pub signature: String,
}

/// Game mode a session was started in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum GameMode {
    /// Guess tracks from a chosen artist's catalog.
    Artist,
    /// Guess tracks from a public playlist.
    Playlist,
    /// Guess tracks from the player's listening history.
    PersonalTop,
    /// Guess tracks from the player's saved library.
    PersonalSaved,
}

impl GameMode {
    /// Stable tag used for metrics and leaderboard filtering.
    pub fn tag(&self) -> &'static str {
        match self {
            GameMode::Artist => "artist",
            GameMode::Playlist => "playlist",
            GameMode::PersonalTop => "personal-top",
            GameMode::PersonalSaved => "personal-saved",
        }
    }

    /// Whether this mode reads the player's own catalog data.
    pub fn is_personal(&self) -> bool {
        matches!(self, GameMode::PersonalTop | GameMode::PersonalSaved)
    }
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}
