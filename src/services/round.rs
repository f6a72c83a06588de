//! Quiz round construction: distractors, shuffling, clip offsets and the
//! answer-commitment signature.

use std::{sync::Arc, time::Duration};

use futures::future::BoxFuture;
use rand::{Rng, seq::SliceRandom};
use sha2::{Digest, Sha256};
use tracing::warn;
use uuid::Uuid;

use crate::{
    catalog::{Catalog, CatalogResult},
    state::game::{AlbumImage, Choice, Round, Track},
};

/// Assumed length of a catalog preview clip.
pub const PREVIEW_WINDOW_MS: u64 = 30_000;
/// Fixed length of the clip played to the client.
pub const CLIP_DURATION_MS: u64 = 5_000;
/// Number of wrong answers presented alongside the correct one.
pub const DISTRACTOR_COUNT: usize = 2;

/// Album art heights preferred for the round payload.
const ART_MIN_HEIGHT: u32 = 300;
const ART_MAX_HEIGHT: u32 = 600;

/// Pluggable source of wrong-answer candidates for a round.
///
/// Implementations return the whole eligible pool; [`build_round`] picks
/// from it with its caller-supplied rng so the selection stays seedable.
pub trait DistractorSource: Send + Sync {
    /// Fetch wrong-answer candidates for `correct`, scoped to `source_id`.
    fn distractors(
        &self,
        correct: &Track,
        source_id: &str,
    ) -> BoxFuture<'static, CatalogResult<Vec<Choice>>>;
}

/// Distractor source backed by the catalog's same-artist top tracks.
pub struct CatalogDistractors {
    catalog: Arc<dyn Catalog>,
}

impl CatalogDistractors {
    /// Wrap a catalog client.
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        Self { catalog }
    }
}

impl DistractorSource for CatalogDistractors {
    fn distractors(
        &self,
        correct: &Track,
        source_id: &str,
    ) -> BoxFuture<'static, CatalogResult<Vec<Choice>>> {
        let fetch = self.catalog.artist_top_tracks(source_id.to_string());
        let correct_id = correct.id.clone();
        Box::pin(async move {
            let tracks = fetch.await?;
            let candidates = tracks
                .into_iter()
                .filter(|track| track.id != correct_id && !track.name.is_empty())
                .map(|track| Choice {
                    artist_name: track
                        .primary_artist_name()
                        .unwrap_or("Unknown Artist")
                        .to_string(),
                    id: track.id,
                    track_name: track.name,
                })
                .collect();
            Ok(candidates)
        })
    }
}

/// Build a signed round for `correct`.
///
/// Distractor retrieval is bounded by `timeout` and degrades to synthesized
/// placeholders on any failure, so round construction itself never fails.
/// All randomized decisions draw from `rng`.
pub async fn build_round(
    correct: &Track,
    source_id: &str,
    secret: &str,
    distractor_source: &dyn DistractorSource,
    timeout: Duration,
    rng: &mut impl Rng,
) -> Round {
    let round_id = Uuid::new_v4();

    let fetched =
        tokio::time::timeout(timeout, distractor_source.distractors(correct, source_id)).await;

    let mut distractors = match fetched {
        Ok(Ok(candidates)) => candidates,
        Ok(Err(err)) => {
            warn!(error = %err, source_id, "distractor retrieval failed; using placeholders");
            Vec::new()
        }
        Err(_) => {
            warn!(source_id, "distractor retrieval timed out; using placeholders");
            Vec::new()
        }
    };

    distractors.shuffle(rng);
    distractors.truncate(DISTRACTOR_COUNT);
    while distractors.len() < DISTRACTOR_COUNT {
        distractors.push(placeholder_choice(correct, distractors.len()));
    }

    let mut choices = Vec::with_capacity(DISTRACTOR_COUNT + 1);
    choices.push(Choice {
        id: correct.id.clone(),
        track_name: correct.name.clone(),
        artist_name: correct
            .primary_artist_name()
            .unwrap_or("Unknown Artist")
            .to_string(),
    });
    choices.extend(distractors);
    choices.shuffle(rng);

    Round {
        round_id,
        preview_url: correct.preview_url.clone(),
        start_offset_ms: random_start_offset(correct.duration_ms, rng),
        clip_duration_ms: CLIP_DURATION_MS,
        choices,
        album_art: pick_album_art(&correct.album.images),
        signature: sign_round(&round_id, &correct.id, secret),
    }
}

/// Synthesize a stand-in wrong answer when the catalog is unavailable.
fn placeholder_choice(correct: &Track, index: usize) -> Choice {
    Choice {
        id: format!("distractor-{index}"),
        track_name: format!("Track {}", index + 1),
        artist_name: correct
            .primary_artist_name()
            .unwrap_or("Unknown Artist")
            .to_string(),
    }
}

/// Draw a clip start offset uniformly from the legal window.
///
/// The nominal preview window is clamped to [`PREVIEW_WINDOW_MS`] and must
/// leave room for a full [`CLIP_DURATION_MS`] clip.
pub fn random_start_offset(duration_ms: u64, rng: &mut impl Rng) -> u64 {
    let latest_start = duration_ms
        .min(PREVIEW_WINDOW_MS)
        .saturating_sub(CLIP_DURATION_MS);
    if latest_start == 0 {
        return 0;
    }
    rng.random_range(0..=latest_start)
}

/// Compute the answer-commitment: hex SHA-256 over `roundId:correctId:secret`.
pub fn sign_round(round_id: &Uuid, correct_answer_id: &str, secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("{round_id}:{correct_answer_id}:{secret}").as_bytes());
    hex::encode(hasher.finalize())
}

/// Check a signature against a recomputed commitment.
pub fn verify_round_signature(
    round_id: &Uuid,
    correct_answer_id: &str,
    signature: &str,
    secret: &str,
) -> bool {
    sign_round(round_id, correct_answer_id, secret) == signature
}

/// Choose album art for the round payload.
///
/// Prefers a variant whose height falls in `[300, 600]`, falls back to the
/// first available image, and yields `None` when there is none.
pub fn pick_album_art(images: &[AlbumImage]) -> Option<String> {
    images
        .iter()
        .find(|image| (ART_MIN_HEIGHT..=ART_MAX_HEIGHT).contains(&image.height))
        .or_else(|| images.first())
        .map(|image| image.url.clone())
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::{
        catalog::CatalogError,
        state::game::{Album, ArtistStub},
    };

    fn sample_track() -> Track {
        Track {
            id: "correct-1".into(),
            name: "The Answer".into(),
            preview_url: "https://cdn.example/clip.mp3".into(),
            duration_ms: 180_000,
            artists: vec![ArtistStub {
                id: "artist-1".into(),
                name: "Someone".into(),
            }],
            album: Album {
                id: "album-1".into(),
                name: "Album".into(),
                images: vec![
                    AlbumImage {
                        url: "https://cdn.example/640.jpg".into(),
                        height: 640,
                        width: 640,
                    },
                    AlbumImage {
                        url: "https://cdn.example/300.jpg".into(),
                        height: 300,
                        width: 300,
                    },
                ],
            },
        }
    }

    struct FixedDistractors(Vec<Choice>);

    impl DistractorSource for FixedDistractors {
        fn distractors(
            &self,
            _correct: &Track,
            _source_id: &str,
        ) -> BoxFuture<'static, CatalogResult<Vec<Choice>>> {
            let choices = self.0.clone();
            Box::pin(async move { Ok(choices) })
        }
    }

    struct FailingDistractors;

    impl DistractorSource for FailingDistractors {
        fn distractors(
            &self,
            _correct: &Track,
            _source_id: &str,
        ) -> BoxFuture<'static, CatalogResult<Vec<Choice>>> {
            Box::pin(async {
                Err(CatalogError::RequestStatus {
                    path: "artists/x/top-tracks".into(),
                    status: reqwest::StatusCode::BAD_GATEWAY,
                })
            })
        }
    }

    fn two_distractors() -> Vec<Choice> {
        vec![
            Choice {
                id: "wrong-1".into(),
                track_name: "Wrong One".into(),
                artist_name: "Someone".into(),
            },
            Choice {
                id: "wrong-2".into(),
                track_name: "Wrong Two".into(),
                artist_name: "Someone".into(),
            },
        ]
    }

    #[test]
    fn signature_is_deterministic_and_input_sensitive() {
        let round_id = Uuid::new_v4();
        let signature = sign_round(&round_id, "track-1", "secret");

        assert_eq!(signature, sign_round(&round_id, "track-1", "secret"));
        assert_eq!(signature.len(), 64);
        assert_ne!(signature, sign_round(&Uuid::new_v4(), "track-1", "secret"));
        assert_ne!(signature, sign_round(&round_id, "track-2", "secret"));
        assert_ne!(signature, sign_round(&round_id, "track-1", "other-secret"));

        assert!(verify_round_signature(&round_id, "track-1", &signature, "secret"));
        assert!(!verify_round_signature(&round_id, "track-1", &signature, "other-secret"));
    }

    #[test]
    fn start_offset_stays_inside_legal_window() {
        let mut rng = StdRng::seed_from_u64(42);
        for duration in [0, 3_000, 5_000, 12_345, 30_000, 200_000] {
            let latest = duration.min(PREVIEW_WINDOW_MS).saturating_sub(CLIP_DURATION_MS);
            for _ in 0..200 {
                let offset = random_start_offset(duration, &mut rng);
                assert!(offset <= latest, "offset {offset} beyond {latest} for {duration}");
            }
        }
    }

    #[test]
    fn short_tracks_always_start_at_zero() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(random_start_offset(4_000, &mut rng), 0);
        assert_eq!(random_start_offset(5_000, &mut rng), 0);
    }

    #[test]
    fn album_art_prefers_medium_variant() {
        let track = sample_track();
        assert_eq!(
            pick_album_art(&track.album.images).as_deref(),
            Some("https://cdn.example/300.jpg")
        );

        let only_large = &track.album.images[..1];
        assert_eq!(
            pick_album_art(only_large).as_deref(),
            Some("https://cdn.example/640.jpg")
        );

        assert_eq!(pick_album_art(&[]), None);
    }

    #[tokio::test]
    async fn round_contains_exactly_one_correct_choice() {
        let track = sample_track();
        let source = FixedDistractors(two_distractors());
        let mut rng = StdRng::seed_from_u64(3);

        let round = build_round(
            &track,
            "artist-1",
            "secret",
            &source,
            Duration::from_secs(1),
            &mut rng,
        )
        .await;

        assert_eq!(round.choices.len(), 3);
        let matching = round.choices.iter().filter(|c| c.id == track.id).count();
        assert_eq!(matching, 1);
        assert_eq!(round.clip_duration_ms, CLIP_DURATION_MS);
        assert_eq!(
            round.signature,
            sign_round(&round.round_id, &track.id, "secret")
        );
    }

    #[tokio::test]
    async fn distractor_selection_is_seed_deterministic() {
        let track = sample_track();
        let mut pool = two_distractors();
        pool.push(Choice {
            id: "wrong-3".into(),
            track_name: "Wrong Three".into(),
            artist_name: "Someone".into(),
        });
        let source = FixedDistractors(pool);

        let mut first_rng = StdRng::seed_from_u64(9);
        let first = build_round(
            &track,
            "artist-1",
            "secret",
            &source,
            Duration::from_secs(1),
            &mut first_rng,
        )
        .await;

        let mut second_rng = StdRng::seed_from_u64(9);
        let second = build_round(
            &track,
            "artist-1",
            "secret",
            &source,
            Duration::from_secs(1),
            &mut second_rng,
        )
        .await;

        assert_eq!(first.choices.len(), 3);
        let ids = |round: &Round| -> Vec<String> {
            round.choices.iter().map(|c| c.id.clone()).collect()
        };
        assert_eq!(ids(&first), ids(&second));
        assert_eq!(first.start_offset_ms, second.start_offset_ms);
    }

    #[tokio::test]
    async fn failed_distractor_fetch_falls_back_to_placeholders() {
        let track = sample_track();
        let mut rng = StdRng::seed_from_u64(4);

        let round = build_round(
            &track,
            "artist-1",
            "secret",
            &FailingDistractors,
            Duration::from_secs(1),
            &mut rng,
        )
        .await;

        assert_eq!(round.choices.len(), 3);
        let placeholders: Vec<&Choice> = round
            .choices
            .iter()
            .filter(|c| c.id.starts_with("distractor-"))
            .collect();
        assert_eq!(placeholders.len(), 2);
        assert!(placeholders.iter().all(|c| c.artist_name == "Someone"));
    }

    #[tokio::test]
    async fn short_distractor_list_is_padded() {
        let track = sample_track();
        let source = FixedDistractors(two_distractors()[..1].to_vec());
        let mut rng = StdRng::seed_from_u64(5);

        let round = build_round(
            &track,
            "artist-1",
            "secret",
            &source,
            Duration::from_secs(1),
            &mut rng,
        )
        .await;

        assert_eq!(round.choices.len(), 3);
        assert!(round.choices.iter().any(|c| c.id == "wrong-1"));
        assert!(round.choices.iter().any(|c| c.id.starts_with("distractor-")));
    }

    #[tokio::test]
    async fn payload_never_leaks_the_secret() {
        let track = sample_track();
        let source = FixedDistractors(two_distractors());
        let mut rng = StdRng::seed_from_u64(6);

        let round = build_round(
            &track,
            "artist-1",
            "super-secret-value",
            &source,
            Duration::from_secs(1),
            &mut rng,
        )
        .await;

        assert!(!round.signature.contains("super-secret-value"));
        assert_ne!(round.signature, track.id);
    }
}
