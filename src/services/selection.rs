//! Choosing a playable candidate from a track collection.

use rand::{Rng, seq::IndexedRandom};

use crate::state::game::Track;

/// Pick a track uniformly at random among those with a playable preview.
///
/// Returns `None` iff no track carries a non-empty preview URL.
pub fn select_preview_track<'a>(tracks: &'a [Track], rng: &mut impl Rng) -> Option<&'a Track> {
    let candidates: Vec<&Track> = tracks
        .iter()
        .filter(|track| !track.preview_url.is_empty())
        .collect();

    candidates.choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::state::game::{Album, Track};

    fn track(id: &str, preview_url: &str) -> Track {
        Track {
            id: id.into(),
            name: format!("track {id}"),
            preview_url: preview_url.into(),
            duration_ms: 200_000,
            artists: Vec::new(),
            album: Album::default(),
        }
    }

    #[test]
    fn never_selects_a_track_without_preview() {
        let tracks = vec![
            track("a", ""),
            track("b", "https://cdn.example/b.mp3"),
            track("c", ""),
        ];
        let mut rng = StdRng::seed_from_u64(0);

        for _ in 0..50 {
            let chosen = select_preview_track(&tracks, &mut rng).unwrap();
            assert_eq!(chosen.id, "b");
        }
    }

    #[test]
    fn returns_none_when_no_candidate_is_playable() {
        let tracks = vec![track("a", ""), track("b", "")];
        let mut rng = StdRng::seed_from_u64(0);
        assert!(select_preview_track(&tracks, &mut rng).is_none());
    }

    #[test]
    fn empty_input_yields_none() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(select_preview_track(&[], &mut rng).is_none());
    }

    #[test]
    fn eventually_picks_every_playable_candidate() {
        let tracks = vec![
            track("a", "https://cdn.example/a.mp3"),
            track("b", ""),
            track("c", "https://cdn.example/c.mp3"),
        ];
        let mut rng = StdRng::seed_from_u64(7);

        let mut seen = std::collections::HashSet::new();
        for _ in 0..100 {
            seen.insert(select_preview_track(&tracks, &mut rng).unwrap().id.clone());
        }
        assert_eq!(seen.len(), 2);
    }
}
