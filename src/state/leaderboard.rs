//! Ranked score ledger with per-(session, name) submission cooldown.

use std::{
    sync::Mutex,
    time::{Duration, Instant, SystemTime},
};

use dashmap::{DashMap, mapref::entry::Entry};
use thiserror::Error;
use uuid::Uuid;

use crate::state::game::GameMode;

/// Maximum number of entries the ledger retains.
pub const LEDGER_CAPACITY: usize = 100;

/// One immutable leaderboard row.
#[derive(Debug, Clone)]
pub struct LeaderboardEntry {
    /// Player display name, trimmed but in original case.
    pub name: String,
    /// Final session score.
    pub score: u32,
    /// Mode the score was achieved in.
    pub mode: GameMode,
    /// Wall-clock submission time; earlier submissions win score ties.
    pub submitted_at: SystemTime,
}

/// Failures surfaced by the ledger itself.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The same session/name pair submitted again within the cooldown window.
    #[error("submission cooldown active; retry in {} second(s)", retry_after.as_secs().max(1))]
    RateLimited {
        /// Time remaining until the pair may submit again.
        retry_after: Duration,
    },
}

/// Ranked score table with submission deduplication via a cooldown window.
///
/// The entry list is only ever observed fully sorted and truncated; every
/// mutation happens under one lock. The cooldown check and record happen
/// atomically under the key's map entry, so concurrent duplicates cannot
/// both pass, and a rejected insert leaves no trace.
pub struct LeaderboardLedger {
    entries: Mutex<Vec<LeaderboardEntry>>,
    cooldowns: DashMap<String, Instant>,
    cooldown_window: Duration,
}

impl LeaderboardLedger {
    /// Create an empty ledger enforcing `cooldown_window` between duplicate submissions.
    pub fn new(cooldown_window: Duration) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            cooldowns: DashMap::new(),
            cooldown_window,
        }
    }

    /// Append a score for `name`, returning its 1-based rank and the score.
    ///
    /// The deduplication key is the session id paired with the lower-cased,
    /// trimmed name. The rank reflects the entry's position in the fully
    /// sorted ledger before truncation to [`LEDGER_CAPACITY`].
    pub fn submit(
        &self,
        session_id: &Uuid,
        name: &str,
        score: u32,
        mode: GameMode,
    ) -> Result<(usize, u32), LedgerError> {
        let key = submission_key(session_id, name);

        // Check and claim the cooldown in one entry operation; the claim
        // holds the key's shard lock, so a racing duplicate sees it. The
        // ledger insert below cannot fail, so claiming first never strands
        // a rejected submission's cooldown.
        match self.cooldowns.entry(key) {
            Entry::Occupied(mut occupied) => {
                let elapsed = occupied.get().elapsed();
                if elapsed < self.cooldown_window {
                    return Err(LedgerError::RateLimited {
                        retry_after: self.cooldown_window - elapsed,
                    });
                }
                occupied.insert(Instant::now());
            }
            Entry::Vacant(vacant) => {
                vacant.insert(Instant::now());
            }
        }

        let entry = LeaderboardEntry {
            name: name.trim().to_string(),
            score,
            mode,
            submitted_at: SystemTime::now(),
        };

        let rank = {
            let mut entries = self.entries.lock().expect("ledger mutex poisoned");
            entries.push(entry.clone());
            entries.sort_by(|a, b| {
                b.score
                    .cmp(&a.score)
                    .then_with(|| a.submitted_at.cmp(&b.submitted_at))
            });
            let rank = entries
                .iter()
                .position(|e| e.name == entry.name && e.submitted_at == entry.submitted_at)
                .map(|index| index + 1)
                .unwrap_or(entries.len());
            entries.truncate(LEDGER_CAPACITY);
            rank
        };

        Ok((rank, score))
    }

    /// Return up to `min(limit, 100)` entries in ledger order, optionally
    /// filtered by mode.
    pub fn query(&self, limit: usize, mode: Option<GameMode>) -> Vec<LeaderboardEntry> {
        let entries = self.entries.lock().expect("ledger mutex poisoned");
        entries
            .iter()
            .filter(|entry| mode.is_none_or(|m| entry.mode == m))
            .take(limit.min(LEDGER_CAPACITY))
            .cloned()
            .collect()
    }

    /// Drop cooldown records older than the window, returning the count removed.
    pub fn sweep_cooldowns(&self) -> usize {
        let before = self.cooldowns.len();
        self.cooldowns
            .retain(|_, last| last.elapsed() < self.cooldown_window);
        before - self.cooldowns.len()
    }
}

/// Deduplication key: session id plus normalized player name.
fn submission_key(session_id: &Uuid, name: &str) -> String {
    format!("{session_id}:{}", name.trim().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_COOLDOWN: Duration = Duration::ZERO;

    #[test]
    fn entries_sort_by_score_descending() {
        let ledger = LeaderboardLedger::new(NO_COOLDOWN);
        ledger.submit(&Uuid::new_v4(), "low", 10, GameMode::Artist).unwrap();
        ledger.submit(&Uuid::new_v4(), "high", 30, GameMode::Artist).unwrap();
        ledger.submit(&Uuid::new_v4(), "mid", 20, GameMode::Artist).unwrap();

        let scores: Vec<u32> = ledger.query(10, None).iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![30, 20, 10]);
    }

    #[test]
    fn earlier_submission_wins_score_ties() {
        let ledger = LeaderboardLedger::new(NO_COOLDOWN);
        ledger.submit(&Uuid::new_v4(), "first", 5, GameMode::Artist).unwrap();
        std::thread::sleep(Duration::from_millis(5));
        ledger.submit(&Uuid::new_v4(), "second", 5, GameMode::Artist).unwrap();

        let names: Vec<String> = ledger.query(10, None).iter().map(|e| e.name.clone()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn submit_reports_one_based_rank() {
        let ledger = LeaderboardLedger::new(NO_COOLDOWN);
        let (rank, score) = ledger
            .submit(&Uuid::new_v4(), "alice", 7, GameMode::Artist)
            .unwrap();
        assert_eq!((rank, score), (1, 7));

        let (rank, _) = ledger
            .submit(&Uuid::new_v4(), "bob", 9, GameMode::Artist)
            .unwrap();
        assert_eq!(rank, 1);

        let (rank, _) = ledger
            .submit(&Uuid::new_v4(), "carol", 3, GameMode::Artist)
            .unwrap();
        assert_eq!(rank, 3);
    }

    #[test]
    fn duplicate_submission_is_rate_limited_case_insensitively() {
        let ledger = LeaderboardLedger::new(Duration::from_secs(300));
        let session_id = Uuid::new_v4();
        ledger.submit(&session_id, "Alice", 4, GameMode::Artist).unwrap();

        let err = ledger
            .submit(&session_id, "  aLiCe ", 4, GameMode::Artist)
            .unwrap_err();
        let LedgerError::RateLimited { retry_after } = err;
        assert!(retry_after <= Duration::from_secs(300));
        assert!(retry_after > Duration::from_secs(290));

        // A rejected submission must not land in the ledger.
        assert_eq!(ledger.query(10, None).len(), 1);
    }

    #[test]
    fn submission_allowed_after_cooldown_elapses() {
        let ledger = LeaderboardLedger::new(Duration::from_millis(20));
        let session_id = Uuid::new_v4();
        ledger.submit(&session_id, "alice", 4, GameMode::Artist).unwrap();
        std::thread::sleep(Duration::from_millis(30));
        ledger.submit(&session_id, "alice", 5, GameMode::Artist).unwrap();
        assert_eq!(ledger.query(10, None).len(), 2);
    }

    #[test]
    fn concurrent_duplicate_submissions_accept_exactly_one() {
        use std::sync::{
            Barrier,
            atomic::{AtomicUsize, Ordering},
        };

        let ledger = LeaderboardLedger::new(Duration::from_secs(300));
        let session_id = Uuid::new_v4();
        let barrier = Barrier::new(16);
        let accepted = AtomicUsize::new(0);

        std::thread::scope(|scope| {
            for _ in 0..16 {
                scope.spawn(|| {
                    barrier.wait();
                    if ledger.submit(&session_id, "alice", 4, GameMode::Artist).is_ok() {
                        accepted.fetch_add(1, Ordering::SeqCst);
                    }
                });
            }
        });

        assert_eq!(accepted.load(Ordering::SeqCst), 1);
        assert_eq!(ledger.query(10, None).len(), 1);
    }

    #[test]
    fn different_names_share_no_cooldown() {
        let ledger = LeaderboardLedger::new(Duration::from_secs(300));
        let session_id = Uuid::new_v4();
        ledger.submit(&session_id, "alice", 4, GameMode::Artist).unwrap();
        ledger.submit(&session_id, "bob", 4, GameMode::Artist).unwrap();
    }

    #[test]
    fn ledger_truncates_to_capacity() {
        let ledger = LeaderboardLedger::new(NO_COOLDOWN);
        for score in 0..(LEDGER_CAPACITY as u32 + 5) {
            ledger
                .submit(&Uuid::new_v4(), &format!("p{score}"), score, GameMode::Artist)
                .unwrap();
        }
        let entries = ledger.query(LEDGER_CAPACITY + 50, None);
        assert_eq!(entries.len(), LEDGER_CAPACITY);
        // The lowest scores fell off the bottom.
        assert!(entries.iter().all(|e| e.score >= 5));
    }

    #[test]
    fn query_filters_by_mode_and_caps_limit() {
        let ledger = LeaderboardLedger::new(NO_COOLDOWN);
        ledger.submit(&Uuid::new_v4(), "a", 1, GameMode::Artist).unwrap();
        ledger.submit(&Uuid::new_v4(), "b", 2, GameMode::PersonalTop).unwrap();
        ledger.submit(&Uuid::new_v4(), "c", 3, GameMode::Artist).unwrap();

        let artist_only = ledger.query(10, Some(GameMode::Artist));
        assert_eq!(artist_only.len(), 2);
        assert!(artist_only.iter().all(|e| e.mode == GameMode::Artist));

        assert_eq!(ledger.query(1, None).len(), 1);
    }

    #[test]
    fn cooldown_sweep_removes_expired_records() {
        let ledger = LeaderboardLedger::new(Duration::from_millis(10));
        ledger.submit(&Uuid::new_v4(), "a", 1, GameMode::Artist).unwrap();
        std::thread::sleep(Duration::from_millis(25));
        assert_eq!(ledger.sweep_cooldowns(), 1);
        assert_eq!(ledger.sweep_cooldowns(), 0);
    }
}
