//! Transient per-game session state and the answer verification path.

use std::time::{Duration, Instant};

use dashmap::DashMap;
use thiserror::Error;
use uuid::Uuid;

use crate::state::game::GameMode;

/// Per-game state tracked between round issuance and answer submission.
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Mode the session was started in.
    pub mode: GameMode,
    /// Cumulative score.
    pub score: u32,
    /// Number of rounds answered so far.
    pub rounds_played: u32,
    /// Round the session is currently expecting an answer for.
    pub current_round_id: Uuid,
    /// Identifier of the correct choice for the current round.
    pub correct_answer_id: String,
    last_activity: Instant,
}

/// Result of a committed answer, revealed only after submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    /// Whether the submitted choice was correct.
    pub correct: bool,
    /// The correct choice identifier for the answered round.
    pub correct_answer_id: String,
    /// Score after this submission.
    pub score: u32,
    /// Rounds played after this submission.
    pub rounds_played: u32,
}

/// Failures surfaced by the answer verifier.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// The session id is unknown.
    #[error("unknown or expired session")]
    NotFound,
    /// The submitted round id does not match the session's current round.
    #[error("round id does not match the current session round")]
    RoundMismatch,
}

/// In-memory store mapping opaque session ids to [`GameSession`] state.
#[derive(Default)]
pub struct SessionStore {
    sessions: DashMap<Uuid, GameSession>,
}

impl SessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fresh session expecting an answer for `round_id`.
    pub fn create(&self, session_id: Uuid, mode: GameMode, round_id: Uuid, correct_answer_id: String) {
        self.sessions.insert(
            session_id,
            GameSession {
                mode,
                score: 0,
                rounds_played: 0,
                current_round_id: round_id,
                correct_answer_id,
                last_activity: Instant::now(),
            },
        );
    }

    /// Look up a session by id.
    pub fn get(&self, session_id: &Uuid) -> Option<GameSession> {
        self.sessions.get(session_id).map(|entry| entry.clone())
    }

    /// Verify a submitted choice against the session's current round.
    ///
    /// On a round mismatch nothing is mutated. Otherwise the rounds-played
    /// counter always advances and the score advances only on a correct
    /// answer; the correct answer id is revealed in the outcome.
    pub fn submit_answer(
        &self,
        session_id: &Uuid,
        round_id: &Uuid,
        choice_id: &str,
    ) -> Result<AnswerOutcome, SessionError> {
        let mut session = self
            .sessions
            .get_mut(session_id)
            .ok_or(SessionError::NotFound)?;

        if session.current_round_id != *round_id {
            return Err(SessionError::RoundMismatch);
        }

        let correct = choice_id == session.correct_answer_id;
        session.rounds_played += 1;
        if correct {
            session.score += 1;
        }
        session.last_activity = Instant::now();

        Ok(AnswerOutcome {
            correct,
            correct_answer_id: session.correct_answer_id.clone(),
            score: session.score,
            rounds_played: session.rounds_played,
        })
    }

    /// Evict sessions idle for longer than `ttl`, returning the count removed.
    pub fn sweep_idle(&self, ttl: Duration) -> usize {
        let now = Instant::now();
        let before = self.sessions.len();
        self.sessions
            .retain(|_, session| now.duration_since(session.last_activity) < ttl);
        before - self.sessions.len()
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the store currently holds no sessions.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_session(session_id: Uuid, round_id: Uuid) -> SessionStore {
        let store = SessionStore::new();
        store.create(session_id, GameMode::Artist, round_id, "track-1".into());
        store
    }

    #[test]
    fn create_then_get_round_trips() {
        let (session_id, round_id) = (Uuid::new_v4(), Uuid::new_v4());
        let store = store_with_session(session_id, round_id);

        let session = store.get(&session_id).unwrap();
        assert_eq!(session.score, 0);
        assert_eq!(session.rounds_played, 0);
        assert_eq!(session.current_round_id, round_id);
        assert!(store.get(&Uuid::new_v4()).is_none());
    }

    #[test]
    fn correct_answer_scores() {
        let (session_id, round_id) = (Uuid::new_v4(), Uuid::new_v4());
        let store = store_with_session(session_id, round_id);

        let outcome = store
            .submit_answer(&session_id, &round_id, "track-1")
            .unwrap();
        assert!(outcome.correct);
        assert_eq!(outcome.correct_answer_id, "track-1");
        assert_eq!(outcome.score, 1);
        assert_eq!(outcome.rounds_played, 1);
    }

    #[test]
    fn wrong_answer_still_counts_a_round() {
        let (session_id, round_id) = (Uuid::new_v4(), Uuid::new_v4());
        let store = store_with_session(session_id, round_id);

        let outcome = store
            .submit_answer(&session_id, &round_id, "track-9")
            .unwrap();
        assert!(!outcome.correct);
        assert_eq!(outcome.score, 0);
        assert_eq!(outcome.rounds_played, 1);
    }

    #[test]
    fn round_mismatch_mutates_nothing() {
        let (session_id, round_id) = (Uuid::new_v4(), Uuid::new_v4());
        let store = store_with_session(session_id, round_id);

        let err = store
            .submit_answer(&session_id, &Uuid::new_v4(), "track-1")
            .unwrap_err();
        assert_eq!(err, SessionError::RoundMismatch);

        let session = store.get(&session_id).unwrap();
        assert_eq!(session.score, 0);
        assert_eq!(session.rounds_played, 0);
    }

    #[test]
    fn unknown_session_is_reported() {
        let store = SessionStore::new();
        let err = store
            .submit_answer(&Uuid::new_v4(), &Uuid::new_v4(), "x")
            .unwrap_err();
        assert_eq!(err, SessionError::NotFound);
    }

    #[test]
    fn idle_sessions_are_swept() {
        let (session_id, round_id) = (Uuid::new_v4(), Uuid::new_v4());
        let store = store_with_session(session_id, round_id);

        assert_eq!(store.sweep_idle(Duration::from_secs(60)), 0);
        std::thread::sleep(Duration::from_millis(15));
        assert_eq!(store.sweep_idle(Duration::from_millis(5)), 1);
        assert!(store.get(&session_id).is_none());
    }
}
