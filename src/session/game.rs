//! Game Session
//!
//! Caller-facing surface: one move set, one current round at a time.
//!
//! - `begin_round` publishes a digest (hex) and discards any round still
//!   waiting for a move
//! - `play_round` resolves and reveals the current round
//! - `verify` checks a disclosure using only the disclosed values

use rand::rngs::OsRng;
use tracing::debug;

use crate::core::moves::MoveSet;
use crate::core::rng::{system_entropy, EntropySource};
use crate::game::table::OutcomeTable;
use crate::session::arbiter::{Arbiter, ArbiterError, RoundHandle, RoundResult, RoundState};
use crate::session::events::{EventJournal, SessionEvent, SessionEventData};

/// A play session over one move set.
pub struct GameSession<R = OsRng> {
    arbiter: Arbiter<R>,
    current: Option<RoundHandle>,
    journal: EventJournal,
}

impl GameSession<OsRng> {
    /// Validate labels and open a session backed by operating system entropy.
    pub fn new<I, S>(labels: I) -> Result<Self, ArbiterError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_entropy(labels, system_entropy())
    }
}

impl<R: EntropySource> GameSession<R> {
    /// Validate labels and open a session over the given entropy source.
    pub fn with_entropy<I, S>(labels: I, rng: R) -> Result<Self, ArbiterError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let moves = MoveSet::new(labels)?;
        Ok(Self::from_arbiter(Arbiter::with_entropy(moves, rng)))
    }

    /// Wrap an existing arbiter.
    pub fn from_arbiter(arbiter: Arbiter<R>) -> Self {
        Self {
            arbiter,
            current: None,
            journal: EventJournal::new(),
        }
    }

    /// Move set in play.
    pub fn moves(&self) -> &MoveSet {
        self.arbiter.moves()
    }

    /// Outcome table for the move set.
    pub fn table(&self) -> &OutcomeTable {
        self.arbiter.table()
    }

    /// State of the current round, if any.
    pub fn round_state(&self) -> Option<RoundState> {
        self.current.as_ref().map(RoundHandle::state)
    }

    /// Commit to a fresh machine move and return the digest as lowercase hex.
    pub fn begin_round(&mut self) -> String {
        if let Some(previous) = self.current.take() {
            if previous.state() == RoundState::Committed {
                debug!("Abandoning round {}", hex::encode(&previous.id()[..4]));
                self.journal.record(previous.id(), SessionEventData::Abandoned);
            }
        }

        let (_, handle) = self.arbiter.begin();
        let digest_hex = handle.digest_hex();
        self.journal.record(
            handle.id(),
            SessionEventData::Committed {
                digest_hex: digest_hex.clone(),
            },
        );
        self.current = Some(handle);

        digest_hex
    }

    /// Play the human move against the current round.
    pub fn play_round(&mut self, human_move: &str) -> Result<RoundResult, ArbiterError> {
        let handle = self.current.as_mut().ok_or(ArbiterError::NoActiveRound)?;
        let result = self.arbiter.play(handle, human_move)?;

        self.journal.record(
            handle.id(),
            SessionEventData::Revealed {
                human_move: result.human_move.clone(),
                machine_move: result.machine_move.clone(),
                key_hex: result.key_hex(),
                outcome: result.outcome,
            },
        );

        Ok(result)
    }

    /// Check a disclosure. Needs no session state.
    pub fn verify(key_hex: &str, machine_move: &str, digest_hex: &str) -> bool {
        crate::proof::verify::verify(key_hex, machine_move, digest_hex)
    }

    /// Everything this session has published, oldest first.
    pub fn events(&self) -> &[SessionEvent] {
        self.journal.events()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::table::Outcome;
    use crate::proof::verify::verify;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn rps(seed: u64) -> GameSession<ChaCha20Rng> {
        GameSession::with_entropy(["Rock", "Paper", "Scissors"], ChaCha20Rng::seed_from_u64(seed)).unwrap()
    }

    #[test]
    fn test_end_to_end_rock_paper_scissors() {
        let mut session = rps(42);

        let digest_hex = session.begin_round();
        assert_eq!(digest_hex.len(), 64);
        assert!(digest_hex.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));

        let result = session.play_round("Rock").unwrap();
        assert_eq!(result.human_move, "Rock");
        assert!(session.moves().contains(&result.machine_move));
        assert_eq!(result.digest_hex(), digest_hex);

        // Rock is index 0: it beats Paper (1) and loses to Scissors (2)
        let expected = match result.machine_move.as_str() {
            "Rock" => Outcome::Draw,
            "Paper" => Outcome::Win,
            _ => Outcome::Lose,
        };
        assert_eq!(result.outcome, expected);

        assert!(verify(&result.key_hex(), &result.machine_move, &digest_hex));
        assert!(GameSession::<ChaCha20Rng>::verify(&result.key_hex(), &result.machine_move, &digest_hex));
    }

    #[test]
    fn test_unknown_move_rejected() {
        let mut session = rps(1);
        session.begin_round();

        assert_eq!(
            session.play_round("Lizard"),
            Err(ArbiterError::InvalidMove { label: "Lizard".into() })
        );
        assert_eq!(session.round_state(), Some(RoundState::Committed));
    }

    #[test]
    fn test_play_without_round() {
        let mut session = rps(2);
        assert_eq!(session.play_round("Rock"), Err(ArbiterError::NoActiveRound));
    }

    #[test]
    fn test_single_play_per_round() {
        let mut session = rps(3);
        session.begin_round();

        session.play_round("Paper").unwrap();
        assert_eq!(session.play_round("Paper"), Err(ArbiterError::AlreadyRevealed));
        assert_eq!(session.round_state(), Some(RoundState::Revealed));
    }

    #[test]
    fn test_digest_published_before_reveal() {
        let mut session = rps(4);

        for _ in 0..5 {
            let digest_hex = session.begin_round();
            let round_id = session.events().last().unwrap().round_id;

            // Nothing revealed yet for this round
            assert!(session
                .events()
                .iter()
                .filter(|e| e.round_id == round_id)
                .all(|e| matches!(e.data, SessionEventData::Committed { .. })));

            session.play_round("Scissors").unwrap();

            let round: Vec<&SessionEvent> = session.events().iter().filter(|e| e.round_id == round_id).collect();
            assert_eq!(round.len(), 2);
            assert_eq!(round[0].data, SessionEventData::Committed { digest_hex });
            assert!(matches!(round[1].data, SessionEventData::Revealed { .. }));
            assert!(round[0].sequence < round[1].sequence);
        }
    }

    #[test]
    fn test_new_round_abandons_unplayed_round() {
        let mut session = rps(5);
        let first = session.begin_round();
        let second = session.begin_round();

        assert_ne!(first, second);
        let kinds: Vec<&SessionEventData> = session.events().iter().map(|e| &e.data).collect();
        assert!(matches!(kinds[1], SessionEventData::Abandoned));
        assert!(!kinds.iter().any(|k| matches!(k, SessionEventData::Revealed { .. })));

        let result = session.play_round("Rock").unwrap();
        assert_eq!(result.digest_hex(), second);
    }

    #[test]
    fn test_each_round_draws_fresh_secrets() {
        let mut session = rps(6);
        let mut keys = Vec::new();

        for _ in 0..10 {
            session.begin_round();
            keys.push(session.play_round("Rock").unwrap().key_hex());
        }

        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), 10);
    }

    #[test]
    fn test_invalid_move_set() {
        assert!(matches!(
            GameSession::new(["Rock", "Paper"]),
            Err(ArbiterError::InvalidMoveSet(_))
        ));
    }

    #[test]
    fn test_concurrent_sessions_are_independent() {
        let digests: Vec<String> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    scope.spawn(|| {
                        let mut session = GameSession::new(["a", "b", "c", "d", "e"]).unwrap();
                        let digest = session.begin_round();
                        let result = session.play_round("a").unwrap();
                        assert!(verify(&result.key_hex(), &result.machine_move, &digest));
                        digest
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let mut unique = digests.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), digests.len());
    }
}
