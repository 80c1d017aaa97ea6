//! Round Arbiter
//!
//! Runs one commit-then-reveal round at a time:
//!
//! ```text
//!   begin()                 play(handle, move)
//! ──────────► Committed ──────────────────────► Revealed
//!             (digest public,                   (key, machine move,
//!              key + move secret)                outcome public)
//! ```
//!
//! There is no edge out of `Revealed`. A `Committed` handle that is dropped
//! without `play` is abandoned: nothing is revealed and that is not an error.

use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::hash::{digest_to_hex, Digest};
use crate::core::moves::{MoveSet, MoveSetError};
use crate::core::rng::{system_entropy, EntropySource, SecretKey};
use crate::game::table::{Outcome, OutcomeTable};
use crate::proof::commitment::{hex_digest, Commitment, CommitmentEngine, CommitmentError, MoveReveal};
use crate::proof::verify::check_parsed;
use crate::session::events::RoundId;

/// Identifies the arbiter that issued a round.
pub type ArbiterId = [u8; 16];

/// Round lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundState {
    /// Digest published, waiting for the human move.
    Committed,
    /// Outcome computed, key and machine move disclosed.
    Revealed,
}

/// Caller's handle on one round.
///
/// Holds the sealed commitment until [`Arbiter::play`] opens it. A handle
/// can only be played on the arbiter that issued it.
#[derive(Debug)]
pub struct RoundHandle {
    id: RoundId,
    arbiter: ArbiterId,
    state: RoundState,
    digest: Digest,
    commitment: Option<Commitment>,
}

impl RoundHandle {
    /// Round identifier.
    pub fn id(&self) -> RoundId {
        self.id
    }

    /// Current state.
    pub fn state(&self) -> RoundState {
        self.state
    }

    /// Published digest.
    pub fn digest(&self) -> &Digest {
        &self.digest
    }

    /// Published digest as lowercase hex.
    pub fn digest_hex(&self) -> String {
        digest_to_hex(&self.digest)
    }
}

/// Everything disclosed when a round is revealed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    /// Human's move.
    pub human_move: String,
    /// Machine's committed move.
    pub machine_move: String,
    /// Result for the human.
    pub outcome: Outcome,
    /// Key the commitment was made with.
    #[serde(rename = "key")]
    pub revealed_key: SecretKey,
    /// Digest published before the human moved.
    #[serde(rename = "hmac", with = "hex_digest")]
    pub digest: Digest,
}

impl RoundResult {
    /// Revealed key as lowercase hex.
    pub fn key_hex(&self) -> String {
        self.revealed_key.to_hex()
    }

    /// Digest as lowercase hex.
    pub fn digest_hex(&self) -> String {
        digest_to_hex(&self.digest)
    }

    /// The commitment-opening part of the result.
    pub fn reveal(&self) -> MoveReveal {
        MoveReveal {
            key: self.revealed_key.clone(),
            machine_move: self.machine_move.clone(),
            digest: self.digest,
        }
    }

    /// Check the disclosure, surfacing a mismatch as
    /// `ArbiterError::Commitment(CommitmentError::DigestMismatch)`.
    pub fn verify(&self) -> Result<(), ArbiterError> {
        self.reveal().verify()?;
        Ok(())
    }
}

/// Recompute a result's digest from its disclosed key and machine move.
///
/// Uses only the disclosed values, never arbiter state.
pub fn verify_round(result: &RoundResult) -> bool {
    check_parsed(&result.revealed_key, &result.machine_move, &result.digest).valid
}

/// Per-session arbiter.
///
/// Owns the move set, its outcome table and the commitment engine.
/// Generic over the entropy source so tests can inject a seeded one.
pub struct Arbiter<R = OsRng> {
    id: ArbiterId,
    moves: MoveSet,
    table: OutcomeTable,
    engine: CommitmentEngine<R>,
}

impl Arbiter<OsRng> {
    /// Arbiter backed by operating system entropy.
    pub fn new(moves: MoveSet) -> Self {
        Self::with_entropy(moves, system_entropy())
    }
}

impl<R: EntropySource> Arbiter<R> {
    /// Arbiter backed by the given entropy source.
    pub fn with_entropy(moves: MoveSet, rng: R) -> Self {
        let table = OutcomeTable::build(&moves);
        Self {
            id: uuid::Uuid::new_v4().into_bytes(),
            moves,
            table,
            engine: CommitmentEngine::new(rng),
        }
    }

    /// Validate labels and build an arbiter over the given source.
    pub fn from_labels<I, S>(labels: I, rng: R) -> Result<Self, MoveSetError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self::with_entropy(MoveSet::new(labels)?, rng))
    }

    /// Move set in play.
    pub fn moves(&self) -> &MoveSet {
        &self.moves
    }

    /// Outcome table for the move set.
    pub fn table(&self) -> &OutcomeTable {
        &self.table
    }

    /// Start a round: commit to a fresh machine move.
    ///
    /// Returns the digest to publish and the handle to play the round with.
    pub fn begin(&mut self) -> (Digest, RoundHandle) {
        let commitment = self.engine.commit(&self.moves);
        let digest = *commitment.digest();
        let id = uuid::Uuid::new_v4().into_bytes();

        info!("Round {} committed, HMAC {}", hex::encode(&id[..4]), hex::encode(&digest[..4]));

        let handle = RoundHandle {
            id,
            arbiter: self.id,
            state: RoundState::Committed,
            digest,
            commitment: Some(commitment),
        };
        (digest, handle)
    }

    /// Accept the human move, resolve the round and reveal.
    ///
    /// An `InvalidMove` leaves the round committed so the caller can ask
    /// again. Resolution, the state change and disclosure happen together.
    /// A handle issued by another arbiter is refused and left untouched.
    pub fn play(&self, handle: &mut RoundHandle, human_move: &str) -> Result<RoundResult, ArbiterError> {
        if handle.arbiter != self.id {
            debug!("Refused round {} from another arbiter", hex::encode(&handle.id[..4]));
            return Err(ArbiterError::ForeignRound);
        }
        if handle.state != RoundState::Committed {
            return Err(ArbiterError::AlreadyRevealed);
        }

        let human_index = self.moves.index_of(human_move).ok_or_else(|| {
            debug!("Rejected move {:?} for round {}", human_move, hex::encode(&handle.id[..4]));
            ArbiterError::InvalidMove {
                label: human_move.to_string(),
            }
        })?;

        let commitment = handle.commitment.take().ok_or(ArbiterError::AlreadyRevealed)?;
        let outcome = self.table.resolve(human_index, commitment.move_index());
        let reveal = commitment.open(&self.moves);
        handle.state = RoundState::Revealed;

        info!(
            "Round {} revealed: {} vs {} -> {}",
            hex::encode(&handle.id[..4]),
            human_move,
            reveal.machine_move,
            outcome
        );

        Ok(RoundResult {
            human_move: human_move.to_string(),
            machine_move: reveal.machine_move,
            outcome,
            revealed_key: reveal.key,
            digest: reveal.digest,
        })
    }

    /// See [`verify_round`].
    pub fn verify_round(&self, result: &RoundResult) -> bool {
        verify_round(result)
    }
}

/// Arbiter errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArbiterError {
    /// Human move is not in the move set.
    #[error("invalid move: \"{label}\" is not one of the available moves")]
    InvalidMove {
        /// The rejected input.
        label: String,
    },

    /// The round has already been played.
    #[error("round already revealed")]
    AlreadyRevealed,

    /// The handle was issued by a different arbiter.
    #[error("round was not started by this arbiter")]
    ForeignRound,

    /// `play_round` called before any `begin_round`.
    #[error("no round in progress")]
    NoActiveRound,

    /// Move list failed validation.
    #[error("invalid move set: {0}")]
    InvalidMoveSet(#[from] MoveSetError),

    /// Commitment check failed.
    #[error(transparent)]
    Commitment(#[from] CommitmentError),
}

// =============================================================================
// TESTS
// =============================================================================
