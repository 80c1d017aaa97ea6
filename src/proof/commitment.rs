//! Move Commitment Protocol
//!
//! Commit to the machine's move before the human chooses.
//! Reveal the key after the round so the human can check the commitment.
//!
//! ```text
//! digest = HMAC-SHA256(key, machine_move_label)
//! ```
//!
//! The label is hashed as its literal UTF-8 bytes, so any off-the-shelf
//! HMAC-SHA256 tool can reproduce the digest from the revealed key and move.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::hash::{digest_to_hex, keyed_digest, verify_keyed_digest, Digest, HexError};
use crate::core::moves::MoveSet;
use crate::core::rng::{draw_index, EntropySource, SecretKey};
use crate::proof::verify::check_parsed;

/// A commitment to one machine move.
///
/// Only [`Commitment::digest`] may leave the arbiter before the reveal.
/// The key and move index have no public accessors.
#[derive(Clone)]
pub struct Commitment {
    key: SecretKey,
    move_index: usize,
    digest: Digest,
}

impl Commitment {
    /// The public commitment artifact.
    pub fn digest(&self) -> &Digest {
        &self.digest
    }

    /// Lowercase hex of the digest.
    pub fn digest_hex(&self) -> String {
        digest_to_hex(&self.digest)
    }

    /// Check a revealed key and move against this commitment.
    pub fn verify(&self, key: &SecretKey, revealed_move: &str) -> bool {
        verify_commitment(&self.digest, key, revealed_move)
    }

    /// Committed move index. Crate-private: only the arbiter may read it, and
    /// only while resolving the round.
    pub(crate) fn move_index(&self) -> usize {
        self.move_index
    }

    /// Consume the commitment and open it.
    pub(crate) fn open(self, moves: &MoveSet) -> MoveReveal {
        MoveReveal {
            key: self.key,
            machine_move: moves[self.move_index].to_string(),
            digest: self.digest,
        }
    }
}

impl std::fmt::Debug for Commitment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Commitment")
            .field("digest", &self.digest_hex())
            .finish_non_exhaustive()
    }
}

/// Draws machine moves and commits to them.
///
/// Owns its entropy source; each call to [`CommitmentEngine::commit`] draws
/// an independent key and move.
pub struct CommitmentEngine<R> {
    rng: R,
}

impl<R: EntropySource> CommitmentEngine<R> {
    /// Create an engine over the given source.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Draw a uniformly random move and a fresh key, and commit.
    pub fn commit(&mut self, moves: &MoveSet) -> Commitment {
        let move_index = draw_index(&mut self.rng, moves.len());
        let key = SecretKey::generate(&mut self.rng);
        let digest = commitment_digest(&key, &moves[move_index]);

        debug!("Committed to move, digest {}", hex::encode(&digest[..4]));

        Commitment {
            key,
            move_index,
            digest,
        }
    }

    /// Check a revealed key and move against a commitment.
    pub fn verify(&self, commitment: &Commitment, key: &SecretKey, revealed_move: &str) -> bool {
        commitment.verify(key, revealed_move)
    }
}

/// Compute the commitment digest for a move label.
pub fn commitment_digest(key: &SecretKey, move_label: &str) -> Digest {
    keyed_digest(key.as_bytes(), move_label.as_bytes())
}

/// Constant-time check of a digest against a key and move label.
pub fn verify_commitment(digest: &Digest, key: &SecretKey, move_label: &str) -> bool {
    verify_keyed_digest(key.as_bytes(), move_label.as_bytes(), digest)
}

/// Opened commitment (published after the round).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveReveal {
    /// The key the digest was computed with.
    pub key: SecretKey,
    /// The committed machine move.
    pub machine_move: String,
    /// The digest published before the round.
    #[serde(with = "hex_digest")]
    pub digest: Digest,
}

impl MoveReveal {
    /// Verify the reveal against its own digest.
    pub fn verify(&self) -> Result<(), CommitmentError> {
        check_parsed(&self.key, &self.machine_move, &self.digest).into_result()?;
        Ok(())
    }
}

/// Serde helper: digests travel as lowercase hex strings.
pub(crate) mod hex_digest {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::core::hash::{digest_from_hex, digest_to_hex, Digest};

    pub fn serialize<S: Serializer>(digest: &Digest, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&digest_to_hex(digest))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Digest, D::Error> {
        let s = String::deserialize(deserializer)?;
        digest_from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Errors that can occur during commitment verification.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommitmentError {
    /// Recomputed digest differs from the published one.
    #[error("HMAC mismatch: the revealed key and move do not match the published commitment")]
    DigestMismatch,

    /// Key or digest could not be decoded.
    #[error(transparent)]
    Malformed(#[from] HexError),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    use crate::core::rng::KEY_LEN;

    fn rps() -> MoveSet {
        MoveSet::new(["Rock", "Paper", "Scissors"]).unwrap()
    }

    fn engine(seed: u64) -> CommitmentEngine<ChaCha20Rng> {
        CommitmentEngine::new(ChaCha20Rng::seed_from_u64(seed))
    }

    #[test]
    fn test_commit_and_open() {
        let moves = rps();
        let commitment = engine(1).commit(&moves);
        let index = commitment.move_index();
        let digest = *commitment.digest();

        let reveal = commitment.open(&moves);

        assert!(index < moves.len());
        assert_eq!(reveal.machine_move, &moves[index]);
        assert_eq!(reveal.digest, digest);
        assert!(reveal.verify().is_ok());
    }

    #[test]
    fn test_digest_matches_plain_hmac() {
        let moves = rps();
        let reveal = engine(2).commit(&moves).open(&moves);

        let expected = keyed_digest(reveal.key.as_bytes(), reveal.machine_move.as_bytes());
        assert_eq!(reveal.digest, expected);
    }

    #[test]
    fn test_engine_verify() {
        let moves = rps();
        let mut engine = engine(3);
        let commitment = engine.commit(&moves);
        let committed = moves[commitment.move_index()].to_string();
        let key = commitment.clone().open(&moves).key;

        assert!(engine.verify(&commitment, &key, &committed));

        let other = moves.iter().find(|m| *m != committed).unwrap();
        assert!(!engine.verify(&commitment, &key, other));
        assert!(!engine.verify(&commitment, &SecretKey::from_bytes([0; KEY_LEN]), &committed));
    }

    #[test]
    fn test_fresh_key_per_commit() {
        let moves = rps();
        let mut engine = engine(4);
        let a = engine.commit(&moves).open(&moves);
        let b = engine.commit(&moves).open(&moves);

        assert_ne!(a.key, b.key);
        assert_ne!(a.digest, b.digest);
    }

    #[test]
    fn test_every_move_can_be_drawn() {
        let moves = MoveSet::new(["a", "b", "c", "d", "e"]).unwrap();
        let mut engine = engine(5);
        let mut seen = [false; 5];

        for _ in 0..200 {
            seen[engine.commit(&moves).move_index()] = true;
        }

        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_tampered_reveal_fails() {
        let moves = rps();
        let mut reveal = engine(6).commit(&moves).open(&moves);
        reveal.machine_move = moves
            .iter()
            .find(|m| *m != reveal.machine_move)
            .unwrap()
            .to_string();

        assert_eq!(reveal.verify(), Err(CommitmentError::DigestMismatch));
    }

    #[test]
    fn test_debug_hides_secrets() {
        let moves = rps();
        let commitment = engine(7).commit(&moves);
        let printed = format!("{:?}", commitment);

        assert!(printed.contains(&commitment.digest_hex()));
        assert!(!printed.contains("move_index"));
        assert!(!printed.contains("key"));
    }

    #[test]
    fn test_reveal_json_roundtrip_uses_hex() {
        let moves = rps();
        let reveal = engine(8).commit(&moves).open(&moves);
        let json = serde_json::to_value(&reveal).unwrap();

        assert_eq!(json["key"], reveal.key.to_hex());
        assert_eq!(json["digest"], hex::encode(reveal.digest));

        let back: MoveReveal = serde_json::from_value(json).unwrap();
        assert_eq!(back, reveal);
    }

    proptest! {
        #[test]
        fn prop_roundtrip_verifies(key in any::<[u8; 32]>(), label in "[A-Za-z]{1,12}") {
            let key = SecretKey::from_bytes(key);
            let digest = commitment_digest(&key, &label);
            prop_assert!(verify_commitment(&digest, &key, &label));
        }

        #[test]
        fn prop_key_bit_flip_fails(key in any::<[u8; 32]>(), label in "[A-Za-z]{1,12}", bit in 0usize..256) {
            let digest = commitment_digest(&SecretKey::from_bytes(key), &label);
            let mut flipped = key;
            flipped[bit / 8] ^= 1 << (bit % 8);
            prop_assert!(!verify_commitment(&digest, &SecretKey::from_bytes(flipped), &label));
        }

        #[test]
        fn prop_move_bit_flip_fails(key in any::<[u8; 32]>(), label in "[A-Za-z]{1,12}", bit in 0usize..96) {
            let key = SecretKey::from_bytes(key);
            let digest = commitment_digest(&key, &label);
            let mut bytes = label.into_bytes();
            let bit = bit % (bytes.len() * 8);
            bytes[bit / 8] ^= 1 << (bit % 8);
            // Hash raw bytes: a flipped label need not stay valid UTF-8
            prop_assert!(!verify_keyed_digest(key.as_bytes(), &bytes, &digest));
        }
    }
}
