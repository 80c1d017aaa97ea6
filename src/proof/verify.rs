//! Verification API
//!
//! Fairness checks a player can run with nothing but the values disclosed
//! after a round: key, machine move and the digest shown beforehand.
//! No arbiter state is involved.

use tracing::warn;

use crate::core::hash::{digest_from_hex, keyed_digest, verify_keyed_digest, Digest};
use crate::core::rng::SecretKey;
use crate::proof::commitment::CommitmentError;

/// Outcome of recomputing a commitment digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationReport {
    /// Did the recomputed digest match?
    pub valid: bool,
    /// Digest published before the round.
    pub expected: Digest,
    /// Digest recomputed from the revealed key and move.
    pub computed: Digest,
}

impl VerificationReport {
    /// Turn a failed report into [`CommitmentError::DigestMismatch`].
    pub fn into_result(self) -> Result<Self, CommitmentError> {
        if self.valid {
            Ok(self)
        } else {
            Err(CommitmentError::DigestMismatch)
        }
    }
}

/// Recompute the digest from hex inputs and compare.
///
/// Fails only on malformed hex. A well-formed mismatch comes back as
/// `valid: false` so the caller can show both digests.
pub fn check(
    key_hex: &str,
    machine_move: &str,
    digest_hex: &str,
) -> Result<VerificationReport, CommitmentError> {
    let key = SecretKey::from_hex(key_hex)?;
    let expected = digest_from_hex(digest_hex)?;
    Ok(check_parsed(&key, machine_move, &expected))
}

/// [`check`] over already-decoded values.
pub fn check_parsed(key: &SecretKey, machine_move: &str, expected: &Digest) -> VerificationReport {
    let computed = keyed_digest(key.as_bytes(), machine_move.as_bytes());
    let valid = verify_keyed_digest(key.as_bytes(), machine_move.as_bytes(), expected);

    if !valid {
        warn!(
            "Digest mismatch for move {:?}: expected {}, computed {}",
            machine_move,
            hex::encode(&expected[..4]),
            hex::encode(&computed[..4])
        );
    }

    VerificationReport {
        valid,
        expected: *expected,
        computed,
    }
}

/// `true` only if the hex inputs decode and the digest matches exactly.
///
/// Malformed hex counts as a failed verification. Use [`check`] to tell the
/// two apart.
pub fn verify(key_hex: &str, machine_move: &str, digest_hex: &str) -> bool {
    check(key_hex, machine_move, digest_hex)
        .map(|report| report.valid)
        .unwrap_or(false)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::hash::{digest_to_hex, HexError};
    use crate::core::rng::KEY_LEN;

    fn disclosed(label: &str) -> (String, String) {
        let key = SecretKey::from_bytes([0x5a; KEY_LEN]);
        let digest = keyed_digest(key.as_bytes(), label.as_bytes());
        (key.to_hex(), digest_to_hex(&digest))
    }

    #[test]
    fn test_verify_matching_disclosure() {
        let (key_hex, digest_hex) = disclosed("Paper");
        assert!(verify(&key_hex, "Paper", &digest_hex));
    }

    #[test]
    fn test_verify_is_idempotent() {
        let (key_hex, digest_hex) = disclosed("Paper");
        let results: Vec<bool> = (0..5).map(|_| verify(&key_hex, "Paper", &digest_hex)).collect();
        assert!(results.iter().all(|r| *r));

        let results: Vec<bool> = (0..5).map(|_| verify(&key_hex, "Rock", &digest_hex)).collect();
        assert!(results.iter().all(|r| !*r));
    }

    #[test]
    fn test_wrong_move_reports_both_digests() {
        let (key_hex, digest_hex) = disclosed("Paper");
        let report = check(&key_hex, "Rock", &digest_hex).unwrap();

        assert!(!report.valid);
        assert_eq!(digest_to_hex(&report.expected), digest_hex);
        assert_ne!(report.expected, report.computed);
        assert_eq!(report.into_result(), Err(CommitmentError::DigestMismatch));
    }

    #[test]
    fn test_uppercase_hex_accepted() {
        let (key_hex, digest_hex) = disclosed("Scissors");
        assert!(verify(&key_hex.to_uppercase(), "Scissors", &digest_hex.to_uppercase()));
    }

    #[test]
    fn test_malformed_inputs() {
        let (key_hex, digest_hex) = disclosed("Rock");

        assert_eq!(
            check("not-hex", "Rock", &digest_hex),
            Err(CommitmentError::Malformed(HexError::InvalidHex { field: "key" }))
        );
        assert!(matches!(
            check(&key_hex, "Rock", &digest_hex[..10]),
            Err(CommitmentError::Malformed(HexError::InvalidLength { field: "digest", .. }))
        ));
        assert!(!verify("not-hex", "Rock", &digest_hex));
    }
}
