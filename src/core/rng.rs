//! Secure Randomness
//!
//! Every secret the arbiter holds (commitment keys, machine moves) is drawn
//! from an injected cryptographically secure source. Production code uses the
//! operating system generator; tests inject a seeded ChaCha stream.

use std::fmt;

use rand::rngs::OsRng;
use rand::{CryptoRng, Rng, RngCore};
use serde::{Deserialize, Serialize};

use super::hash::{decode_hex_array, HexError};

/// Commitment key length in bytes (256 bits).
pub const KEY_LEN: usize = 32;

/// A cryptographically secure random source.
///
/// Blanket-implemented for every `RngCore + CryptoRng`, so `OsRng`,
/// `ChaCha20Rng` and friends can all be injected directly. The `CryptoRng`
/// bound keeps non-cryptographic generators (e.g. `SmallRng`) out.
pub trait EntropySource: RngCore + CryptoRng {}

impl<R: RngCore + CryptoRng + ?Sized> EntropySource for R {}

/// Operating system entropy, the production source.
pub fn system_entropy() -> OsRng {
    OsRng
}

/// Draw a uniformly distributed index in `[0, n)`.
///
/// Uses rejection sampling, so every index is equally likely regardless of
/// `n`. Panics if `n == 0`; callers only pass validated move counts.
#[inline]
pub fn draw_index<R: EntropySource + ?Sized>(rng: &mut R, n: usize) -> usize {
    rng.gen_range(0..n)
}

/// 256-bit secret key for one commitment.
///
/// `Debug` is redacted so a key can never leak through logging.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct SecretKey([u8; KEY_LEN]);

impl SecretKey {
    /// Draw a fresh key from the given source.
    pub fn generate<R: EntropySource + ?Sized>(rng: &mut R) -> Self {
        let mut bytes = [0u8; KEY_LEN];
        rng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Wrap raw key bytes.
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Parse a lowercase or uppercase hex key.
    pub fn from_hex(hex_str: &str) -> Result<Self, HexError> {
        decode_hex_array("key", hex_str).map(Self)
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    /// Lowercase hex encoding (64 characters).
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(..)")
    }
}

impl From<SecretKey> for String {
    fn from(key: SecretKey) -> Self {
        key.to_hex()
    }
}

impl TryFrom<String> for SecretKey {
    type Error = HexError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn test_seeded_source_is_deterministic() {
        let mut rng1 = ChaCha20Rng::seed_from_u64(12345);
        let mut rng2 = ChaCha20Rng::seed_from_u64(12345);

        assert_eq!(SecretKey::generate(&mut rng1), SecretKey::generate(&mut rng2));
        for _ in 0..100 {
            assert_eq!(draw_index(&mut rng1, 7), draw_index(&mut rng2, 7));
        }
    }

    #[test]
    fn test_consecutive_keys_differ() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let a = SecretKey::generate(&mut rng);
        let b = SecretKey::generate(&mut rng);
        assert_ne!(a, b);
    }

    #[test]
    fn test_system_entropy_draws() {
        let mut rng = system_entropy();
        let key = SecretKey::generate(&mut rng);
        assert_eq!(key.to_hex().len(), KEY_LEN * 2);
        assert!(draw_index(&mut rng, 3) < 3);
    }

    #[test]
    fn test_draw_index_covers_range() {
        let mut rng = ChaCha20Rng::seed_from_u64(99);
        let mut counts = [0u32; 5];

        for _ in 0..5000 {
            counts[draw_index(&mut rng, 5)] += 1;
        }

        // Each bucket expects ~1000; a wide margin keeps this stable.
        for count in counts {
            assert!(count > 800 && count < 1200, "skewed bucket: {count}");
        }
    }

    #[test]
    fn test_key_hex_roundtrip() {
        let key = SecretKey::from_bytes([0xab; KEY_LEN]);
        let hex_str = key.to_hex();

        assert_eq!(hex_str, "ab".repeat(KEY_LEN));
        assert_eq!(SecretKey::from_hex(&hex_str).unwrap(), key);
        assert_eq!(SecretKey::from_hex(&hex_str.to_uppercase()).unwrap(), key);
    }

    #[test]
    fn test_key_debug_is_redacted() {
        let key = SecretKey::from_bytes([7; KEY_LEN]);
        assert_eq!(format!("{:?}", key), "SecretKey(..)");
    }
}
