//! Keyed Hashing
//!
//! HMAC-SHA256 over move labels. The digest is the only artifact of a round
//! that is public before the reveal.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Digest output length in bytes (256 bits).
pub const DIGEST_LEN: usize = 32;

/// Keyed hash output.
pub type Digest = [u8; DIGEST_LEN];

/// Compute `HMAC-SHA256(key, message)`.
pub fn keyed_digest(key: &[u8], message: &[u8]) -> Digest {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(key)
        .expect("HMAC accepts keys of any length");
    mac.update(message);
    mac.finalize().into_bytes().into()
}

/// Check `HMAC-SHA256(key, message) == expected` in constant time.
pub fn verify_keyed_digest(key: &[u8], message: &[u8], expected: &Digest) -> bool {
    let Ok(mut mac) = <HmacSha256 as Mac>::new_from_slice(key) else {
        return false;
    };
    mac.update(message);
    mac.verify_slice(expected).is_ok()
}

/// Lowercase hex encoding of a digest (64 characters).
pub fn digest_to_hex(digest: &Digest) -> String {
    hex::encode(digest)
}

/// Parse a hex digest.
pub fn digest_from_hex(hex_str: &str) -> Result<Digest, HexError> {
    decode_hex_array("digest", hex_str)
}

/// Decode a fixed-size hex field, naming the field in errors.
pub(crate) fn decode_hex_array<const N: usize>(
    field: &'static str,
    hex_str: &str,
) -> Result<[u8; N], HexError> {
    let bytes = hex::decode(hex_str.trim()).map_err(|_| HexError::InvalidHex { field })?;
    let got = bytes.len();
    bytes.try_into().map_err(|_| HexError::InvalidLength {
        field,
        expected: N,
        got,
    })
}

/// Malformed hex input for a key or digest.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HexError {
    /// Not valid hexadecimal.
    #[error("{field} is not valid hex")]
    InvalidHex {
        /// Which value failed to parse.
        field: &'static str,
    },

    /// Decoded to the wrong number of bytes.
    #[error("{field} must be {expected} bytes, got {got}")]
    InvalidLength {
        /// Which value failed to parse.
        field: &'static str,
        /// Required byte length.
        expected: usize,
        /// Decoded byte length.
        got: usize,
    },
}

// =============================================================================
// TESTS
// =============================================================================
