//! Core primitives.
//!
//! Move sets, secure randomness and keyed hashing. Everything above this
//! layer is built from these three pieces.

pub mod moves;
pub mod rng;
pub mod hash;

// Re-export core types
pub use moves::{MoveSet, MoveSetError, MIN_MOVES};
pub use rng::{draw_index, system_entropy, EntropySource, SecretKey, KEY_LEN};
pub use hash::{keyed_digest, verify_keyed_digest, Digest, HexError, DIGEST_LEN};
