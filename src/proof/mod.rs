//! Fairness Proofs
//!
//! Commit-then-reveal over the machine's move.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    PROOF SYSTEM                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  commitment.rs   - Draw move + key, HMAC commitment         │
//! │  verify.rs       - Stateless check of a disclosed round     │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod commitment;
pub mod verify;

// Re-export key types
pub use commitment::{
    commitment_digest, verify_commitment, Commitment, CommitmentEngine, CommitmentError,
    MoveReveal,
};
pub use verify::{check, check_parsed, verify, VerificationReport};
