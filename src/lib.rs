//! # Fairplay
//!
//! Provably fair N-move rock-paper-scissors. The computer commits to its move
//! with an HMAC before the player chooses, then reveals the key so the player
//! can check the commitment.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        FAIRPLAY                              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Primitives                                │
//! │  ├── moves.rs    - Validated move sets                       │
//! │  ├── rng.rs      - Injectable secure randomness, keys        │
//! │  └── hash.rs     - HMAC-SHA256 and hex codecs                │
//! │                                                              │
//! │  game/           - Rules (pure)                              │
//! │  └── table.rs    - Outcome table, cyclic adjacency rule      │
//! │                                                              │
//! │  proof/          - Fairness                                  │
//! │  ├── commitment.rs - Commit to the machine move              │
//! │  └── verify.rs   - Stateless check of a disclosure           │
//! │                                                              │
//! │  session/        - Orchestration                             │
//! │  ├── arbiter.rs  - Committed → Revealed round state machine  │
//! │  ├── game.rs     - begin_round / play_round / verify         │
//! │  └── events.rs   - Ordered journal of published values       │
//! │                                                              │
//! │  console/        - Terminal front end (binary only)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Fairness Guarantee
//!
//! - The digest of a round is returned before the round accepts a move
//! - The digest binds the **machine's** move under a fresh 256-bit key
//! - Key and machine move are only disclosed together with the outcome
//! - Anyone can recheck a disclosure with [`proof::verify`], no state needed
//!
//! ```
//! use fairplay::session::GameSession;
//! use fairplay::proof::verify;
//!
//! let mut session = GameSession::new(["Rock", "Paper", "Scissors"]).unwrap();
//! let hmac = session.begin_round();
//! let result = session.play_round("Rock").unwrap();
//! assert!(verify(&result.key_hex(), &result.machine_move, &hmac));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod console;
pub mod core;
pub mod game;
pub mod proof;
pub mod session;

// Re-export commonly used types
pub use crate::core::moves::{MoveSet, MoveSetError};
pub use crate::core::rng::{EntropySource, SecretKey};
pub use game::table::{build_outcome_table, Outcome, OutcomeTable};
pub use proof::commitment::{Commitment, CommitmentEngine, CommitmentError};
pub use session::{verify_round, Arbiter, ArbiterError, GameSession, RoundResult, RoundState};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
