//! Session Layer
//!
//! Round orchestration on top of the core and proof modules.
//!
//! - `arbiter`: Committed → Revealed state machine for one round
//! - `game`: caller-facing session with a current round
//! - `events`: ordered journal of published values

pub mod arbiter;
pub mod events;
pub mod game;

pub use arbiter::{verify_round, Arbiter, ArbiterError, ArbiterId, RoundHandle, RoundResult, RoundState};
pub use events::{EventJournal, RoundId, SessionEvent, SessionEventData};
pub use game::GameSession;
