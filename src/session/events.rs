//! Session Events
//!
//! Ordered journal of what a session has published. Sequence numbers are
//! strictly increasing, so the journal shows that a round's digest went out
//! before its key and machine move.

use serde::{Deserialize, Serialize};

use crate::game::table::Outcome;

/// Unique round identifier.
pub type RoundId = [u8; 16];

/// Event payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEventData {
    /// Commitment digest published; the round awaits a human move.
    Committed {
        /// Digest as lowercase hex.
        digest_hex: String,
    },

    /// Human move accepted; key and machine move disclosed.
    Revealed {
        /// Human's move.
        human_move: String,
        /// Committed machine move.
        machine_move: String,
        /// Revealed key as lowercase hex.
        key_hex: String,
        /// Result for the human.
        outcome: Outcome,
    },

    /// Round dropped while still committed. Nothing was revealed.
    Abandoned,
}

/// A journal entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionEvent {
    /// Position in the journal.
    pub sequence: u64,
    /// Round the event belongs to.
    pub round_id: RoundId,
    /// What happened.
    pub data: SessionEventData,
}

/// Append-only event log.
#[derive(Debug, Default)]
pub struct EventJournal {
    next_sequence: u64,
    events: Vec<SessionEvent>,
}

impl EventJournal {
    /// Empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event, returning its sequence number.
    pub fn record(&mut self, round_id: RoundId, data: SessionEventData) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.events.push(SessionEvent {
            sequence,
            round_id,
            data,
        });
        sequence
    }

    /// All events, oldest first.
    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================
