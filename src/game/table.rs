//! Outcome Table
//!
//! N×N resolution matrix built from a move set's cyclic order.
//!
//! ## Adjacency rule
//!
//! ```text
//! T[i][j] = Draw   if i == j
//!         = Win    if j == (i + 1) mod N
//!         = Lose   otherwise
//! ```
//!
//! Each move beats only its cyclic successor and loses only to its cyclic
//! predecessor. For N = 3 that is classic rock-paper-scissors. For N ≥ 5 two
//! non-adjacent moves both resolve as `Lose` against each other; the rule is
//! kept literally rather than replaced with a balanced tournament.
//!
//! Lookups are always `T[human][machine]`, i.e. the human's perspective.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::moves::MoveSet;

/// Result of a round from the human player's perspective.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Human beat the machine.
    Win,
    /// Machine beat the human.
    Lose,
    /// Same move.
    Draw,
}

impl Outcome {
    /// Display label: `"Win"`, `"Lose"` or `"Draw"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Win => "Win",
            Outcome::Lose => "Lose",
            Outcome::Draw => "Draw",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable resolution matrix, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutcomeTable {
    size: usize,
    cells: Vec<Outcome>,
}

impl OutcomeTable {
    /// Build the table for a validated move set.
    pub fn build(moves: &MoveSet) -> Self {
        Self::with_size(moves.len())
    }

    fn with_size(size: usize) -> Self {
        let mut cells = Vec::with_capacity(size * size);
        for i in 0..size {
            for j in 0..size {
                cells.push(classify(i, j, size));
            }
        }
        Self { size, cells }
    }

    /// Number of moves (rows and columns).
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// `T[human][machine]`.
    ///
    /// # Panics
    /// Panics if either index is out of range.
    #[inline]
    pub fn resolve(&self, human: usize, machine: usize) -> Outcome {
        assert!(
            human < self.size && machine < self.size,
            "index ({}, {}) outside {}x{} table",
            human,
            machine,
            self.size,
            self.size
        );
        self.cells[human * self.size + machine]
    }

    /// Checked lookup.
    #[inline]
    pub fn get(&self, human: usize, machine: usize) -> Option<Outcome> {
        if human < self.size && machine < self.size {
            Some(self.cells[human * self.size + machine])
        } else {
            None
        }
    }

    /// Iterate rows in move order.
    pub fn rows(&self) -> impl Iterator<Item = &[Outcome]> {
        self.cells.chunks(self.size)
    }
}

#[inline]
fn classify(i: usize, j: usize, size: usize) -> Outcome {
    if i == j {
        Outcome::Draw
    } else if j == (i + 1) % size {
        Outcome::Win
    } else {
        Outcome::Lose
    }
}

/// Build the table for a move set.
pub fn build_outcome_table(moves: &MoveSet) -> OutcomeTable {
    OutcomeTable::build(moves)
}

// =============================================================================
// TESTS
// =============================================================================
