//! Move Sets
//!
//! The ordered list of move labels a session is played with.
//! Order defines cyclic adjacency, so it is preserved exactly as supplied.

use std::collections::BTreeSet;
use std::ops::Index;

use serde::{Deserialize, Serialize};

/// Smallest playable move count.
pub const MIN_MOVES: usize = 3;

/// Validated, immutable move list.
///
/// # Invariants
///
/// - length is odd and at least [`MIN_MOVES`]
/// - every label is non-empty
/// - no two labels are equal (case-sensitive)
///
/// # Example
///
/// ```
/// use fairplay::core::moves::MoveSet;
///
/// let moves = MoveSet::new(["Rock", "Paper", "Scissors"]).unwrap();
/// assert_eq!(moves.len(), 3);
/// assert_eq!(moves.index_of("Paper"), Some(1));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct MoveSet {
    labels: Vec<String>,
}

impl MoveSet {
    /// Validate and build a move set.
    pub fn new<I, S>(labels: I) -> Result<Self, MoveSetError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        validate(&labels)?;
        Ok(Self { labels })
    }

    /// Number of moves (N).
    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always false for a validated set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label at a position.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// Position of a label (exact, case-sensitive match).
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// Check membership (exact, case-sensitive match).
    pub fn contains(&self, label: &str) -> bool {
        self.index_of(label).is_some()
    }

    /// Iterate labels in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    /// Borrow all labels.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Session title, e.g. `Rock-Paper-Scissors`.
    pub fn title(&self) -> String {
        self.labels.join("-").replace(' ', "")
    }
}

impl Index<usize> for MoveSet {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        &self.labels[index]
    }
}

impl TryFrom<Vec<String>> for MoveSet {
    type Error = MoveSetError;

    fn try_from(labels: Vec<String>) -> Result<Self, Self::Error> {
        validate(&labels)?;
        Ok(Self { labels })
    }
}

impl From<MoveSet> for Vec<String> {
    fn from(moves: MoveSet) -> Self {
        moves.labels
    }
}

fn validate(labels: &[String]) -> Result<(), MoveSetError> {
    let count = labels.len();
    if count < MIN_MOVES {
        return Err(MoveSetError::TooFewMoves { count });
    }
    if count % 2 == 0 {
        return Err(MoveSetError::EvenMoveCount { count });
    }

    let mut seen = BTreeSet::new();
    for (index, label) in labels.iter().enumerate() {
        if label.is_empty() {
            return Err(MoveSetError::EmptyLabel { index });
        }
        if !seen.insert(label.as_str()) {
            return Err(MoveSetError::DuplicateLabel {
                label: label.clone(),
            });
        }
    }

    Ok(())
}

/// Move list shape violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveSetError {
    /// Fewer than three moves.
    #[error("at least {} moves are required, got {count}", MIN_MOVES)]
    TooFewMoves {
        /// Moves supplied.
        count: usize,
    },

    /// Even number of moves.
    #[error("an odd number of moves is required, got {count}")]
    EvenMoveCount {
        /// Moves supplied.
        count: usize,
    },

    /// A label is the empty string.
    #[error("move #{} is empty", .index + 1)]
    EmptyLabel {
        /// Zero-based position of the empty label.
        index: usize,
    },

    /// The same label appears twice.
    #[error("moves must be unique, \"{label}\" appears more than once")]
    DuplicateLabel {
        /// The repeated label.
        label: String,
    },
}

// =============================================================================
// TESTS
// =============================================================================
