//! Game Rules
//!
//! Pure resolution logic. No randomness, no I/O.
//!
//! - `table`: outcome matrix and the cyclic adjacency rule

pub mod table;

pub use table::{build_outcome_table, Outcome, OutcomeTable};
