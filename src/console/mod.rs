//! Console Front End
//!
//! Terminal interaction for the `fairplay` binary.
//! Talks to the game only through [`crate::session::GameSession`].

pub mod config;
pub mod entry;
pub mod help;
pub mod menu;
pub mod play;

pub use config::ConsoleConfig;
pub use entry::{normalize_label, Prompter};
pub use help::render_help_table;
pub use menu::{parse_choice, render_menu, MenuChoice};
pub use play::{run_game, ConsoleError};
