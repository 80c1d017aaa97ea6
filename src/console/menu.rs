//! Round menu.

use crate::core::moves::MoveSet;

/// What the player picked at the menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuChoice {
    /// Play the move at this zero-based index.
    Move(usize),
    /// Leave the game.
    Exit,
    /// Show the help table.
    Help,
}

/// Parse menu input: `1..=N` picks a move, `0` exits, `?` shows help.
///
/// Anything else is `None`; the caller re-prompts.
pub fn parse_choice(input: &str, move_count: usize) -> Option<MenuChoice> {
    match input.trim() {
        "?" => Some(MenuChoice::Help),
        "0" => Some(MenuChoice::Exit),
        other => other
            .parse::<usize>()
            .ok()
            .filter(|n| (1..=move_count).contains(n))
            .map(|n| MenuChoice::Move(n - 1)),
    }
}

/// Numbered menu listing.
pub fn render_menu(moves: &MoveSet) -> String {
    let mut out = String::from("Available moves:\n");
    for (index, label) in moves.iter().enumerate() {
        out.push_str(&format!("{} - {}\n", index + 1, label));
    }
    out.push_str("0 - exit\n");
    out.push_str("? - help\n");
    out
}

// =============================================================================
// TESTS
// =============================================================================
