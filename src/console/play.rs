//! Interactive game loop.
//!
//! Each round publishes its HMAC before the menu is shown, then reveals the
//! computer's move and key once the player has chosen.

use std::io::{self, BufRead, Write};

use tracing::{info, warn};

use crate::console::config::ConsoleConfig;
use crate::console::entry::Prompter;
use crate::console::help::render_help_table;
use crate::console::menu::{parse_choice, render_menu, MenuChoice};
use crate::core::rng::EntropySource;
use crate::session::arbiter::{ArbiterError, RoundResult};
use crate::session::game::GameSession;

/// Console loop errors.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    /// Terminal I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The session refused an operation.
    #[error(transparent)]
    Arbiter(#[from] ArbiterError),

    /// A revealed round did not match its published HMAC.
    #[error("FAIRNESS VIOLATION: round with HMAC {digest_hex} failed verification")]
    FairnessViolation {
        /// HMAC shown before the round.
        digest_hex: String,
    },

    /// JSON output failed.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Play rounds until the player exits or input ends.
///
/// Returns the number of completed rounds.
pub fn run_game<R, I, O>(
    session: &mut GameSession<R>,
    prompter: &mut Prompter<I, O>,
    config: &ConsoleConfig,
) -> Result<usize, ConsoleError>
where
    R: EntropySource,
    I: BufRead,
    O: Write,
{
    let mut played = 0;
    writeln!(prompter.output(), "Welcome to {}!", session.moves().title())?;

    loop {
        let digest_hex = session.begin_round();
        writeln!(prompter.output(), "\nHMAC: {}", digest_hex)?;

        let label = match choose_move(session, prompter)? {
            Some(label) => label,
            None => {
                writeln!(prompter.output(), "Goodbye!")?;
                info!("Session ended after {} rounds", played);
                return Ok(played);
            }
        };

        let result = session.play_round(&label)?;
        report(prompter.output(), &result, config)?;

        if let Err(e) = result.verify() {
            warn!("Round with HMAC {} failed verification: {}", digest_hex, e);
            return Err(ConsoleError::FairnessViolation { digest_hex });
        }
        played += 1;
    }
}

/// Show the menu until the player picks a move (`Some`) or leaves (`None`).
fn choose_move<R, I, O>(
    session: &GameSession<R>,
    prompter: &mut Prompter<I, O>,
) -> Result<Option<String>, ConsoleError>
where
    R: EntropySource,
    I: BufRead,
    O: Write,
{
    loop {
        write!(prompter.output(), "{}", render_menu(session.moves()))?;
        let Some(answer) = prompter.ask("Enter your move: ")? else {
            return Ok(None);
        };

        match parse_choice(&answer, session.moves().len()) {
            Some(MenuChoice::Move(index)) => return Ok(Some(session.moves()[index].to_string())),
            Some(MenuChoice::Exit) => return Ok(None),
            Some(MenuChoice::Help) => {
                let table = render_help_table(session.moves(), session.table());
                write!(prompter.output(), "{}", table)?;
            }
            None => writeln!(prompter.output(), "Invalid input, please try again.")?,
        }
    }
}

fn report<W: Write>(out: &mut W, result: &RoundResult, config: &ConsoleConfig) -> Result<(), ConsoleError> {
    if config.json {
        writeln!(out, "{}", serde_json::to_string(result)?)?;
        return Ok(());
    }

    writeln!(out, "Your move: {}", result.human_move)?;
    writeln!(out, "Computer move: {}", result.machine_move)?;
    writeln!(out, "Result: {}", result.outcome)?;
    writeln!(out, "HMAC key: {}", result.key_hex())?;
    writeln!(out, "HMAC: {}", result.digest_hex())?;
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
