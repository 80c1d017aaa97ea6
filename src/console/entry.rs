//! Interactive input.
//!
//! Line-oriented prompting over any `BufRead`/`Write` pair, so the whole
//! dialogue can be driven from a byte buffer in tests.

use std::io::{self, BufRead, Write};

use crate::console::config::ConsoleConfig;
use crate::core::moves::MIN_MOVES;

/// Prompts on `output`, reads answers from `input`.
pub struct Prompter<I, O> {
    input: I,
    output: O,
}

impl<I: BufRead, O: Write> Prompter<I, O> {
    /// Wrap an input/output pair.
    pub fn new(input: I, output: O) -> Self {
        Self { input, output }
    }

    /// Writer the prompts go to.
    pub fn output(&mut self) -> &mut O {
        &mut self.output
    }

    /// Print `prompt` and read one line without its terminator.
    ///
    /// Returns `None` at end of input.
    pub fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Ask for moves until a complete, unique list has been entered.
    ///
    /// First asks for an odd count greater than one, then for each label.
    /// Labels are normalized per `config`; empty and repeated labels are
    /// refused and asked for again.
    pub fn read_moves(&mut self, config: &ConsoleConfig) -> io::Result<Vec<String>> {
        let count = loop {
            let answer = self.require("Enter the number of moves (odd, at least 3): ")?;
            match answer.trim().parse::<usize>() {
                Ok(n) if n >= MIN_MOVES && n % 2 == 1 => break n,
                _ => writeln!(
                    self.output,
                    "Invalid number of moves. Enter an odd number of at least {}.",
                    MIN_MOVES
                )?,
            }
        };

        let mut moves: Vec<String> = Vec::with_capacity(count);
        while moves.len() < count {
            let raw = self.require(&format!("Enter move {} of {}: ", moves.len() + 1, count))?;
            let label = normalize_label(&raw, config);

            if label.is_empty() {
                writeln!(self.output, "Move cannot be empty. Please enter a valid move.")?;
            } else if moves.contains(&label) {
                writeln!(
                    self.output,
                    "Move \"{}\" has already been entered. Please enter a different move.",
                    label
                )?;
            } else {
                moves.push(label);
            }
        }

        Ok(moves)
    }

    fn require(&mut self, prompt: &str) -> io::Result<String> {
        self.ask(prompt)?
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"))
    }
}

/// Normalize an interactively typed label.
///
/// Trims, optionally removes all spaces, and cuts to `max_label_len`
/// characters.
pub fn normalize_label(raw: &str, config: &ConsoleConfig) -> String {
    let trimmed = raw.trim();
    let chars = trimmed.chars().filter(|c| !(config.strip_whitespace && *c == ' '));
    chars.take(config.max_label_len).collect()
}

// =============================================================================
// TESTS
// =============================================================================
