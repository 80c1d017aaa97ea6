//! Fairplay
//!
//! Provably fair N-move rock-paper-scissors against the computer.
//! Every round shows an HMAC of the computer's move before you choose,
//! then reveals the key so you can check it.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use fairplay::{
    console::{run_game, ConsoleConfig, ConsoleError, Prompter},
    proof::{check, CommitmentError},
    session::{ArbiterError, GameSession},
    VERSION,
};

const USAGE_EXAMPLE: &str = "fairplay Rock Paper Scissors";

#[derive(Parser, Debug)]
#[command(name = "fairplay", version)]
#[command(about = "Provably fair N-move rock-paper-scissors")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    play: PlayArgs,
}

#[derive(Args, Debug)]
struct PlayArgs {
    /// Moves in cyclic order (odd count, at least 3, unique).
    /// Prompts for them when omitted.
    moves: Vec<String>,

    /// Print each round result as a JSON line
    #[arg(long)]
    json: bool,

    /// Maximum length of interactively entered moves
    #[arg(long)]
    max_label_len: Option<usize>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a revealed key and move against a published HMAC
    Verify {
        /// Revealed key (hex)
        #[arg(long)]
        key: String,

        /// Computer move as shown after the round
        #[arg(long = "move")]
        machine_move: String,

        /// HMAC shown before the round (hex)
        #[arg(long)]
        hmac: String,
    },
}

fn main() -> ExitCode {
    // Logs go to stderr so they never interleave with prompts on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    info!("Fairplay v{}", VERSION);

    match cli.command {
        Some(Command::Verify {
            key,
            machine_move,
            hmac,
        }) => verify_command(&key, &machine_move, &hmac),
        None => play_command(cli.play),
    }
}

fn verify_command(key: &str, machine_move: &str, hmac: &str) -> ExitCode {
    match check(key, machine_move, hmac) {
        Ok(report) if report.valid => {
            println!("OK: HMAC matches, \"{}\" was committed before you moved", machine_move);
            ExitCode::SUCCESS
        }
        Ok(report) => {
            println!("{}", CommitmentError::DigestMismatch);
            println!("  published: {}", hex::encode(report.expected));
            println!("  computed:  {}", hex::encode(report.computed));
            ExitCode::from(2)
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(1)
        }
    }
}

fn play_command(args: PlayArgs) -> ExitCode {
    let mut config = ConsoleConfig::from_env();
    config.json |= args.json;
    if let Some(len) = args.max_label_len.filter(|len| *len > 0) {
        config.max_label_len = len;
    }

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());

    match play(args.moves, &mut prompter, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(PlayFailure::Setup(e)) => {
            eprintln!("error: {}", e);
            eprintln!("example: {}", USAGE_EXAMPLE);
            ExitCode::from(1)
        }
        Err(PlayFailure::Game(e @ ConsoleError::FairnessViolation { .. })) => {
            error!("{}", e);
            eprintln!("{}", e);
            ExitCode::from(2)
        }
        Err(PlayFailure::Game(e)) => {
            eprintln!("error: {}", e);
            ExitCode::from(1)
        }
    }
}

enum PlayFailure {
    Setup(anyhow::Error),
    Game(ConsoleError),
}

fn play<I: BufRead, O: Write>(
    moves: Vec<String>,
    prompter: &mut Prompter<I, O>,
    config: &ConsoleConfig,
) -> Result<(), PlayFailure> {
    let moves = if moves.is_empty() {
        prompter
            .read_moves(config)
            .map_err(|e| PlayFailure::Setup(e.into()))?
    } else {
        moves
    };

    let mut session = GameSession::new(moves).map_err(|e: ArbiterError| PlayFailure::Setup(e.into()))?;
    let played = run_game(&mut session, prompter, config).map_err(PlayFailure::Game)?;
    info!("Played {} rounds", played);
    Ok(())
}
