//! Fair Dice
//!
//! Terminal dice game against the computer where every roll is a
//! commit-reveal coin flip the user can verify.

mod table;
mod terminal;
mod transcript;

use anyhow::Result;
use clap::Parser;
use fairdice_core::protocol::{OutcomeMessage, TranscriptEntry};
use fairdice_core::{parse_dice, DieStrategy, GameConfig, GameProtocol, OsEntropy, Outcome};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use terminal::TerminalCounterpart;
use tracing::info;
use tracing_subscriber::EnvFilter;
use transcript::FileTranscript;

const USAGE_EXAMPLE: &str = "fairdice 2,2,4,4,9,9 1,1,6,6,8,8 3,3,5,5,7,7";

#[derive(Parser)]
#[command(name = "fairdice")]
#[command(about = "Provably fair dice game: every roll is a commit-reveal coin flip")]
#[command(version)]
struct Cli {
    /// Dice, each as six comma-separated integers (e.g. 2,2,4,4,9,9)
    dice: Vec<String>,

    /// How the computer picks its die when it selects second
    #[arg(long, env = "FAIRDICE_STRATEGY", default_value = "random")]
    strategy: DieStrategy,

    /// Minimum number of dice required to start a game
    #[arg(long, env = "FAIRDICE_MIN_DICE", default_value_t = fairdice_core::games::MIN_DICE)]
    min_dice: usize,

    /// Append every commitment and reveal as JSON lines to this file
    #[arg(long, env = "FAIRDICE_TRANSCRIPT")]
    transcript: Option<PathBuf>,

    /// Skip checking reveals against their published HMAC
    #[arg(long)]
    no_verify: bool,
}

fn main() -> Result<ExitCode> {
    // Logs go to stderr so they never interleave with the game on stdout
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = GameConfig {
        min_dice: cli.min_dice,
        strategy: cli.strategy,
        verify_reveals: !cli.no_verify,
    };

    let dice = match parse_dice(&cli.dice, config.min_dice) {
        Ok(dice) => dice,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Usage example: {}", USAGE_EXAMPLE);
            return Ok(ExitCode::FAILURE);
        }
    };

    let transcript = cli.transcript.as_deref().map(FileTranscript::open).transpose()?;
    let mut counterpart = TerminalCounterpart::new(io::stdin().lock(), io::stdout(), transcript);

    let mut game = match GameProtocol::new(dice, config, OsEntropy) {
        Ok(game) => game,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Usage example: {}", USAGE_EXAMPLE);
            return Ok(ExitCode::FAILURE);
        }
    };
    info!(game_id = %game.game_id(), "starting game");

    match game.run(&mut counterpart)? {
        Outcome::Finished(report) => {
            if let Some(transcript) = counterpart.transcript_mut() {
                transcript.record(&TranscriptEntry::Outcome(OutcomeMessage {
                    game_id: report.game_id,
                    computer_face: report.computer_face,
                    user_face: report.user_face,
                    result: report.result,
                }))?;
            }
            info!(game_id = %report.game_id, result = %report.result, "game finished");
        }
        Outcome::Cancelled { at } => {
            info!(state = ?at, "game cancelled by user");
        }
    }

    Ok(ExitCode::SUCCESS)
}
