//! Command-line interface for strictly_arbiter.

use clap::{Parser, Subcommand};

/// Strictly Arbiter - tic-tac-toe against a heuristic opponent
#[derive(Parser, Debug)]
#[command(name = "strictly_arbiter")]
#[command(about = "Play tic-tac-toe against a heuristic opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a game on stdin/stdout
    Play {
        /// Path to arbiter config (TOML). Defaults apply if it does not exist.
        #[arg(short, long, default_value = "arbiter.toml")]
        config: std::path::PathBuf,

        /// Override the opponent reply delay in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Seed the opponent's random fallback
        #[arg(long)]
        seed: Option<u64>,

        /// Print each state change as a line of JSON instead of a board
        #[arg(long)]
        json: bool,
    },
}
