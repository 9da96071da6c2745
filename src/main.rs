//! Strictly Arbiter - terminal harness
//!
//! Wraps the move arbiter in a line-oriented stdin/stdout loop.

#![warn(missing_docs)]

mod cli;
mod harness;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use strictly_arbiter::{ArbiterConfig, MoveArbiter};
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    initialize_tracing();

    match cli.command {
        Command::Play {
            config,
            delay_ms,
            seed,
            json,
        } => run_play(config, delay_ms, seed, json).await,
    }
}

/// Run an interactive game
#[instrument(skip_all, fields(config_path = %config.display()))]
async fn run_play(
    config: std::path::PathBuf,
    delay_ms: Option<u64>,
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    let mut config = ArbiterConfig::load_or_default(&config)?;
    if let Some(delay_ms) = delay_ms {
        info!(delay_ms, "Overriding reply delay");
        config = config.with_reply_delay_ms(delay_ms);
    }
    if let Some(seed) = seed {
        info!(seed, "Overriding seed");
        config = config.with_seed(seed);
    }

    let arbiter = MoveArbiter::new(&config);
    info!("Game ready");
    harness::run(arbiter, json).await
}

fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,strictly_arbiter=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
