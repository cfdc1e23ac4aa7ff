//! Gridlock - terminal front end for the grid game engine.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod config;
mod terminal;

use anyhow::{Result, bail};
use clap::Parser;
use cli::{Cli, Command};
use config::GameConfig;
use gridlock_core::winning_lines;
use std::path::Path;
use terminal::Session;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    initialize_tracing();

    match cli.command {
        Command::Play {
            config,
            size,
            plain,
        } => run_play(&config, size, plain),
        Command::Lines { size } => run_lines(size),
    }
}

/// Logs go to stderr so they never interleave with the board on stdout.
fn initialize_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,gridlock=info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Play an interactive game on stdin/stdout
#[instrument(skip(config_path), fields(config_path = %config_path.display()))]
fn run_play(config_path: &Path, size: Option<usize>, plain: bool) -> Result<()> {
    let config = load_config(config_path, size, plain)?;
    let game = config.build_game()?;
    info!(
        board_size = game.board_size(),
        players = game.players().len(),
        "Starting game"
    );

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut session = Session::new(game, stdin.lock(), stdout.lock(), *config.color());
    session.run()?;
    info!(status = %session.game().status(), "Game finished");
    Ok(())
}

/// Print every winning line for a board size
#[instrument]
fn run_lines(size: usize) -> Result<()> {
    if size == 0 {
        bail!("Board size must be at least 1");
    }
    for (index, line) in winning_lines(size).iter().enumerate() {
        println!(
            "{:>13}: {}",
            terminal::describe_line(index, size),
            terminal::format_line(line)
        );
    }
    Ok(())
}

#[instrument(skip(config_path))]
fn load_config(config_path: &Path, size: Option<usize>, plain: bool) -> Result<GameConfig> {
    info!("Loading game configuration");

    let mut config = if config_path.exists() {
        GameConfig::from_file(config_path)?
    } else {
        info!(
            "Config file not found at {}, using defaults",
            config_path.display()
        );
        GameConfig::default()
    };

    if let Some(size) = size {
        info!(size, "Overriding board size");
        config = config.with_board_size(size);
    }
    if plain {
        config = config.with_color(false);
    }

    Ok(config)
}
