//! Command-line interface for gridlock.

use clap::{Parser, Subcommand};

/// Gridlock - N-in-a-row on an N×N board
#[derive(Parser, Debug)]
#[command(name = "gridlock")]
#[command(about = "Play generalized tic-tac-toe in the terminal", long_about = None)]
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
        /// Path to game config (TOML). Defaults apply if the file is missing.
        #[arg(short, long, default_value = "gridlock.toml")]
        config: std::path::PathBuf,

        /// Board size, overriding the config file
        #[arg(short, long)]
        size: Option<usize>,

        /// Disable colored labels
        #[arg(long)]
        plain: bool,
    },

    /// Print the winning-line table for a board size
    Lines {
        /// Board size
        #[arg(short, long, default_value = "3")]
        size: usize,
    },
}
