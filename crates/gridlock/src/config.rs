//! Game configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use gridlock_core::{Game, Player};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Settings for a game session.
///
/// Every field is optional in the file; missing ones fall back to a 3×3
/// board with X (blue) against O (red).
///
/// ```toml
/// board_size = 4
/// color = false
///
/// [[players]]
/// label = "X"
/// color = "blue"
///
/// [[players]]
/// label = "O"
/// color = "red"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Side length of the square board.
    #[serde(default = "default_board_size")]
    board_size: usize,

    /// Players in turn order.
    #[serde(default = "Player::defaults")]
    players: Vec<Player>,

    /// Render labels in their player's color.
    #[serde(default = "default_color")]
    color: bool,
}

fn default_board_size() -> usize {
    3
}

fn default_color() -> bool {
    true
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: default_board_size(),
            players: Player::defaults(),
            color: default_color(),
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(
            board_size = config.board_size,
            players = config.players.len(),
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Overrides the board size.
    pub fn with_board_size(mut self, board_size: usize) -> Self {
        self.board_size = board_size;
        self
    }

    /// Overrides color output.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Builds a fresh game from these settings.
    #[instrument(skip(self), fields(board_size = self.board_size, players = self.players.len()))]
    pub fn build_game(&self) -> Result<Game, ConfigError> {
        Game::new(self.players.clone(), self.board_size)
            .map_err(|e| ConfigError::new(format!("Invalid game settings: {}", e)))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
