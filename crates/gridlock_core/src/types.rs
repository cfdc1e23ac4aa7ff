//! Core value types: players and moves.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Label carried by a cell nobody has played yet.
pub const EMPTY_LABEL: &str = "";

/// A participant in the game.
///
/// The `color` is a display hint for presentation layers and plays no part
/// in any game logic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters, Serialize, Deserialize)]
pub struct Player {
    /// Mark placed on the board by this player (e.g. "X").
    label: String,
    /// Display color, opaque to the engine.
    color: String,
}

impl Player {
    /// Creates a new player.
    pub fn new(label: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            color: color.into(),
        }
    }

    /// The classic pairing: X in blue, O in red. X moves first.
    pub fn defaults() -> Vec<Player> {
        vec![Player::new("X", "blue"), Player::new("O", "red")]
    }
}

/// A mark at a board coordinate.
///
/// Unplayed cells hold a move with the empty label. Playing a cell replaces
/// its placeholder with a new `Move`; moves are never edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters, Serialize, Deserialize)]
pub struct Move {
    /// Zero-based row.
    row: usize,
    /// Zero-based column.
    col: usize,
    /// Label of the player occupying the cell, or [`EMPTY_LABEL`].
    label: String,
}

impl Move {
    /// Creates a move placing `label` at `(row, col)`.
    pub fn new(row: usize, col: usize, label: impl Into<String>) -> Self {
        Self {
            row,
            col,
            label: label.into(),
        }
    }

    /// Creates the unplayed placeholder for `(row, col)`.
    pub fn empty(row: usize, col: usize) -> Self {
        Self::new(row, col, EMPTY_LABEL)
    }

    /// Returns the `(row, col)` pair this move targets.
    pub fn coord(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// Returns true if this cell has been played.
    pub fn is_played(&self) -> bool {
        self.label != EMPTY_LABEL
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_played() {
            write!(f, "{} -> ({}, {})", self.label, self.row, self.col)
        } else {
            write!(f, "empty ({}, {})", self.row, self.col)
        }
    }
}
