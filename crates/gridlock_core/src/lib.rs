//! Gridlock core - a presentation-agnostic grid game engine.
//!
//! The engine plays generalized tic-tac-toe on an N×N board with any number
//! of players (at least two) taking turns in a fixed rotation.
//!
//! # Architecture
//!
//! - **Types**: plain value types for players and moves
//! - **Lines**: the winning-line table (rows, columns, both diagonals)
//! - **Game**: board ownership, turn cursor, win and tie detection
//! - **Invariants**: checkable properties of a game in any state
//!
//! # Example
//!
//! ```
//! use gridlock_core::{Game, Move, Player};
//!
//! # fn example() -> Result<(), gridlock_core::EngineError> {
//! let mut game = Game::new(Player::defaults(), 3)?;
//! let mv = Move::new(1, 1, game.current_player().label().as_str());
//! if game.is_valid_move(&mv) {
//!     game.process_move(mv)?;
//!     if !game.has_winner() && !game.is_tied() {
//!         game.toggle_player();
//!     }
//! }
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod game;
mod invariants;
mod lines;
mod types;

pub use error::EngineError;
pub use game::{Game, GameStatus};
pub use invariants::{
    BoardComplete, GameInvariants, Invariant, InvariantSet, InvariantViolation, LineTableShape,
    WinnerConsistent,
};
pub use lines::{Coord, Line, winning_lines};
pub use types::{EMPTY_LABEL, Move, Player};
