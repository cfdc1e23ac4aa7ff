//! Checkable properties of a game.
//!
//! Each invariant holds for every reachable engine state. The engine checks
//! the full set in debug builds after every mutation, and tests can check
//! them one by one.

use crate::game::Game;
use crate::lines::Coord;
use std::collections::HashSet;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants checked together.
///
/// Implemented for tuples of invariants.
pub trait InvariantSet<S> {
    /// Checks every invariant in the set, collecting all violations.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let violations: Vec<_> = [
            (I1::holds(state), I1::description()),
            (I2::holds(state), I2::description()),
            (I3::holds(state), I3::description()),
        ]
        .into_iter()
        .filter(|(holds, _)| !holds)
        .map(|(_, description)| InvariantViolation::new(description))
        .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Invariant: every coordinate has exactly one cell, and each cell carries
/// its own coordinates.
pub struct BoardComplete;

impl Invariant<Game> for BoardComplete {
    fn holds(game: &Game) -> bool {
        let size = game.board_size();
        game.cells().len() == size * size
            && game
                .cells()
                .iter()
                .enumerate()
                .all(|(i, cell)| cell.coord() == (i / size, i % size))
    }

    fn description() -> &'static str {
        "Board holds one cell per coordinate, in row-major order"
    }
}

/// Invariant: the line table has `2N + 2` lines of `N` distinct in-range
/// coordinates.
pub struct LineTableShape;

impl Invariant<Game> for LineTableShape {
    fn holds(game: &Game) -> bool {
        let size = game.board_size();
        let lines = game.winning_lines();
        lines.len() == 2 * size + 2
            && lines.iter().all(|line| {
                let distinct: HashSet<&Coord> = line.iter().collect();
                line.len() == size
                    && distinct.len() == size
                    && line.iter().all(|&(row, col)| row < size && col < size)
            })
    }

    fn description() -> &'static str {
        "Line table has 2N+2 lines of N distinct on-board coordinates"
    }
}

/// Invariant: the winner flag and the winning combo agree.
///
/// With a winner, the combo is a line from the table whose cells share one
/// non-empty label. Without one, the combo is empty.
pub struct WinnerConsistent;

impl Invariant<Game> for WinnerConsistent {
    fn holds(game: &Game) -> bool {
        let combo = game.winner_combo();
        if game.has_winner() {
            game.winning_lines().iter().any(|line| line == combo)
                && game.line_owner(combo).is_some()
        } else {
            combo.is_empty()
        }
    }

    fn description() -> &'static str {
        "Winner flag matches a completed line in the winning combo"
    }
}

/// All engine invariants as a composable set.
pub type GameInvariants = (BoardComplete, LineTableShape, WinnerConsistent);
