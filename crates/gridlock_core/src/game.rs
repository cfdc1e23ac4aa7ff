//! The game engine: board ownership, turn rotation, win and tie detection.

use crate::error::EngineError;
use crate::invariants::{GameInvariants, InvariantSet};
use crate::lines::{Coord, Line, winning_lines};
use crate::types::{EMPTY_LABEL, Move, Player};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Coarse phase of a game, derived from the engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum GameStatus {
    /// Moves can still be made.
    #[display("in progress")]
    InProgress,
    /// A line has been completed. Terminal until [`Game::reset`].
    #[display("won")]
    Won,
    /// The board is full with no completed line. Terminal until [`Game::reset`].
    #[display("tied")]
    Tied,
}

/// Grid game engine.
///
/// Owns an `N×N` board, the winning-line table for `N`, and a cursor into a
/// fixed rotation of players.
///
/// # Caller contract
///
/// The engine does not check that a move's label belongs to
/// [`current_player`](Self::current_player), and it never advances the turn
/// on its own. A presentation layer is expected to:
///
/// 1. build a [`Move`] labelled with the current player,
/// 2. confirm it with [`is_valid_move`](Self::is_valid_move),
/// 3. apply it with [`process_move`](Self::process_move),
/// 4. check [`is_tied`](Self::is_tied) and [`has_winner`](Self::has_winner),
/// 5. call [`toggle_player`](Self::toggle_player) only if neither holds.
#[derive(Debug, Clone)]
pub struct Game {
    players: Vec<Player>,
    cursor: usize,
    size: usize,
    /// Row-major; cell `(r, c)` lives at `r * size + c`.
    pub(crate) board: Vec<Move>,
    pub(crate) lines: Vec<Line>,
    pub(crate) has_winner: bool,
    pub(crate) winner_combo: Line,
}

impl Game {
    /// Creates a game for `players` on a `size × size` board.
    ///
    /// The first player moves first.
    ///
    /// # Errors
    ///
    /// Fails if there are fewer than two players, if any label is empty or
    /// repeated, or if `size` is zero.
    #[instrument(skip(players), fields(player_count = players.len()))]
    pub fn new(players: Vec<Player>, size: usize) -> Result<Self, EngineError> {
        if players.len() < 2 {
            warn!(count = players.len(), "Rejected game: too few players");
            return Err(EngineError::TooFewPlayers {
                count: players.len(),
            });
        }
        if size == 0 {
            warn!("Rejected game: empty board");
            return Err(EngineError::InvalidBoardSize { size });
        }
        for (i, player) in players.iter().enumerate() {
            if player.label() == EMPTY_LABEL {
                warn!(index = i, "Rejected game: empty player label");
                return Err(EngineError::EmptyLabel);
            }
            if players[..i].iter().any(|p| p.label() == player.label()) {
                warn!(label = %player.label(), "Rejected game: duplicate label");
                return Err(EngineError::DuplicateLabel {
                    label: player.label().clone(),
                });
            }
        }

        let game = Self::build(players, size);
        info!(first = %game.current_player().label(), "Game created");
        Ok(game)
    }

    fn build(players: Vec<Player>, size: usize) -> Self {
        Self {
            players,
            cursor: 0,
            size,
            board: empty_board(size),
            lines: winning_lines(size),
            has_winner: false,
            winner_combo: Vec::new(),
        }
    }

    /// Returns the player whose turn it is.
    pub fn current_player(&self) -> &Player {
        &self.players[self.cursor]
    }

    /// Returns the players in turn order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Returns `N` for an `N×N` board.
    pub fn board_size(&self) -> usize {
        self.size
    }

    /// Returns the move held at `(row, col)`, or `None` off the board.
    pub fn cell(&self, row: usize, col: usize) -> Option<&Move> {
        self.index(row, col).map(|i| &self.board[i])
    }

    /// Returns every cell in row-major order.
    pub fn cells(&self) -> &[Move] {
        &self.board
    }

    /// Returns the winning-line table, in scan order.
    pub fn winning_lines(&self) -> &[Line] {
        &self.lines
    }

    /// Returns the completed line, or an empty slice if nobody has won.
    pub fn winner_combo(&self) -> &[Coord] {
        &self.winner_combo
    }

    /// Returns true once a line has been completed.
    pub fn has_winner(&self) -> bool {
        self.has_winner
    }

    /// Returns true if the board is full and nobody has won.
    #[instrument(skip(self))]
    pub fn is_tied(&self) -> bool {
        !self.has_winner && self.board.iter().all(Move::is_played)
    }

    /// Returns the current phase of the game.
    pub fn status(&self) -> GameStatus {
        if self.has_winner {
            GameStatus::Won
        } else if self.is_tied() {
            GameStatus::Tied
        } else {
            GameStatus::InProgress
        }
    }

    /// Returns the label shared by every cell of `line`, if the line is
    /// complete.
    ///
    /// Coordinates outside the board count as empty.
    pub fn line_owner(&self, line: &[Coord]) -> Option<&str> {
        let mut labels = line
            .iter()
            .map(|&(row, col)| self.cell(row, col).map_or(EMPTY_LABEL, |m| m.label().as_str()));
        match labels.next() {
            Some(first) if first != EMPTY_LABEL => labels.all(|l| l == first).then_some(first),
            _ => None,
        }
    }

    /// Returns true if `mv` may be played.
    ///
    /// A move is valid when nobody has won yet and the target cell is still
    /// empty. Coordinates off the board are never valid. The move's label is
    /// not compared with the current player.
    #[instrument(skip(self), fields(mv = %mv))]
    pub fn is_valid_move(&self, mv: &Move) -> bool {
        let valid = !self.has_winner
            && self
                .cell(*mv.row(), *mv.col())
                .is_some_and(|cell| !cell.is_played());
        debug!(valid, "Move checked");
        valid
    }

    /// Places `mv` on the board and checks for a completed line.
    ///
    /// Lines are scanned in table order and the scan stops at the first
    /// complete one, which becomes the [`winner_combo`](Self::winner_combo).
    /// The turn is not advanced; see [`toggle_player`](Self::toggle_player).
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::OutOfBounds`], [`EngineError::GameOver`] or
    /// [`EngineError::CellOccupied`] for a move that
    /// [`is_valid_move`](Self::is_valid_move) would reject. The game is left
    /// untouched in that case.
    #[instrument(skip(self), fields(mv = %mv))]
    pub fn process_move(&mut self, mv: Move) -> Result<(), EngineError> {
        let (row, col) = mv.coord();
        let Some(index) = self.index(row, col) else {
            warn!("Move is off the board");
            return Err(EngineError::OutOfBounds {
                row,
                col,
                size: self.size,
            });
        };
        if self.has_winner {
            warn!("Move after game over");
            return Err(EngineError::GameOver);
        }
        if self.board[index].is_played() {
            warn!("Move on occupied cell");
            return Err(EngineError::CellOccupied { row, col });
        }

        self.board[index] = mv;

        let completed = self
            .lines
            .iter()
            .find(|line| self.line_owner(line).is_some())
            .cloned();

        if let Some(line) = completed {
            self.winner_combo = line;
            self.has_winner = true;
            info!(combo = ?self.winner_combo, "Line completed");
        } else if self.is_tied() {
            info!("Board full, game tied");
        }

        self.assert_invariants();
        Ok(())
    }

    /// Passes the turn to the next player, wrapping after the last.
    #[instrument(skip(self), fields(from = %self.current_player().label()))]
    pub fn toggle_player(&mut self) {
        self.cursor = (self.cursor + 1) % self.players.len();
        debug!(to = %self.current_player().label(), "Turn passed");
    }

    /// Clears the board and the winner for a fresh round.
    ///
    /// Turn order is kept: whoever was current before the reset is still
    /// current afterwards.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        for (i, cell) in self.board.iter_mut().enumerate() {
            *cell = Move::empty(i / self.size, i % self.size);
        }
        self.has_winner = false;
        self.winner_combo.clear();
        info!(current = %self.current_player().label(), "Game reset");
        self.assert_invariants();
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.size && col < self.size).then(|| row * self.size + col)
    }

    fn assert_invariants(&self) {
        debug_assert!(
            GameInvariants::check_all(self).is_ok(),
            "Game invariants violated: {:?}",
            GameInvariants::check_all(self)
        );
    }
}

impl Default for Game {
    /// A 3×3 game between X (blue) and O (red).
    fn default() -> Self {
        Self::build(Player::defaults(), 3)
    }
}

fn empty_board(size: usize) -> Vec<Move> {
    (0..size)
        .flat_map(|row| (0..size).map(move |col| Move::empty(row, col)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(game: &mut Game, row: usize, col: usize) {
        let mv = Move::new(row, col, game.current_player().label().as_str());
        assert!(game.is_valid_move(&mv), "({row}, {col}) should be playable");
        game.process_move(mv).unwrap();
        if !game.has_winner() && !game.is_tied() {
            game.toggle_player();
        }
    }

    #[test]
    fn test_new_game_is_empty() {
        let game = Game::default();
        assert_eq!(game.board_size(), 3);
        assert_eq!(game.current_player().label(), "X");
        assert!(game.cells().iter().all(|m| !m.is_played()));
        assert!(!game.has_winner());
        assert!(!game.is_tied());
        assert!(game.winner_combo().is_empty());
        assert_eq!(game.status(), GameStatus::InProgress);
    }

    #[test]
    fn test_cells_carry_their_coordinates() {
        let game = Game::new(Player::defaults(), 4).unwrap();
        for row in 0..4 {
            for col in 0..4 {
                assert_eq!(game.cell(row, col).unwrap().coord(), (row, col));
            }
        }
        assert!(game.cell(4, 0).is_none());
    }

    #[test]
    fn test_rejects_too_few_players() {
        let err = Game::new(vec![Player::new("X", "blue")], 3).unwrap_err();
        assert_eq!(err, EngineError::TooFewPlayers { count: 1 });
    }

    #[test]
    fn test_rejects_zero_size() {
        let err = Game::new(Player::defaults(), 0).unwrap_err();
        assert_eq!(err, EngineError::InvalidBoardSize { size: 0 });
    }

    #[test]
    fn test_rejects_duplicate_and_empty_labels() {
        let dup = vec![Player::new("X", "blue"), Player::new("X", "red")];
        assert!(matches!(
            Game::new(dup, 3),
            Err(EngineError::DuplicateLabel { .. })
        ));

        let empty = vec![Player::new("X", "blue"), Player::new("", "red")];
        assert_eq!(Game::new(empty, 3).unwrap_err(), EngineError::EmptyLabel);
    }

    #[test]
    fn test_column_win() {
        let mut game = Game::default();
        play(&mut game, 0, 1); // X
        play(&mut game, 0, 0); // O
        play(&mut game, 1, 1); // X
        play(&mut game, 2, 2); // O
        play(&mut game, 2, 1); // X
        assert!(game.has_winner());
        assert_eq!(game.winner_combo(), &[(0, 1), (1, 1), (2, 1)]);
        assert_eq!(game.current_player().label(), "X");
        assert_eq!(game.status(), GameStatus::Won);
    }

    #[test]
    fn test_anti_diagonal_win() {
        let mut game = Game::default();
        play(&mut game, 0, 2); // X
        play(&mut game, 0, 0); // O
        play(&mut game, 1, 1); // X
        play(&mut game, 0, 1); // O
        play(&mut game, 2, 0); // X
        assert_eq!(game.winner_combo(), &[(0, 2), (1, 1), (2, 0)]);
    }

    #[test]
    fn test_first_line_in_table_order_wins() {
        // Completing (0,0) finishes both row 0 and column 0; the row is
        // scanned first.
        let mut game = Game::default();
        for mv in [
            Move::new(0, 1, "X"),
            Move::new(0, 2, "X"),
            Move::new(1, 0, "X"),
            Move::new(2, 0, "X"),
        ] {
            game.process_move(mv).unwrap();
        }
        assert!(!game.has_winner());
        game.process_move(Move::new(0, 0, "X")).unwrap();
        assert_eq!(game.winner_combo(), &[(0, 0), (0, 1), (0, 2)]);
    }

    #[test]
    fn test_rejected_move_leaves_game_untouched() {
        let mut game = Game::default();
        game.process_move(Move::new(1, 1, "X")).unwrap();
        let before = game.cells().to_vec();

        assert_eq!(
            game.process_move(Move::new(1, 1, "O")),
            Err(EngineError::CellOccupied { row: 1, col: 1 })
        );
        assert_eq!(
            game.process_move(Move::new(3, 0, "O")),
            Err(EngineError::OutOfBounds {
                row: 3,
                col: 0,
                size: 3
            })
        );
        assert_eq!(game.cells(), before.as_slice());
    }

    #[test]
    fn test_out_of_range_move_is_invalid() {
        let game = Game::default();
        assert!(!game.is_valid_move(&Move::new(0, 3, "X")));
        assert!(!game.is_valid_move(&Move::new(7, 7, "X")));
    }

    #[test]
    fn test_label_is_not_checked_against_current_player() {
        let game = Game::default();
        assert!(game.is_valid_move(&Move::new(0, 0, "O")));
    }

    #[test]
    fn test_one_by_one_board_wins_immediately() {
        let mut game = Game::new(Player::defaults(), 1).unwrap();
        game.process_move(Move::new(0, 0, "X")).unwrap();
        assert!(game.has_winner());
        assert!(!game.is_tied());
        assert_eq!(game.winner_combo(), &[(0, 0)]);
    }

    #[test]
    fn test_line_owner() {
        let mut game = Game::default();
        let row: Line = vec![(0, 0), (0, 1), (0, 2)];
        assert_eq!(game.line_owner(&row), None);
        game.process_move(Move::new(0, 0, "O")).unwrap();
        game.process_move(Move::new(0, 1, "O")).unwrap();
        assert_eq!(game.line_owner(&row), None);
        game.process_move(Move::new(0, 2, "O")).unwrap();
        assert_eq!(game.line_owner(&row), Some("O"));
    }
}
