//! Engine error types.

/// Error raised when constructing a game or applying a move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum EngineError {
    /// Fewer than two players were supplied.
    #[display("At least 2 players are required, got {count}")]
    TooFewPlayers {
        /// Number of players supplied.
        count: usize,
    },

    /// The board must be at least 1×1.
    #[display("Board size must be at least 1, got {size}")]
    InvalidBoardSize {
        /// Requested board size.
        size: usize,
    },

    /// Two players share a label.
    #[display("Player label {label:?} is used more than once")]
    DuplicateLabel {
        /// The repeated label.
        label: String,
    },

    /// A player label is empty, which would read as an unplayed cell.
    #[display("Player labels must not be empty")]
    EmptyLabel,

    /// The move targets a coordinate outside the board.
    #[display("Cell ({row}, {col}) is outside the {size}x{size} board")]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Board size.
        size: usize,
    },

    /// The move targets a cell that has already been played.
    #[display("Cell ({row}, {col}) is already occupied")]
    CellOccupied {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },

    /// A winner has already been declared.
    #[display("Game is already over")]
    GameOver,
}

impl std::error::Error for EngineError {}
