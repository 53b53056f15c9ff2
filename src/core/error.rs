//! Error types for the rules engine, search and session layers.
//!
//! Every rule violation is recoverable: the move that raised it is rolled
//! back before the error reaches the caller.

use crate::core::position::Position;

/// Errors raised by the game engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GomokuError {
    #[error("board size {size} is below the minimum of {min}")]
    InvalidBoardSize { size: usize, min: usize },

    #[error("position ({row}, {col}) is outside the board")]
    InvalidMovePosition { row: usize, col: usize },

    #[error("the square is already occupied")]
    InvalidOverlap,

    #[error("an overlap token cannot cover a token of its own color")]
    InvalidOverlapSameColor,

    #[error("a golden square requires a normal token on this turn")]
    InvalidTokenToPlay,

    #[error("no tokens of the requested type remain")]
    NoTokensRemaining,

    #[error("the game already has a winner")]
    GameFinished,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to encode game state: {0}")]
    Encode(String),

    #[error("failed to decode game state: {0}")]
    Decode(String),

    #[error("no candidate move available")]
    NoCandidateMove,
}

impl GomokuError {
    pub(crate) fn out_of_bounds(position: Position) -> Self {
        GomokuError::InvalidMovePosition {
            row: position.row,
            col: position.col,
        }
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, GomokuError>;
