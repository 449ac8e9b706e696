//! Error types for board construction, move execution, FEN decoding and PGN.

use chess_core::{Coordinate, FenError, Side};
use thiserror::Error;

/// Errors raised when a [`Builder`](crate::Builder) cannot produce a valid board.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("no {0} king on the board")]
    MissingKing(Side),

    #[error("more than one {0} king on the board")]
    DuplicateKing(Side),
}

/// Errors raised when a move cannot be turned into a new board.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("the invalid move sentinel cannot be executed")]
    InvalidMove,

    #[error("castle requires an unmoved king and rook of the same side, got {0}")]
    CastlePrecondition(String),

    #[error("resulting position is invalid: {0}")]
    Board(#[from] BoardError),
}

/// Errors raised when decoding a FEN string into a board.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FenDecodeError {
    #[error(transparent)]
    Fen(#[from] FenError),

    #[error(transparent)]
    Board(#[from] BoardError),

    #[error("en passant target {0} has no {1} pawn in front of it")]
    UnresolvedEnPassant(Coordinate, Side),
}

/// Errors raised when reading or writing PGN move text.
#[derive(Debug, Error)]
pub enum PgnError {
    #[error("empty move token")]
    EmptyToken,

    #[error("no legal move of {side} matches '{token}'")]
    NoMatchingMove { token: String, side: Side },

    #[error("failed to write PGN: {0}")]
    Io(#[from] std::io::Error),
}
