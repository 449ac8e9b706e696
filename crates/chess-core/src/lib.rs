//! Core types for the chess rules engine.
//!
//! This crate provides the leaf types shared by the engine:
//! - [`Side`] and [`PieceKind`] for piece identity
//! - [`Coordinate`] plus row/column arithmetic and algebraic notation
//! - FEN field parsing and validation

mod fen;
mod piece;
mod side;
mod square;

pub use fen::{render_placement, CastlingFlags, FenError, FenParser, PlacedPiece};
pub use piece::PieceKind;
pub use side::Side;
pub use square::{
    is_nth_column, is_nth_row, is_valid_coordinate, notation_for_index, Coordinate,
    NotationError, NUM_TILES, NUM_TILES_PER_ROW,
};
