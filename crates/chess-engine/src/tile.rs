//! Board cells.

use std::fmt;

use chess_core::{Coordinate, Side};

use crate::Piece;

/// A single board cell, either empty or holding one piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    coordinate: Coordinate,
    piece: Option<Piece>,
}

impl Tile {
    /// Creates an empty tile.
    pub const fn empty(coordinate: Coordinate) -> Self {
        Tile {
            coordinate,
            piece: None,
        }
    }

    /// Creates a tile holding `piece` at the piece's own position.
    pub const fn occupied(piece: Piece) -> Self {
        Tile {
            coordinate: piece.position(),
            piece: Some(piece),
        }
    }

    #[inline]
    pub const fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    #[inline]
    pub const fn piece(&self) -> Option<&Piece> {
        self.piece.as_ref()
    }

    #[inline]
    pub const fn is_full(&self) -> bool {
        self.piece.is_some()
    }

    /// Returns true for the 28 squares on the outer ring of the board.
    pub const fn is_edge(&self) -> bool {
        let column = self.coordinate.column();
        let row = self.coordinate.row();
        column == 0 || column == 7 || row == 0 || row == 7
    }

    /// Returns true for a1, h1, a8 and h8.
    pub const fn is_corner(&self) -> bool {
        let column = self.coordinate.column();
        let row = self.coordinate.row();
        (column == 0 || column == 7) && (row == 0 || row == 7)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match &self.piece {
            None => '-',
            Some(piece) if piece.side() == Side::Black => piece.kind().letter().to_ascii_lowercase(),
            Some(piece) => piece.kind().letter(),
        };
        write!(f, "{}", c)
    }
}
