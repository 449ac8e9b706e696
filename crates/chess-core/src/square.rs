//! Board coordinates and algebraic notation.
//!
//! Coordinates are rank-major with `a1 = 0` and `h8 = 63`, so the column is
//! `index % 8` and the row is `index / 8`.

use std::fmt;

use thiserror::Error;

/// Number of tiles on the board.
pub const NUM_TILES: usize = 64;

/// Number of tiles in a row.
pub const NUM_TILES_PER_ROW: usize = 8;

/// Errors from algebraic notation lookups.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NotationError {
    #[error("invalid notation: {0}")]
    InvalidNotation(String),
}

const ALGEBRAIC: [&str; NUM_TILES] = [
    "a1", "b1", "c1", "d1", "e1", "f1", "g1", "h1", //
    "a2", "b2", "c2", "d2", "e2", "f2", "g2", "h2", //
    "a3", "b3", "c3", "d3", "e3", "f3", "g3", "h3", //
    "a4", "b4", "c4", "d4", "e4", "f4", "g4", "h4", //
    "a5", "b5", "c5", "d5", "e5", "f5", "g5", "h5", //
    "a6", "b6", "c6", "d6", "e6", "f6", "g6", "h6", //
    "a7", "b7", "c7", "d7", "e7", "f7", "g7", "h7", //
    "a8", "b8", "c8", "d8", "e8", "f8", "g8", "h8",
];

/// Returns true if `coordinate` lies on the board.
#[inline]
pub const fn is_valid_coordinate(coordinate: i32) -> bool {
    coordinate >= 0 && coordinate < NUM_TILES as i32
}

/// Returns true if `coordinate` lies in column `n` (0 = file a).
#[inline]
pub const fn is_nth_column(coordinate: i32, n: i32) -> bool {
    coordinate % NUM_TILES_PER_ROW as i32 == n
}

/// Returns true if `coordinate` lies in row `n` (0 = rank 1).
#[inline]
pub const fn is_nth_row(coordinate: i32, n: i32) -> bool {
    let start = n * NUM_TILES_PER_ROW as i32;
    coordinate >= start && coordinate <= start + NUM_TILES_PER_ROW as i32 - 1
}

/// Returns the algebraic name of a raw index.
pub fn notation_for_index(index: i32) -> Result<&'static str, NotationError> {
    Coordinate::from_index(index)
        .map(Coordinate::to_algebraic)
        .ok_or_else(|| NotationError::InvalidNotation(index.to_string()))
}

/// A square on the board (0-63).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate(u8);

impl Coordinate {
    /// Every coordinate from a1 to h8.
    pub const ALL: [Coordinate; NUM_TILES] = {
        let mut all = [Coordinate(0); NUM_TILES];
        let mut i = 0;
        while i < NUM_TILES {
            all[i] = Coordinate(i as u8);
            i += 1;
        }
        all
    };

    pub const A1: Coordinate = Coordinate(0);
    pub const B1: Coordinate = Coordinate(1);
    pub const C1: Coordinate = Coordinate(2);
    pub const D1: Coordinate = Coordinate(3);
    pub const E1: Coordinate = Coordinate(4);
    pub const F1: Coordinate = Coordinate(5);
    pub const G1: Coordinate = Coordinate(6);
    pub const H1: Coordinate = Coordinate(7);
    pub const A8: Coordinate = Coordinate(56);
    pub const B8: Coordinate = Coordinate(57);
    pub const C8: Coordinate = Coordinate(58);
    pub const D8: Coordinate = Coordinate(59);
    pub const E8: Coordinate = Coordinate(60);
    pub const F8: Coordinate = Coordinate(61);
    pub const G8: Coordinate = Coordinate(62);
    pub const H8: Coordinate = Coordinate(63);

    /// Creates a coordinate from column and row (both 0-7).
    #[inline]
    pub const fn new(column: u8, row: u8) -> Option<Self> {
        if column < 8 && row < 8 {
            Some(Coordinate(row * 8 + column))
        } else {
            None
        }
    }

    /// Creates a coordinate from a raw index, `None` when off the board.
    #[inline]
    pub const fn from_index(index: i32) -> Option<Self> {
        if is_valid_coordinate(index) {
            Some(Coordinate(index as u8))
        } else {
            None
        }
    }

    /// Maps an index in FEN reading order (a8 first, h1 last) to a coordinate.
    #[inline]
    pub const fn from_fen_index(index: usize) -> Option<Self> {
        if index < NUM_TILES {
            let row = 7 - index / NUM_TILES_PER_ROW;
            let column = index % NUM_TILES_PER_ROW;
            Some(Coordinate((row * NUM_TILES_PER_ROW + column) as u8))
        } else {
            None
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the column (0 = file a).
    #[inline]
    pub const fn column(self) -> u8 {
        self.0 % 8
    }

    /// Returns the row (0 = rank 1).
    #[inline]
    pub const fn row(self) -> u8 {
        self.0 / 8
    }

    /// Applies a raw index offset, `None` when the result leaves the board.
    ///
    /// This does not guard against wrapping across a row edge; movement
    /// generators exclude those offsets per column before calling this.
    #[inline]
    pub const fn offset(self, delta: i32) -> Option<Self> {
        Self::from_index(self.0 as i32 + delta)
    }

    /// Returns the algebraic name (`a1`..`h8`).
    #[inline]
    pub const fn to_algebraic(self) -> &'static str {
        ALGEBRAIC[self.0 as usize]
    }

    /// Looks a coordinate up by its algebraic name.
    pub fn from_algebraic(s: &str) -> Result<Self, NotationError> {
        ALGEBRAIC
            .iter()
            .position(|name| *name == s)
            .map(|index| Coordinate(index as u8))
            .ok_or_else(|| NotationError::InvalidNotation(s.to_string()))
    }

    /// Returns the file letter (`a`..`h`).
    #[inline]
    pub const fn file_char(self) -> char {
        (b'a' + self.column()) as char
    }

    /// Returns the rank digit (`1`..`8`).
    #[inline]
    pub const fn rank_char(self) -> char {
        (b'1' + self.row()) as char
    }
}

impl fmt::Debug for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coordinate({})", self.to_algebraic())
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}
