//! Playing side representation.

use crate::Coordinate;

/// The two sides that play chess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Side {
    White = 0,
    Black = 1,
}

impl Side {
    /// Both sides, White first.
    pub const ALL: [Side; 2] = [Side::White, Side::Black];

    /// Returns the opposite side.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Returns the index (0 for White, 1 for Black).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the rank direction of this side's pawns (+1 for White, -1 for Black).
    #[inline]
    pub const fn direction(self) -> i32 {
        match self {
            Side::White => 1,
            Side::Black => -1,
        }
    }

    #[inline]
    pub const fn is_white(self) -> bool {
        matches!(self, Side::White)
    }

    /// Returns the row this side's pieces start on (0 for White, 7 for Black).
    #[inline]
    pub const fn back_row(self) -> u8 {
        match self {
            Side::White => 0,
            Side::Black => 7,
        }
    }

    /// Returns the row this side's pawns start on (1 for White, 6 for Black).
    #[inline]
    pub const fn pawn_row(self) -> u8 {
        match self {
            Side::White => 1,
            Side::Black => 6,
        }
    }

    /// Returns true if a pawn of this side promotes on the given coordinate.
    #[inline]
    pub const fn is_promotion_coordinate(self, coordinate: Coordinate) -> bool {
        coordinate.row() == self.opposite().back_row()
    }

    /// Returns the FEN side-to-move letter.
    #[inline]
    pub const fn fen_char(self) -> char {
        match self {
            Side::White => 'w',
            Side::Black => 'b',
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::White => write!(f, "White"),
            Side::Black => write!(f, "Black"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_side() {
        assert_eq!(Side::White.opposite(), Side::Black);
        assert_eq!(Side::Black.opposite(), Side::White);
    }

    #[test]
    fn side_index() {
        assert_eq!(Side::White.index(), 0);
        assert_eq!(Side::Black.index(), 1);
    }

    #[test]
    fn direction() {
        assert_eq!(Side::White.direction(), 1);
        assert_eq!(Side::Black.direction(), -1);
    }

    #[test]
    fn rows() {
        assert_eq!(Side::White.back_row(), 0);
        assert_eq!(Side::Black.back_row(), 7);
        assert_eq!(Side::White.pawn_row(), 1);
        assert_eq!(Side::Black.pawn_row(), 6);
    }

    #[test]
    fn promotion_coordinates() {
        let e8 = Coordinate::from_algebraic("e8").unwrap();
        let e1 = Coordinate::from_algebraic("e1").unwrap();
        let e7 = Coordinate::from_algebraic("e7").unwrap();

        assert!(Side::White.is_promotion_coordinate(e8));
        assert!(!Side::White.is_promotion_coordinate(e7));
        assert!(Side::Black.is_promotion_coordinate(e1));
        assert!(!Side::Black.is_promotion_coordinate(e8));
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Side::White), "White");
        assert_eq!(format!("{}", Side::Black), "Black");
        assert_eq!(Side::White.fen_char(), 'w');
        assert_eq!(Side::Black.fen_char(), 'b');
    }
}
