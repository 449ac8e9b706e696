//! King stepping. Castles are generated by the player, not here.

use super::{step_move, wraps_row_edge, Piece};
use crate::{Board, Move};

const KING_VECTORS: [i32; 8] = [-9, -8, -7, -1, 1, 7, 8, 9];

pub(super) fn legal_moves(king: &Piece, board: &Board) -> Vec<Move> {
    KING_VECTORS
        .iter()
        .filter(|vector| !wraps_row_edge(king.position(), **vector))
        .filter_map(|vector| king.position().offset(*vector))
        .filter_map(|destination| step_move(king, board, destination))
        .collect()
}

#[cfg(test)]
mod tests {
    use chess_core::{Coordinate, Side};

    use crate::{Builder, Piece};

    #[test]
    fn king_in_corner() {
        let mut builder = Builder::new();
        builder
            .set_piece(Piece::king(Coordinate::A1, Side::White, false, false))
            .set_piece(Piece::king(Coordinate::H8, Side::Black, false, false));
        let board = builder.build().unwrap();

        let white = board.piece(Coordinate::A1).unwrap().legal_moves(&board);
        assert_eq!(white.len(), 3);
        let black = board.piece(Coordinate::H8).unwrap().legal_moves(&board);
        assert_eq!(black.len(), 3);
    }

    #[test]
    fn king_on_h_file_does_not_wrap() {
        let h4 = Coordinate::from_algebraic("h4").unwrap();
        let mut builder = Builder::new();
        builder
            .set_piece(Piece::king(h4, Side::White, false, false))
            .set_piece(Piece::king(Coordinate::A8, Side::Black, false, false));
        let board = builder.build().unwrap();

        let moves = board.piece(h4).unwrap().legal_moves(&board);
        assert_eq!(moves.len(), 5);
        assert!(moves
            .iter()
            .filter_map(|m| m.destination())
            .all(|c| c.column() >= 6));
    }
}
