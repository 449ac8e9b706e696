//! Knight movement.

use chess_core::Coordinate;

use super::{step_move, Piece};
use crate::{Board, Move};

const KNIGHT_VECTORS: [i32; 8] = [-17, -15, -10, -6, 6, 10, 15, 17];

/// Offsets that would jump across the left or right edge from `position`.
const fn is_column_exclusion(position: Coordinate, vector: i32) -> bool {
    match position.column() {
        0 => matches!(vector, -17 | -10 | 6 | 15),
        1 => matches!(vector, -10 | 6),
        6 => matches!(vector, -6 | 10),
        7 => matches!(vector, -15 | -6 | 10 | 17),
        _ => false,
    }
}

pub(super) fn legal_moves(knight: &Piece, board: &Board) -> Vec<Move> {
    KNIGHT_VECTORS
        .iter()
        .filter(|vector| !is_column_exclusion(knight.position(), **vector))
        .filter_map(|vector| knight.position().offset(*vector))
        .filter_map(|destination| step_move(knight, board, destination))
        .collect()
}
