//! Bishop, rook and queen movement.

use super::{wraps_row_edge, Piece};
use crate::{Board, Move};

pub(super) const BISHOP_VECTORS: [i32; 4] = [-9, -7, 7, 9];
pub(super) const ROOK_VECTORS: [i32; 4] = [-8, -1, 1, 8];
pub(super) const QUEEN_VECTORS: [i32; 8] = [-9, -8, -7, -1, 1, 7, 8, 9];

/// Walks each direction until the board edge or the first occupied tile.
pub(super) fn legal_moves(piece: &Piece, board: &Board, vectors: &[i32]) -> Vec<Move> {
    let mut moves = Vec::new();

    for &vector in vectors {
        let mut current = piece.position();
        loop {
            // The edge check applies to the square being left, not the origin.
            if wraps_row_edge(current, vector) {
                break;
            }
            let Some(next) = current.offset(vector) else {
                break;
            };
            match board.tile(next).piece() {
                None => moves.push(Move::normal(*piece, next)),
                Some(occupant) => {
                    if occupant.side() != piece.side() {
                        moves.push(Move::offensive(*piece, next, *occupant));
                    }
                    break;
                }
            }
            current = next;
        }
    }

    moves
}
