//! Perft (performance test) for move generator validation.
//!
//! Perft counts the leaf nodes of the game tree to a fixed depth. Only moves
//! a player can actually complete are followed, and every promotion is
//! tried once per piece a pawn may become, so the counts match the
//! published values for fully legal move generation.

use chess_core::PieceKind;

use crate::{Board, Move};

/// The moves perft follows for `mv`: one per promotion kind, or `mv` itself.
fn expand(mv: &Move) -> Vec<Move> {
    if mv.is_promotion() {
        PieceKind::PROMOTIONS.iter().map(|&kind| mv.with_promotion(kind)).collect()
    } else {
        vec![mv.clone()]
    }
}

/// Counts the number of leaf nodes at the given depth.
pub fn perft(board: &Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let player = board.current_player();
    let mut nodes = 0u64;
    for mv in player.legal_moves().iter().flat_map(expand) {
        let execution = player.make_move(&mv);
        if !execution.state().is_finished() {
            continue;
        }
        nodes += if depth == 1 {
            1
        } else {
            perft(execution.after_board(), depth - 1)
        };
    }
    nodes
}

/// Perft with divide: the node count below each root move, by coordinate notation.
/// Useful for locating which move a wrong total comes from.
pub fn perft_divide(board: &Board, depth: u32) -> Vec<(String, u64)> {
    let player = board.current_player();
    let mut results = Vec::with_capacity(player.legal_moves().len());

    for mv in player.legal_moves().iter().flat_map(expand) {
        let execution = player.make_move(&mv);
        if !execution.state().is_finished() {
            continue;
        }
        let nodes = if depth > 1 {
            perft(execution.after_board(), depth - 1)
        } else {
            1
        };
        results.push((mv.to_coordinate_notation(), nodes));
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
