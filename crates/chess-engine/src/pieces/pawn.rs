//! Pawn movement: pushes, jumps, diagonal captures, en passant and promotion.

use chess_core::PieceKind;

use super::Piece;
use crate::{Board, Move};

/// Wraps `mv` in a queen promotion when it lands on the far row.
fn promote_if_last_row(pawn: &Piece, mv: Move) -> Move {
    match mv.destination() {
        Some(destination) if pawn.side().is_promotion_coordinate(destination) => {
            Move::promotion(mv, PieceKind::Queen)
        }
        _ => mv,
    }
}

pub(super) fn legal_moves(pawn: &Piece, board: &Board) -> Vec<Move> {
    let side = pawn.side();
    let direction = side.direction();
    let position = pawn.position();
    let mut moves = Vec::new();

    if let Some(push) = position.offset(8 * direction) {
        if !board.tile(push).is_full() {
            moves.push(promote_if_last_row(pawn, Move::pawn(*pawn, push)));

            if pawn.is_first_move() && position.row() == side.pawn_row() {
                if let Some(jump) = position.offset(16 * direction) {
                    if !board.tile(jump).is_full() {
                        moves.push(Move::pawn_jump(*pawn, jump));
                    }
                }
            }
        }
    }

    // (vector, column it cannot leave from, offset of the pawn it passes)
    let (left_edge, right_edge) = if side.is_white() { (0, 7) } else { (7, 0) };
    let captures = [(7, left_edge, -direction), (9, right_edge, direction)];

    for (vector, edge_column, beside) in captures {
        if position.column() == edge_column {
            continue;
        }
        let Some(destination) = position.offset(vector * direction) else {
            continue;
        };

        match board.tile(destination).piece() {
            Some(occupant) if occupant.side() != side => {
                let capture = Move::pawn_offensive(*pawn, destination, *occupant);
                moves.push(promote_if_last_row(pawn, capture));
            }
            Some(_) => {}
            None => {
                if let Some(target) = board.en_passant_pawn() {
                    if target.side() != side && position.offset(beside) == Some(target.position()) {
                        moves.push(Move::pawn_en_passant(*pawn, destination, *target));
                    }
                }
            }
        }
    }

    moves
}

#[cfg(test)]
mod tests {
    use chess_core::{Coordinate, Side};

    use crate::{Board, Builder, Move, Piece};

    fn at(s: &str) -> Coordinate {
        Coordinate::from_algebraic(s).unwrap()
    }

    fn with_kings(pieces: &[Piece]) -> Builder {
        let mut builder = Builder::new();
        builder
            .set_piece(Piece::king(Coordinate::H1, Side::White, false, false))
            .set_piece(Piece::king(Coordinate::H8, Side::Black, false, false));
        for piece in pieces {
            builder.set_piece(*piece);
        }
        builder
    }

    fn moves_of(board: &Board, square: &str) -> Vec<Move> {
        board.piece(at(square)).unwrap().legal_moves(board)
    }

    #[test]
    fn push_and_jump_from_start_row() {
        let board = with_kings(&[Piece::pawn(at("e2"), Side::White)]).build().unwrap();
        let moves = moves_of(&board, "e2");
        assert_eq!(moves.len(), 2);
        assert!(matches!(moves[0], Move::Pawn { .. }));
        assert!(matches!(moves[1], Move::PawnJump { .. }));
        assert_eq!(moves[1].destination(), Some(at("e4")));
    }

    #[test]
    fn black_pawn_moves_down() {
        let board = with_kings(&[Piece::pawn(at("d7"), Side::Black)]).build().unwrap();
        let destinations: Vec<_> = moves_of(&board, "d7")
            .iter()
            .filter_map(Move::destination)
            .collect();
        assert_eq!(destinations, vec![at("d6"), at("d5")]);
    }

    #[test]
    fn blocked_pawn_cannot_jump() {
        let board = with_kings(&[
            Piece::pawn(at("e2"), Side::White),
            Piece::knight(at("e3"), Side::Black),
        ])
        .build()
        .unwrap();
        assert!(moves_of(&board, "e2").is_empty());

        let board = with_kings(&[
            Piece::pawn(at("e2"), Side::White),
            Piece::knight(at("e4"), Side::Black),
        ])
        .build()
        .unwrap();
        assert_eq!(moves_of(&board, "e2").len(), 1);
    }

    #[test]
    fn captures_do_not_wrap() {
        let board = with_kings(&[
            Piece::pawn(at("a4"), Side::White),
            Piece::rook(at("b5"), Side::Black),
            Piece::rook(at("h5"), Side::Black),
        ])
        .build()
        .unwrap();
        let moves = moves_of(&board, "a4");
        assert_eq!(moves.len(), 2);
        assert!(moves
            .iter()
            .any(|m| matches!(m, Move::PawnOffensive { .. }) && m.destination() == Some(at("b5"))));
    }

    #[test]
    fn promotion_defaults_to_queen() {
        let board = with_kings(&[
            Piece::pawn(at("b7"), Side::White),
            Piece::knight(at("a8"), Side::Black),
        ])
        .build()
        .unwrap();
        let moves = moves_of(&board, "b7");
        assert_eq!(moves.len(), 2);
        assert!(moves.iter().all(Move::is_promotion));
        assert!(moves
            .iter()
            .all(|m| m.promotion_kind() == Some(chess_core::PieceKind::Queen)));
        assert_eq!(moves.iter().filter(|m| m.is_capture()).count(), 1);
    }

    #[test]
    fn en_passant_needs_adjacent_jumped_pawn() {
        let black = Piece::pawn(at("d5"), Side::Black).with_first_move(false);
        let mut builder = with_kings(&[Piece::pawn(at("e5"), Side::White).with_first_move(false), black]);
        builder.set_en_passant_pawn(black);
        let board = builder.build().unwrap();

        let moves = moves_of(&board, "e5");
        let en_passant: Vec<_> = moves
            .iter()
            .filter(|m| matches!(m, Move::PawnEnPassant { .. }))
            .collect();
        assert_eq!(en_passant.len(), 1);
        assert_eq!(en_passant[0].destination(), Some(at("d6")));
        assert_eq!(en_passant[0].captured_piece().map(|p| p.position()), Some(at("d5")));

        // same layout without the recorded jump
        let board = with_kings(&[Piece::pawn(at("e5"), Side::White), black]).build().unwrap();
        assert!(moves_of(&board, "e5")
            .iter()
            .all(|m| !matches!(m, Move::PawnEnPassant { .. })));
    }
}
