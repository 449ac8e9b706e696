//! FEN encoding and decoding of boards.
//!
//! Only placement, side to move, castle rights and the en passant square are
//! modelled. Encoding always writes `0 1` for the move counters and decoding
//! ignores them.

use chess_core::{render_placement, CastlingFlags, FenParser, PieceKind, Side};

use crate::error::FenDecodeError;
use crate::{Board, Builder, Piece};

/// Encodes `board` as a FEN string.
pub fn encode(board: &Board) -> String {
    let placement = render_placement(
        board
            .tiles()
            .iter()
            .filter_map(|tile| tile.piece())
            .map(|piece| (piece.position(), piece.kind(), piece.side())),
    );
    format!(
        "{} {} {} {} 0 1",
        placement,
        board.side_to_move().fen_char(),
        castling(board),
        en_passant(board)
    )
}

fn castling(board: &Board) -> CastlingFlags {
    Side::ALL.iter().fold(CastlingFlags::NONE, |flags, &side| {
        let player = board.player(side);
        flags
            .with(side, true, player.can_castle_kingside())
            .with(side, false, player.can_castle_queenside())
    })
}

/// The square the last jumping pawn passed over.
fn en_passant(board: &Board) -> &'static str {
    board
        .en_passant_pawn()
        .and_then(|pawn| pawn.position().offset(-8 * pawn.side().direction()))
        .map_or("-", |square| square.to_algebraic())
}

/// Decodes a FEN string into a board.
///
/// Kings take their castle rights from the castling field. An en passant
/// target is resolved to the pawn of the side not to move standing in front
/// of it; decoding fails if there is none.
pub fn decode(fen: &str) -> Result<Board, FenDecodeError> {
    let parsed = FenParser::parse(fen)?;
    let mut builder = Builder::new();

    for &(coordinate, kind, side) in &parsed.pieces {
        let piece = match kind {
            PieceKind::King => Piece::king(
                coordinate,
                side,
                parsed.can_castle(side, true),
                parsed.can_castle(side, false),
            ),
            _ => Piece::new(kind, coordinate, side),
        };
        builder.set_piece(piece);
    }
    builder.set_side_to_move(parsed.side_to_move);

    if let Some(target) = parsed.en_passant {
        let side = parsed.side_to_move.opposite();
        let pawn = builder
            .find_en_passant_pawn(target)
            .ok_or(FenDecodeError::UnresolvedEnPassant(target, side))?;
        tracing::trace!("en passant target {} resolved to pawn on {}", target, pawn.position());
        builder.set_en_passant_pawn(pawn);
    }

    Ok(builder.build()?)
}
