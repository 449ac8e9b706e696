//! The move family and its execution into new boards.
//!
//! Moves do not hold on to the board they were generated from. Executing or
//! naming a move takes that board as an argument instead, which keeps a
//! [`Move`] a plain value that can be compared, cloned and logged.

use std::fmt;

use chess_core::{Coordinate, PieceKind};

use crate::error::MoveError;
use crate::{Board, Builder, Piece};

/// King and rook squares of a castle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Castle {
    pub king: Piece,
    pub destination: Coordinate,
    pub rook: Piece,
    pub rook_destination: Coordinate,
}

/// Every kind of move the engine knows about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Move {
    /// A non-pawn move to an empty square.
    Normal {
        piece: Piece,
        destination: Coordinate,
    },
    /// A non-pawn capture.
    Offensive {
        piece: Piece,
        destination: Coordinate,
        captured: Piece,
    },
    /// A single pawn push.
    Pawn {
        piece: Piece,
        destination: Coordinate,
    },
    /// A diagonal pawn capture.
    PawnOffensive {
        piece: Piece,
        destination: Coordinate,
        captured: Piece,
    },
    /// A double pawn push from the start row.
    PawnJump {
        piece: Piece,
        destination: Coordinate,
    },
    /// An en passant capture; `captured` stands beside the origin, not on the destination.
    PawnEnPassant {
        piece: Piece,
        destination: Coordinate,
        captured: Piece,
    },
    /// A pawn move to the far row, replaced by `promotion` after it lands.
    PawnPromotion {
        base: Box<Move>,
        promotion: PieceKind,
    },
    KingSideCastle(Castle),
    QueenSideCastle(Castle),
    /// Returned by lookups that find nothing. Never executable.
    Invalid,
}

impl Move {
    pub const fn normal(piece: Piece, destination: Coordinate) -> Self {
        Move::Normal { piece, destination }
    }

    pub const fn offensive(piece: Piece, destination: Coordinate, captured: Piece) -> Self {
        Move::Offensive {
            piece,
            destination,
            captured,
        }
    }

    pub const fn pawn(piece: Piece, destination: Coordinate) -> Self {
        Move::Pawn { piece, destination }
    }

    pub const fn pawn_offensive(piece: Piece, destination: Coordinate, captured: Piece) -> Self {
        Move::PawnOffensive {
            piece,
            destination,
            captured,
        }
    }

    pub const fn pawn_jump(piece: Piece, destination: Coordinate) -> Self {
        Move::PawnJump { piece, destination }
    }

    pub const fn pawn_en_passant(piece: Piece, destination: Coordinate, captured: Piece) -> Self {
        Move::PawnEnPassant {
            piece,
            destination,
            captured,
        }
    }

    /// Wraps a pawn move landing on the far row.
    pub fn promotion(base: Move, promotion: PieceKind) -> Self {
        Move::PawnPromotion {
            base: Box::new(base),
            promotion,
        }
    }

    /// Returns the piece being moved (the king for castles).
    pub fn moved_piece(&self) -> Option<&Piece> {
        match self {
            Move::Normal { piece, .. }
            | Move::Offensive { piece, .. }
            | Move::Pawn { piece, .. }
            | Move::PawnOffensive { piece, .. }
            | Move::PawnJump { piece, .. }
            | Move::PawnEnPassant { piece, .. } => Some(piece),
            Move::PawnPromotion { base, .. } => base.moved_piece(),
            Move::KingSideCastle(castle) | Move::QueenSideCastle(castle) => Some(&castle.king),
            Move::Invalid => None,
        }
    }

    #[inline]
    pub fn origin(&self) -> Option<Coordinate> {
        self.moved_piece().map(Piece::position)
    }

    pub fn destination(&self) -> Option<Coordinate> {
        match self {
            Move::Normal { destination, .. }
            | Move::Offensive { destination, .. }
            | Move::Pawn { destination, .. }
            | Move::PawnOffensive { destination, .. }
            | Move::PawnJump { destination, .. }
            | Move::PawnEnPassant { destination, .. } => Some(*destination),
            Move::PawnPromotion { base, .. } => base.destination(),
            Move::KingSideCastle(castle) | Move::QueenSideCastle(castle) => {
                Some(castle.destination)
            }
            Move::Invalid => None,
        }
    }

    pub fn captured_piece(&self) -> Option<&Piece> {
        match self {
            Move::Offensive { captured, .. }
            | Move::PawnOffensive { captured, .. }
            | Move::PawnEnPassant { captured, .. } => Some(captured),
            Move::PawnPromotion { base, .. } => base.captured_piece(),
            _ => None,
        }
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured_piece().is_some()
    }

    #[inline]
    pub fn is_castle(&self) -> bool {
        matches!(self, Move::KingSideCastle(_) | Move::QueenSideCastle(_))
    }

    #[inline]
    pub fn is_promotion(&self) -> bool {
        matches!(self, Move::PawnPromotion { .. })
    }

    #[inline]
    pub fn is_invalid(&self) -> bool {
        matches!(self, Move::Invalid)
    }

    pub fn promotion_kind(&self) -> Option<PieceKind> {
        match self {
            Move::PawnPromotion { promotion, .. } => Some(*promotion),
            _ => None,
        }
    }

    /// Returns the castle details of a castle move.
    pub fn castle(&self) -> Option<&Castle> {
        match self {
            Move::KingSideCastle(castle) | Move::QueenSideCastle(castle) => Some(castle),
            _ => None,
        }
    }

    /// Returns the wrapped pawn move of a promotion, or `self`.
    pub fn base(&self) -> &Move {
        match self {
            Move::PawnPromotion { base, .. } => base,
            _ => self,
        }
    }

    /// Returns this promotion with a different target kind.
    ///
    /// Moves that are not promotions, and kinds a pawn cannot become, leave
    /// the move unchanged.
    pub fn with_promotion(&self, kind: PieceKind) -> Move {
        match self {
            Move::PawnPromotion { base, .. } if kind.is_promotion_target() => Move::PawnPromotion {
                base: base.clone(),
                promotion: kind,
            },
            _ => self.clone(),
        }
    }

    /// Builds the board that results from playing this move on `board`.
    ///
    /// Only fails for the [`Move::Invalid`] sentinel, a castle whose king and
    /// rook are not where the move says, or a move whose result has no king.
    pub fn execute(&self, board: &Board) -> Result<Board, MoveError> {
        Ok(self.prepare(board)?.build()?)
    }

    fn prepare(&self, board: &Board) -> Result<Builder, MoveError> {
        match self {
            Move::Invalid => Err(MoveError::InvalidMove),
            Move::PawnPromotion { base, promotion } => {
                let mut builder = base.prepare(board)?;
                let pawn = base.moved_piece().ok_or(MoveError::InvalidMove)?;
                builder.set_piece(pawn.move_this_piece(base).promoted(*promotion));
                Ok(builder)
            }
            Move::KingSideCastle(castle) | Move::QueenSideCastle(castle) => {
                self.prepare_castle(board, castle)
            }
            _ => match (self.moved_piece(), self.destination()) {
                (Some(piece), Some(destination)) => {
                    Ok(self.prepare_relocation(board, piece, destination))
                }
                _ => Err(MoveError::InvalidMove),
            },
        }
    }

    fn prepare_relocation(&self, board: &Board, piece: &Piece, destination: Coordinate) -> Builder {
        let side = piece.side();
        let captured = self.captured_piece();
        let mut builder = Builder::new();

        for other in board.pieces(side) {
            if other != piece {
                builder.set_piece(*other);
            }
        }
        for other in board.pieces(side.opposite()) {
            if Some(other) != captured {
                builder.set_piece(*other);
            }
        }

        let moved = piece.move_this_piece(self);
        builder.set_piece(moved);
        if moved.is_en_passant_capturable() {
            builder.set_en_passant_pawn(moved);
        }
        builder
            .forfeit_castling_at(piece.position())
            .forfeit_castling_at(destination)
            .set_side_to_move(side.opposite());
        builder
    }

    fn prepare_castle(&self, board: &Board, castle: &Castle) -> Result<Builder, MoveError> {
        let Castle {
            king,
            destination,
            rook,
            rook_destination,
        } = castle;
        let side = king.side();

        if !king.is_king()
            || !rook.is_rook()
            || rook.side() != side
            || !king.is_first_move()
            || !rook.is_first_move()
            || board.piece(king.position()) != Some(king)
            || board.piece(rook.position()) != Some(rook)
        {
            return Err(MoveError::CastlePrecondition(
                self.to_coordinate_notation(),
            ));
        }

        let mut builder = Builder::new();
        for other in board.pieces(side) {
            if other != king && other != rook {
                builder.set_piece(*other);
            }
        }
        for other in board.pieces(side.opposite()) {
            builder.set_piece(*other);
        }

        let moved_king = king.move_this_piece(self);
        debug_assert_eq!(moved_king.position(), *destination);
        builder
            .set_piece(moved_king)
            .set_piece(Piece::rook(*rook_destination, side).with_first_move(false))
            .set_side_to_move(side.opposite());
        Ok(builder)
    }

    /// Returns the move's algebraic token as it reads on `board`, the board it
    /// was generated from.
    pub fn to_notation(&self, board: &Board) -> String {
        match self {
            Move::Normal { piece, destination } => format!(
                "{}{}{}",
                piece.kind().letter(),
                self.disambiguation_file(board),
                destination
            ),
            Move::Offensive {
                piece, destination, ..
            } => format!(
                "{}{}x{}",
                piece.kind().letter(),
                self.disambiguation_file(board),
                destination
            ),
            Move::Pawn { destination, .. } | Move::PawnJump { destination, .. } => {
                destination.to_string()
            }
            Move::PawnOffensive {
                piece, destination, ..
            }
            | Move::PawnEnPassant {
                piece, destination, ..
            } => format!("{}x{}", piece.position().file_char(), destination),
            Move::PawnPromotion { base, promotion } => match (base.origin(), base.destination()) {
                (Some(origin), Some(destination)) => {
                    format!("{}-{}={}", origin, destination, promotion.letter())
                }
                _ => "InvalidMove".to_string(),
            },
            Move::KingSideCastle(_) => "O-O".to_string(),
            Move::QueenSideCastle(_) => "O-O-O".to_string(),
            Move::Invalid => "InvalidMove".to_string(),
        }
    }

    /// Origin file when another piece of the same kind can reach the same square.
    fn disambiguation_file(&self, board: &Board) -> String {
        let (Some(piece), Some(destination)) = (self.moved_piece(), self.destination()) else {
            return String::new();
        };
        let ambiguous = board.player(piece.side()).legal_moves().iter().any(|other| {
            other.destination() == Some(destination)
                && other.origin() != Some(piece.position())
                && other.moved_piece().map(Piece::kind) == Some(piece.kind())
        });
        if ambiguous {
            piece.position().file_char().to_string()
        } else {
            String::new()
        }
    }

    /// Returns origin and destination squares, e.g. `e2e4` or `e7e8q`.
    pub fn to_coordinate_notation(&self) -> String {
        match (self.origin(), self.destination()) {
            (Some(origin), Some(destination)) => match self.promotion_kind() {
                Some(kind) => format!(
                    "{}{}{}",
                    origin,
                    destination,
                    kind.letter().to_ascii_lowercase()
                ),
                None => format!("{}{}", origin, destination),
            },
            _ => "0000".to_string(),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_coordinate_notation())
    }
}

/// Looks moves up by their squares.
pub struct MoveFactory;

impl MoveFactory {
    /// Returns the invalid move sentinel.
    pub const fn invalid() -> Move {
        Move::Invalid
    }

    /// Finds the move of either player going from `from` to `to`.
    ///
    /// Promotions come back with the default queen; use
    /// [`Move::with_promotion`] to pick another kind.
    pub fn create_move(board: &Board, from: Coordinate, to: Coordinate) -> Move {
        board
            .all_legal_moves()
            .find(|mv| mv.origin() == Some(from) && mv.destination() == Some(to))
            .cloned()
            .unwrap_or(Move::Invalid)
    }
}

#[cfg(test)]
mod tests {
    use chess_core::Side;

    use super::*;

    fn at(s: &str) -> Coordinate {
        Coordinate::from_algebraic(s).unwrap()
    }

    fn find(board: &Board, from: &str, to: &str) -> Move {
        MoveFactory::create_move(board, at(from), at(to))
    }

    #[test]
    fn factory_finds_moves_by_squares() {
        let board = Board::create_starting_board();
        let mv = find(&board, "e2", "e4");
        assert!(matches!(mv, Move::PawnJump { .. }));
        assert_eq!(mv.origin(), Some(at("e2")));
        assert_eq!(mv.destination(), Some(at("e4")));
        assert_eq!(mv.moved_piece().map(Piece::kind), Some(PieceKind::Pawn));

        assert_eq!(find(&board, "e2", "e5"), MoveFactory::invalid());
        assert!(find(&board, "c5", "c6").is_invalid());
    }

    #[test]
    fn invalid_move_queries() {
        let mv = MoveFactory::invalid();
        assert_eq!(mv.origin(), None);
        assert_eq!(mv.destination(), None);
        assert!(!mv.is_capture());
        assert!(!mv.is_castle());
        assert_eq!(mv.to_notation(&Board::create_starting_board()), "InvalidMove");
        assert_eq!(mv.to_string(), "0000");
        assert_eq!(
            mv.execute(&Board::create_starting_board()),
            Err(MoveError::InvalidMove)
        );
    }

    #[test]
    fn execute_relocates_piece_and_flips_side() {
        let board = Board::create_starting_board();
        let after = find(&board, "g1", "f3").execute(&board).unwrap();

        assert_eq!(after.side_to_move(), Side::Black);
        assert!(after.piece(at("g1")).is_none());
        let knight = after.piece(at("f3")).unwrap();
        assert_eq!(knight.kind(), PieceKind::Knight);
        assert!(!knight.is_first_move());
        assert_eq!(after.white_pieces().len(), 16);
        assert!(after.en_passant_pawn().is_none());
    }

    #[test]
    fn jump_records_en_passant_pawn() {
        let board = Board::create_starting_board();
        let after = find(&board, "d2", "d4").execute(&board).unwrap();
        let pawn = after.en_passant_pawn().unwrap();
        assert_eq!(pawn.position(), at("d4"));
        assert!(pawn.is_en_passant_capturable());

        let next = find(&after, "g8", "f6").execute(&after).unwrap();
        assert!(next.en_passant_pawn().is_none());
        assert!(!next.piece(at("d4")).unwrap().is_en_passant_capturable());
    }

    #[test]
    fn notation_tokens() {
        let board = Board::create_starting_board();
        assert_eq!(find(&board, "e2", "e4").to_notation(&board), "e4");
        assert_eq!(find(&board, "e2", "e3").to_notation(&board), "e3");
        assert_eq!(find(&board, "g1", "f3").to_notation(&board), "Nf3");

        let board = Board::from_fen("7k/3P4/8/8/3p4/4P3/8/R3K2R w KQ - 0 1").unwrap();
        assert_eq!(find(&board, "e3", "d4").to_notation(&board), "exd4");
        assert_eq!(find(&board, "d7", "d8").to_notation(&board), "d7-d8=Q");
        assert_eq!(find(&board, "e1", "g1").to_notation(&board), "O-O");
        assert_eq!(find(&board, "e1", "c1").to_notation(&board), "O-O-O");
        assert_eq!(find(&board, "a1", "a7").to_notation(&board), "Ra7");
    }

    #[test]
    fn notation_disambiguates_by_file() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/1N3N1K w - - 0 1").unwrap();
        assert_eq!(find(&board, "b1", "d2").to_notation(&board), "Nbd2");
        assert_eq!(find(&board, "f1", "d2").to_notation(&board), "Nfd2");
        assert_eq!(find(&board, "b1", "c3").to_notation(&board), "Nc3");

        let board = Board::from_fen("4k3/8/8/8/8/8/3p4/1N3N1K w - - 0 1").unwrap();
        assert_eq!(find(&board, "b1", "d2").to_notation(&board), "Nbxd2");
    }

    #[test]
    fn promotion_choice() {
        let board = Board::from_fen("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let mv = find(&board, "b7", "b8");
        assert_eq!(mv.promotion_kind(), Some(PieceKind::Queen));

        let knight = mv.with_promotion(PieceKind::Knight);
        assert_eq!(knight.promotion_kind(), Some(PieceKind::Knight));
        assert_eq!(knight.base(), mv.base());
        assert_eq!(knight.to_string(), "b7b8n");
        assert_eq!(mv.with_promotion(PieceKind::King), mv);

        let after = knight.execute(&board).unwrap();
        let promoted = after.piece(at("b8")).unwrap();
        assert_eq!(promoted.kind(), PieceKind::Knight);
        assert_eq!(promoted.side(), Side::White);
        assert!(after.piece(at("b7")).is_none());

        let king_move = find(&board, "e1", "e2");
        assert_eq!(king_move.with_promotion(PieceKind::Rook), king_move);
    }

    #[test]
    fn castle_moves_king_and_rook() {
        let board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R b kq - 0 1").unwrap();
        let mv = find(&board, "e8", "c8");
        assert!(matches!(mv, Move::QueenSideCastle(_)));
        assert_eq!(mv.castle().map(|c| c.rook_destination), Some(at("d8")));

        let after = mv.execute(&board).unwrap();
        let king = after.piece(at("c8")).unwrap();
        assert!(king.is_king());
        assert!(king.has_castled());
        assert!(!king.can_castle_kingside());
        assert!(!king.can_castle_queenside());
        assert!(after.piece(at("d8")).unwrap().is_rook());
        assert!(after.piece(Coordinate::A8).is_none());
        assert!(after.piece(Coordinate::E8).is_none());
        assert_eq!(after.side_to_move(), Side::White);
    }

    #[test]
    fn castle_with_missing_rook_fails() {
        let board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let castle = find(&board, "e1", "g1");
        let elsewhere = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K3 w Qkq - 0 1").unwrap();
        assert!(matches!(
            castle.execute(&elsewhere),
            Err(MoveError::CastlePrecondition(_))
        ));
    }

    #[test]
    fn rook_moves_forfeit_their_corner() {
        let board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let after = find(&board, "h1", "h5").execute(&board).unwrap();
        let king = after.white_player().king();
        assert!(!king.can_castle_kingside());
        assert!(king.can_castle_queenside());

        // capturing a rook on its corner forfeits the opponent's right
        let after = find(&board, "a1", "a8").execute(&board).unwrap();
        let black_king = after.black_player().king();
        assert!(!black_king.can_castle_queenside());
        assert!(black_king.can_castle_kingside());
        assert!(!after.white_player().king().can_castle_queenside());
    }
}
