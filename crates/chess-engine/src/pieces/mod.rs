//! Piece values and pseudo-legal move generation.
//!
//! A [`Piece`] is a small value: every move produces a new piece at the
//! destination and the old one is dropped with the board that held it.
//! Movement geometry lives in one submodule per family and is dispatched
//! from [`Piece::legal_moves`].

mod king;
mod knight;
mod pawn;
mod sliding;

use std::fmt;

use chess_core::{Coordinate, PieceKind, Side};

use crate::{Board, Move};

/// Castling state carried by a king.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const KINGSIDE: u8 = 0b001;
    pub const QUEENSIDE: u8 = 0b010;
    pub const CASTLED: u8 = 0b100;

    /// Creates rights from the two castle flags.
    #[inline]
    pub const fn new(kingside: bool, queenside: bool) -> Self {
        let mut flags = 0;
        if kingside {
            flags |= Self::KINGSIDE;
        }
        if queenside {
            flags |= Self::QUEENSIDE;
        }
        CastlingRights(flags)
    }

    #[inline]
    pub const fn kingside(self) -> bool {
        self.0 & Self::KINGSIDE != 0
    }

    #[inline]
    pub const fn queenside(self) -> bool {
        self.0 & Self::QUEENSIDE != 0
    }

    #[inline]
    pub const fn has_castled(self) -> bool {
        self.0 & Self::CASTLED != 0
    }

    /// Drops both castle rights, keeping the castled marker.
    #[inline]
    pub const fn forfeit(self) -> Self {
        CastlingRights(self.0 & Self::CASTLED)
    }

    #[inline]
    pub const fn without_kingside(self) -> Self {
        CastlingRights(self.0 & !Self::KINGSIDE)
    }

    #[inline]
    pub const fn without_queenside(self) -> Self {
        CastlingRights(self.0 & !Self::QUEENSIDE)
    }

    #[inline]
    pub const fn with_has_castled(self, castled: bool) -> Self {
        if castled {
            CastlingRights(self.0 | Self::CASTLED)
        } else {
            CastlingRights(self.0 & !Self::CASTLED)
        }
    }
}

/// A piece standing on a board square.
///
/// Equality compares position, side, kind and the first-move flag only.
#[derive(Debug, Clone, Copy)]
pub struct Piece {
    position: Coordinate,
    side: Side,
    kind: PieceKind,
    is_first_move: bool,
    en_passant_capturable: bool,
    castling: CastlingRights,
}

impl Piece {
    /// Creates a piece of any kind. Kings start without castle rights and
    /// pawns are on their first move only when standing on their start row.
    pub const fn new(kind: PieceKind, position: Coordinate, side: Side) -> Self {
        let is_first_move = match kind {
            PieceKind::Pawn => position.row() == side.pawn_row(),
            _ => true,
        };
        Piece {
            position,
            side,
            kind,
            is_first_move,
            en_passant_capturable: false,
            castling: CastlingRights::NONE,
        }
    }

    pub const fn pawn(position: Coordinate, side: Side) -> Self {
        Self::new(PieceKind::Pawn, position, side)
    }

    pub const fn knight(position: Coordinate, side: Side) -> Self {
        Self::new(PieceKind::Knight, position, side)
    }

    pub const fn bishop(position: Coordinate, side: Side) -> Self {
        Self::new(PieceKind::Bishop, position, side)
    }

    pub const fn rook(position: Coordinate, side: Side) -> Self {
        Self::new(PieceKind::Rook, position, side)
    }

    pub const fn queen(position: Coordinate, side: Side) -> Self {
        Self::new(PieceKind::Queen, position, side)
    }

    /// Creates a king with the given castle rights.
    pub const fn king(position: Coordinate, side: Side, kingside: bool, queenside: bool) -> Self {
        Piece {
            castling: CastlingRights::new(kingside, queenside),
            ..Self::new(PieceKind::King, position, side)
        }
    }

    pub const fn with_first_move(self, is_first_move: bool) -> Self {
        Piece {
            is_first_move,
            ..self
        }
    }

    /// Replaces the castle rights. Has no effect on pieces other than kings.
    pub const fn with_castling(self, kingside: bool, queenside: bool) -> Self {
        if !matches!(self.kind, PieceKind::King) {
            return self;
        }
        let castling = CastlingRights::new(kingside, queenside).with_has_castled(self.has_castled());
        Piece { castling, ..self }
    }

    /// Marks a king as having castled. Has no effect on other pieces.
    pub const fn with_has_castled(self, has_castled: bool) -> Self {
        if !matches!(self.kind, PieceKind::King) {
            return self;
        }
        Piece {
            castling: self.castling.with_has_castled(has_castled),
            ..self
        }
    }

    pub(crate) const fn with_castling_rights(self, castling: CastlingRights) -> Self {
        Piece { castling, ..self }
    }

    pub(crate) const fn with_en_passant_capturable(self, capturable: bool) -> Self {
        Piece {
            en_passant_capturable: capturable,
            ..self
        }
    }

    #[inline]
    pub const fn position(&self) -> Coordinate {
        self.position
    }

    #[inline]
    pub const fn side(&self) -> Side {
        self.side
    }

    #[inline]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub const fn is_first_move(&self) -> bool {
        self.is_first_move
    }

    /// True only for a pawn during the ply right after its double push.
    #[inline]
    pub const fn is_en_passant_capturable(&self) -> bool {
        self.en_passant_capturable
    }

    #[inline]
    pub const fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    #[inline]
    pub const fn can_castle_kingside(&self) -> bool {
        self.castling.kingside()
    }

    #[inline]
    pub const fn can_castle_queenside(&self) -> bool {
        self.castling.queenside()
    }

    #[inline]
    pub const fn has_castled(&self) -> bool {
        self.castling.has_castled()
    }

    #[inline]
    pub const fn is_king(&self) -> bool {
        matches!(self.kind, PieceKind::King)
    }

    #[inline]
    pub const fn is_rook(&self) -> bool {
        matches!(self.kind, PieceKind::Rook)
    }

    #[inline]
    pub const fn is_pawn(&self) -> bool {
        matches!(self.kind, PieceKind::Pawn)
    }

    /// Generates this piece's pseudo-legal moves on `board`.
    pub fn legal_moves(&self, board: &Board) -> Vec<Move> {
        match self.kind {
            PieceKind::Pawn => pawn::legal_moves(self, board),
            PieceKind::Knight => knight::legal_moves(self, board),
            PieceKind::Bishop => sliding::legal_moves(self, board, &sliding::BISHOP_VECTORS),
            PieceKind::Rook => sliding::legal_moves(self, board, &sliding::ROOK_VECTORS),
            PieceKind::Queen => sliding::legal_moves(self, board, &sliding::QUEEN_VECTORS),
            PieceKind::King => king::legal_moves(self, board),
        }
    }

    /// Returns the piece as it stands after `mv` has relocated it.
    ///
    /// The result is never on its first move. Pawns are en passant capturable
    /// only after a jump, and a king loses both castle rights.
    pub fn move_this_piece(&self, mv: &Move) -> Piece {
        let destination = mv.destination().unwrap_or(self.position);
        let castling = if self.is_king() {
            self.castling.forfeit().with_has_castled(self.has_castled() || mv.is_castle())
        } else {
            self.castling
        };
        Piece {
            position: destination,
            is_first_move: false,
            en_passant_capturable: self.is_pawn() && matches!(mv, Move::PawnJump { .. }),
            castling,
            ..*self
        }
    }

    /// Returns a new piece of `kind` replacing this one on the same square.
    pub const fn promoted(&self, kind: PieceKind) -> Piece {
        Self::new(kind, self.position, self.side).with_first_move(false)
    }
}

impl PartialEq for Piece {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
            && self.side == other.side
            && self.kind == other.kind
            && self.is_first_move == other.is_first_move
    }
}

impl Eq for Piece {}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind.to_fen_char(self.side))
    }
}

/// Returns true if stepping from `position` by `vector` would wrap across the
/// left or right board edge. Shared by the king and the sliding pieces.
pub(crate) const fn wraps_row_edge(position: Coordinate, vector: i32) -> bool {
    match position.column() {
        0 => matches!(vector, -9 | -1 | 7),
        7 => matches!(vector, -7 | 1 | 9),
        _ => false,
    }
}

/// Builds the step move for a non-pawn landing on `destination`, if any.
pub(crate) fn step_move(piece: &Piece, board: &Board, destination: Coordinate) -> Option<Move> {
    match board.tile(destination).piece() {
        None => Some(Move::normal(*piece, destination)),
        Some(occupant) if occupant.side() != piece.side() => {
            Some(Move::offensive(*piece, destination, *occupant))
        }
        Some(_) => None,
    }
}
