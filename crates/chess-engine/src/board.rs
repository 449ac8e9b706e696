//! Immutable board snapshots and the builder that produces them.

use std::collections::BTreeMap;
use std::fmt;

use chess_core::{Coordinate, PieceKind, Side, NUM_TILES};

use crate::error::{BoardError, FenDecodeError};
use crate::player::{Player, PlayerState};
use crate::{fen, Move, Piece, Tile};

/// A chess position after some ply.
///
/// Boards are never changed once built: a move produces a new board through
/// a [`Builder`]. Both players' pseudo-legal moves are computed during
/// construction and cached on the board.
#[derive(Debug, Clone)]
pub struct Board {
    tiles: [Tile; NUM_TILES],
    white_pieces: Vec<Piece>,
    black_pieces: Vec<Piece>,
    white: PlayerState,
    black: PlayerState,
    side_to_move: Side,
    en_passant_pawn: Option<Piece>,
}

impl Board {
    /// Creates the standard starting position.
    pub fn create_starting_board() -> Self {
        let mut builder = Builder::new();
        for side in Side::ALL {
            let back = side.back_row();
            let pawns = side.pawn_row();
            for (column, kind) in BACK_ROW.iter().enumerate() {
                let column = column as u8;
                let piece = match kind {
                    PieceKind::King => Piece::king(square(column, back), side, true, true),
                    _ => Piece::new(*kind, square(column, back), side),
                };
                builder
                    .set_piece(piece)
                    .set_piece(Piece::pawn(square(column, pawns), side));
            }
        }
        builder.set_side_to_move(Side::White);
        builder.build().expect("starting layout has one king per side")
    }

    /// Decodes a FEN string. See [`fen::decode`].
    pub fn from_fen(fen: &str) -> Result<Self, FenDecodeError> {
        fen::decode(fen)
    }

    /// Encodes this board as FEN. See [`fen::encode`].
    pub fn to_fen(&self) -> String {
        fen::encode(self)
    }

    #[inline]
    pub fn tile(&self, coordinate: Coordinate) -> &Tile {
        &self.tiles[coordinate.index()]
    }

    /// All 64 tiles, a1 first.
    #[inline]
    pub fn tiles(&self) -> &[Tile; NUM_TILES] {
        &self.tiles
    }

    #[inline]
    pub fn piece(&self, coordinate: Coordinate) -> Option<&Piece> {
        self.tile(coordinate).piece()
    }

    pub fn white_pieces(&self) -> &[Piece] {
        &self.white_pieces
    }

    pub fn black_pieces(&self) -> &[Piece] {
        &self.black_pieces
    }

    /// Live pieces of `side`, ordered by coordinate.
    pub fn pieces(&self, side: Side) -> &[Piece] {
        match side {
            Side::White => &self.white_pieces,
            Side::Black => &self.black_pieces,
        }
    }

    #[inline]
    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    /// The pawn that made a double push on the previous ply, if any.
    #[inline]
    pub fn en_passant_pawn(&self) -> Option<&Piece> {
        self.en_passant_pawn.as_ref()
    }

    pub fn white_player(&self) -> Player<'_> {
        self.player(Side::White)
    }

    pub fn black_player(&self) -> Player<'_> {
        self.player(Side::Black)
    }

    pub fn player(&self, side: Side) -> Player<'_> {
        let state = match side {
            Side::White => &self.white,
            Side::Black => &self.black,
        };
        Player::new(self, state)
    }

    /// The player whose turn it is.
    pub fn current_player(&self) -> Player<'_> {
        self.player(self.side_to_move)
    }

    /// White's cached moves followed by Black's.
    pub fn all_legal_moves(&self) -> impl Iterator<Item = &Move> + '_ {
        self.white.legal_moves().iter().chain(self.black.legal_moves())
    }

    /// Recomputes both players' cached moves from the current layout.
    pub fn recalculate_legal_moves(&mut self) {
        let white_standard = self.standard_moves(Side::White);
        let black_standard = self.standard_moves(Side::Black);

        let white_king = self.find_king(Side::White).unwrap_or(*self.white.king());
        let black_king = self.find_king(Side::Black).unwrap_or(*self.black.king());

        let white = PlayerState::new(self, white_king, white_standard.clone(), black_standard.clone());
        let black = PlayerState::new(self, black_king, black_standard, white_standard);
        self.white = white;
        self.black = black;
    }

    /// True when the side to move is checkmated or stalemated.
    pub fn is_game_over(&self) -> bool {
        let player = self.current_player();
        player.is_in_checkmate() || player.is_in_stalemate()
    }

    pub fn someone_in_check(&self) -> bool {
        self.white.is_in_check() || self.black.is_in_check()
    }

    fn standard_moves(&self, side: Side) -> Vec<Move> {
        self.pieces(side)
            .iter()
            .flat_map(|piece| piece.legal_moves(self))
            .collect()
    }

    fn find_king(&self, side: Side) -> Option<Piece> {
        self.pieces(side).iter().find(|piece| piece.is_king()).copied()
    }
}

/// Boards are equal when they hold the same kinds and sides on the same
/// squares, with the same side to move, castle rights and en passant square.
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        let same_layout = self.tiles.iter().zip(other.tiles.iter()).all(|(a, b)| {
            a.piece().map(|p| (p.kind(), p.side())) == b.piece().map(|p| (p.kind(), p.side()))
        });
        let same_rights = Side::ALL.iter().all(|side| {
            let ours = self.player(*side);
            let theirs = other.player(*side);
            ours.can_castle_kingside() == theirs.can_castle_kingside()
                && ours.can_castle_queenside() == theirs.can_castle_queenside()
        });
        same_layout
            && same_rights
            && self.side_to_move == other.side_to_move
            && self.en_passant_pawn.map(|p| p.position())
                == other.en_passant_pawn.map(|p| p.position())
    }
}

impl Eq for Board {}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.tiles.chunks(8).rev() {
            for tile in row {
                write!(f, "{:>3}", tile.to_string())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

const BACK_ROW: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// The coordinate at `column`, `row`. Both must be below 8.
pub(crate) fn square(column: u8, row: u8) -> Coordinate {
    Coordinate::ALL[usize::from(row) * 8 + usize::from(column)]
}

/// Collects pieces and turn state for a new [`Board`].
#[derive(Debug, Clone)]
pub struct Builder {
    pieces: BTreeMap<Coordinate, Piece>,
    side_to_move: Side,
    en_passant_pawn: Option<Piece>,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    /// Creates an empty builder with White to move.
    pub fn new() -> Self {
        Builder {
            pieces: BTreeMap::new(),
            side_to_move: Side::White,
            en_passant_pawn: None,
        }
    }

    /// Places `piece` on its own square, replacing any previous occupant.
    pub fn set_piece(&mut self, piece: Piece) -> &mut Self {
        self.pieces.insert(piece.position(), piece);
        self
    }

    pub fn remove_piece(&mut self, coordinate: Coordinate) -> &mut Self {
        self.pieces.remove(&coordinate);
        self
    }

    pub fn piece(&self, coordinate: Coordinate) -> Option<&Piece> {
        self.pieces.get(&coordinate)
    }

    pub fn set_side_to_move(&mut self, side: Side) -> &mut Self {
        self.side_to_move = side;
        self
    }

    /// Records the pawn that just made a double push.
    pub fn set_en_passant_pawn(&mut self, pawn: Piece) -> &mut Self {
        self.en_passant_pawn = Some(pawn);
        self
    }

    /// Sets the castle rights of the king standing on `coordinate`.
    pub fn set_castling(&mut self, coordinate: Coordinate, kingside: bool, queenside: bool) -> &mut Self {
        if let Some(piece) = self.pieces.get_mut(&coordinate) {
            *piece = piece.with_castling(kingside, queenside);
        }
        self
    }

    pub fn king_position(&self, side: Side) -> Option<Coordinate> {
        self.pieces
            .values()
            .find(|piece| piece.is_king() && piece.side() == side)
            .map(Piece::position)
    }

    /// Finds the pawn that could be taken en passant on `target`: a pawn of
    /// the side not to move, one step past the target in its own direction.
    pub fn find_en_passant_pawn(&self, target: Coordinate) -> Option<Piece> {
        let side = self.side_to_move.opposite();
        let position = target.offset(8 * side.direction())?;
        self.pieces
            .get(&position)
            .filter(|piece| piece.is_pawn() && piece.side() == side)
            .copied()
    }

    /// Clears the castle right tied to a rook corner once anything moves
    /// from or to it.
    pub(crate) fn forfeit_castling_at(&mut self, coordinate: Coordinate) -> &mut Self {
        let (side, kingside) = match coordinate {
            Coordinate::H1 => (Side::White, true),
            Coordinate::A1 => (Side::White, false),
            Coordinate::H8 => (Side::Black, true),
            Coordinate::A8 => (Side::Black, false),
            _ => return self,
        };
        if let Some(king) = self
            .pieces
            .values_mut()
            .find(|piece| piece.is_king() && piece.side() == side)
        {
            let rights = king.castling_rights();
            let rights = if kingside {
                rights.without_kingside()
            } else {
                rights.without_queenside()
            };
            *king = king.with_castling_rights(rights);
        }
        self
    }

    /// Builds the board and computes both players' moves.
    ///
    /// Fails unless each side has exactly one king. An en passant pawn that
    /// is not on the board is dropped.
    pub fn build(&self) -> Result<Board, BoardError> {
        let white_king = self.single_king(Side::White)?;
        let black_king = self.single_king(Side::Black)?;

        let en_passant_pawn = self.en_passant_pawn.and_then(|pawn| {
            match self.pieces.get(&pawn.position()) {
                Some(found) if found.is_pawn() && found.side() == pawn.side() => {
                    Some(found.with_en_passant_capturable(true))
                }
                _ => {
                    tracing::warn!(
                        "ignoring en passant pawn at {}: no {} pawn there",
                        pawn.position(),
                        pawn.side()
                    );
                    None
                }
            }
        });
        let en_passant_square = en_passant_pawn.map(|pawn| pawn.position());

        let mut tiles = Coordinate::ALL.map(Tile::empty);
        let mut white_pieces = Vec::with_capacity(16);
        let mut black_pieces = Vec::with_capacity(16);
        for piece in self.pieces.values() {
            let piece = if piece.is_pawn() {
                piece.with_en_passant_capturable(Some(piece.position()) == en_passant_square)
            } else {
                *piece
            };
            tiles[piece.position().index()] = Tile::occupied(piece);
            match piece.side() {
                Side::White => white_pieces.push(piece),
                Side::Black => black_pieces.push(piece),
            }
        }

        let mut board = Board {
            tiles,
            white_pieces,
            black_pieces,
            white: PlayerState::placeholder(white_king),
            black: PlayerState::placeholder(black_king),
            side_to_move: self.side_to_move,
            en_passant_pawn,
        };
        board.recalculate_legal_moves();
        Ok(board)
    }

    fn single_king(&self, side: Side) -> Result<Piece, BoardError> {
        let mut kings = self
            .pieces
            .values()
            .filter(|piece| piece.is_king() && piece.side() == side);
        match (kings.next(), kings.next()) {
            (Some(king), None) => Ok(*king),
            (None, _) => {
                tracing::warn!("cannot build board: no {} king", side);
                Err(BoardError::MissingKing(side))
            }
            (Some(_), Some(_)) => {
                tracing::warn!("cannot build board: more than one {} king", side);
                Err(BoardError::DuplicateKing(side))
            }
        }
    }
}
