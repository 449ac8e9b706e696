//! FEN (Forsyth-Edwards Notation) fields.
//!
//! [`FenParser`] splits a FEN string into typed fields and checks each one on
//! its own. Whether the position makes sense as a whole (one king per side,
//! a pawn behind the en passant square) is for the engine to decide.

use std::fmt;

use thiserror::Error;

use crate::{Coordinate, PieceKind, Side, NUM_TILES, NUM_TILES_PER_ROW};

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("FEN needs 6 fields, found {0}")]
    InvalidPartCount(usize),

    #[error("bad piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("side to move must be 'w' or 'b', found '{0}'")]
    InvalidSideToMove(String),

    #[error("bad castling field '{0}'")]
    InvalidCastlingRights(String),

    #[error("bad en passant square '{0}'")]
    InvalidEnPassantSquare(String),

    #[error("bad halfmove clock '{0}'")]
    InvalidHalfmoveClock(String),

    #[error("bad fullmove number '{0}'")]
    InvalidFullmoveNumber(String),
}

/// The castle availability field: `KQkq`, a subset of it, or `-`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CastlingFlags(u8);

impl CastlingFlags {
    pub const NONE: CastlingFlags = CastlingFlags(0);
    pub const ALL: CastlingFlags = CastlingFlags(0b1111);

    const LETTERS: [(Side, bool, char); 4] = [
        (Side::White, true, 'K'),
        (Side::White, false, 'Q'),
        (Side::Black, true, 'k'),
        (Side::Black, false, 'q'),
    ];

    const fn bit(side: Side, kingside: bool) -> u8 {
        match (side, kingside) {
            (Side::White, true) => 1,
            (Side::White, false) => 2,
            (Side::Black, true) => 4,
            (Side::Black, false) => 8,
        }
    }

    #[inline]
    pub const fn get(self, side: Side, kingside: bool) -> bool {
        self.0 & Self::bit(side, kingside) != 0
    }

    #[must_use]
    pub const fn with(self, side: Side, kingside: bool, allowed: bool) -> Self {
        if allowed {
            CastlingFlags(self.0 | Self::bit(side, kingside))
        } else {
            CastlingFlags(self.0 & !Self::bit(side, kingside))
        }
    }

    pub fn parse(field: &str) -> Result<Self, FenError> {
        if field == "-" {
            return Ok(Self::NONE);
        }
        if field.is_empty() {
            return Err(FenError::InvalidCastlingRights(field.to_string()));
        }
        field.chars().try_fold(Self::NONE, |flags, c| {
            Self::LETTERS
                .iter()
                .find(|(_, _, letter)| *letter == c)
                .map(|&(side, kingside, _)| flags.with(side, kingside, true))
                .ok_or_else(|| FenError::InvalidCastlingRights(field.to_string()))
        })
    }
}

impl fmt::Display for CastlingFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::NONE {
            return f.write_str("-");
        }
        for (side, kingside, letter) in Self::LETTERS {
            if self.get(side, kingside) {
                write!(f, "{}", letter)?;
            }
        }
        Ok(())
    }
}

/// A piece as listed in the placement field.
pub type PlacedPiece = (Coordinate, PieceKind, Side);

/// Parsed FEN fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenParser {
    /// Pieces in reading order, rank 8 first.
    pub pieces: Vec<PlacedPiece>,
    pub side_to_move: Side,
    pub castling: CastlingFlags,
    /// The square a pawn skipped over on the last ply, if any.
    pub en_passant: Option<Coordinate>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

impl FenParser {
    /// The standard starting position FEN.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        let [placement, side, castling, en_passant, halfmove, fullmove] = fields.as_slice() else {
            return Err(FenError::InvalidPartCount(fields.len()));
        };

        let side_to_move = parse_side(side)?;
        Ok(FenParser {
            pieces: parse_placement(placement)?,
            side_to_move,
            castling: CastlingFlags::parse(castling)?,
            en_passant: parse_en_passant(en_passant, side_to_move)?,
            halfmove_clock: halfmove
                .parse()
                .map_err(|_| FenError::InvalidHalfmoveClock(halfmove.to_string()))?,
            fullmove_number: fullmove
                .parse()
                .map_err(|_| FenError::InvalidFullmoveNumber(fullmove.to_string()))?,
        })
    }

    /// Returns true if the castling field grants `side` the given right.
    pub fn can_castle(&self, side: Side, kingside: bool) -> bool {
        self.castling.get(side, kingside)
    }

    pub fn to_fen(&self) -> String {
        format!(
            "{} {} {} {} {} {}",
            render_placement(self.pieces.iter().copied()),
            self.side_to_move.fen_char(),
            self.castling,
            self.en_passant.map_or("-", Coordinate::to_algebraic),
            self.halfmove_clock,
            self.fullmove_number
        )
    }
}

impl Default for FenParser {
    fn default() -> Self {
        Self::parse(Self::STARTPOS).expect("STARTPOS is valid")
    }
}

fn parse_placement(field: &str) -> Result<Vec<PlacedPiece>, FenError> {
    let ranks: Vec<&str> = field.split('/').collect();
    if ranks.len() != NUM_TILES_PER_ROW {
        return Err(FenError::InvalidPiecePlacement(format!(
            "expected 8 ranks, got {}",
            ranks.len()
        )));
    }

    let mut pieces = Vec::with_capacity(32);
    for (rank, row) in ranks.iter().zip((0..8u8).rev()) {
        let mut column = 0usize;
        for c in rank.chars() {
            if let Some(run) = c.to_digit(10).filter(|n| (1..=8).contains(n)) {
                column += run as usize;
                continue;
            }
            let (kind, side) = PieceKind::from_fen_char(c).ok_or_else(|| {
                FenError::InvalidPiecePlacement(format!("'{}' on rank {}", c, row + 1))
            })?;
            let coordinate = u8::try_from(column)
                .ok()
                .and_then(|column| Coordinate::new(column, row))
                .ok_or_else(|| {
                    FenError::InvalidPiecePlacement(format!("rank {} is too long", row + 1))
                })?;
            pieces.push((coordinate, kind, side));
            column += 1;
        }
        if column != NUM_TILES_PER_ROW {
            return Err(FenError::InvalidPiecePlacement(format!(
                "rank {} covers {} squares",
                row + 1,
                column
            )));
        }
    }
    Ok(pieces)
}

fn parse_side(field: &str) -> Result<Side, FenError> {
    match field {
        "w" => Ok(Side::White),
        "b" => Ok(Side::Black),
        other => Err(FenError::InvalidSideToMove(other.to_string())),
    }
}

/// The square must sit behind a pawn of the side that just moved: the sixth
/// rank when White is to move, the third when Black is.
fn parse_en_passant(field: &str, side_to_move: Side) -> Result<Option<Coordinate>, FenError> {
    if field == "-" {
        return Ok(None);
    }
    let row = match side_to_move {
        Side::White => 5,
        Side::Black => 2,
    };
    match Coordinate::from_algebraic(field) {
        Ok(square) if square.row() == row => Ok(Some(square)),
        _ => Err(FenError::InvalidEnPassantSquare(field.to_string())),
    }
}

/// Renders the placement field, rank 8 first, for the given pieces.
pub fn render_placement<I>(pieces: I) -> String
where
    I: IntoIterator<Item = PlacedPiece>,
{
    let mut grid = [None; NUM_TILES];
    for (coordinate, kind, side) in pieces {
        grid[coordinate.index()] = Some(kind.to_fen_char(side));
    }

    let mut field = String::with_capacity(64);
    for (i, rank) in grid.chunks(NUM_TILES_PER_ROW).rev().enumerate() {
        if i > 0 {
            field.push('/');
        }
        let mut empty = 0u8;
        for cell in rank {
            match cell {
                Some(letter) => {
                    if empty > 0 {
                        field.push(char::from(b'0' + empty));
                        empty = 0;
                    }
                    field.push(*letter);
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            field.push(char::from(b'0' + empty));
        }
    }
    field
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> Coordinate {
        Coordinate::from_algebraic(s).unwrap()
    }

    #[test]
    fn startpos_fields() {
        let fen = FenParser::parse(FenParser::STARTPOS).unwrap();
        assert_eq!(fen.pieces.len(), 32);
        assert_eq!(fen.pieces[0], (Coordinate::A8, PieceKind::Rook, Side::Black));
        assert_eq!(fen.pieces[31], (Coordinate::H1, PieceKind::Rook, Side::White));
        assert_eq!(fen.side_to_move, Side::White);
        assert_eq!(fen.castling, CastlingFlags::ALL);
        assert_eq!(fen.en_passant, None);
        assert_eq!((fen.halfmove_clock, fen.fullmove_number), (0, 1));
        assert_eq!(FenParser::default(), fen);
    }

    #[test]
    fn counters_and_en_passant_are_kept() {
        let text = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 4 12";
        let fen = FenParser::parse(text).unwrap();
        assert_eq!(fen.en_passant, Some(at("e3")));
        assert_eq!(fen.halfmove_clock, 4);
        assert_eq!(fen.fullmove_number, 12);
        assert!(fen.pieces.contains(&(at("e4"), PieceKind::Pawn, Side::White)));
        assert_eq!(fen.to_fen(), text);
    }

    #[test]
    fn field_count() {
        assert_eq!(
            FenParser::parse("invalid"),
            Err(FenError::InvalidPartCount(1))
        );
        assert_eq!(
            FenParser::parse(&format!("{} extra", FenParser::STARTPOS)),
            Err(FenError::InvalidPartCount(7))
        );
    }

    #[test]
    fn bad_placements() {
        let bad = [
            "8/8/8/8/8/8/8 w - - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPXPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/pppppppp/08/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnrr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbn/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "8p/8/8/8/8/8/8/8 w - - 0 1",
        ];
        for fen in bad {
            assert!(
                matches!(FenParser::parse(fen), Err(FenError::InvalidPiecePlacement(_))),
                "{} should be rejected",
                fen
            );
        }
    }

    #[test]
    fn bad_scalar_fields() {
        assert!(matches!(
            FenParser::parse("8/8/8/8/8/8/8/8 x KQkq - 0 1"),
            Err(FenError::InvalidSideToMove(s)) if s == "x"
        ));
        assert!(matches!(
            FenParser::parse("8/8/8/8/8/8/8/8 w - - abc 1"),
            Err(FenError::InvalidHalfmoveClock(_))
        ));
        assert!(matches!(
            FenParser::parse("8/8/8/8/8/8/8/8 w - - 0 -3"),
            Err(FenError::InvalidFullmoveNumber(_))
        ));
    }

    #[test]
    fn en_passant_rows() {
        for field in ["abc", "x3", "e4", "e1"] {
            let fen = format!("8/8/8/8/8/8/8/8 w - {} 0 1", field);
            assert_eq!(
                FenParser::parse(&fen),
                Err(FenError::InvalidEnPassantSquare(field.to_string()))
            );
        }
        let fen = FenParser::parse("8/8/8/8/8/8/8/8 w - d6 0 1").unwrap();
        assert_eq!(fen.en_passant, Some(at("d6")));
        let fen = FenParser::parse("8/8/8/8/8/8/8/8 b - d3 0 1").unwrap();
        assert_eq!(fen.en_passant, Some(at("d3")));
    }

    #[test]
    fn en_passant_row_follows_side_to_move() {
        assert_eq!(
            FenParser::parse("8/8/8/8/8/8/8/8 w - e3 0 1"),
            Err(FenError::InvalidEnPassantSquare("e3".to_string()))
        );
        assert_eq!(
            FenParser::parse("8/8/8/8/8/8/8/8 b - e6 0 1"),
            Err(FenError::InvalidEnPassantSquare("e6".to_string()))
        );
    }

    #[test]
    fn castling_flags() {
        let flags = CastlingFlags::parse("Kq").unwrap();
        assert!(flags.get(Side::White, true));
        assert!(!flags.get(Side::White, false));
        assert!(!flags.get(Side::Black, true));
        assert!(flags.get(Side::Black, false));
        assert_eq!(flags.to_string(), "Kq");

        assert_eq!(CastlingFlags::parse("-").unwrap(), CastlingFlags::NONE);
        assert_eq!(CastlingFlags::NONE.to_string(), "-");
        assert_eq!(CastlingFlags::parse("qkQK").unwrap().to_string(), "KQkq");
        assert_eq!(
            CastlingFlags::ALL.with(Side::White, true, false).to_string(),
            "Qkq"
        );
        for bad in ["", "XYZ", "K-", "KQkqx"] {
            assert!(CastlingFlags::parse(bad).is_err(), "{:?} should be rejected", bad);
        }
    }

    #[test]
    fn placement_rendering() {
        assert_eq!(render_placement(std::iter::empty()), "8/8/8/8/8/8/8/8");
        let pieces = [
            (Coordinate::E1, PieceKind::King, Side::White),
            (Coordinate::E8, PieceKind::King, Side::Black),
            (at("d5"), PieceKind::Pawn, Side::Black),
        ];
        assert_eq!(render_placement(pieces), "4k3/8/8/3p4/8/8/8/4K3");
    }

    #[test]
    fn error_messages_name_the_field() {
        assert!(FenError::InvalidPartCount(3).to_string().contains('3'));
        assert!(FenError::InvalidSideToMove("x".into()).to_string().contains('x'));
        assert!(FenError::InvalidEnPassantSquare("z9".into())
            .to_string()
            .contains("z9"));
    }
}
