//! Move logs and PGN-style move text.
//!
//! The header block is a fixed set of placeholder tags, and every ply gets its
//! own number (`1.e4 2.c5 3.Nf3`). Whole-game import is not supported; only
//! single move tokens can be read back with [`parse_move`].

use std::fmt::Write as _;
use std::io::Write as _;
use std::path::Path;

use chess_core::{Coordinate, PieceKind};

use crate::error::PgnError;
use crate::{Board, Move, MoveExecution};

const HEADERS: [(&str, &str); 7] = [
    ("Event", "Casual Game"),
    ("Site", "?"),
    ("Date", "????.??.??"),
    ("Round", "?"),
    ("White", "White"),
    ("Black", "Black"),
    ("Result", "*"),
];

/// A move as it was played, with its notation on the board it was played on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedMove {
    mv: Move,
    notation: String,
}

impl LoggedMove {
    pub fn mv(&self) -> &Move {
        &self.mv
    }

    pub fn notation(&self) -> &str {
        &self.notation
    }
}

/// The ordered moves of a game, owned by whoever drives it.
#[derive(Debug, Clone, Default)]
pub struct MoveLog {
    moves: Vec<LoggedMove>,
}

impl MoveLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a finished execution. Returns false, recording nothing, for
    /// illegal or self-check attempts.
    pub fn add(&mut self, execution: &MoveExecution<'_>) -> bool {
        if !execution.state().is_finished() {
            return false;
        }
        self.moves.push(LoggedMove {
            mv: execution.mv().clone(),
            notation: execution.mv().to_notation(execution.before_board()),
        });
        true
    }

    pub fn moves(&self) -> &[LoggedMove] {
        &self.moves
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn remove(&mut self, index: usize) -> Option<LoggedMove> {
        (index < self.moves.len()).then(|| self.moves.remove(index))
    }

    pub fn pop(&mut self) -> Option<LoggedMove> {
        self.moves.pop()
    }

    pub fn clear(&mut self) {
        self.moves.clear();
    }
}

/// Renders the header block, a blank line and the move text.
pub fn render(log: &MoveLog) -> String {
    let mut pgn = String::new();
    for (tag, value) in HEADERS {
        // Writing to a String cannot fail.
        let _ = writeln!(pgn, "[{} \"{}\"]", tag, value);
    }
    pgn.push('\n');
    pgn.push_str(&render_moves(log));
    pgn.push('\n');
    pgn
}

/// Renders only the numbered move text.
pub fn render_moves(log: &MoveLog) -> String {
    log.moves()
        .iter()
        .enumerate()
        .map(|(i, logged)| format!("{}.{}", i + 1, logged.notation()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Writes [`render`] output to `path`.
pub fn write<P: AsRef<Path>>(path: P, log: &MoveLog) -> Result<(), PgnError> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(render(log).as_bytes())?;
    Ok(())
}

/// Resolves one move token against the moves of the side to move.
///
/// Accepts the engine's own notation (`Nf3`, `exd6`, `e7-e8=Q`, `O-O`) and
/// coordinate form (`e2e4`, `e2-e4`, `e7e8n`). Check and annotation suffixes
/// are ignored.
pub fn parse_move(board: &Board, token: &str) -> Result<Move, PgnError> {
    let token = token.trim().trim_end_matches(['+', '#', '!', '?']);
    if token.is_empty() {
        return Err(PgnError::EmptyToken);
    }

    let player = board.current_player();
    if let Some(mv) = player
        .legal_moves()
        .iter()
        .find(|mv| mv.to_notation(board) == token)
    {
        return Ok(mv.clone());
    }

    if let Some(mv) = parse_coordinate_form(board, token) {
        return Ok(mv);
    }

    Err(PgnError::NoMatchingMove {
        token: token.to_string(),
        side: player.side(),
    })
}

fn parse_coordinate_form(board: &Board, token: &str) -> Option<Move> {
    let compact: String = token.chars().filter(|c| *c != '-' && *c != '=').collect();
    if !compact.is_ascii() || !(4..=5).contains(&compact.len()) {
        return None;
    }
    let from = Coordinate::from_algebraic(&compact[0..2]).ok()?;
    let to = Coordinate::from_algebraic(&compact[2..4]).ok()?;
    let promotion = match compact[4..].chars().next() {
        Some(c) => Some(PieceKind::from_letter(c.to_ascii_uppercase())?),
        None => None,
    };

    let mv = board
        .current_player()
        .legal_moves()
        .iter()
        .find(|mv| mv.origin() == Some(from) && mv.destination() == Some(to))?;
    match promotion {
        Some(kind) if mv.is_promotion() && kind.is_promotion_target() => {
            Some(mv.with_promotion(kind))
        }
        Some(_) => None,
        None => Some(mv.clone()),
    }
}
