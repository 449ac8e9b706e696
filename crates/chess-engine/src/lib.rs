//! Chess rules engine over immutable boards.
//!
//! This crate provides:
//! - [`Board`] - an immutable position, built through a [`Builder`]
//! - [`Piece`] and [`Move`] - closed families for pieces and moves
//! - [`Player`] - legality adjudication, check, checkmate and stalemate
//! - [`MoveExecution`] - the outcome of asking a player to move
//! - FEN encoding/decoding and PGN-style move text
//!
//! # Architecture
//!
//! Move generation is pseudo-legal: each piece knows its geometry but not
//! whether a move exposes its own king. A move is fully legal once
//! [`Player::make_move`] has executed it into a new board and found the
//! mover's king safe there. Boards are never mutated; undo is simply keeping
//! the previous board.
//!
//! # Example
//!
//! ```
//! use chess_core::Coordinate;
//! use chess_engine::{Board, MoveFactory};
//!
//! let board = Board::create_starting_board();
//! assert_eq!(board.current_player().legal_moves().len(), 20);
//!
//! let e2 = Coordinate::from_algebraic("e2").unwrap();
//! let e4 = Coordinate::from_algebraic("e4").unwrap();
//! let mv = MoveFactory::create_move(&board, e2, e4);
//! let execution = board.current_player().make_move(&mv);
//! assert!(execution.state().is_finished());
//!
//! let board = execution.into_after_board();
//! assert_eq!(board.to_fen(), "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
//! ```

mod board;
mod error;
mod execution;
pub mod fen;
mod moves;
pub mod perft;
pub mod pgn;
mod pieces;
mod player;
mod tile;

pub use board::{Board, Builder};
pub use error::{BoardError, FenDecodeError, MoveError, PgnError};
pub use execution::{MoveExecution, MoveState};
pub use moves::{Castle, Move, MoveFactory};
pub use perft::{perft, perft_divide};
pub use pgn::{LoggedMove, MoveLog};
pub use pieces::{CastlingRights, Piece};
pub use player::Player;
pub use tile::Tile;
