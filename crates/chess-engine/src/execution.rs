//! The outcome of asking a player to make a move.

use std::borrow::Cow;

use crate::{Board, Move};

/// How a move attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveState {
    /// The move was played and the resulting board may be adopted.
    Finished,
    /// The move is not one of the player's moves. The board is unchanged.
    Illegal,
    /// The move was played but leaves the mover's own king attacked. The
    /// resulting board must not be adopted.
    LeavesPlayerInCheck,
}

impl MoveState {
    #[inline]
    pub const fn is_finished(self) -> bool {
        matches!(self, MoveState::Finished)
    }
}

/// A move attempt together with the boards before and after it.
#[derive(Debug, Clone)]
pub struct MoveExecution<'a> {
    before: &'a Board,
    after: Cow<'a, Board>,
    mv: Move,
    state: MoveState,
}

impl<'a> MoveExecution<'a> {
    /// An attempt that produced no new board.
    pub(crate) fn rejected(before: &'a Board, mv: Move, state: MoveState) -> Self {
        MoveExecution {
            before,
            after: Cow::Borrowed(before),
            mv,
            state,
        }
    }

    pub(crate) fn executed(before: &'a Board, after: Board, mv: Move, state: MoveState) -> Self {
        MoveExecution {
            before,
            after: Cow::Owned(after),
            mv,
            state,
        }
    }

    pub fn before_board(&self) -> &'a Board {
        self.before
    }

    /// The board after the move, or the unchanged board for illegal moves.
    pub fn after_board(&self) -> &Board {
        &self.after
    }

    /// Takes the resulting board, cloning it only when the move was rejected.
    pub fn into_after_board(self) -> Board {
        self.after.into_owned()
    }

    pub fn mv(&self) -> &Move {
        &self.mv
    }

    pub fn state(&self) -> MoveState {
        self.state
    }
}
