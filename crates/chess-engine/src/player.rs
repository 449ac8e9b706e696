//! Per-side move caches, castle generation and move adjudication.

use chess_core::{Coordinate, PieceKind, Side};

use crate::board::square;
use crate::execution::{MoveExecution, MoveState};
use crate::moves::Castle;
use crate::{Board, Move, Piece};

/// The cached move sets of one side, stored on its [`Board`].
#[derive(Debug, Clone)]
pub(crate) struct PlayerState {
    king: Piece,
    legal_moves: Vec<Move>,
    opponent_moves: Vec<Move>,
    in_check: bool,
}

impl PlayerState {
    /// A state with no moves, replaced as soon as the board is complete.
    pub(crate) fn placeholder(king: Piece) -> Self {
        PlayerState {
            king,
            legal_moves: Vec::new(),
            opponent_moves: Vec::new(),
            in_check: false,
        }
    }

    /// Combines `standard` moves with the castles available to `king`.
    pub(crate) fn new(
        board: &Board,
        king: Piece,
        mut standard: Vec<Move>,
        opponent_moves: Vec<Move>,
    ) -> Self {
        let in_check = is_attacked(king.position(), &opponent_moves);
        standard.extend(castle_moves(board, &king, in_check, &opponent_moves));
        PlayerState {
            king,
            legal_moves: standard,
            opponent_moves,
            in_check,
        }
    }

    pub(crate) fn king(&self) -> &Piece {
        &self.king
    }

    pub(crate) fn legal_moves(&self) -> &[Move] {
        &self.legal_moves
    }

    pub(crate) fn is_in_check(&self) -> bool {
        self.in_check
    }
}

fn is_attacked(coordinate: Coordinate, opponent_moves: &[Move]) -> bool {
    opponent_moves
        .iter()
        .any(|mv| mv.destination() == Some(coordinate))
}

/// Generates the castles open to `king`.
///
/// The king must be unmoved on its home square and not in check. The rook
/// must be unmoved on its corner, the squares between them empty, and the
/// squares the king crosses and lands on not reachable by any opponent move.
fn castle_moves(board: &Board, king: &Piece, in_check: bool, opponent_moves: &[Move]) -> Vec<Move> {
    let side = king.side();
    let row = side.back_row();
    let mut castles = Vec::new();

    if in_check || !king.is_first_move() || king.position() != square(4, row) {
        return castles;
    }

    let is_empty = |column: u8| !board.tile(square(column, row)).is_full();
    let is_safe = |column: u8| !is_attacked(square(column, row), opponent_moves);
    let unmoved_rook = |column: u8| {
        board
            .piece(square(column, row))
            .filter(|piece| piece.is_rook() && piece.side() == side && piece.is_first_move())
            .copied()
    };

    if king.can_castle_kingside() && is_empty(5) && is_empty(6) && is_safe(5) && is_safe(6) {
        if let Some(rook) = unmoved_rook(7) {
            castles.push(Move::KingSideCastle(Castle {
                king: *king,
                destination: square(6, row),
                rook,
                rook_destination: square(5, row),
            }));
        }
    }

    if king.can_castle_queenside()
        && is_empty(1)
        && is_empty(2)
        && is_empty(3)
        && is_safe(2)
        && is_safe(3)
    {
        if let Some(rook) = unmoved_rook(0) {
            castles.push(Move::QueenSideCastle(Castle {
                king: *king,
                destination: square(2, row),
                rook,
                rook_destination: square(3, row),
            }));
        }
    }

    castles
}

/// One side of a [`Board`], with the operations that judge its moves.
#[derive(Debug, Clone, Copy)]
pub struct Player<'a> {
    board: &'a Board,
    state: &'a PlayerState,
}

impl<'a> Player<'a> {
    pub(crate) fn new(board: &'a Board, state: &'a PlayerState) -> Self {
        Player { board, state }
    }

    pub fn side(&self) -> Side {
        self.state.king.side()
    }

    pub fn king(&self) -> &'a Piece {
        &self.state.king
    }

    /// Pseudo-legal moves plus the castles generated for this side.
    pub fn legal_moves(&self) -> &'a [Move] {
        &self.state.legal_moves
    }

    /// The opponent's pseudo-legal moves, used for attack tests.
    pub fn opponent_moves(&self) -> &'a [Move] {
        &self.state.opponent_moves
    }

    pub fn live_pieces(&self) -> &'a [Piece] {
        self.board.pieces(self.side())
    }

    pub fn opponent(&self) -> Player<'a> {
        self.board.player(self.side().opposite())
    }

    pub fn can_castle_kingside(&self) -> bool {
        self.state.king.can_castle_kingside()
    }

    pub fn can_castle_queenside(&self) -> bool {
        self.state.king.can_castle_queenside()
    }

    pub fn has_castled(&self) -> bool {
        self.state.king.has_castled()
    }

    /// True when an opponent move on this board lands on the king's square.
    pub fn is_in_check(&self) -> bool {
        self.state.in_check
    }

    /// True when at least one move does not leave the king attacked.
    pub fn has_escape_moves(&self) -> bool {
        self.legal_moves()
            .iter()
            .any(|mv| self.make_move(mv).state().is_finished())
    }

    pub fn is_in_checkmate(&self) -> bool {
        self.is_in_check() && !self.has_escape_moves()
    }

    /// True when not in check and no pseudo-legal move exists.
    ///
    /// A side whose every move would walk into check is not reported here.
    pub fn is_in_stalemate(&self) -> bool {
        !self.is_in_check() && self.legal_moves().is_empty()
    }

    /// True if `mv` is one of this side's cached moves. A promotion matches
    /// any piece a pawn may become.
    pub fn is_legal_move(&self, mv: &Move) -> bool {
        mv.promotion_kind().map_or(true, PieceKind::is_promotion_target)
            && self
                .legal_moves()
                .iter()
                .any(|legal| legal.base() == mv.base() && legal.is_promotion() == mv.is_promotion())
    }

    /// Plays `mv` for this side and reports whether the result may be adopted.
    pub fn make_move(&self, mv: &Move) -> MoveExecution<'a> {
        if !self.is_legal_move(mv) {
            tracing::debug!("{} cannot play {}: not a legal move", self.side(), mv);
            return MoveExecution::rejected(self.board, mv.clone(), MoveState::Illegal);
        }

        let after = match mv.execute(self.board) {
            Ok(after) => after,
            Err(err) => {
                tracing::debug!("{} cannot play {}: {}", self.side(), mv, err);
                return MoveExecution::rejected(self.board, mv.clone(), MoveState::Illegal);
            }
        };

        if after.player(self.side()).is_in_check() {
            tracing::debug!("{} cannot play {}: leaves the king in check", self.side(), mv);
            return MoveExecution::executed(
                self.board,
                after,
                mv.clone(),
                MoveState::LeavesPlayerInCheck,
            );
        }

        MoveExecution::executed(self.board, after, mv.clone(), MoveState::Finished)
    }

    /// Picks a move for a scripted opponent: a promotion, else a castle, else
    /// a capture, else the first move. The pick is not checked for legality.
    pub fn choose_a_move(&self) -> Option<Move> {
        let moves = self.legal_moves();
        let pick = moves
            .iter()
            .find(|mv| mv.is_promotion())
            .or_else(|| moves.iter().find(|mv| mv.is_castle()))
            .or_else(|| moves.iter().find(|mv| mv.is_capture()))
            .or_else(|| moves.first());
        if pick.is_none() {
            tracing::warn!("{} has no moves to choose from", self.side());
        }
        pick.cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Builder, MoveFactory};

    fn at(s: &str) -> Coordinate {
        Coordinate::from_algebraic(s).unwrap()
    }

    #[test]
    fn starting_players() {
        let board = Board::create_starting_board();
        for side in Side::ALL {
            let player = board.player(side);
            assert_eq!(player.side(), side);
            assert_eq!(player.legal_moves().len(), 20);
            assert_eq!(player.opponent_moves().len(), 20);
            assert_eq!(player.live_pieces().len(), 16);
            assert!(player.can_castle_kingside());
            assert!(player.can_castle_queenside());
            assert!(!player.has_castled());
            assert!(!player.is_in_check());
            assert!(!player.is_in_checkmate());
            assert!(!player.is_in_stalemate());
            assert_eq!(player.opponent().side(), side.opposite());
        }
        assert_eq!(board.current_player().side(), Side::White);
    }

    #[test]
    fn queen_and_king_against_king() {
        let mut builder = Builder::new();
        builder
            .set_piece(Piece::king(Coordinate::G1, Side::White, false, false))
            .set_piece(Piece::queen(at("d2"), Side::White))
            .set_piece(Piece::king(Coordinate::H8, Side::Black, false, false));
        let board = builder.build().unwrap();

        assert_eq!(board.white_player().legal_moves().len(), 28);
        assert_eq!(board.black_player().legal_moves().len(), 3);
    }

    #[test]
    fn quiet_custom_position() {
        let king = |c, side| {
            Piece::king(c, side, false, false)
                .with_first_move(false)
                .with_has_castled(true)
        };
        let mut builder = Builder::new();
        builder
            .set_piece(king(Coordinate::G1, Side::White))
            .set_piece(Piece::pawn(at("h2"), Side::White))
            .set_piece(Piece::knight(at("f2"), Side::White))
            .set_piece(king(Coordinate::G8, Side::Black))
            .set_piece(Piece::pawn(at("f7"), Side::Black))
            .set_piece(Piece::knight(at("h7"), Side::Black))
            .set_side_to_move(Side::Black);
        let board = builder.build().unwrap();

        let white = board.white_player();
        let black = board.black_player();
        assert_eq!(white.legal_moves().len(), 11);
        assert_eq!(black.legal_moves().len(), 8);
        assert!(white.has_castled());
        assert!(black.has_castled());
        for player in [white, black] {
            assert!(!player.is_in_check());
            assert!(!player.is_in_checkmate());
            assert!(!player.is_in_stalemate());
        }
    }

    #[test]
    fn illegal_move_leaves_board_unchanged() {
        let board = Board::create_starting_board();
        let black_move = MoveFactory::create_move(&board, at("e7"), at("e5"));
        let execution = board.white_player().make_move(&black_move);
        assert_eq!(execution.state(), MoveState::Illegal);
        assert!(std::ptr::eq(execution.after_board(), &board));

        let execution = board.current_player().make_move(&MoveFactory::invalid());
        assert_eq!(execution.state(), MoveState::Illegal);
    }

    #[test]
    fn pinned_piece_reports_self_check() {
        let board = Board::from_fen("4r2k/8/8/8/8/8/4N3/4K3 w - - 0 1").unwrap();
        let mv = MoveFactory::create_move(&board, at("e2"), at("c3"));
        let execution = board.current_player().make_move(&mv);
        assert_eq!(execution.state(), MoveState::LeavesPlayerInCheck);
        assert!(!execution.state().is_finished());
        assert!(execution.after_board().white_player().is_in_check());
    }

    #[test]
    fn promotion_kind_is_chosen_by_caller() {
        let board = Board::from_fen("7k/P7/8/8/8/8/8/K7 w - - 0 1").unwrap();
        let mv = MoveFactory::create_move(&board, at("a7"), at("a8")).with_promotion(PieceKind::Rook);
        let player = board.current_player();
        assert!(player.is_legal_move(&mv));

        let execution = player.make_move(&mv);
        assert!(execution.state().is_finished());
        let rook = execution.after_board().piece(Coordinate::A8).unwrap();
        assert_eq!(rook.kind(), PieceKind::Rook);
        assert!(execution.after_board().black_player().is_in_check());
    }

    #[test]
    fn promotion_to_pawn_or_king_is_illegal() {
        let board = Board::from_fen("7k/P7/8/8/8/8/8/K7 w - - 0 1").unwrap();
        let queen = MoveFactory::create_move(&board, at("a7"), at("a8"));
        let player = board.current_player();

        for kind in [PieceKind::Pawn, PieceKind::King] {
            let mv = Move::promotion(queen.base().clone(), kind);
            assert!(!player.is_legal_move(&mv), "promotion to {:?} accepted", kind);
            let execution = player.make_move(&mv);
            assert_eq!(execution.state(), MoveState::Illegal);
            assert_eq!(execution.after_board(), &board);
        }
    }

    #[test]
    fn scripted_choice_prefers_promotion_castle_capture() {
        let board = Board::from_fen("7k/P7/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        assert!(board.current_player().choose_a_move().unwrap().is_promotion());

        let board = Board::from_fen("7k/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        assert!(board.current_player().choose_a_move().unwrap().is_castle());

        let board = Board::from_fen("7k/8/8/8/8/8/3p4/4K3 w - - 0 1").unwrap();
        assert!(board.current_player().choose_a_move().unwrap().is_capture());

        let board = Board::create_starting_board();
        let first = board.current_player().legal_moves()[0].clone();
        assert_eq!(board.current_player().choose_a_move(), Some(first));
    }
}
