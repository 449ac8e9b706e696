//! How each side picks its move.

use chess_core::PieceKind;
use chess_engine::{Move, Player};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;

/// Move selection policy for one side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// The engine's own pick, see [`Player::choose_a_move`].
    #[default]
    Scripted,
    /// A uniformly shuffled order of the side's moves.
    Random,
}

impl Policy {
    /// Returns the side's moves in the order they should be tried.
    ///
    /// Candidates are pseudo-legal; the caller keeps the first one whose
    /// execution finishes. Promotions carry `promotion` as their piece.
    pub fn candidates<R: Rng + ?Sized>(
        self,
        player: &Player<'_>,
        promotion: PieceKind,
        rng: &mut R,
    ) -> Vec<Move> {
        let mut moves = player.legal_moves().to_vec();
        match self {
            Policy::Scripted => {
                if let Some(pick) = player.choose_a_move() {
                    if let Some(i) = moves.iter().position(|mv| *mv == pick) {
                        moves[..=i].rotate_right(1);
                    }
                }
            }
            Policy::Random => moves.shuffle(rng),
        }
        moves
            .into_iter()
            .map(|mv| {
                if mv.is_promotion() {
                    mv.with_promotion(promotion)
                } else {
                    mv
                }
            })
            .collect()
    }
}
