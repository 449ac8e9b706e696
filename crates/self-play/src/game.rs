//! Game loop for engine self-play.

use std::fmt;

use chess_core::Side;
use chess_engine::{Board, FenDecodeError, MoveLog};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::SelfPlayConfig;

/// Why a game stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Checkmate { winner: Side },
    Stalemate,
    /// Every move of `side` left its own king attacked.
    NoSafeMove { side: Side },
    PlyLimit,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Checkmate { winner } => write!(f, "{} wins by checkmate", winner),
            Outcome::Stalemate => write!(f, "stalemate"),
            Outcome::NoSafeMove { side } => write!(f, "{} has no safe move", side),
            Outcome::PlyLimit => write!(f, "ply limit reached"),
        }
    }
}

/// A played game.
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub outcome: Outcome,
    pub log: MoveLog,
    pub final_board: Board,
}

/// Plays one game with the given settings.
pub struct GameRunner {
    config: SelfPlayConfig,
    rng: StdRng,
}

impl GameRunner {
    pub fn new(config: SelfPlayConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        GameRunner { config, rng }
    }

    fn starting_board(&self) -> Result<Board, FenDecodeError> {
        match &self.config.start_fen {
            Some(fen) => Board::from_fen(fen),
            None => Ok(Board::create_starting_board()),
        }
    }

    /// Plays until the game ends or the ply limit is hit.
    pub fn play(&mut self) -> Result<GameRecord, FenDecodeError> {
        let mut board = self.starting_board()?;
        let mut log = MoveLog::new();

        let outcome = loop {
            let player = board.current_player();
            let side = player.side();
            if player.is_in_checkmate() {
                break Outcome::Checkmate {
                    winner: side.opposite(),
                };
            }
            if player.is_in_stalemate() {
                break Outcome::Stalemate;
            }
            if log.len() >= self.config.max_plies as usize {
                break Outcome::PlyLimit;
            }

            let settings = *self.config.side(side);
            let candidates =
                settings
                    .policy
                    .candidates(&player, settings.promotion.into(), &mut self.rng);
            let next = candidates.iter().find_map(|mv| {
                let execution = player.make_move(mv);
                log.add(&execution).then(|| execution.into_after_board())
            });

            match next {
                Some(after) => {
                    if let Some(last) = log.moves().last() {
                        tracing::debug!("{} played {}", side, last.notation());
                    }
                    board = after;
                }
                None => break Outcome::NoSafeMove { side },
            }
        };

        tracing::info!("Game over after {} plies: {}", log.len(), outcome);
        Ok(GameRecord {
            outcome,
            log,
            final_board: board,
        })
    }
}
