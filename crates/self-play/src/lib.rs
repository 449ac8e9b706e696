//! Self-play driver for the chess rules engine.
//!
//! Two configured policies take turns on one board until the game ends or a
//! ply limit is reached. The game can then be written as PGN.

pub mod config;
pub mod game;
pub mod policy;

pub use config::{ConfigError, Promotion, SelfPlayConfig, SideConfig};
pub use game::{GameRecord, GameRunner, Outcome};
pub use policy::Policy;
