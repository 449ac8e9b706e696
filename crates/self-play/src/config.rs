//! Configuration file loading for self-play games.
//!
//! Settings come from a TOML file, `selfplay.toml` unless another path is
//! given. A missing file yields the defaults.

use std::path::{Path, PathBuf};

use chess_core::{PieceKind, Side};
use serde::Deserialize;
use thiserror::Error;

use crate::policy::Policy;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// The piece a side promotes its pawns to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum Promotion {
    #[default]
    #[serde(alias = "queen")]
    Queen,
    #[serde(alias = "rook")]
    Rook,
    #[serde(alias = "bishop")]
    Bishop,
    #[serde(alias = "knight")]
    Knight,
}

impl From<Promotion> for PieceKind {
    fn from(promotion: Promotion) -> Self {
        match promotion {
            Promotion::Queen => PieceKind::Queen,
            Promotion::Rook => PieceKind::Rook,
            Promotion::Bishop => PieceKind::Bishop,
            Promotion::Knight => PieceKind::Knight,
        }
    }
}

/// Settings for one side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct SideConfig {
    #[serde(default)]
    pub policy: Policy,
    #[serde(default)]
    pub promotion: Promotion,
}

/// Settings for a self-play game.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SelfPlayConfig {
    /// Plies to play before giving up. Defaults to 200.
    #[serde(default = "default_max_plies")]
    pub max_plies: u32,
    /// Starting position; the standard one when absent.
    #[serde(default)]
    pub start_fen: Option<String>,
    /// Where to write the finished game.
    #[serde(default)]
    pub pgn_output: Option<PathBuf>,
    /// Seed for the random policy. Unseeded games draw from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub white: SideConfig,
    #[serde(default)]
    pub black: SideConfig,
}

fn default_max_plies() -> u32 {
    200
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            max_plies: default_max_plies(),
            start_fen: None,
            pgn_output: None,
            seed: None,
            white: SideConfig::default(),
            black: SideConfig::default(),
        }
    }
}

impl SelfPlayConfig {
    /// Loads the configuration at `path`, or the defaults if there is no
    /// file there.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            tracing::info!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn default_path() -> PathBuf {
        PathBuf::from("selfplay.toml")
    }

    pub fn side(&self, side: Side) -> &SideConfig {
        match side {
            Side::White => &self.white,
            Side::Black => &self.black,
        }
    }
}
