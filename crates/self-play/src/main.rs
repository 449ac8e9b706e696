//! Self-play - lets the engine play a game against itself.

use std::path::PathBuf;

use chess_engine::pgn;
use clap::Parser;
use self_play::{GameRunner, SelfPlayConfig};
use tracing_subscriber::EnvFilter;

/// Plays the rules engine against itself.
#[derive(Parser)]
#[command(name = "self-play")]
#[command(about = "Plays the rules engine against itself")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(long, default_value_os_t = SelfPlayConfig::default_path())]
    config: PathBuf,

    /// Stop after this many plies
    #[arg(long)]
    max_plies: Option<u32>,

    /// Starting position as FEN
    #[arg(long)]
    fen: Option<String>,

    /// Write the game as PGN to this file
    #[arg(long)]
    pgn: Option<PathBuf>,

    /// Seed for the random policy
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let args = Args::parse();

    let mut config = SelfPlayConfig::load(&args.config)?;
    if let Some(max_plies) = args.max_plies {
        config.max_plies = max_plies;
    }
    if args.fen.is_some() {
        config.start_fen = args.fen;
    }
    if args.pgn.is_some() {
        config.pgn_output = args.pgn;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    tracing::info!(
        "White: {:?}, Black: {:?}, max plies: {}",
        config.white.policy,
        config.black.policy,
        config.max_plies
    );

    let pgn_output = config.pgn_output.clone();
    let record = GameRunner::new(config).play()?;

    println!("{}", record.final_board);
    println!("{}", pgn::render_moves(&record.log));
    println!("{}", record.outcome);
    println!("FEN: {}", record.final_board.to_fen());

    if let Some(path) = pgn_output {
        pgn::write(&path, &record.log)?;
        tracing::info!("PGN written to {:?}", path);
    }

    Ok(())
}
