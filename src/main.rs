//! Pentago-Rust: a minimax Pentago engine.
//!
//! ## Usage
//!
//! - `pentago-rust` - Play against the engine on the console
//! - `pentago-rust play --depth 2` - Same, with a shallower search
//! - `pentago-rust demo` - Watch the engine play itself

use std::io::{self, Write};

use anyhow::Result;
use clap::{Parser, Subcommand};

use pentago_rust::console::{ConsoleGame, GameConfig, self_play};
use pentago_rust::constants::AI_SEARCH_DEPTH;
use pentago_rust::eval::StreakScores;

/// Pentago-Rust: a minimax Pentago engine
#[derive(Parser)]
#[command(name = "pentago-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game against the engine on the console
    Play {
        /// Search depth in plies
        #[arg(short, long, default_value_t = AI_SEARCH_DEPTH,
              value_parser = clap::value_parser!(u32).range(1..))]
        depth: u32,
        /// Streak weights, e.g. "1,2,3,4,5,6;2,3,4,5,6,7"
        #[arg(short, long)]
        weights: Option<StreakScores>,
        /// Seed for choosing who moves first
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Let the engine play both sides
    Demo {
        /// Search depth in plies
        #[arg(short, long, default_value_t = 2,
              value_parser = clap::value_parser!(u32).range(1..))]
        depth: u32,
        /// Streak weights, e.g. "1,2,3,4,5,6;2,3,4,5,6,7"
        #[arg(short, long)]
        weights: Option<StreakScores>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, level),
    )
    .format(|buf, record| {
        writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args())
    })
    .target(env_logger::Target::Stderr)
    .init();

    match cli.command {
        Some(Commands::Play { depth, weights, seed }) => {
            let config = GameConfig { depth, scores: weights.unwrap_or_default(), seed };
            ConsoleGame::stdio(config).run()?;
        }
        Some(Commands::Demo { depth, weights }) => {
            println!("Pentago-Rust: engine self-play at depth {depth}\n");
            self_play(io::stdout().lock(), depth, weights.unwrap_or_default())?;
        }
        None => {
            let config = GameConfig {
                depth: AI_SEARCH_DEPTH,
                scores: StreakScores::default(),
                seed: None,
            };
            ConsoleGame::stdio(config).run()?;
        }
    }
    Ok(())
}
