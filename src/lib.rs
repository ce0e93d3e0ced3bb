//! Pentago-Rust: a minimax engine for Pentago.
//!
//! Pentago is played on a 6x6 board made of four 3x3 quadrants. A turn is a
//! stone placement followed by a quarter turn of any quadrant; five in a row
//! wins. This crate provides the board, a streak-scanning evaluator, and a
//! fixed-depth alpha-beta search that recommends a move.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, rotation tables, default weights
//! - [`board`] - Packed board with O(1) quadrant rotation
//! - [`eval`] - Streak-scanning evaluation and scoring weights
//! - [`node_eval`] - Search results and their ordering
//! - [`search`] - Minimax with alpha-beta pruning and move ordering
//! - [`notation`] - `B/C QD` move notation
//! - [`console`] - Human-vs-AI console game and self-play
//!
//! ## Example
//!
//! ```
//! use pentago_rust::board::{Board, Color};
//! use pentago_rust::eval::StreakScores;
//! use pentago_rust::notation::format_move;
//! use pentago_rust::search::Search;
//!
//! let mut board = Board::new();
//! let mut search = Search::new(StreakScores::default());
//!
//! let result = search.best_move(&mut board, Color::White, 1);
//! let mv = result.best_move.expect("a move from an empty board");
//! board.play_move(Color::White, mv.loc, mv.rotation);
//! println!("White plays {} ({})", format_move(&mv), result.score);
//! ```

pub mod board;
pub mod console;
pub mod constants;
pub mod eval;
pub mod node_eval;
pub mod notation;
pub mod search;
