//! A rules engine and minimax opponent for the board game 'Connect 4'
//!
//! The computer player looks a fixed number of moves ahead using a
//! minimax search with alpha-beta pruning, scoring the positions it
//! reaches with a hand-tuned connection heuristic.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_ai::{grid::Grid, player::PlayerId, solver::compute_next_move};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let (human, ai) = (PlayerId::new(0), PlayerId::new(1));
//! // the human has the first three columns of the bottom row
//! let grid = Grid::from_moves(7, 6, "17273", human, ai)?;
//!
//! assert_eq!(compute_next_move(&grid, ai, human, 3), Some(3));
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod grid;

pub mod heuristic;

pub mod player;

pub mod solver;

pub mod config;

pub mod game;

pub mod arena;

mod test;

/// The default width of the game board in tiles
pub const WIDTH: usize = 7;

/// The default height of the game board in tiles
pub const HEIGHT: usize = 6;

/// The most columns a grid can hold
pub const MAX_COLUMNS: usize = 16;

/// The most rows a grid can hold, columns are stored inline with this capacity
pub const MAX_ROWS: usize = 16;

/// Number of chips in a row needed to win
pub const WINNING_LENGTH: usize = 4;

/// How many moves ahead the computer player looks by default
pub const MAX_COMPUTE_DEPTH: usize = 3;

const_assert!(WIDTH >= WINNING_LENGTH && WIDTH <= MAX_COLUMNS);
const_assert!(HEIGHT >= WINNING_LENGTH && HEIGHT <= MAX_ROWS);
const_assert!(MAX_COMPUTE_DEPTH > 0);
