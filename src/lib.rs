//! Tic-tac-toe move-selection engine
//!
//! Picks a move for a 3x3 position at one of several strengths:
//! - Perfect play via exhaustive alpha-beta search (never loses)
//! - Perfect play with a configurable chance of a random move
//! - Depth-limited search over shuffled move orders
//! - A greedy linear model with no search at all
//!
//! # Architecture
//!
//! - [`board`]: 9-bit bitboards and the board type
//! - [`rules`]: Win/draw detection and turn inference
//! - [`search`]: Configurable minimax with alpha-beta pruning
//! - [`eval`]: Linear position evaluation
//! - [`engine`]: Difficulty handling and the decision entry point
//! - [`config`]: `tictactoe.toml` loading with environment overrides
//! - [`sim`]: Head-to-head simulation used for benchmarking difficulties
//! - [`ui`]: egui front end
//!
//! # Quick Start
//!
//! ```
//! use tictactoe::{find_best_move, Board, Difficulty, LinearModel, Pos, Stone};
//! use rand::SeedableRng;
//!
//! let grid = [['X', 'X', ' '], ['O', 'O', ' '], [' ', ' ', ' ']];
//! let board = Board::from_symbols(&grid, 'X', 'O');
//! let mut rng = rand::rngs::SmallRng::seed_from_u64(0);
//!
//! let result = find_best_move(&board, Stone::X, Difficulty::HARD, &LinearModel::default(), &mut rng);
//! assert_eq!(result.best_move, Some(Pos::new(0, 2)));
//! ```
//!
//! Randomness is always passed in, and search statistics come back in the
//! [`MoveResult`], so concurrent calls never share state.

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod rules;
pub mod search;
pub mod sim;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{Board, Pos, Stone, BOARD_SIZE};
pub use engine::{find_best_move, AIEngine, Difficulty, Evaluation, MoveResult, SearchType};
pub use error::{Error, Result};
pub use eval::LinearModel;
