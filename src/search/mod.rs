//! Search module for the tic-tac-toe AI
//!
//! Contains a single configurable minimax searcher with alpha-beta pruning
//! over the bitboard representation.

pub mod alphabeta;

pub use alphabeta::{RootResult, SearchConfig, SearchStats, Searcher, INF, MAX_DEPTH, MOVE_ORDER, WIN_SCORE};
