//! Game rules for tic-tac-toe
//!
//! This module implements:
//! - Win and draw detection over bitboards
//! - Turn inference from piece counts
//! - Move legality and the first-empty-cell fallback used by front ends

pub mod turn;
pub mod win;

use crate::board::{Board, Pos, BOARD_SIZE};

// Re-exports for convenient access
pub use turn::{side_to_move, Perspective};
pub use win::{check_winner, game_status, is_full, is_winner, winning_line, GameStatus, WIN_LINES};

/// A move is valid if it is on the board and the cell is empty
#[inline]
pub fn is_valid_move(board: &Board, pos: Pos) -> bool {
    (pos.row as usize) < BOARD_SIZE && (pos.col as usize) < BOARD_SIZE && board.is_empty(pos)
}

/// First empty cell in row-major order.
///
/// Front ends use this when a move from some other path turns out to be
/// unusable; the decision engine never needs it.
pub fn first_empty(board: &Board) -> Option<Pos> {
    board.empty_cells().iter_ones().next()
}
