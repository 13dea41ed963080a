//! Win and draw detection
//!
//! A side wins by owning all three cells of a row, column or diagonal.
//! Each line is a constant mask, so a win check is at most eight ANDs.

use crate::board::{Bitboard, Board, Pos, Stone};

/// The eight winning lines over the row-major cell index space
pub const WIN_LINES: [Bitboard; 8] = [
    // Rows
    Bitboard::from_bits(0b000_000_111),
    Bitboard::from_bits(0b000_111_000),
    Bitboard::from_bits(0b111_000_000),
    // Columns
    Bitboard::from_bits(0b001_001_001),
    Bitboard::from_bits(0b010_010_010),
    Bitboard::from_bits(0b100_100_100),
    // Diagonals
    Bitboard::from_bits(0b100_010_001),
    Bitboard::from_bits(0b001_010_100),
];

/// Outcome of a position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Win(Stone),
    Draw,
}

impl GameStatus {
    #[inline]
    pub fn is_over(self) -> bool {
        !matches!(self, GameStatus::Ongoing)
    }
}

/// True iff `mask` covers any winning line
#[inline]
pub fn is_winner(mask: Bitboard) -> bool {
    WIN_LINES.iter().any(|&line| mask.contains(line))
}

/// True iff the two masks together cover all nine cells
#[inline]
pub fn is_full(a: Bitboard, b: Bitboard) -> bool {
    a.union(b) == Bitboard::FULL
}

/// Return the side owning a complete line, if any.
///
/// X is checked first; a legal game can never have both.
pub fn check_winner(board: &Board) -> Option<Stone> {
    if is_winner(board.x) {
        Some(Stone::X)
    } else if is_winner(board.o) {
        Some(Stone::O)
    } else {
        None
    }
}

/// Find the first complete line for `stone`, as three positions in index order
pub fn winning_line(board: &Board, stone: Stone) -> Option<[Pos; 3]> {
    let mask = board.stones(stone)?;
    let line = WIN_LINES.iter().find(|&&line| mask.contains(line))?;

    let mut cells = line.iter_ones();
    match (cells.next(), cells.next(), cells.next()) {
        (Some(a), Some(b), Some(c)) => Some([a, b, c]),
        _ => None,
    }
}

/// Classify the board as won, drawn or still in play
pub fn game_status(board: &Board) -> GameStatus {
    if let Some(winner) = check_winner(board) {
        GameStatus::Win(winner)
    } else if is_full(board.x, board.o) {
        GameStatus::Draw
    } else {
        GameStatus::Ongoing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_line_wins() {
        for line in WIN_LINES {
            assert_eq!(line.count(), 3);
            assert!(is_winner(line));
        }
    }

    #[test]
    fn test_winner_only_for_owning_side() {
        for line in WIN_LINES {
            let mut board = Board::from_masks(line, Bitboard::new());
            // Give O a few stones outside the line
            for pos in Bitboard::from_bits(!line.bits()).iter_ones().take(2) {
                board.place_stone(pos, Stone::O);
            }
            assert!(is_winner(board.x));
            assert!(!is_winner(board.o));
            assert_eq!(check_winner(&board), Some(Stone::X));
        }
    }

    #[test]
    fn test_two_in_line_not_winner() {
        assert!(!is_winner(Bitboard::from_bits(0b000_000_011)));
        assert!(!is_winner(Bitboard::from_bits(0b100_000_001)));
        assert!(!is_winner(Bitboard::new()));
    }

    #[test]
    fn test_full_board_draw() {
        // X O X
        // X O O
        // O X X
        let grid = [['X', 'O', 'X'], ['X', 'O', 'O'], ['O', 'X', 'X']];
        let board = Board::from_symbols(&grid, 'X', 'O');

        assert!(is_full(board.x, board.o));
        assert!(!is_winner(board.x));
        assert!(!is_winner(board.o));
        assert_eq!(game_status(&board), GameStatus::Draw);
    }

    #[test]
    fn test_status_ongoing_and_win() {
        let mut board = Board::new();
        assert_eq!(game_status(&board), GameStatus::Ongoing);
        assert!(!game_status(&board).is_over());

        board.place_stone(Pos::new(0, 2), Stone::O);
        board.place_stone(Pos::new(1, 1), Stone::O);
        board.place_stone(Pos::new(2, 0), Stone::O);
        assert_eq!(game_status(&board), GameStatus::Win(Stone::O));
        assert!(game_status(&board).is_over());
    }

    #[test]
    fn test_winning_line_positions() {
        let mut board = Board::new();
        board.place_stone(Pos::new(0, 1), Stone::X);
        board.place_stone(Pos::new(1, 1), Stone::X);
        board.place_stone(Pos::new(2, 1), Stone::X);

        assert_eq!(
            winning_line(&board, Stone::X),
            Some([Pos::new(0, 1), Pos::new(1, 1), Pos::new(2, 1)])
        );
        assert_eq!(winning_line(&board, Stone::O), None);
        assert_eq!(winning_line(&board, Stone::Empty), None);
    }
}
