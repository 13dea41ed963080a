//! Turn inference
//!
//! Callers that do not track turn order pass a hint; piece counts decide
//! whenever they can, the hint only breaks ties.

use tracing::debug;

use crate::board::{Bitboard, Board, Stone};

/// Side to move: the side with strictly fewer stones, else `hint`.
pub fn side_to_move(board: &Board, hint: Stone) -> Stone {
    let x = board.x.count();
    let o = board.o.count();
    if x < o {
        Stone::X
    } else if o < x {
        Stone::O
    } else {
        hint
    }
}

/// The board seen from the side about to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Perspective {
    pub mover: Stone,
    pub own: Bitboard,
    pub opp: Bitboard,
}

impl Perspective {
    /// Resolve who moves and split the board into own/opponent masks.
    ///
    /// `hint` must be `X` or `O`; an `Empty` hint is treated as `X`.
    pub fn resolve(board: &Board, hint: Stone) -> Self {
        let hint = if hint == Stone::Empty { Stone::X } else { hint };
        let mover = side_to_move(board, hint);
        if mover != hint {
            debug!(?hint, ?mover, "piece counts override requested mover");
        }
        let (own, opp) = match mover {
            Stone::O => (board.o, board.x),
            _ => (board.x, board.o),
        };
        Self { mover, own, opp }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Pos;

    #[test]
    fn test_empty_board_uses_hint() {
        let board = Board::new();
        assert_eq!(side_to_move(&board, Stone::X), Stone::X);
        assert_eq!(side_to_move(&board, Stone::O), Stone::O);
    }

    #[test]
    fn test_fewer_stones_moves() {
        let mut board = Board::new();
        board.place_stone(Pos::new(1, 1), Stone::X);
        assert_eq!(side_to_move(&board, Stone::X), Stone::O);

        board.place_stone(Pos::new(0, 0), Stone::O);
        board.place_stone(Pos::new(0, 1), Stone::O);
        assert_eq!(side_to_move(&board, Stone::O), Stone::X);
    }

    #[test]
    fn test_tie_uses_hint() {
        let mut board = Board::new();
        board.place_stone(Pos::new(1, 1), Stone::X);
        board.place_stone(Pos::new(0, 0), Stone::O);
        assert_eq!(side_to_move(&board, Stone::O), Stone::O);
        assert_eq!(side_to_move(&board, Stone::X), Stone::X);
    }

    #[test]
    fn test_perspective_masks() {
        let mut board = Board::new();
        board.place_stone(Pos::new(1, 1), Stone::X);

        let p = Perspective::resolve(&board, Stone::X);
        assert_eq!(p.mover, Stone::O);
        assert_eq!(p.own, board.o);
        assert_eq!(p.opp, board.x);
    }

    #[test]
    fn test_perspective_empty_hint_defaults_to_x() {
        let p = Perspective::resolve(&Board::new(), Stone::Empty);
        assert_eq!(p.mover, Stone::X);
    }
}
