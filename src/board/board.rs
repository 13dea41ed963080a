//! Board structure and grid encoding

use std::fmt;

use super::bitboard::Bitboard;
use super::{Pos, Stone, BOARD_SIZE};

/// 3x3 grid of stones as seen at the engine boundary
pub type Grid = [[Stone; BOARD_SIZE]; BOARD_SIZE];

/// Game board as two disjoint occupancy masks.
///
/// Small enough to copy; the engine takes boards by value or shared
/// reference and never keeps one between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    /// X stones bitboard
    pub x: Bitboard,
    /// O stones bitboard
    pub o: Bitboard,
}

impl Board {
    pub const fn new() -> Self {
        Self {
            x: Bitboard::new(),
            o: Bitboard::new(),
        }
    }

    /// Build a board directly from masks. Overlapping masks are a caller bug.
    pub fn from_masks(x: Bitboard, o: Bitboard) -> Self {
        debug_assert!(!x.intersects(o), "a cell cannot hold both X and O");
        Self { x, o }
    }

    /// Encode a grid of stones.
    pub fn from_grid(grid: &Grid) -> Self {
        let mut board = Self::new();
        for (r, row) in grid.iter().enumerate() {
            for (c, &stone) in row.iter().enumerate() {
                board.place_stone(Pos::new(r as u8, c as u8), stone);
            }
        }
        board
    }

    /// Encode a grid of arbitrary symbols.
    ///
    /// Cells equal to `x_symbol` become X, cells equal to `o_symbol` become O,
    /// anything else is empty.
    pub fn from_symbols<T: PartialEq>(grid: &[[T; BOARD_SIZE]; BOARD_SIZE], x_symbol: T, o_symbol: T) -> Self {
        let mut board = Self::new();
        for (r, row) in grid.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let pos = Pos::new(r as u8, c as u8);
                if *cell == x_symbol {
                    board.place_stone(pos, Stone::X);
                } else if *cell == o_symbol {
                    board.place_stone(pos, Stone::O);
                }
            }
        }
        board
    }

    /// Decode back into a grid.
    pub fn to_grid(&self) -> Grid {
        let mut grid = [[Stone::Empty; BOARD_SIZE]; BOARD_SIZE];
        for (r, row) in grid.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = self.get(Pos::new(r as u8, c as u8));
            }
        }
        grid
    }

    #[inline]
    pub fn size(&self) -> usize {
        BOARD_SIZE
    }

    /// Get stone at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        if self.x.get(pos) {
            Stone::X
        } else if self.o.get(pos) {
            Stone::O
        } else {
            Stone::Empty
        }
    }

    /// Check if position is empty
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        !self.x.get(pos) && !self.o.get(pos)
    }

    /// Place a stone. Placing `Empty` is a no-op.
    #[inline]
    pub fn place_stone(&mut self, pos: Pos, stone: Stone) {
        debug_assert!(
            stone == Stone::Empty || self.is_empty(pos),
            "cell {pos} already occupied"
        );
        match stone {
            Stone::X => self.x.set(pos),
            Stone::O => self.o.set(pos),
            Stone::Empty => {}
        }
    }

    /// Remove a stone
    #[inline]
    pub fn remove_stone(&mut self, pos: Pos) {
        self.x.clear(pos);
        self.o.clear(pos);
    }

    /// Get bitboard for a side (returns None for Empty)
    #[inline]
    pub fn stones(&self, stone: Stone) -> Option<Bitboard> {
        match stone {
            Stone::X => Some(self.x),
            Stone::O => Some(self.o),
            Stone::Empty => None,
        }
    }

    /// Union of both sides
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.x.union(self.o)
    }

    /// Mask of empty cells
    #[inline]
    pub fn empty_cells(&self) -> Bitboard {
        Bitboard::from_bits(!self.occupied().bits())
    }

    /// Total stones on board
    #[inline]
    pub fn stone_count(&self) -> u32 {
        self.x.count() + self.o.count()
    }

    /// Check if board is empty
    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.x.is_empty() && self.o.is_empty()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..BOARD_SIZE as u8 {
            let cells: Vec<String> = (0..BOARD_SIZE as u8)
                .map(|c| format!(" {} ", self.get(Pos::new(r, c)).symbol()))
                .collect();
            writeln!(f, "{}", cells.join("|"))?;
            if r + 1 < BOARD_SIZE as u8 {
                writeln!(f, "---|---|---")?;
            }
        }
        Ok(())
    }
}
