//! 9-bit occupancy mask, one bit per cell index `row * 3 + col`

use super::{Pos, TOTAL_CELLS};

/// Occupancy mask for one side.
///
/// Only bits 0..=8 are ever set. Passed by value everywhere; the search
/// never mutates a caller's mask in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bitboard(u16);

impl Bitboard {
    /// All nine cells occupied
    pub const FULL: Bitboard = Bitboard(0x1FF);

    /// Create empty bitboard
    pub const fn new() -> Self {
        Self(0)
    }

    /// Build from raw bits (upper bits are discarded)
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits & Self::FULL.0)
    }

    /// Single-cell mask
    #[inline]
    pub const fn bit(idx: usize) -> Self {
        Self(1 << idx)
    }

    #[inline]
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Set a bit at position
    #[inline]
    pub fn set(&mut self, pos: Pos) {
        self.0 |= 1 << pos.to_index();
    }

    /// Clear a bit at position
    #[inline]
    pub fn clear(&mut self, pos: Pos) {
        self.0 &= !(1 << pos.to_index());
    }

    /// Check if bit is set at position
    #[inline]
    pub fn get(self, pos: Pos) -> bool {
        self.has_index(pos.to_index())
    }

    #[inline]
    pub fn has_index(self, idx: usize) -> bool {
        (self.0 >> idx) & 1 == 1
    }

    /// Copy with the given cell index added
    #[inline]
    pub const fn with(self, idx: usize) -> Self {
        Self(self.0 | (1 << idx))
    }

    #[inline]
    pub const fn union(self, other: Bitboard) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    pub const fn intersects(self, other: Bitboard) -> bool {
        self.0 & other.0 != 0
    }

    /// True if every bit of `other` is also set here
    #[inline]
    pub const fn contains(self, other: Bitboard) -> bool {
        self.0 & other.0 == other.0
    }

    /// Count total set bits (popcount)
    #[inline]
    pub fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Check if empty
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate over set bit positions in ascending index order
    pub fn iter_ones(self) -> BitboardIter {
        BitboardIter { bits: self.0 }
    }
}

/// Iterator over set bits in a Bitboard
pub struct BitboardIter {
    bits: u16,
}

impl Iterator for BitboardIter {
    type Item = Pos;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        let idx = self.bits.trailing_zeros() as usize;
        // Clear the bit we just found
        self.bits &= self.bits - 1;
        debug_assert!(idx < TOTAL_CELLS);
        Some(Pos::from_index(idx))
    }
}
