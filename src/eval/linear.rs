//! Linear board evaluation
//!
//! Scores a position without search: each cell contributes `+w` when the
//! mover holds it, `-w` when the opponent does and nothing when empty, plus
//! a constant bias. The trained weights favour the centre, then corners,
//! then edges.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Pos, Stone, TOTAL_CELLS};

/// Nine per-cell weights (row-major) and a bias.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub weights: [f64; TOTAL_CELLS],
    pub bias: f64,
}

/// Weights learned from self-play game outcomes.
pub const PRETRAINED: LinearModel = LinearModel {
    weights: [
        3.928391392624212,  // (0, 0)
        3.6032407817955696, // (0, 1)
        4.011058129716569,  // (0, 2)
        3.6831967066011444, // (1, 0)
        4.313335296889612,  // (1, 1)
        3.6169667100902494, // (1, 2)
        3.9842838685550195, // (2, 0)
        3.669842436819702,  // (2, 1)
        3.984526284468059,  // (2, 2)
    ],
    bias: -1.6450287057758302,
};

impl Default for LinearModel {
    fn default() -> Self {
        PRETRAINED
    }
}

impl LinearModel {
    pub const fn new(weights: [f64; TOTAL_CELLS], bias: f64) -> Self {
        Self { weights, bias }
    }

    /// Score `board` from `mover`'s point of view.
    #[must_use]
    pub fn score(&self, board: &Board, mover: Stone) -> f64 {
        let (Some(own), Some(opp)) = (board.stones(mover), board.stones(mover.opponent())) else {
            return self.bias;
        };

        let mut total = self.bias;
        for (idx, weight) in self.weights.iter().enumerate() {
            if own.has_index(idx) {
                total += weight;
            } else if opp.has_index(idx) {
                total -= weight;
            }
        }
        total
    }

    /// Greedy one-ply choice: the empty cell whose placement scores highest.
    ///
    /// Cells are tried in row-major order and the first maximum wins, so the
    /// result is deterministic. `None` on a full board.
    #[must_use]
    pub fn best_move(&self, board: &Board, mover: Stone) -> Option<(Pos, f64)> {
        let mut work = *board;
        let mut best: Option<(Pos, f64)> = None;

        for pos in board.empty_cells().iter_ones() {
            work.place_stone(pos, mover);
            let score = self.score(&work, mover);
            work.remove_stone(pos);

            if best.map_or(true, |(_, s)| score > s) {
                best = Some((pos, score));
            }
        }
        debug_assert_eq!(work, *board);
        best
    }
}
