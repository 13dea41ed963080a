//! Alpha-beta minimax over bitboards
//!
//! One searcher covers every strength the engine offers. A [`SearchConfig`]
//! switches pruning on or off, caps the depth, and chooses between the fixed
//! centre/corner/edge move order and a freshly shuffled order at every node.
//!
//! Scores are from the root mover's point of view: `10 - depth` for a win,
//! `depth - 10` for a loss, `0` for a draw or an unresolved cutoff. Faster
//! wins and slower losses therefore score better.
//!
//! # Example
//!
//! ```
//! use tictactoe::board::{Board, Pos};
//! use tictactoe::search::{SearchConfig, Searcher};
//! use rand::SeedableRng;
//!
//! let grid = [['X', 'X', ' '], ['O', 'O', ' '], [' ', ' ', ' ']];
//! let board = Board::from_symbols(&grid, 'X', 'O');
//! let mut rng = rand::rngs::SmallRng::seed_from_u64(1);
//!
//! let mut searcher = Searcher::new(SearchConfig::perfect());
//! let root = searcher.score_root(board.x, board.o, &mut rng);
//! assert_eq!(root.candidates, vec![Pos::new(0, 2)]);
//! ```

use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::{Bitboard, Pos, TOTAL_CELLS};
use crate::rules::{is_full, is_winner};

/// Infinity score for alpha-beta bounds
pub const INF: i32 = 1_000;

/// Score of a win found at depth 0
pub const WIN_SCORE: i32 = 10;

/// Plies in a full game
pub const MAX_DEPTH: u8 = TOTAL_CELLS as u8;

/// Centre, corners, edges. Strong moves first tighten the window early.
pub const MOVE_ORDER: [usize; TOTAL_CELLS] = [4, 0, 2, 6, 8, 1, 3, 5, 7];

/// Search knobs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Stop iterating a node once `alpha >= beta`
    pub pruning: bool,
    /// Nodes at this depth or deeper score 0
    pub depth_limit: u8,
    /// Shuffle the candidate cells at every node instead of using [`MOVE_ORDER`]
    pub shuffle: bool,
}

impl SearchConfig {
    /// Full-depth alpha-beta in fixed order
    pub const fn perfect() -> Self {
        Self {
            pruning: true,
            depth_limit: MAX_DEPTH,
            shuffle: false,
        }
    }

    /// Full-depth minimax without pruning
    pub const fn exhaustive() -> Self {
        Self {
            pruning: false,
            depth_limit: MAX_DEPTH,
            shuffle: false,
        }
    }

    /// Depth-capped search over shuffled moves
    pub const fn shallow(depth_limit: u8) -> Self {
        Self {
            pruning: true,
            depth_limit,
            shuffle: true,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::perfect()
    }
}

/// Counters collected during one search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes visited below the root
    pub nodes: u64,
    /// Deepest ply reached
    pub max_depth: u8,
    /// Alpha or beta cutoffs taken
    pub cutoffs: u64,
}

impl SearchStats {
    /// Merge another stats into this one
    pub fn merge(&mut self, other: &SearchStats) {
        self.nodes += other.nodes;
        self.max_depth = self.max_depth.max(other.max_depth);
        self.cutoffs += other.cutoffs;
    }
}

/// Scores of every root move plus the set of moves tied for best
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootResult {
    /// Best score found, `-INF` when there were no legal moves
    pub best_score: i32,
    /// All moves scoring `best_score`, in the order they were searched
    pub candidates: Vec<Pos>,
    /// Every searched move with its score
    pub scores: Vec<(Pos, i32)>,
}

impl RootResult {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Score of a particular root move
    pub fn score_of(&self, pos: Pos) -> Option<i32> {
        self.scores.iter().find(|(p, _)| *p == pos).map(|&(_, s)| s)
    }
}

/// Minimax searcher. Holds only its configuration and counters; all node
/// state lives on the call stack.
#[derive(Debug, Clone)]
pub struct Searcher {
    config: SearchConfig,
    stats: SearchStats,
}

impl Searcher {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            stats: SearchStats::default(),
        }
    }

    #[inline]
    pub fn config(&self) -> SearchConfig {
        self.config
    }

    #[inline]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = SearchStats::default();
    }

    /// Score every empty cell as a move for the side owning `own`.
    ///
    /// Each move gets a full `(-INF, INF)` window so that tied scores are
    /// exact values rather than bounds.
    pub fn score_root<R: Rng + ?Sized>(&mut self, own: Bitboard, opp: Bitboard, rng: &mut R) -> RootResult {
        let (cells, len) = self.candidate_cells(own.union(opp), rng);
        let mut result = RootResult {
            best_score: -INF,
            candidates: Vec::with_capacity(len),
            scores: Vec::with_capacity(len),
        };

        for &idx in &cells[..len] {
            let score = self.search(own.with(idx), opp, 1, -INF, INF, false, rng);
            let pos = Pos::from_index(idx);
            result.scores.push((pos, score));

            if score > result.best_score {
                result.best_score = score;
                result.candidates.clear();
                result.candidates.push(pos);
            } else if score == result.best_score {
                result.candidates.push(pos);
            }
        }

        result
    }

    /// Minimax with optional alpha-beta pruning.
    ///
    /// `own` always belongs to the root mover; `maximizing` says whose turn
    /// it is at this node. Masks are taken by value and never modified.
    #[allow(clippy::too_many_arguments)]
    pub fn search<R: Rng + ?Sized>(
        &mut self,
        own: Bitboard,
        opp: Bitboard,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
        rng: &mut R,
    ) -> i32 {
        self.stats.nodes += 1;
        self.stats.max_depth = self.stats.max_depth.max(depth);

        if is_winner(own) {
            return WIN_SCORE - depth as i32;
        }
        if is_winner(opp) {
            return depth as i32 - WIN_SCORE;
        }
        if is_full(own, opp) || depth >= self.config.depth_limit {
            return 0;
        }

        let (cells, len) = self.candidate_cells(own.union(opp), rng);
        let mut best = if maximizing { -INF } else { INF };

        for &idx in &cells[..len] {
            if maximizing {
                let val = self.search(own.with(idx), opp, depth + 1, alpha, beta, false, rng);
                best = best.max(val);
                alpha = alpha.max(val);
            } else {
                let val = self.search(own, opp.with(idx), depth + 1, alpha, beta, true, rng);
                best = best.min(val);
                beta = beta.min(val);
            }

            if self.config.pruning && alpha >= beta {
                self.stats.cutoffs += 1;
                break;
            }
        }

        best
    }

    /// Empty cell indices in search order, on the stack.
    fn candidate_cells<R: Rng + ?Sized>(&self, occupied: Bitboard, rng: &mut R) -> ([usize; TOTAL_CELLS], usize) {
        let mut cells = [0usize; TOTAL_CELLS];
        let mut len = 0;
        for idx in MOVE_ORDER {
            if !occupied.has_index(idx) {
                cells[len] = idx;
                len += 1;
            }
        }
        if self.config.shuffle {
            cells[..len].shuffle(rng);
        }
        (cells, len)
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(SearchConfig::perfect())
    }
}
