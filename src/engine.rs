//! Move selection at every supported strength
//!
//! [`find_best_move`] is the single decision function. It resolves the side
//! to move, then dispatches on [`Difficulty`]:
//!
//! 1. **Perfect**: full-depth alpha-beta, uniform random choice among tied best moves
//! 2. **ErrorRate(p)**: one roll in `0..100` per call; below `p` plays a random legal move,
//!    otherwise behaves like Perfect
//! 3. **DepthLimited(d)**: alpha-beta cut off at depth `d` with shuffled move order
//! 4. **Linear**: greedy one-ply choice by the linear model, fully deterministic
//!
//! A full board yields `best_move: None` in every mode.
//!
//! # Example
//!
//! ```
//! use tictactoe::{AIEngine, Board, Difficulty, Pos, Stone};
//!
//! let mut engine = AIEngine::with_seed(Difficulty::HARD, 7);
//! let grid = [['X', 'X', ' '], ['O', 'O', ' '], [' ', ' ', ' ']];
//! let board = Board::from_symbols(&grid, 'X', 'O');
//!
//! let result = engine.get_move_with_stats(&board, Stone::X);
//! assert_eq!(result.best_move, Some(Pos::new(0, 2)));
//! println!("Search type: {:?}, nodes: {}", result.search_type, result.stats.nodes);
//! ```

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::board::{Board, Pos, Stone};
use crate::error::{Error, Result};
use crate::eval::LinearModel;
use crate::rules::Perspective;
use crate::search::{SearchConfig, SearchStats, Searcher, MAX_DEPTH};

/// Playing strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    /// Never loses
    Perfect,
    /// Percentage of calls (0..=100) that play a uniformly random legal move
    ErrorRate(u8),
    /// Search horizon in plies (1..=9), shuffled move order
    DepthLimited(u8),
    /// Greedy linear-model evaluation, no search
    Linear,
}

impl Difficulty {
    pub const HARD: Difficulty = Difficulty::Perfect;
    pub const MEDIUM: Difficulty = Difficulty::ErrorRate(20);
    pub const EASY: Difficulty = Difficulty::Linear;

    /// Depth used by the simulation's benchmark opponent.
    pub const BENCHMARK: Difficulty = Difficulty::DepthLimited(2);

    /// Check the numeric parameter is in range.
    pub fn validate(self) -> Result<Self> {
        match self {
            Difficulty::ErrorRate(p) if p > 100 => Err(Error::ErrorRateOutOfRange(p)),
            Difficulty::DepthLimited(d) if d == 0 || d > MAX_DEPTH => Err(Error::DepthOutOfRange(d)),
            _ => Ok(self),
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::HARD
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Perfect => write!(f, "perfect"),
            Difficulty::ErrorRate(p) => write!(f, "error:{p}"),
            Difficulty::DepthLimited(d) => write!(f, "shallow:{d}"),
            Difficulty::Linear => write!(f, "linear"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        let invalid = || Error::InvalidDifficulty(s.to_string());

        let difficulty = match lower.as_str() {
            "perfect" | "hard" => Difficulty::HARD,
            "medium" => Difficulty::MEDIUM,
            "easy" | "model" | "linear" => Difficulty::EASY,
            other => match other.split_once(':') {
                Some(("error", p)) => Difficulty::ErrorRate(p.trim().parse().map_err(|_| invalid())?),
                Some(("shallow", d)) => Difficulty::DepthLimited(d.trim().parse().map_err(|_| invalid())?),
                _ => return Err(invalid()),
            },
        };
        difficulty.validate()
    }
}

/// Which path produced the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// Board was full
    NoMove,
    /// Error-rate roll fired; move is uniformly random
    RandomMistake,
    /// Full-depth alpha-beta
    Minimax,
    /// Depth-capped alpha-beta with shuffled order
    DepthLimited,
    /// Greedy linear model
    LinearModel,
}

/// Score attached to the chosen move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Evaluation {
    None,
    /// Depth-adjusted minimax score from the mover's view
    Search(i32),
    /// Linear model score of the position after the move
    Model(f64),
}

/// Result of one decision with statistics.
#[derive(Debug, Clone)]
pub struct MoveResult {
    /// Chosen move, `None` when the board is full
    pub best_move: Option<Pos>,
    pub evaluation: Evaluation,
    pub search_type: SearchType,
    /// Moves tied for best; the chosen one was drawn uniformly from these
    pub candidates: Vec<Pos>,
    pub stats: SearchStats,
    /// Wall time in microseconds
    pub time_us: u64,
}

impl MoveResult {
    #[inline]
    fn no_move(time_us: u64) -> Self {
        Self {
            best_move: None,
            evaluation: Evaluation::None,
            search_type: SearchType::NoMove,
            candidates: Vec::new(),
            stats: SearchStats::default(),
            time_us,
        }
    }

    #[inline]
    fn random_mistake(pos: Pos, time_us: u64) -> Self {
        Self {
            best_move: Some(pos),
            evaluation: Evaluation::None,
            search_type: SearchType::RandomMistake,
            candidates: Vec::new(),
            stats: SearchStats::default(),
            time_us,
        }
    }

    #[inline]
    fn from_model(pos: Pos, score: f64, time_us: u64) -> Self {
        Self {
            best_move: Some(pos),
            evaluation: Evaluation::Model(score),
            search_type: SearchType::LinearModel,
            candidates: vec![pos],
            stats: SearchStats::default(),
            time_us,
        }
    }

    /// Score in search units, if any
    pub fn score(&self) -> Option<i32> {
        match self.evaluation {
            Evaluation::Search(s) => Some(s),
            _ => None,
        }
    }
}

#[inline]
fn elapsed_us(start: Instant) -> u64 {
    start.elapsed().as_micros() as u64
}

/// Choose a move for the side to move on `board`.
///
/// `mover` is only a hint: piece counts decide who moves and the hint breaks
/// ties. All randomness (error roll, shuffles, tie-breaks) is drawn from `rng`,
/// so equal seeds give equal decisions.
pub fn find_best_move<R: Rng + ?Sized>(
    board: &Board,
    mover: Stone,
    difficulty: Difficulty,
    model: &LinearModel,
    rng: &mut R,
) -> MoveResult {
    let start = Instant::now();
    let side = Perspective::resolve(board, mover);

    let empties: Vec<Pos> = board.empty_cells().iter_ones().collect();
    if empties.is_empty() {
        trace!("board full, no move");
        return MoveResult::no_move(elapsed_us(start));
    }

    debug!(%difficulty, mover = ?side.mover, empties = empties.len(), "selecting move");

    let (config, search_type) = match difficulty {
        Difficulty::Linear => {
            return match model.best_move(board, side.mover) {
                Some((pos, score)) => {
                    debug!(%pos, score, "linear model move");
                    MoveResult::from_model(pos, score, elapsed_us(start))
                }
                None => MoveResult::no_move(elapsed_us(start)),
            };
        }
        Difficulty::ErrorRate(p) => {
            let roll: u8 = rng.gen_range(0..100);
            if roll < p {
                // empties is non-empty here
                let pos = empties[rng.gen_range(0..empties.len())];
                debug!(roll, rate = p, %pos, "random mistake");
                return MoveResult::random_mistake(pos, elapsed_us(start));
            }
            (SearchConfig::perfect(), SearchType::Minimax)
        }
        Difficulty::Perfect => (SearchConfig::perfect(), SearchType::Minimax),
        Difficulty::DepthLimited(d) => (SearchConfig::shallow(d), SearchType::DepthLimited),
    };

    let mut searcher = Searcher::new(config);
    let root = searcher.score_root(side.own, side.opp, rng);
    let best_move = root.candidates.choose(rng).copied();
    let stats = searcher.stats();

    debug!(
        best = ?best_move,
        score = root.best_score,
        ties = root.candidates.len(),
        nodes = stats.nodes,
        cutoffs = stats.cutoffs,
        "search complete"
    );

    MoveResult {
        best_move,
        evaluation: Evaluation::Search(root.best_score),
        search_type,
        candidates: root.candidates,
        stats,
        time_us: elapsed_us(start),
    }
}

/// Game-facing engine: a difficulty, a model and a private random source.
///
/// # Example
///
/// ```
/// use tictactoe::{AIEngine, Board, Difficulty, Stone};
///
/// let mut engine = AIEngine::with_seed(Difficulty::EASY, 1);
/// let mv = engine.get_move(&Board::new(), Stone::X);
/// assert!(mv.is_some());
/// ```
#[derive(Debug, Clone)]
pub struct AIEngine {
    difficulty: Difficulty,
    model: LinearModel,
    rng: SmallRng,
}

impl AIEngine {
    /// Perfect play, pretrained model, entropy-seeded.
    #[must_use]
    pub fn new() -> Self {
        Self::with_difficulty(Difficulty::default())
    }

    #[must_use]
    pub fn with_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            model: LinearModel::default(),
            rng: SmallRng::from_entropy(),
        }
    }

    /// Reproducible engine: same seed, same decisions.
    #[must_use]
    pub fn with_seed(difficulty: Difficulty, seed: u64) -> Self {
        Self {
            difficulty,
            model: LinearModel::default(),
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    #[must_use]
    pub fn with_model(mut self, model: LinearModel) -> Self {
        self.model = model;
        self
    }

    #[inline]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        debug!(from = %self.difficulty, to = %difficulty, "difficulty changed");
        self.difficulty = difficulty;
    }

    #[inline]
    pub fn model(&self) -> &LinearModel {
        &self.model
    }

    /// Best move only. `None` when the board is full.
    #[must_use]
    pub fn get_move(&mut self, board: &Board, mover: Stone) -> Option<Pos> {
        self.get_move_with_stats(board, mover).best_move
    }

    #[must_use]
    pub fn get_move_with_stats(&mut self, board: &Board, mover: Stone) -> MoveResult {
        find_best_move(board, mover, self.difficulty, &self.model, &mut self.rng)
    }
}

impl Default for AIEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::PRETRAINED;
    use crate::rules::{game_status, GameStatus};

    const ALL_MODES: [Difficulty; 5] = [
        Difficulty::Perfect,
        Difficulty::ErrorRate(20),
        Difficulty::ErrorRate(100),
        Difficulty::DepthLimited(2),
        Difficulty::Linear,
    ];

    fn example_board() -> Board {
        let grid = [['X', 'X', ' '], ['O', 'O', ' '], [' ', ' ', ' ']];
        Board::from_symbols(&grid, 'X', 'O')
    }

    fn full_board() -> Board {
        let grid = [['X', 'O', 'X'], ['X', 'O', 'O'], ['O', 'X', 'X']];
        Board::from_symbols(&grid, 'X', 'O')
    }

    fn random_move(board: &Board, rng: &mut SmallRng) -> Option<Pos> {
        let empties: Vec<Pos> = board.empty_cells().iter_ones().collect();
        empties.choose(rng).copied()
    }

    #[test]
    fn test_example_position_completes_row() {
        let mut rng = SmallRng::seed_from_u64(1);
        let result = find_best_move(&example_board(), Stone::X, Difficulty::Perfect, &PRETRAINED, &mut rng);
        assert_eq!(result.best_move, Some(Pos::new(0, 2)));
        assert_eq!(result.candidates, vec![Pos::new(0, 2)]);
        assert_eq!(result.search_type, SearchType::Minimax);
        assert_eq!(result.score(), Some(9));
    }

    #[test]
    fn test_full_board_no_move_in_every_mode() {
        let board = full_board();
        let mut rng = SmallRng::seed_from_u64(2);
        for mode in ALL_MODES {
            let result = find_best_move(&board, Stone::X, mode, &PRETRAINED, &mut rng);
            assert_eq!(result.best_move, None, "{mode}");
            assert_eq!(result.search_type, SearchType::NoMove);
            assert_eq!(result.evaluation, Evaluation::None);
        }
    }

    #[test]
    fn test_returned_move_is_legal_in_every_mode() {
        let board = example_board();
        let mut rng = SmallRng::seed_from_u64(3);
        for mode in ALL_MODES {
            for _ in 0..50 {
                let pos = find_best_move(&board, Stone::X, mode, &PRETRAINED, &mut rng)
                    .best_move
                    .unwrap();
                assert!(board.is_empty(pos), "{mode} returned occupied {pos}");
            }
        }
    }

    #[test]
    fn test_error_rate_calibration() {
        let board = example_board();
        let optimal = Pos::new(0, 2);
        let mut rng = SmallRng::seed_from_u64(20);
        let trials = 20_000;

        let mut mistakes = 0;
        let mut non_optimal = 0;
        for _ in 0..trials {
            let result = find_best_move(&board, Stone::X, Difficulty::ErrorRate(20), &PRETRAINED, &mut rng);
            if result.search_type == SearchType::RandomMistake {
                mistakes += 1;
            }
            if result.best_move != Some(optimal) {
                non_optimal += 1;
            }
        }

        let mistake_rate = mistakes as f64 / trials as f64;
        // a random pick over 5 empties hits the winning cell 1 time in 5
        let non_optimal_rate = non_optimal as f64 / trials as f64;
        assert!((mistake_rate - 0.20).abs() < 0.02, "mistake rate {mistake_rate}");
        assert!((non_optimal_rate - 0.16).abs() < 0.02, "non-optimal rate {non_optimal_rate}");
    }

    #[test]
    fn test_error_rate_bounds() {
        let board = example_board();
        let mut rng = SmallRng::seed_from_u64(4);
        for _ in 0..200 {
            let never = find_best_move(&board, Stone::X, Difficulty::ErrorRate(0), &PRETRAINED, &mut rng);
            assert_eq!(never.search_type, SearchType::Minimax);
            let always = find_best_move(&board, Stone::X, Difficulty::ErrorRate(100), &PRETRAINED, &mut rng);
            assert_eq!(always.search_type, SearchType::RandomMistake);
        }
    }

    #[test]
    fn test_perfect_never_loses_to_random() {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut engine_rng = SmallRng::seed_from_u64(43);

        for game in 0..100 {
            let engine_side = if game % 2 == 0 { Stone::X } else { Stone::O };
            let mut board = Board::new();
            let mut to_move = Stone::X;

            while !game_status(&board).is_over() {
                let pos = if to_move == engine_side {
                    find_best_move(&board, to_move, Difficulty::Perfect, &PRETRAINED, &mut engine_rng).best_move
                } else {
                    random_move(&board, &mut rng)
                };
                board.place_stone(pos.unwrap(), to_move);
                to_move = to_move.opponent();
            }

            assert_ne!(
                game_status(&board),
                GameStatus::Win(engine_side.opponent()),
                "engine lost game {game}:\n{board}"
            );
        }
    }

    #[test]
    fn test_opening_is_non_losing() {
        for seed in 0..20 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut board = Board::new();
            let result = find_best_move(&board, Stone::X, Difficulty::Perfect, &PRETRAINED, &mut rng);
            assert_eq!(result.score(), Some(0));
            board.place_stone(result.best_move.unwrap(), Stone::X);

            // O cannot force a win after any chosen opening
            let mut reply = Searcher::new(SearchConfig::perfect());
            let root = reply.score_root(board.o, board.x, &mut rng);
            assert!(root.best_score <= 0, "opening {:?} loses", result.best_move);
        }
    }

    #[test]
    fn test_ties_are_broken_randomly() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..60 {
            let result = find_best_move(&Board::new(), Stone::X, Difficulty::Perfect, &PRETRAINED, &mut rng);
            assert_eq!(result.candidates.len(), 9);
            seen.insert(result.best_move.unwrap());
        }
        assert!(seen.len() > 1);
    }

    #[test]
    fn test_linear_is_deterministic() {
        let mut board = Board::new();
        board.place_stone(Pos::new(1, 1), Stone::O);

        let first = find_best_move(&board, Stone::X, Difficulty::Linear, &PRETRAINED, &mut SmallRng::seed_from_u64(0));
        for seed in 1..20 {
            let again = find_best_move(&board, Stone::X, Difficulty::Linear, &PRETRAINED, &mut SmallRng::seed_from_u64(seed));
            assert_eq!(again.best_move, first.best_move);
        }
        assert_eq!(first.best_move, Some(Pos::new(0, 2)));
        assert_eq!(first.search_type, SearchType::LinearModel);
        assert!(matches!(first.evaluation, Evaluation::Model(_)));
    }

    #[test]
    fn test_depth_limited_reports_type() {
        let mut rng = SmallRng::seed_from_u64(6);
        let result = find_best_move(&example_board(), Stone::X, Difficulty::DepthLimited(2), &PRETRAINED, &mut rng);
        assert_eq!(result.search_type, SearchType::DepthLimited);
        // the immediate win is within a two-ply horizon
        assert_eq!(result.best_move, Some(Pos::new(0, 2)));
        assert!(result.stats.max_depth <= 2);
    }

    #[test]
    fn test_piece_counts_override_mover() {
        let grid = [['X', 'X', ' '], ['O', ' ', ' '], [' ', ' ', ' ']];
        let board = Board::from_symbols(&grid, 'X', 'O');
        let mut rng = SmallRng::seed_from_u64(7);

        // O has fewer stones, so O moves and must block
        let result = find_best_move(&board, Stone::X, Difficulty::Perfect, &PRETRAINED, &mut rng);
        assert_eq!(result.best_move, Some(Pos::new(0, 2)));
        assert_eq!(result.candidates, vec![Pos::new(0, 2)]);
    }

    #[test]
    fn test_board_is_not_modified() {
        let board = example_board();
        let snapshot = board;
        let mut rng = SmallRng::seed_from_u64(8);
        for mode in ALL_MODES {
            let _ = find_best_move(&board, Stone::X, mode, &PRETRAINED, &mut rng);
        }
        assert_eq!(board, snapshot);
    }

    #[test]
    fn test_engine_seed_reproducible() {
        let board = Board::new();
        let mut a = AIEngine::with_seed(Difficulty::MEDIUM, 99);
        let mut b = AIEngine::with_seed(Difficulty::MEDIUM, 99);
        for _ in 0..20 {
            assert_eq!(a.get_move(&board, Stone::X), b.get_move(&board, Stone::X));
        }
    }

    #[test]
    fn test_engine_set_difficulty() {
        let mut engine = AIEngine::with_seed(Difficulty::HARD, 1);
        engine.set_difficulty(Difficulty::EASY);
        assert_eq!(engine.difficulty(), Difficulty::Linear);
        let result = engine.get_move_with_stats(&Board::new(), Stone::X);
        assert_eq!(result.search_type, SearchType::LinearModel);
        assert_eq!(result.best_move, Some(Pos::new(1, 1)));
    }

    #[test]
    fn test_difficulty_parse() {
        assert_eq!("hard".parse::<Difficulty>().unwrap(), Difficulty::Perfect);
        assert_eq!("Perfect".parse::<Difficulty>().unwrap(), Difficulty::Perfect);
        assert_eq!("medium".parse::<Difficulty>().unwrap(), Difficulty::ErrorRate(20));
        assert_eq!("model".parse::<Difficulty>().unwrap(), Difficulty::Linear);
        assert_eq!("error:35".parse::<Difficulty>().unwrap(), Difficulty::ErrorRate(35));
        assert_eq!(" shallow:3 ".parse::<Difficulty>().unwrap(), Difficulty::DepthLimited(3));

        assert!(matches!("error:101".parse::<Difficulty>(), Err(Error::ErrorRateOutOfRange(101))));
        assert!(matches!("shallow:0".parse::<Difficulty>(), Err(Error::DepthOutOfRange(0))));
        assert!(matches!("shallow:10".parse::<Difficulty>(), Err(Error::DepthOutOfRange(10))));
        assert!(matches!("error:abc".parse::<Difficulty>(), Err(Error::InvalidDifficulty(_))));
        assert!(matches!("insane".parse::<Difficulty>(), Err(Error::InvalidDifficulty(_))));
    }

    #[test]
    fn test_difficulty_display_round_trip() {
        for mode in ALL_MODES {
            assert_eq!(mode.to_string().parse::<Difficulty>().unwrap(), mode);
        }
    }
}
