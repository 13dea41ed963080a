//! Head-to-head simulation between two players
//!
//! The test side always plays X and the benchmark side O. Starts strictly
//! alternate, so a matchup of `n` games gives each side `n / 2` first moves
//! (odd counts are rounded up). Any unusable move is replaced by the first
//! empty cell.

use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use crate::board::{Board, Pos, Stone};
use crate::engine::{find_best_move, Difficulty};
use crate::error::{Error, Result};
use crate::eval::LinearModel;
use crate::rules::{first_empty, game_status, is_valid_move, GameStatus};
use crate::search::SearchStats;

/// Side played by the player under test
pub const TEST_SIDE: Stone = Stone::X;
/// Side played by the benchmark opponent
pub const BENCHMARK_SIDE: Stone = Stone::O;

/// One move choice with its cost.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decision {
    pub pos: Option<Pos>,
    pub stats: SearchStats,
    pub time_us: u64,
}

/// Anything that can pick a move.
pub trait Player {
    fn name(&self) -> String;

    fn decide(&mut self, board: &Board, mover: Stone, rng: &mut dyn rand::RngCore) -> Decision;
}

/// The engine at a fixed difficulty.
#[derive(Debug, Clone)]
pub struct EnginePlayer {
    pub difficulty: Difficulty,
    pub model: LinearModel,
}

impl EnginePlayer {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            model: LinearModel::default(),
        }
    }
}

impl Player for EnginePlayer {
    fn name(&self) -> String {
        self.difficulty.to_string()
    }

    fn decide(&mut self, board: &Board, mover: Stone, rng: &mut dyn rand::RngCore) -> Decision {
        let result = find_best_move(board, mover, self.difficulty, &self.model, rng);
        Decision {
            pos: result.best_move,
            stats: result.stats,
            time_us: result.time_us,
        }
    }
}

/// Uniformly random legal moves.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPlayer;

impl Player for RandomPlayer {
    fn name(&self) -> String {
        "random".to_string()
    }

    fn decide(&mut self, board: &Board, _mover: Stone, rng: &mut dyn rand::RngCore) -> Decision {
        let empties: Vec<Pos> = board.empty_cells().iter_ones().collect();
        Decision {
            pos: empties.choose(rng).copied(),
            ..Decision::default()
        }
    }
}

/// Player selection from the command line: `random` or any difficulty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerKind {
    Engine(Difficulty),
    Random,
}

impl PlayerKind {
    pub fn build(self, model: &LinearModel) -> Box<dyn Player> {
        match self {
            PlayerKind::Engine(difficulty) => Box::new(EnginePlayer {
                difficulty,
                model: *model,
            }),
            PlayerKind::Random => Box::new(RandomPlayer),
        }
    }
}

impl FromStr for PlayerKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("random") {
            Ok(PlayerKind::Random)
        } else {
            s.parse().map(PlayerKind::Engine)
        }
    }
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerKind::Engine(d) => write!(f, "{d}"),
            PlayerKind::Random => write!(f, "random"),
        }
    }
}

/// Result of one game from the test side's view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Win,
    Loss,
    Draw,
}

/// Tally for one matchup, plus the test side's decision costs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchStats {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    /// Moves chosen by the test side
    pub decisions: u64,
    pub total_time_us: u64,
    pub nodes: u64,
    /// Deepest ply any test-side search reached
    pub max_depth: u8,
    /// Moves replaced by the first empty cell
    pub fallbacks: u32,
}

impl MatchStats {
    #[inline]
    pub fn games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    pub fn record(&mut self, outcome: GameOutcome) {
        match outcome {
            GameOutcome::Win => self.wins += 1,
            GameOutcome::Loss => self.losses += 1,
            GameOutcome::Draw => self.draws += 1,
        }
    }

    fn record_decision(&mut self, decision: &Decision) {
        self.decisions += 1;
        self.total_time_us += decision.time_us;
        self.nodes += decision.stats.nodes;
        self.max_depth = self.max_depth.max(decision.stats.max_depth);
    }

    /// Share of games in percent; 0 when no games were played
    pub fn percent(&self, count: u32) -> f64 {
        match self.games() {
            0 => 0.0,
            games => count as f64 / games as f64 * 100.0,
        }
    }

    pub fn avg_decision_us(&self) -> f64 {
        match self.decisions {
            0 => 0.0,
            n => self.total_time_us as f64 / n as f64,
        }
    }
}

/// Play one game to completion. `stats` collects the test side's decisions.
pub fn play_game<R: Rng>(
    test: &mut dyn Player,
    benchmark: &mut dyn Player,
    test_starts: bool,
    stats: &mut MatchStats,
    rng: &mut R,
) -> GameOutcome {
    let mut board = Board::new();
    let mut turn = if test_starts { TEST_SIDE } else { BENCHMARK_SIDE };

    let status = loop {
        let status = game_status(&board);
        if status.is_over() {
            break status;
        }

        let decision = if turn == TEST_SIDE {
            let d = test.decide(&board, turn, rng);
            stats.record_decision(&d);
            d
        } else {
            benchmark.decide(&board, turn, rng)
        };

        let pos = match decision.pos.filter(|&p| is_valid_move(&board, p)) {
            Some(pos) => pos,
            None => {
                if turn == TEST_SIDE {
                    stats.fallbacks += 1;
                }
                debug!(?turn, requested = ?decision.pos, "unusable move, using first empty cell");
                // the game is not over, so a cell is free
                match first_empty(&board) {
                    Some(pos) => pos,
                    None => break GameStatus::Draw,
                }
            }
        };

        board.place_stone(pos, turn);
        turn = turn.opponent();
    };

    match status {
        GameStatus::Win(side) if side == TEST_SIDE => GameOutcome::Win,
        GameStatus::Win(_) => GameOutcome::Loss,
        _ => GameOutcome::Draw,
    }
}

/// Play `games` games (rounded up to even) with strictly alternating starts.
pub fn run_matchup<R: Rng>(test: &mut dyn Player, benchmark: &mut dyn Player, games: u32, rng: &mut R) -> MatchStats {
    let total = games + games % 2;
    let mut stats = MatchStats::default();

    for i in 0..total {
        let outcome = play_game(test, benchmark, i % 2 == 0, &mut stats, rng);
        stats.record(outcome);

        if (i + 1) % 10_000 == 0 {
            info!(played = i + 1, total, test = %test.name(), "simulation progress");
        }
    }

    info!(
        test = %test.name(),
        benchmark = %benchmark.name(),
        wins = stats.wins,
        losses = stats.losses,
        draws = stats.draws,
        "matchup finished"
    );
    stats
}
