//! Game state management for the tic-tac-toe GUI

use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::rules::{game_status, is_valid_move, winning_line, GameStatus};
use crate::{AIEngine, Board, Difficulty, MoveResult, Pos, Stone};

/// Game mode selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Player vs AI
    PvE { human: Stone },
    /// Player vs Player (hotseat)
    PvP { show_hints: bool },
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::PvE { human: Stone::X }
    }
}

/// AI computation state. The engine travels to the worker and back so its
/// random stream continues across moves.
pub enum AiState {
    Idle,
    Thinking {
        receiver: Receiver<(AIEngine, MoveResult)>,
        start_time: Instant,
    },
}

/// Finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameResult {
    pub status: GameStatus,
    pub winning_line: Option<[Pos; 3]>,
}

impl GameResult {
    pub fn winner(&self) -> Option<Stone> {
        match self.status {
            GameStatus::Win(side) => Some(side),
            _ => None,
        }
    }
}

/// Session tally
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scoreboard {
    pub x_wins: u32,
    pub o_wins: u32,
    pub draws: u32,
}

impl Scoreboard {
    fn slot(&mut self, status: GameStatus) -> Option<&mut u32> {
        match status {
            GameStatus::Win(Stone::X) => Some(&mut self.x_wins),
            GameStatus::Win(Stone::O) => Some(&mut self.o_wins),
            GameStatus::Draw => Some(&mut self.draws),
            _ => None,
        }
    }

    pub fn record(&mut self, status: GameStatus) {
        if let Some(n) = self.slot(status) {
            *n += 1;
        }
    }

    /// Take back a result, e.g. when the finishing move is undone
    pub fn unrecord(&mut self, status: GameStatus) {
        if let Some(n) = self.slot(status) {
            *n = n.saturating_sub(1);
        }
    }

    pub fn total(&self) -> u32 {
        self.x_wins + self.o_wins + self.draws
    }
}

/// Main game state
pub struct GameState {
    pub board: Board,
    pub mode: GameMode,
    pub current_turn: Stone,
    pub game_over: Option<GameResult>,
    pub last_move: Option<Pos>,
    pub move_history: Vec<(Pos, Stone)>,
    pub last_ai_result: Option<MoveResult>,
    pub ai_state: AiState,
    pub last_ai_time: Option<Duration>,
    pub suggested_move: Option<Pos>,
    pub scoreboard: Scoreboard,
    pub message: Option<String>,

    difficulty: Difficulty,
    /// `None` while the engine is on the worker thread
    engine: Option<AIEngine>,
    hint_engine: AIEngine,
    config: EngineConfig,
}

impl GameState {
    pub fn new(mode: GameMode, config: EngineConfig) -> Self {
        let engine = config.build_engine();
        let difficulty = engine.difficulty();
        let mut hint_engine = engine.clone();
        hint_engine.set_difficulty(Difficulty::HARD);

        Self {
            board: Board::new(),
            mode,
            current_turn: Stone::X,
            game_over: None,
            last_move: None,
            move_history: Vec::new(),
            last_ai_result: None,
            ai_state: AiState::Idle,
            last_ai_time: None,
            suggested_move: None,
            scoreboard: Scoreboard::default(),
            message: None,
            difficulty,
            engine: Some(engine),
            hint_engine,
            config,
        }
    }

    /// Clear the board, keeping mode, difficulty and scoreboard
    pub fn reset(&mut self) {
        if let AiState::Thinking { receiver, .. } = std::mem::replace(&mut self.ai_state, AiState::Idle) {
            // a 3x3 search is short; wait so the engine keeps its random stream
            match receiver.recv() {
                Ok((engine, _)) => self.adopt_engine(engine),
                Err(_) => warn!("AI worker exited without a result"),
            }
        }
        self.board = Board::new();
        self.current_turn = Stone::X;
        self.game_over = None;
        self.last_move = None;
        self.move_history.clear();
        self.last_ai_result = None;
        self.ai_state = AiState::Idle;
        self.last_ai_time = None;
        self.suggested_move = None;
        self.message = None;
        self.ensure_engine();
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        info!(%difficulty, "difficulty selected");
        self.difficulty = difficulty;
        if let Some(engine) = self.engine.as_mut() {
            engine.set_difficulty(difficulty);
        }
    }

    /// Take back the engine from the worker with the current difficulty
    fn adopt_engine(&mut self, mut engine: AIEngine) {
        if engine.difficulty() != self.difficulty {
            engine.set_difficulty(self.difficulty);
        }
        self.engine = Some(engine);
    }

    /// Rebuild the engine if the worker never returned it
    fn ensure_engine(&mut self) {
        if self.engine.is_none() {
            let mut engine = self.config.build_engine();
            engine.set_difficulty(self.difficulty);
            self.engine = Some(engine);
        }
    }

    /// Check if it's the human's turn
    pub fn is_human_turn(&self) -> bool {
        match self.mode {
            GameMode::PvE { human } => self.current_turn == human,
            GameMode::PvP { .. } => true,
        }
    }

    /// Check if it's the AI's turn
    pub fn is_ai_turn(&self) -> bool {
        match self.mode {
            GameMode::PvE { human } => self.current_turn != human,
            GameMode::PvP { .. } => false,
        }
    }

    /// Check if AI is currently thinking
    pub fn is_ai_thinking(&self) -> bool {
        matches!(self.ai_state, AiState::Thinking { .. })
    }

    /// Attempt to place a stone at the given position
    pub fn try_place_stone(&mut self, pos: Pos) -> Result<()> {
        if self.game_over.is_some() {
            return Err(Error::GameOver);
        }
        if self.is_ai_thinking() {
            return Err(Error::AiThinking);
        }
        if !self.is_human_turn() {
            return Err(Error::NotYourTurn);
        }
        if !Pos::is_valid(pos.row as i32, pos.col as i32) {
            return Err(Error::OutOfBounds(pos));
        }
        if !is_valid_move(&self.board, pos) {
            return Err(Error::CellOccupied(pos));
        }

        self.execute_move(pos);
        Ok(())
    }

    /// Execute a move (for both human and AI)
    fn execute_move(&mut self, pos: Pos) {
        let side = self.current_turn;
        self.board.place_stone(pos, side);
        self.move_history.push((pos, side));
        self.last_move = Some(pos);
        self.suggested_move = None;
        self.message = None;

        let status = game_status(&self.board);
        if status.is_over() {
            let line = match status {
                GameStatus::Win(winner) => winning_line(&self.board, winner),
                _ => None,
            };
            info!(?status, moves = self.move_history.len(), "game over");
            self.scoreboard.record(status);
            self.game_over = Some(GameResult {
                status,
                winning_line: line,
            });
            return;
        }

        self.current_turn = side.opponent();
    }

    /// Start AI thinking on a worker thread
    pub fn start_ai_thinking(&mut self) {
        if !self.is_ai_turn() || self.is_ai_thinking() || self.game_over.is_some() {
            return;
        }
        let Some(mut engine) = self.engine.take() else {
            return;
        };

        let board = self.board;
        let side = self.current_turn;
        let (tx, rx) = channel();

        thread::spawn(move || {
            let result = engine.get_move_with_stats(&board, side);
            let _ = tx.send((engine, result));
        });

        self.ai_state = AiState::Thinking {
            receiver: rx,
            start_time: Instant::now(),
        };
    }

    /// Check if AI has finished thinking
    pub fn check_ai_result(&mut self) {
        let result = match &self.ai_state {
            AiState::Thinking { receiver, start_time } => match receiver.try_recv() {
                Ok(result) => Some((result, start_time.elapsed())),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => {
                    warn!("AI worker exited without a result");
                    self.ai_state = AiState::Idle;
                    self.message = Some("AI error".to_string());
                    self.ensure_engine();
                    return;
                }
            },
            AiState::Idle => None,
        };

        if let Some(((engine, move_result), elapsed)) = result {
            self.ai_state = AiState::Idle;
            self.adopt_engine(engine);
            self.last_ai_time = Some(elapsed);
            debug!(
                best = ?move_result.best_move,
                search_type = ?move_result.search_type,
                nodes = move_result.stats.nodes,
                "AI move received"
            );

            match move_result.best_move.filter(|&p| is_valid_move(&self.board, p)) {
                Some(pos) => self.execute_move(pos),
                None => self.message = Some("AI could not find a move".to_string()),
            }
            self.last_ai_result = Some(move_result);
        }
    }

    /// Get AI thinking elapsed time
    pub fn ai_thinking_elapsed(&self) -> Option<Duration> {
        match &self.ai_state {
            AiState::Thinking { start_time, .. } => Some(start_time.elapsed()),
            AiState::Idle => None,
        }
    }

    /// Best move for the side to move, at full strength
    pub fn request_suggestion(&mut self) {
        if self.game_over.is_some() || self.is_ai_thinking() {
            return;
        }

        let result = self.hint_engine.get_move_with_stats(&self.board, self.current_turn);
        self.suggested_move = result.best_move;
        self.last_ai_result = Some(result);
    }

    /// Take back moves. In PvE this rewinds to the human's previous turn,
    /// which is normally two plies.
    pub fn undo(&mut self) {
        if self.move_history.is_empty() || self.is_ai_thinking() {
            return;
        }

        if let Some(result) = self.game_over.take() {
            self.scoreboard.unrecord(result.status);
        }

        while let Some((pos, side)) = self.move_history.pop() {
            self.board.remove_stone(pos);
            self.current_turn = side;
            match self.mode {
                GameMode::PvE { human } if side != human => continue,
                _ => break,
            }
        }

        self.last_move = self.move_history.last().map(|&(pos, _)| pos);
        self.suggested_move = None;
        self.message = None;
    }
}
