//! Main application for the tic-tac-toe GUI

use eframe::egui;
use egui::{CentralPanel, Context, CornerRadius, Frame, RichText, SidePanel, TopBottomPanel};

use super::board_view::{BoardOverlay, BoardView};
use super::game_state::{GameMode, GameResult, GameState};
use super::theme::*;
use crate::config::EngineConfig;
use crate::engine::{Evaluation, MoveResult};
use crate::{Difficulty, Stone};

/// Difficulties offered in the menu
const DIFFICULTY_MENU: [(&str, Difficulty); 5] = [
    ("Easy (model)", Difficulty::EASY),
    ("Medium (20% mistakes)", Difficulty::MEDIUM),
    ("Hard (perfect)", Difficulty::HARD),
    ("Shallow 2", Difficulty::DepthLimited(2)),
    ("Shallow 4", Difficulty::DepthLimited(4)),
];

fn difficulty_label(difficulty: Difficulty) -> String {
    DIFFICULTY_MENU
        .iter()
        .find(|(_, d)| *d == difficulty)
        .map(|(label, _)| label.to_string())
        .unwrap_or_else(|| difficulty.to_string())
}

fn side_name(stone: Stone) -> &'static str {
    match stone {
        Stone::X => "X",
        Stone::O => "O",
        Stone::Empty => "-",
    }
}

/// Main tic-tac-toe application
pub struct TicTacToeApp {
    state: GameState,
    board_view: BoardView,
    show_debug: bool,
}

impl TicTacToeApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: EngineConfig) -> Self {
        Self {
            state: GameState::new(GameMode::default(), config),
            board_view: BoardView::default(),
            show_debug: false,
        }
    }

    /// Switch mode and clear the board; the scoreboard carries over
    fn new_game(&mut self, mode: GameMode) {
        self.state.mode = mode;
        self.state.reset();
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Game", |ui| {
                    if ui.button("New Game (PvE - play X)").clicked() {
                        self.new_game(GameMode::PvE { human: Stone::X });
                        ui.close_menu();
                    }
                    if ui.button("New Game (PvE - play O)").clicked() {
                        self.new_game(GameMode::PvE { human: Stone::O });
                        ui.close_menu();
                    }
                    if ui.button("New Game (PvP)").clicked() {
                        self.new_game(GameMode::PvP { show_hints: false });
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Undo (U)").clicked() {
                        self.state.undo();
                        ui.close_menu();
                    }
                });

                ui.menu_button("Difficulty", |ui| {
                    let current = self.state.difficulty();
                    for (label, difficulty) in DIFFICULTY_MENU {
                        if ui.selectable_label(current == difficulty, label).clicked() {
                            self.state.set_difficulty(difficulty);
                            ui.close_menu();
                        }
                    }
                });

                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.show_debug, "Debug Panel (D)");
                    if let GameMode::PvP { show_hints } = &mut self.state.mode {
                        ui.checkbox(show_hints, "Show Hints");
                    }
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let mode_text = match self.state.mode {
                        GameMode::PvE { human } => format!(
                            "PvE - You: {} - {}",
                            side_name(human),
                            difficulty_label(self.state.difficulty())
                        ),
                        GameMode::PvP { .. } => "PvP - Hotseat".to_string(),
                    };
                    ui.label(mode_text);
                });
            });
        });
    }

    /// Render the side panel with game info and debug
    fn render_side_panel(&mut self, ctx: &Context) {
        SidePanel::right("info_panel")
            .min_width(220.0)
            .max_width(260.0)
            .frame(Frame::new().fill(PANEL_BG).inner_margin(8.0))
            .show(ctx, |ui| {
                ui.add_space(12.0);
                self.render_title_card(ui);
                ui.add_space(12.0);

                self.render_turn_card(ui);
                ui.add_space(10.0);

                self.render_score_card(ui);
                ui.add_space(10.0);

                self.render_actions_card(ui);

                if self.show_debug {
                    ui.add_space(10.0);
                    self.render_debug_card(ui);
                }

                if let Some(result) = self.state.game_over {
                    ui.add_space(10.0);
                    self.render_game_over_card(ui, &result);
                }

                if let Some(msg) = self.state.message.clone() {
                    ui.add_space(10.0);
                    Self::render_message_card(ui, &msg);
                }
            });
    }

    /// Helper to create a card frame
    fn card_frame() -> Frame {
        Frame::new()
            .fill(PANEL_HEADER)
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
    }

    fn render_title_card(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.label(RichText::new("X").size(22.0).strong().color(X_MARK));
            ui.label(RichText::new("O").size(22.0).strong().color(O_MARK));
            ui.add_space(4.0);
            ui.label(RichText::new("TIC-TAC-TOE").size(20.0).strong().color(TEXT_PRIMARY));
        });
    }

    fn render_turn_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            let turn = self.state.current_turn;
            ui.horizontal(|ui| {
                ui.label(RichText::new(side_name(turn)).size(36.0).strong().color(mark_color(turn)));
                ui.add_space(12.0);

                ui.vertical(|ui| {
                    ui.add_space(4.0);
                    ui.label(RichText::new("TO MOVE").size(10.0).color(TEXT_MUTED));

                    let (text, color) = if self.state.is_ai_thinking() {
                        let secs = self.state.ai_thinking_elapsed().map_or(0.0, |d| d.as_secs_f32());
                        (format!("AI thinking... {secs:.2}s"), TIMER_WARNING)
                    } else if self.state.game_over.is_some() {
                        ("Game Over".to_string(), WIN_HIGHLIGHT)
                    } else if self.state.is_human_turn() {
                        ("Your turn".to_string(), TIMER_NORMAL)
                    } else {
                        ("AI to move".to_string(), TEXT_SECONDARY)
                    };
                    ui.label(RichText::new(text).size(12.0).color(color));
                });
            });

            if let Some(ai_time) = self.state.last_ai_time {
                ui.add_space(4.0);
                ui.label(
                    RichText::new(format!("Last AI: {:.1}ms", ai_time.as_secs_f64() * 1000.0))
                        .size(10.0)
                        .color(TEXT_SECONDARY),
                );
            }
        });
    }

    /// Session tally
    fn render_score_card(&self, ui: &mut egui::Ui) {
        let score = self.state.scoreboard;
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("SCORE").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);
            egui::Grid::new("scoreboard").num_columns(2).spacing([24.0, 4.0]).show(ui, |ui| {
                for (label, count, color) in [
                    ("X wins", score.x_wins, X_MARK),
                    ("O wins", score.o_wins, O_MARK),
                    ("Draws", score.draws, TEXT_SECONDARY),
                ] {
                    ui.label(RichText::new(label).size(12.0).color(color));
                    ui.label(RichText::new(count.to_string()).size(14.0).strong().color(TEXT_PRIMARY));
                    ui.end_row();
                }
            });
        });
    }

    fn render_actions_card(&mut self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("ACTIONS").size(10.0).color(TEXT_MUTED));
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                if ui.button("Undo").clicked() {
                    self.state.undo();
                }
                if ui.button("New").clicked() {
                    self.state.reset();
                }
                if let GameMode::PvP { .. } = self.state.mode {
                    if ui.button("Hint").clicked() {
                        self.state.request_suggestion();
                    }
                }
            });

            ui.add_space(8.0);
            ui.label(
                RichText::new(format!("Move #{}", self.state.move_history.len()))
                    .size(11.0)
                    .color(TEXT_SECONDARY),
            );
        });
    }

    fn render_debug_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("AI DEBUG").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            match &self.state.last_ai_result {
                Some(result) => Self::render_move_result(ui, result),
                None => {
                    ui.label(RichText::new("Waiting for AI...").size(10.0).color(TEXT_MUTED));
                }
            }
        });
    }

    fn render_move_result(ui: &mut egui::Ui, result: &MoveResult) {
        let score = match result.evaluation {
            Evaluation::None => "-".to_string(),
            Evaluation::Search(s) => s.to_string(),
            Evaluation::Model(s) => format!("{s:.3}"),
        };

        ui.label(
            RichText::new(format!("{:?}", result.search_type))
                .size(11.0)
                .strong()
                .color(TIMER_NORMAL),
        );
        ui.label(RichText::new(format!("Score: {score}")).size(10.0).color(TEXT_SECONDARY));
        ui.label(
            RichText::new(format!(
                "{} nodes, depth {}, {} cutoffs",
                result.stats.nodes, result.stats.max_depth, result.stats.cutoffs
            ))
            .size(10.0)
            .color(TEXT_MUTED),
        );
        ui.label(RichText::new(format!("{}us", result.time_us)).size(10.0).color(TEXT_MUTED));

        if result.candidates.len() > 1 {
            ui.label(
                RichText::new(format!("{} tied moves", result.candidates.len()))
                    .size(10.0)
                    .color(TEXT_MUTED),
            );
        }
        if let Some(pos) = result.best_move {
            ui.add_space(4.0);
            ui.label(RichText::new(format!("-> {pos}")).size(12.0).strong().color(WIN_HIGHLIGHT));
        }
    }

    fn render_game_over_card(&mut self, ui: &mut egui::Ui, result: &GameResult) {
        let (headline, color) = match result.winner() {
            Some(side) => (format!("{} WINS!", side_name(side)), mark_color(side)),
            None => ("DRAW".to_string(), TEXT_PRIMARY),
        };

        Frame::new()
            .fill(egui::Color32::from_rgb(45, 80, 55))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("GAME OVER").size(12.0).color(egui::Color32::from_rgb(180, 255, 180)));
                    ui.add_space(8.0);
                    ui.label(RichText::new(headline).size(22.0).strong().color(color));
                    ui.add_space(12.0);
                    if ui.button(RichText::new("New Game (N)").size(14.0).strong()).clicked() {
                        self.state.reset();
                    }
                });
            });
    }

    fn render_message_card(ui: &mut egui::Ui, msg: &str) {
        Frame::new()
            .fill(egui::Color32::from_rgb(80, 60, 30))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.label(RichText::new(msg).size(11.0).color(TEXT_PRIMARY));
            });
    }

    /// Render the main board
    fn render_board(&mut self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            let show_hint = matches!(self.state.mode, GameMode::PvP { show_hints: true });
            if show_hint && self.state.suggested_move.is_none() && self.state.game_over.is_none() {
                self.state.request_suggestion();
            }

            let overlay = BoardOverlay {
                current_turn: self.state.current_turn,
                last_move: self.state.last_move,
                suggested_move: self.state.suggested_move,
                winning_line: self.state.game_over.and_then(|r| r.winning_line),
                accepts_input: self.state.game_over.is_none()
                    && self.state.is_human_turn()
                    && !self.state.is_ai_thinking(),
            };

            ui.vertical_centered(|ui| {
                if let Some(pos) = self.board_view.show(ui, &self.state.board, &overlay) {
                    if let Err(e) = self.state.try_place_stone(pos) {
                        self.state.message = Some(e.to_string());
                    }
                }
            });
        });
    }

    /// Handle keyboard shortcuts
    fn handle_input(&mut self, ctx: &Context) {
        ctx.input(|i| {
            if i.key_pressed(egui::Key::D) {
                self.show_debug = !self.show_debug;
            }
            if i.key_pressed(egui::Key::H) {
                self.state.request_suggestion();
            }
            if i.key_pressed(egui::Key::U) {
                self.state.undo();
            }
            if i.key_pressed(egui::Key::N) {
                self.state.reset();
            }
        });
    }
}

impl eframe::App for TicTacToeApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);
        self.state.check_ai_result();

        if self.state.is_ai_turn() && !self.state.is_ai_thinking() && self.state.game_over.is_none() {
            self.state.start_ai_thinking();
        }

        self.render_menu_bar(ctx);
        self.render_side_panel(ctx);
        self.render_board(ctx);

        if self.state.is_ai_thinking() {
            ctx.request_repaint();
        }
    }
}
