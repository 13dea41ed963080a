//! Tic-tac-toe GUI
//!
//! Play against the engine at a chosen difficulty or against another player.

use tictactoe::config::load_config;
use tictactoe::ui::TicTacToeApp;
use tracing::info;

fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();
}

fn main() -> Result<(), eframe::Error> {
    let config = load_config();
    init_tracing(&config.log_level);
    info!(difficulty = %config.difficulty, seed = ?config.seed, "starting tic-tac-toe");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([760.0, 520.0])
            .with_min_inner_size([600.0, 420.0])
            .with_title("Tic-Tac-Toe"),
        ..Default::default()
    };

    eframe::run_native(
        "Tic-Tac-Toe",
        options,
        Box::new(|cc| Ok(Box::new(TicTacToeApp::new(cc, config)))),
    )
}
