//! Difficulty benchmark
//!
//! Plays each selected mode as X against a fixed benchmark opponent as O,
//! alternating who starts, and prints the win/loss/draw table.

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::info;

use tictactoe::config::load_config;
use tictactoe::sim::{run_matchup, PlayerKind};
use tictactoe::Difficulty;

#[derive(Parser, Debug)]
#[command(name = "simulate")]
#[command(about = "Benchmark engine difficulties against a fixed opponent")]
#[command(
    long_about = "Plays every --mode as X against --opponent as O with strictly alternating starts.

Modes and opponents accept perfect|hard, medium, easy|model|linear,
error:<percent>, shallow:<depth> or random. Seed and linear model weights
default to tictactoe.toml."
)]
struct Args {
    /// Games per mode (rounded up to even)
    #[arg(long, default_value_t = 100_000)]
    games: u32,

    /// RNG seed; falls back to the config seed, then entropy
    #[arg(long)]
    seed: Option<u64>,

    /// Benchmark opponent playing O
    #[arg(long, default_value_t = PlayerKind::Engine(Difficulty::BENCHMARK))]
    opponent: PlayerKind,

    /// Mode under test; repeat for several (default: hard, medium, easy)
    #[arg(long = "mode")]
    modes: Vec<PlayerKind>,

    /// Log level when RUST_LOG is unset
    #[arg(long)]
    log_level: Option<String>,
}

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config();

    init_tracing(args.log_level.as_deref().unwrap_or(&config.log_level))?;

    let modes = if args.modes.is_empty() {
        vec![
            PlayerKind::Engine(Difficulty::HARD),
            PlayerKind::Engine(Difficulty::MEDIUM),
            PlayerKind::Engine(Difficulty::EASY),
        ]
    } else {
        args.modes.clone()
    };

    let mut rng = match args.seed.or(config.seed) {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    let model = config.linear_model();
    let games = args.games + args.games % 2;

    info!(games, opponent = %args.opponent, modes = modes.len(), "starting simulation");

    println!("================================================================");
    println!("AI DIFFICULTY BENCHMARK SIMULATION");
    println!("----------------------------------------------------------------");
    println!("Opponent:    {}", args.opponent);
    println!("Total games: {} ({} starts each)", games, games / 2);
    println!("Test AI: 'X' | Benchmark AI: 'O'");
    println!("================================================================\n");

    for mode in modes {
        let mut test = mode.build(&model);
        let mut bench = args.opponent.build(&model);
        let stats = run_matchup(test.as_mut(), bench.as_mut(), games, &mut rng);

        println!("Mode: {mode}");
        println!("--------------------------------");
        println!("Wins:   {:>7} ({:5.1}%)", stats.wins, stats.percent(stats.wins));
        println!("Losses: {:>7} ({:5.1}%)", stats.losses, stats.percent(stats.losses));
        println!("Draws:  {:>7} ({:5.1}%)", stats.draws, stats.percent(stats.draws));
        println!("Avg decision: {:.1} us", stats.avg_decision_us());
        println!("Max depth:    {}", stats.max_depth);
        if stats.fallbacks > 0 {
            println!("Fallbacks:    {}", stats.fallbacks);
        }
        println!();
    }

    Ok(())
}
