use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use tictactoe::engine::find_best_move;
use tictactoe::eval::PRETRAINED;
use tictactoe::search::{SearchConfig, Searcher};
use tictactoe::{Board, Difficulty, Pos, Stone};

fn bench_empty_board(c: &mut Criterion) {
    let mut group = c.benchmark_group("empty_board");
    let board = Board::new();
    let modes = [
        Difficulty::HARD,
        Difficulty::MEDIUM,
        Difficulty::BENCHMARK,
        Difficulty::EASY,
    ];

    for mode in modes {
        group.bench_with_input(BenchmarkId::from_parameter(mode), &mode, |b, &mode| {
            let mut rng = SmallRng::seed_from_u64(0);
            b.iter(|| find_best_move(black_box(&board), Stone::X, mode, &PRETRAINED, &mut rng))
        });
    }
    group.finish();
}

fn bench_pruning(c: &mut Criterion) {
    let mut group = c.benchmark_group("pruning");
    let mut board = Board::new();
    board.place_stone(Pos::new(1, 1), Stone::X);

    for (name, config) in [("alphabeta", SearchConfig::perfect()), ("minimax", SearchConfig::exhaustive())] {
        group.bench_function(name, |b| {
            let mut rng = SmallRng::seed_from_u64(0);
            b.iter(|| {
                let mut searcher = Searcher::new(config);
                searcher.score_root(black_box(board.o), black_box(board.x), &mut rng)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_empty_board, bench_pruning);
criterion_main!(benches);
