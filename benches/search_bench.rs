use criterion::{criterion_group, criterion_main, Criterion};
use grid_astar::{Board, NoObserver, Position};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;

fn random_board(n: usize, density: f64, seed: u64) -> Board {
    let mut rng = StdRng::seed_from_u64(seed);
    let start = Position::new(0, 0);
    let end = Position::new(n - 1, n - 1);
    let mut board = Board::new(n);
    board.set_start(start).unwrap();
    board.set_end(end).unwrap();
    for row in 0..n {
        for col in 0..n {
            let p = Position::new(row, col);
            if p != start && p != end && rng.gen_bool(density) {
                board.set_barrier(p).unwrap();
            }
        }
    }
    board
}

fn open_bench(c: &mut Criterion) {
    for n in [16, 50, 128] {
        let mut board = random_board(n, 0.0, 0);
        c.bench_function(format!("open {n}x{n}").as_str(), |b| {
            b.iter(|| black_box(board.run_search(&mut NoObserver).unwrap()))
        });
    }
}

fn cluttered_bench(c: &mut Criterion) {
    for density in [0.2, 0.35] {
        let mut board = random_board(50, density, 7);
        c.bench_function(format!("50x50, {density} barriers").as_str(), |b| {
            b.iter(|| black_box(board.run_search(&mut NoObserver).unwrap()))
        });
    }
}

criterion_group!(benches, open_bench, cluttered_bench);
criterion_main!(benches);
