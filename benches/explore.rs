//! Benchmarks for the sliding-block puzzle explorer.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use slidey::{deja_vu, explore, Board};

/// Benchmark legal-move generation on the starting board.
fn bench_legal_moves(c: &mut Criterion) {
    let board = Board::new();

    c.bench_function("legal_moves", |b| {
        b.iter(|| black_box(&board).legal_moves())
    });
}

/// Benchmark the duplicate check against a populated reached list.
fn bench_deja_vu(c: &mut Criterion) {
    let census = explore(Board::new(), 200);
    let board = Board::new();

    c.bench_function("deja_vu", |b| {
        b.iter(|| deja_vu(black_box(&board), &census.reached))
    });
}

/// Benchmark a bounded exploration run.
fn bench_explore_500(c: &mut Criterion) {
    let mut group = c.benchmark_group("explore");
    group.sample_size(10);
    group.bench_function("steps_500", |b| {
        b.iter(|| explore(black_box(Board::new()), 500))
    });
    group.finish();
}

criterion_group!(benches, bench_legal_moves, bench_deja_vu, bench_explore_500);
criterion_main!(benches);
