//! Benchmarks for the edge-matching solver.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use edgematch::config::{Strategy, SweepConfig};
use edgematch::index::build_constraint_index;
use edgematch::pieces::{BOARD_SIDE, BOARD_SIZE, PUZZLE};
use edgematch::solver::{search, Anchor};
use edgematch::PuzzleOps;

/// Benchmark building the constraint index for the 4x4 catalog.
fn bench_build_index(c: &mut Criterion) {
    let catalog = PUZZLE.catalog().unwrap();

    c.bench_function("build_constraint_index", |b| {
        b.iter(|| build_constraint_index::<BOARD_SIZE>(black_box(&catalog)))
    });
}

/// Benchmark one productive anchor under both strategies.
fn bench_single_anchor(c: &mut Criterion) {
    let catalog = PUZZLE.catalog().unwrap();
    let index = build_constraint_index::<BOARD_SIZE>(&catalog).unwrap();
    let seed = Anchor {
        piece_id: 14,
        rotation: 1,
    }
    .seed(&catalog)
    .unwrap();

    let mut group = c.benchmark_group("anchor");
    for (name, strategy) in [
        ("frontier", Strategy::Frontier),
        ("depth_first", Strategy::DepthFirst),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| search::<BOARD_SIDE, BOARD_SIZE>(&index, black_box(seed), strategy, |_| {}))
        });
    }
    group.finish();
}

/// Benchmark the complete 64-anchor sweep.
fn bench_full_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("sweep");
    group.sample_size(20);
    group.bench_function("sequential", |b| {
        let config = SweepConfig::sequential(Strategy::Frontier);
        b.iter(|| black_box(&PUZZLE).solve(&config))
    });
    group.bench_function("parallel", |b| {
        let config = SweepConfig::default();
        b.iter(|| black_box(&PUZZLE).solve(&config))
    });
    group.finish();
}

/// Benchmark formatting a solution for display.
fn bench_format_solution(c: &mut Criterion) {
    let solutions = PUZZLE.solve(&SweepConfig::default()).unwrap();
    let solution = &solutions[0];

    c.bench_function("format_solution", |b| {
        b.iter(|| PUZZLE.format_solution(black_box(solution)))
    });
}

criterion_group!(
    benches,
    bench_build_index,
    bench_single_anchor,
    bench_full_sweep,
    bench_format_solution
);
criterion_main!(benches);
