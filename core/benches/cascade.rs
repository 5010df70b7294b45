//! Cost of the per-tap work across board sizes.
//!
//! Each tap benchmark starts from a freshly generated board (`iter_batched`) so the
//! measured cascade always has a group to clear.

use std::hint::black_box;

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use tapgrid_core::*;

const SIZES: [Coord2; 3] = [(8, 8), (16, 16), (32, 32)];

fn config(size: Coord2) -> GameConfig {
    GameConfig::new(size, 6).unwrap().with_seed(12345)
}

fn label(size: Coord2) -> BenchmarkId {
    BenchmarkId::from_parameter(format!("{}x{}", size.0, size.1))
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for size in SIZES {
        group.bench_with_input(label(size), &size, |b, &size| {
            let mut random = SeededRandom::new(1);
            b.iter(|| {
                let board = RandomBoardGenerator::default()
                    .generate(&config(size), &mut random)
                    .unwrap();
                black_box(board);
            });
        });
    }
    group.finish();
}

fn bench_has_any_legal_move(c: &mut Criterion) {
    let mut group = c.benchmark_group("has_any_legal_move");
    for size in SIZES {
        let engine = GridEngine::new(config(size)).unwrap();
        group.bench_with_input(label(size), engine.board(), |b, board| {
            b.iter(|| black_box(has_any_legal_move(board, 2)));
        });
    }
    group.finish();
}

fn bench_tap_cascade(c: &mut Criterion) {
    let mut group = c.benchmark_group("tap_cascade");
    for size in SIZES {
        group.bench_with_input(label(size), &size, |b, &size| {
            b.iter_batched(
                || {
                    let engine = GridEngine::new(config(size)).unwrap();
                    let target = engine.legal_moves()[0].cells()[0];
                    (engine, target)
                },
                |(mut engine, target)| {
                    black_box(engine.handle_tap(target).unwrap());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_generate,
    bench_has_any_legal_move,
    bench_tap_cascade
);
criterion_main!(benches);
