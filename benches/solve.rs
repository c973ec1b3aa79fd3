//! Performance measurement for full puzzle reassembly at varying piece counts

// Criterion macros generate undocumented functions
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use ndarray::Array2;
use seamsolve::algorithm::GreedySolver;
use seamsolve::spatial::Rgb;
use seamsolve::spatial::piece::slice_into_pieces;
use std::hint::black_box;

// Deterministic pseudo-texture with enough variation that edge scores are
// well separated.
fn synthetic_source(side: usize) -> Array2<Rgb> {
    Array2::from_shape_fn((side, side), |(row, col)| {
        let value = ((row * 7 + col * 13) % 251) as u8;
        [value, value.wrapping_add(31), value.wrapping_mul(3)]
    })
}

/// Measures full solves as the piece grid grows from 2x2 to 4x4
fn bench_full_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_solve");
    group.sample_size(10);

    for grid in &[2usize, 3, 4] {
        let source = synthetic_source(grid * 16);

        group.bench_with_input(BenchmarkId::from_parameter(grid), grid, |b, _| {
            b.iter(|| {
                let Ok(pieces) = slice_into_pieces(&source, 16, 16) else {
                    return;
                };
                let mut solver = GreedySolver::new(pieces);
                let _ = black_box(solver.run());
            });
        });
    }

    group.finish();
}

/// Measures a single solver step on a freshly initialised 3x3 puzzle
fn bench_first_step(c: &mut Criterion) {
    let source = synthetic_source(48);

    c.bench_function("first_step", |b| {
        b.iter(|| {
            let Ok(pieces) = slice_into_pieces(&source, 16, 16) else {
                return;
            };
            let mut solver = GreedySolver::new(pieces);
            let _ = black_box(solver.step());
        });
    });
}

criterion_group!(benches, bench_full_solve, bench_first_step);
criterion_main!(benches);
