//! Benchmarks for the derivative engines.
//!
//! Run with: `cargo bench --bench derivative`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use griddiff::derivative::{Derivative, DerivativeFirstOrder, DerivativeSecondOrder};
use griddiff::field::Field;
use griddiff::index_space::{range3d, Axis};

const N: i64 = 64;

fn data(ghosts: usize) -> Field<3> {
    Field::from_function(range3d(0..N, 0..N, 0..N), [ghosts; 3], |[i, j, k]| {
        (0.1 * i as f64).sin() + (0.2 * j as f64).cos() * (0.05 * k as f64)
    })
}

/// Second derivative along each axis, at each order of accuracy.
fn bench_second_derivative(c: &mut Criterion) {
    let mut group = c.benchmark_group("second_derivative_64^3");

    for axis in [Axis::X, Axis::Y, Axis::Z] {
        for g in 1..=4 {
            let engine = DerivativeSecondOrder::<3>::new("d2/dq2", axis, g).unwrap();
            let input = data(g);
            let mut output = Field::zeros(range3d(0..N, 0..N, 0..N), [0; 3], 1);

            group.bench_with_input(BenchmarkId::new(axis.to_string(), 2 * g), &g, |b, _| {
                b.iter(|| {
                    engine
                        .compute_derivative(&mut output, black_box(&input), 0.01, None, 0, 0)
                        .unwrap()
                })
            });
        }
    }
    group.finish();
}

/// First derivative along x, comparing full-box and restricted evaluation.
fn bench_first_derivative_restricted(c: &mut Criterion) {
    let mut group = c.benchmark_group("first_derivative_restriction");
    let engine = DerivativeFirstOrder::<3>::new("d/dx", Axis::X, 2).unwrap();
    let input = data(2);
    let mut output = Field::zeros(range3d(0..N, 0..N, 0..N), [0; 3], 1);
    let half = range3d(0..N / 2, 0..N, 0..N);

    group.bench_function("full", |b| {
        b.iter(|| engine.compute_derivative(&mut output, &input, 0.01, None, 0, 0).unwrap())
    });
    group.bench_function("half", |b| {
        b.iter(|| engine.compute_derivative(&mut output, &input, 0.01, Some(&half), 0, 0).unwrap())
    });
    group.finish();
}

criterion_group!(benches, bench_second_derivative, bench_first_derivative_restricted);
criterion_main!(benches);
