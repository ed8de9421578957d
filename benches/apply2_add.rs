//! Two-input Add Benchmark
//!
//! Compares a hand-written `f32x4` loop against `apply2(X + Y)` over the
//! same buffers. The two should be indistinguishable.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use vectorize::{X, Y, apply2};
use wide::f32x4;

const LENGTHS: [usize; 4] = [63, 1_024, 16_387, 262_144];

fn add2_byhand(n: usize, src1: &[f32], src2: &[f32], dst: &mut [f32]) {
    let (src1, src2, dst) = (&src1[..n], &src2[..n], &mut dst[..n]);
    let mut out = dst.chunks_exact_mut(4);
    let mut a = src1.chunks_exact(4);
    let mut b = src2.chunks_exact(4);
    for ((d, x), y) in (&mut out).zip(&mut a).zip(&mut b) {
        let sum = f32x4::new([x[0], x[1], x[2], x[3]]) + f32x4::new([y[0], y[1], y[2], y[3]]);
        d.copy_from_slice(&sum.to_array());
    }
    for ((d, x), y) in out
        .into_remainder()
        .iter_mut()
        .zip(a.remainder())
        .zip(b.remainder())
    {
        *d = x + y;
    }
}

fn inputs(n: usize) -> (Vec<f32>, Vec<f32>) {
    let a = (0..n).map(|i| i as f32 * 0.25 - 100.0).collect();
    let b = (0..n).map(|i| (n - i) as f32 * 0.5).collect();
    (a, b)
}

fn bench_apply2_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply2_add");

    for n in LENGTHS {
        let (a, b) = inputs(n);
        let mut dst = vec![0.0_f32; n];

        group.bench_with_input(BenchmarkId::new("byhand", n), &n, |bench, &n| {
            bench.iter(|| add2_byhand(black_box(n), black_box(&a), black_box(&b), &mut dst));
        });

        group.bench_with_input(BenchmarkId::new("vectorize", n), &n, |bench, &n| {
            bench.iter(|| apply2(black_box(n), black_box(&a), black_box(&b), &mut dst, X + Y));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_apply2_add);
criterion_main!(benches);
