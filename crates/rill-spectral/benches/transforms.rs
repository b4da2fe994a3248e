//! Round-trip benchmarks for the transform engines.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rill_spectral::{DctPlan, RdftPlan, TridiagonalPlan};

fn signal(n: usize, repeat_for: usize) -> Vec<f64> {
    (0..n * repeat_for).map(|i| (i as f64 * 0.37).sin()).collect()
}

fn bench_dct(c: &mut Criterion) {
    let mut group = c.benchmark_group("dct_round_trip");
    for &n in &[128usize, 384, 1024] {
        let repeat_for = 64;
        let mut plan = DctPlan::new(n, repeat_for).unwrap();
        let mut xs = signal(n, repeat_for);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                plan.forward(&mut xs);
                plan.backward(&mut xs);
            })
        });
    }
    group.finish();
}

fn bench_rdft(c: &mut Criterion) {
    let mut group = c.benchmark_group("rdft_round_trip");
    for &n in &[128usize, 384, 1024] {
        let repeat_for = 64;
        let mut plan = RdftPlan::new(n, repeat_for).unwrap();
        let mut xs = signal(n, repeat_for);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                plan.forward(&mut xs);
                plan.backward(&mut xs);
            })
        });
    }
    group.finish();
}

fn bench_tridiagonal(c: &mut Criterion) {
    let mut group = c.benchmark_group("tridiagonal_solve");
    for &n in &[128usize, 384, 1024] {
        let repeat_for = 64;
        let l = vec![1.0; n];
        let cc = vec![-2.5; n];
        let u = vec![1.0; n];
        let offsets = vec![0.0; repeat_for];
        let mut plan = TridiagonalPlan::new(n, repeat_for, true).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                let mut q = signal(n, repeat_for);
                plan.solve(&l, &cc, &u, &offsets, &mut q);
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_dct, bench_rdft, bench_tridiagonal);
criterion_main!(benches);
