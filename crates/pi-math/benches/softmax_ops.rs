//! Criterion benchmarks for `pi-math`.
//!
//! Focus on the kernels that run once per prediction request.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pi_math::{argmax, log_sum_exp, logistic, softmax};

fn bench_probability_kernels(c: &mut Criterion) {
    let mut group = c.benchmark_group("probability");

    for (name, scores) in [
        ("two_class", vec![0.4, -0.4]),
        ("four_class", vec![1.2, -0.3, 0.05, 2.7]),
        ("sixteen_class", (0..16).map(|i| (i as f64) * 0.37 - 2.0).collect()),
    ] {
        group.bench_with_input(BenchmarkId::new("softmax", name), &scores, |b, s| {
            b.iter(|| black_box(softmax(black_box(s))));
        });

        group.bench_with_input(BenchmarkId::new("log_sum_exp", name), &scores, |b, s| {
            b.iter(|| black_box(log_sum_exp(black_box(s))));
        });

        group.bench_with_input(BenchmarkId::new("argmax", name), &scores, |b, s| {
            b.iter(|| black_box(argmax(black_box(s))));
        });
    }

    group.bench_function("logistic", |b| {
        b.iter(|| black_box(logistic(black_box(0.73))));
    });

    group.finish();
}

criterion_group!(benches, bench_probability_kernels);
criterion_main!(benches);
