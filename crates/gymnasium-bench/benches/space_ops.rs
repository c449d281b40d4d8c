//! Criterion micro-benchmarks for space operations.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gymnasium_bench::{image_profile, observation_profile, reference_spaces};
use gymnasium_space::{Discrete, Space};

/// Benchmark: sample() then contains() on each fundamental space.
fn bench_sample_contains(c: &mut Criterion) {
    let mut group = c.benchmark_group("sample_contains");
    for (label, mut space) in reference_spaces(42).unwrap() {
        group.bench_function(label, |b| {
            b.iter(|| {
                let v = space.sample();
                black_box(space.contains(&v));
            });
        });
    }
    group.finish();
}

/// Benchmark: flatten() and unflatten() of a nested Dict observation.
fn bench_flatten_dict(c: &mut Criterion) {
    let mut space = observation_profile(42).unwrap();
    let sample = space.sample();
    let flat = space.flatten(&sample).unwrap();

    c.bench_function("flatten_dict", |b| {
        b.iter(|| black_box(space.flatten(&sample).unwrap()));
    });
    c.bench_function("unflatten_dict", |b| {
        b.iter(|| black_box(space.unflatten(&flat).unwrap()));
    });
}

/// Benchmark: sample a full 84x84x3 uint8 frame.
fn bench_sample_image(c: &mut Criterion) {
    let mut space = image_profile(42).unwrap();
    c.bench_function("sample_image_84x84x3", |b| {
        b.iter(|| black_box(space.sample()));
    });
}

/// Benchmark: masked sampling with a sparse mask over 1000 actions.
fn bench_masked_discrete(c: &mut Criterion) {
    let mut space = Discrete::new(1000, 0, Some(42)).unwrap();
    let mask: Vec<bool> = (0..1000).map(|i| i % 97 == 0).collect();
    c.bench_function("discrete_masked_1000", |b| {
        b.iter(|| black_box(space.sample_masked(&mask).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_sample_contains,
    bench_flatten_dict,
    bench_sample_image,
    bench_masked_discrete
);
criterion_main!(benches);
