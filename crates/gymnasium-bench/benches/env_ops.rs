//! Criterion micro-benchmarks for environment stepping through wrappers.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gymnasium_env::{Env, RecordEpisodeStatistics};
use gymnasium_space::Value;
use gymnasium_test_utils::{fixture_registry, CountdownEnv};

/// Benchmark: 1000 steps of a bare, typed environment.
fn bench_step_typed(c: &mut Criterion) {
    let mut env = CountdownEnv::new(u32::MAX, None).unwrap();
    env.reset(None, None).unwrap();
    c.bench_function("step_typed_1k", |b| {
        b.iter(|| {
            for _ in 0..1000 {
                black_box(env.step(0).unwrap());
            }
        });
    });
}

/// Benchmark: 1000 steps through `make` (OrderEnforcing + TimeLimit,
/// erased) plus RecordEpisodeStatistics, resetting on episode end.
fn bench_step_wrapped(c: &mut Criterion) {
    let registry = fixture_registry();
    let mut env = RecordEpisodeStatistics::new(registry.make("Drift-v0", None).unwrap());
    env.reset(Some(42), None).unwrap();
    c.bench_function("step_wrapped_erased_1k", |b| {
        b.iter(|| {
            for i in 0..1000_i64 {
                let step = env.step(Value::Int(i % 3)).unwrap();
                if step.done() {
                    env.reset(None, None).unwrap();
                }
                black_box(step);
            }
        });
    });
}

criterion_group!(benches, bench_step_typed, bench_step_wrapped);
criterion_main!(benches);
