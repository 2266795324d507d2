//! Benchmarks for fragua core operations.
//!
//! Run with: cargo bench
//!
//! Results include 95% confidence intervals via Criterion.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fragua::core::hasher::hash_identifier;
use fragua::{IndexRegistry, RecipeFn};

fn alias() -> RecipeFn {
    Box::new(|inputs, _prefix, _suffix| {
        Ok(inputs
            .first()
            .map(|input| input.filenames.clone())
            .unwrap_or_default())
    })
}

/// Linear chain of n stages; stage 0 is provided.
fn chain_registry(n: usize) -> IndexRegistry {
    let mut registry = IndexRegistry::new();
    for i in 0..n {
        registry
            .register_artifact(&format!("stage-{:04}", i), &format!("s{:04}", i))
            .unwrap();
    }
    for i in 1..n {
        let input = format!("stage-{:04}", i - 1);
        registry
            .register_recipe(&format!("stage-{:04}", i), &[input.as_str()], alias())
            .unwrap();
    }
    registry.provide_file("stage-0000", "seed.s0000").unwrap();
    registry
}

/// Like `chain_registry`, but every stage's preferred recipe dead-ends on an
/// unbuildable artifact, forcing one backtrack per stage.
fn backtracking_registry(n: usize) -> IndexRegistry {
    let mut registry = IndexRegistry::new();
    registry.register_artifact("dead-end", "dead").unwrap();
    for i in 0..n {
        registry
            .register_artifact(&format!("stage-{:04}", i), &format!("s{:04}", i))
            .unwrap();
    }
    for i in 1..n {
        let id = format!("stage-{:04}", i);
        let input = format!("stage-{:04}", i - 1);
        registry.register_recipe(&id, &["dead-end"], alias()).unwrap();
        registry
            .register_recipe(&id, &[input.as_str()], alias())
            .unwrap();
    }
    registry.provide_file("stage-0000", "seed.s0000").unwrap();
    registry
}

fn bench_hash_identifier(c: &mut Criterion) {
    let mut group = c.benchmark_group("hash_identifier");
    for size in [8, 64, 256] {
        let identifier: String = "x".repeat(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &identifier, |b, id| {
            b.iter(|| black_box(hash_identifier(black_box(id))));
        });
    }
    group.finish();
}

fn bench_dependency_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("dependency_order");
    for n in [10, 50, 100] {
        let registry = chain_registry(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &registry, |b, registry| {
            b.iter(|| black_box(registry.dependency_order().unwrap()));
        });
    }
    group.finish();
}

fn bench_plan_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan_chain");
    for n in [10, 50, 100] {
        let registry = chain_registry(n);
        let target = format!("stage-{:04}", n - 1);
        group.bench_with_input(BenchmarkId::from_parameter(n), &registry, |b, registry| {
            b.iter(|| black_box(registry.plan(&[target.as_str()]).unwrap()));
        });
    }
    group.finish();
}

fn bench_plan_backtracking(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan_backtracking");
    for n in [10, 50, 100] {
        let registry = backtracking_registry(n);
        let target = format!("stage-{:04}", n - 1);
        group.bench_with_input(BenchmarkId::from_parameter(n), &registry, |b, registry| {
            b.iter(|| black_box(registry.plan(&[target.as_str()]).unwrap()));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_hash_identifier,
    bench_dependency_order,
    bench_plan_chain,
    bench_plan_backtracking
);
criterion_main!(benches);
