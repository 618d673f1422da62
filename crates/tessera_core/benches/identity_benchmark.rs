//! # Identity Benchmark
//!
//! Allocator and pool throughput under steady-state churn.
//!
//! Run with: `cargo bench --package tessera_core --bench identity_benchmark`

// Benchmarks don't need docs
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tessera_core::{IdentityAllocator, IdentityPool};

/// Allocate every identity in a range, then free them all.
fn bench_fill_and_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("allocator_fill_drain");

    for count in [1_000u32, 100_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                let mut ids = IdentityAllocator::new(0, count).unwrap();
                for _ in 0..count {
                    black_box(ids.alloc());
                }
                for id in 0..count {
                    ids.free(id).unwrap();
                }
                ids.intervals().len()
            });
        });
    }

    group.finish();
}

/// Free every other identity (worst case fragmentation), then reallocate.
fn bench_fragmented_churn(c: &mut Criterion) {
    const COUNT: u32 = 10_000;

    c.bench_function("allocator_fragmented_churn_10k", |b| {
        b.iter(|| {
            let mut ids = IdentityAllocator::new(0, COUNT).unwrap();
            for _ in 0..COUNT {
                ids.alloc();
            }
            for id in (0..COUNT).step_by(2) {
                ids.free(id).unwrap();
            }
            for _ in 0..COUNT / 2 {
                black_box(ids.alloc());
            }
        });
    });
}

fn bench_pool_churn(c: &mut Criterion) {
    c.bench_function("pool_churn_100k", |b| {
        let mut pool = IdentityPool::new();
        b.iter(|| {
            for _ in 0..100_000 {
                let id = pool.alloc();
                pool.free(black_box(id));
            }
        });
    });
}

criterion_group!(
    benches,
    bench_fill_and_drain,
    bench_fragmented_churn,
    bench_pool_churn
);
criterion_main!(benches);
