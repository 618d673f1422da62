//! # Bit Enumeration Benchmark
//!
//! Set-bit walking over sparse and dense masks.
//!
//! Run with: `cargo bench --package tessera_core --bench bits_benchmark`

// Benchmarks don't need docs
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tessera_core::{BitSet, SetBits};

const BITS: usize = 1 << 20;

fn bench_enumerate(c: &mut Criterion) {
    let mut group = c.benchmark_group("enumerate_set_bits");

    // One in every `stride` bits set
    for stride in [1usize, 64, 4_096] {
        let set: BitSet = (0..BITS).step_by(stride).collect();
        group.bench_with_input(BenchmarkId::from_parameter(stride), &set, |b, set| {
            b.iter(|| set.iter().fold(0usize, |acc, i| acc ^ black_box(i)));
        });
    }

    group.finish();
}

fn bench_intersect_and_walk(c: &mut Criterion) {
    let a: BitSet = (0..BITS).step_by(3).collect();
    let b: BitSet = (0..BITS).step_by(5).collect();

    c.bench_function("intersect_then_enumerate_1M", |bench| {
        bench.iter(|| {
            let mut matched = a.clone();
            matched.intersect_with(&b);
            matched.iter().count()
        });
    });
}

fn bench_fixed_words(c: &mut Criterion) {
    let words = [0xF0F0_F0F0_F0F0_F0F0u64, 0x0101_0101_0101_0101];
    c.bench_function("fixed_two_word_enumerate", |b| {
        let mut bits = SetBits::new(words);
        b.iter(|| {
            bits.reset();
            (&mut bits).sum::<usize>()
        });
    });
}

criterion_group!(
    benches,
    bench_enumerate,
    bench_intersect_and_walk,
    bench_fixed_words
);
criterion_main!(benches);
