//! Bulk insert / drain benchmarks
//!
//! Loads a heap with pseudo-random integers, optionally forces a consolidation
//! once the load is done, then drains it, checking that the output never
//! decreases. The binary heap is the baseline.
//!
//! ## Running
//!
//! ```bash
//! cargo bench --bench heap_bench
//! RUST_LOG=debug cargo bench --bench heap_bench -- fibonacci/table/1000
//! ```

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lazy_fibonacci_heap::config::{ConsolidationPolicy, HeapConfig};
use lazy_fibonacci_heap::fibonacci::FibonacciHeap;
use lazy_fibonacci_heap::simple_binary::SimpleBinaryHeap;
use lazy_fibonacci_heap::Heap;

const SIZES: [usize; 3] = [1_000, 10_000, 100_000];

/// Linear congruential generator for reproducible random numbers
struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state >> 33
    }
}

fn random_input(count: usize) -> Vec<u64> {
    let mut rng = Lcg::new(0xf1b0);
    (0..count).map(|_| rng.next_u64()).collect()
}

fn drain_fibonacci(input: &[u64], policy: ConsolidationPolicy, consolidate_after_load: bool) -> u64 {
    let mut heap = FibonacciHeap::with_config(
        u64::cmp,
        HeapConfig::new()
            .with_policy(policy)
            .with_capacity(input.len()),
    );
    heap.extend(input.iter().copied());
    if consolidate_after_load {
        heap.consolidate();
    }

    let mut last = 0;
    while let Ok(current) = heap.remove_min() {
        assert!(last <= current, "heap returned {} after {}", current, last);
        last = current;
    }
    last
}

fn drain_binary(input: &[u64]) -> u64 {
    let mut heap = SimpleBinaryHeap::new();
    for &value in input {
        heap.push(value);
    }

    let mut last = 0;
    while let Some(current) = heap.pop() {
        assert!(last <= current);
        last = current;
    }
    last
}

fn bench_insert_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_drain");

    for size in SIZES {
        let input = random_input(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("fibonacci/table", size), &input, |b, input| {
            b.iter(|| drain_fibonacci(black_box(input), ConsolidationPolicy::FibonacciTable, false))
        });
        group.bench_with_input(BenchmarkId::new("fibonacci/always", size), &input, |b, input| {
            b.iter(|| drain_fibonacci(black_box(input), ConsolidationPolicy::Always, false))
        });
        group.bench_with_input(BenchmarkId::new("fibonacci/fixed-64", size), &input, |b, input| {
            b.iter(|| {
                drain_fibonacci(
                    black_box(input),
                    ConsolidationPolicy::FixedThreshold(64),
                    false,
                )
            })
        });
        group.bench_with_input(BenchmarkId::new("binary", size), &input, |b, input| {
            b.iter(|| drain_binary(black_box(input)))
        });
    }

    group.finish();
}

/// Bulk load, one explicit consolidation, then drain
fn bench_consolidate_after_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("consolidate_after_load");

    for size in SIZES {
        let input = random_input(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            b.iter(|| drain_fibonacci(black_box(input), ConsolidationPolicy::FibonacciTable, true))
        });
    }

    group.finish();
}

/// Insert-only workload: cost of the milestone consolidations
fn bench_insert_only(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_only");

    for size in SIZES {
        let input = random_input(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            b.iter(|| {
                let heap: FibonacciHeap<u64> = black_box(input).iter().copied().collect();
                heap.root_count()
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_insert_drain,
    bench_consolidate_after_load,
    bench_insert_only
);
criterion_main!(benches);
