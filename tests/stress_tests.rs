//! Stress tests that push the Fibonacci heap through long operation sequences
//!
//! Large bulk loads, interleavings that cross the consolidation milestones in
//! both directions, and structural checks along the way.

use ctor::ctor;
use lazy_fibonacci_heap::config::{ConsolidationPolicy, HeapConfig};
use lazy_fibonacci_heap::fibonacci::FibonacciHeap;
use lazy_fibonacci_heap::HeapError;

#[ctor]
fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

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

    fn next_i64(&mut self) -> i64 {
        self.next_u64() as i64
    }
}

const POLICIES: [ConsolidationPolicy; 4] = [
    ConsolidationPolicy::Always,
    ConsolidationPolicy::FixedThreshold(32),
    ConsolidationPolicy::FixedThreshold(usize::MAX),
    ConsolidationPolicy::FibonacciTable,
];

/// 10,000 random values in, all of them out in non-decreasing order
#[test]
fn test_bulk_random_extraction() {
    let mut rng = Lcg::new(0x5eed);
    let mut heap = FibonacciHeap::new();
    let count = 10_000;

    for _ in 0..count {
        heap.insert(rng.next_i64());
    }
    assert_eq!(heap.size(), count);
    assert!(heap.verify_internal_structure());

    let mut last = heap.remove_min().unwrap();
    for i in 1..count {
        let current = heap.remove_min().unwrap();
        assert!(last <= current, "step {}: {} > {}", i, last, current);
        last = current;
    }

    assert_eq!(heap.size(), 0);
    assert_eq!(heap.remove_min(), Err(HeapError::Empty));
}

/// Bulk load, explicit consolidate, then drain, for every policy
#[test]
fn test_bulk_with_explicit_consolidate() {
    for policy in POLICIES {
        let mut rng = Lcg::new(42);
        let mut heap = FibonacciHeap::with_config(
            i64::cmp,
            HeapConfig::new().with_policy(policy).with_capacity(5_000),
        );

        let mut expected: Vec<i64> = (0..5_000).map(|_| rng.next_i64() % 1_000).collect();
        heap.extend(expected.iter().copied());
        heap.consolidate();
        assert!(heap.verify_internal_structure(), "policy {:?}", policy);
        // Unique degrees bound the root list by log2(n) + 1
        assert!(heap.root_count() <= 13, "policy {:?}", policy);

        expected.sort_unstable();
        assert_eq!(heap.into_sorted_vec(), expected, "policy {:?}", policy);
    }
}

/// Structure stays valid after every single operation
#[test]
fn test_structure_after_every_operation() {
    let mut rng = Lcg::new(7);
    let mut heap = FibonacciHeap::new();
    let mut model: Vec<u64> = Vec::new();

    for _ in 0..2_000 {
        if rng.next_u64() % 3 == 0 {
            let removed = heap.remove_min();
            model.sort_unstable();
            if model.is_empty() {
                assert_eq!(removed, Err(HeapError::Empty));
            } else {
                assert_eq!(removed, Ok(model.remove(0)));
            }
        } else {
            let value = rng.next_u64() % 500;
            heap.insert(value);
            model.push(value);
        }

        assert_eq!(heap.size(), model.len());
        assert_eq!(heap.peek(), model.iter().min());
        assert!(heap.verify_internal_structure());
    }
}

/// Grow and shrink across the milestones repeatedly
#[test]
fn test_oscillate_across_milestones() {
    let mut heap = FibonacciHeap::new();
    let mut next = 0;

    for _ in 0..5 {
        for _ in 0..300 {
            heap.insert(next);
            next += 1;
        }
        let floor = next - heap.size() as i32;
        for offset in 0..250 {
            assert_eq!(heap.remove_min(), Ok(floor + offset));
        }
        assert!(heap.verify_internal_structure());
    }

    assert_eq!(heap.size(), 250);
}

/// Root list stays short without any extraction
#[test]
fn test_insert_only_bounds_root_list() {
    let mut heap = FibonacciHeap::new();

    // Right after a milestone the root list has unique degrees
    for value in 0..10_946 {
        heap.insert(value);
    }
    assert!(heap.root_count() <= 14);
    assert_eq!(heap.milestones().target(), 17_711);
}

/// Merge many heaps and drain
#[test]
fn test_large_merge() {
    let mut rng = Lcg::new(99);
    let mut merged = FibonacciHeap::new();
    let mut expected = Vec::new();

    for _ in 0..20 {
        let mut part = FibonacciHeap::new();
        let mut values = Vec::new();
        for _ in 0..250 {
            let value = rng.next_u64() % 10_000;
            part.insert(value);
            values.push(value);
        }
        // Partially drained heaps carry promoted children in their root lists
        values.sort_unstable();
        assert_eq!(part.remove_min(), Ok(values.remove(0)));
        expected.extend(values);

        merged.merge(part);
        assert!(merged.verify_internal_structure());
    }

    expected.sort_unstable();
    assert_eq!(merged.size(), 20 * 249);
    assert_eq!(merged.into_sorted_vec(), expected);
}

/// Payloads carried alongside keys, ordered by a custom comparator
#[test]
fn test_keyed_payloads() {
    struct Job {
        priority: u32,
        name: String,
    }

    let mut heap = FibonacciHeap::with_comparator(|a: &Job, b: &Job| {
        b.priority.cmp(&a.priority).then_with(|| a.name.cmp(&b.name))
    });

    for (priority, name) in [(1, "low"), (9, "urgent"), (5, "normal"), (9, "also urgent")] {
        heap.insert(Job {
            priority,
            name: name.to_string(),
        });
    }

    let order: Vec<String> = std::iter::from_fn(|| heap.remove_min().ok())
        .map(|job| job.name)
        .collect();
    assert_eq!(order, vec!["also urgent", "urgent", "normal", "low"]);
}
