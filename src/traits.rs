//! Common traits for heap data structures
//!
//! This module provides a two-tier trait hierarchy for min-heaps:
//!
//! - [`Heap`]: Base trait with a `BinaryHeap`-like surface (`push`, `peek`, `pop`)
//! - [`MergeableHeap`]: Extended trait adding `merge`
//!
//! Both [`FibonacciHeap`](crate::fibonacci::FibonacciHeap) and the reference
//! [`SimpleBinaryHeap`](crate::simple_binary::SimpleBinaryHeap) implement them,
//! so tests and benchmarks can be written once against the traits.

use std::fmt;

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// The heap holds no element to remove
    Empty,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::Empty => write!(f, "heap is empty"),
        }
    }
}

impl std::error::Error for HeapError {}

/// Base trait for min-heap data structures
///
/// The stored value is its own priority. Unlike `BinaryHeap`, these heaps
/// are min-heaps: `pop` returns the smallest element first.
///
/// # Example
///
/// ```rust
/// use lazy_fibonacci_heap::Heap;
/// use lazy_fibonacci_heap::simple_binary::SimpleBinaryHeap;
///
/// let mut heap = SimpleBinaryHeap::new();
/// heap.push(3);
/// heap.push(1);
/// heap.push(2);
///
/// assert_eq!(heap.peek(), Some(&1));
/// assert_eq!(heap.pop(), Some(1));
/// ```
pub trait Heap<T> {
    /// Creates a new empty heap
    fn new() -> Self;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool;

    /// Returns the number of elements in the heap
    fn len(&self) -> usize;

    /// Inserts an element
    ///
    /// # Time Complexity
    /// O(log n) for the binary heap, O(1) amortized for the Fibonacci heap.
    fn push(&mut self, value: T);

    /// Returns the minimum element without removing it
    ///
    /// # Time Complexity
    /// O(1) for all implementations
    fn peek(&self) -> Option<&T>;

    /// Removes and returns the minimum element
    ///
    /// # Time Complexity
    /// O(log n), amortized for the Fibonacci heap.
    fn pop(&mut self) -> Option<T>;
}

/// Heap that can absorb another heap of the same type
pub trait MergeableHeap<T>: Heap<T> {
    /// Merges another heap into this one, consuming the other heap
    ///
    /// # Time Complexity
    /// Varies by implementation: O(m) re-keying for the arena-backed
    /// Fibonacci heap, O(m log n) for the binary heap.
    fn merge(&mut self, other: Self);
}
