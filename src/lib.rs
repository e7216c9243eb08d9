//! Lazy Fibonacci Heap
//!
//! A mergeable min-priority queue built on the Fibonacci-heap algorithm, with
//! nodes stored in a slotmap arena and consolidation triggered at
//! Fibonacci-number population milestones as well as during extraction.
//!
//! # Features
//!
//! - **Fibonacci Heap**: O(1) amortized insert; O(log n) amortized remove-min;
//!   any total order via a comparator closure
//! - **Lazy milestones**: the root list is consolidated whenever the size
//!   reaches 2, 3, 5, 8, 13, ... so it stays short even without extractions
//! - **Configurable removal**: skip the merge pass while the root list is short
//!   (see [`config::ConsolidationPolicy`])
//! - **Simple Binary Heap**: reference implementation of the same traits
//!
//! # Example
//!
//! ```rust
//! use lazy_fibonacci_heap::fibonacci::FibonacciHeap;
//! use lazy_fibonacci_heap::HeapError;
//!
//! let mut heap = FibonacciHeap::new();
//! heap.insert(5);
//! heap.insert(3);
//! assert_eq!(heap.remove_min(), Ok(3));
//! assert_eq!(heap.remove_min(), Ok(5));
//! assert_eq!(heap.remove_min(), Err(HeapError::Empty));
//! ```
//!
//! # Logging
//!
//! The crate logs through the [`log`] facade: milestone changes and
//! consolidation passes at `debug`, individual links at `trace`, and
//! structural violations found by
//! [`FibonacciHeap::verify_internal_structure`](fibonacci::FibonacciHeap::verify_internal_structure)
//! at `warn`.

pub mod config;
pub mod fibonacci;
pub mod schedule;
pub mod simple_binary;
mod storage;
pub mod traits;

// Re-export the main traits for convenience
pub use traits::{Heap, HeapError, MergeableHeap};
