//! Simple Binary Heap implementation
//!
//! A plain array-backed binary min-heap implementing the same traits as
//! [`FibonacciHeap`](crate::fibonacci::FibonacciHeap). It serves as the
//! reference model in differential tests and as the baseline in benchmarks.
//!
//! # Time Complexity
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | `push`    | O(log n)   |
//! | `pop`     | O(log n)   |
//! | `peek`    | O(1)       |
//! | `merge`   | O(m log n) |
//!
//! # Example
//!
//! ```rust
//! use lazy_fibonacci_heap::Heap;
//! use lazy_fibonacci_heap::simple_binary::SimpleBinaryHeap;
//!
//! let mut heap = SimpleBinaryHeap::new();
//! heap.push(3);
//! heap.push(1);
//! heap.push(2);
//!
//! assert_eq!(heap.peek(), Some(&1));
//! assert_eq!(heap.pop(), Some(1));
//! assert_eq!(heap.pop(), Some(2));
//! assert_eq!(heap.pop(), Some(3));
//! assert_eq!(heap.pop(), None);
//! ```

use crate::traits::{Heap, MergeableHeap};

/// A simple binary min-heap
#[derive(Debug, Clone)]
pub struct SimpleBinaryHeap<T: Ord> {
    data: Vec<T>,
}

impl<T: Ord> Heap<T> for SimpleBinaryHeap<T> {
    fn new() -> Self {
        Self { data: Vec::new() }
    }

    fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn push(&mut self, value: T) {
        self.data.push(value);
        self.sift_up(self.data.len() - 1);
    }

    fn peek(&self) -> Option<&T> {
        self.data.first()
    }

    fn pop(&mut self) -> Option<T> {
        if self.data.is_empty() {
            return None;
        }

        let last_idx = self.data.len() - 1;
        self.data.swap(0, last_idx);
        let result = self.data.pop();

        if !self.data.is_empty() {
            self.sift_down(0);
        }

        result
    }
}

impl<T: Ord> MergeableHeap<T> for SimpleBinaryHeap<T> {
    fn merge(&mut self, other: Self) {
        for value in other.data {
            self.push(value);
        }
    }
}

impl<T: Ord> SimpleBinaryHeap<T> {
    /// Move element at index up to maintain heap property
    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.data[index] < self.data[parent] {
                self.data.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    /// Move element at index down to maintain heap property
    fn sift_down(&mut self, mut index: usize) {
        let len = self.data.len();
        loop {
            let left = 2 * index + 1;
            let right = 2 * index + 2;
            let mut smallest = index;

            if left < len && self.data[left] < self.data[smallest] {
                smallest = left;
            }
            if right < len && self.data[right] < self.data[smallest] {
                smallest = right;
            }

            if smallest != index {
                self.data.swap(index, smallest);
                index = smallest;
            } else {
                break;
            }
        }
    }
}

impl<T: Ord> Default for SimpleBinaryHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}
