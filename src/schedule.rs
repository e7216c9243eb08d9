//! Population milestones for lazy consolidation
//!
//! The heap consolidates eagerly whenever its size reaches the next Fibonacci
//! number in [`FIBONACCI_NUMBERS`], and rolls the milestone back when removals
//! shrink it to the previous one. [`Milestones`] holds that per-heap state.
//!
//! [`SKIP_CONSOLIDATION`] is indexed the same way and bounds how many roots the
//! heap tolerates after a removal before it pays for a full consolidation.

use log::debug;

/// Fibonacci numbers from 2 up to the largest that fits in 31 bits
pub const FIBONACCI_NUMBERS: [usize; 44] = [
    2, 3, 5, 8, 13, 21, //
    34, 55, 89, 144, 233, 377, //
    610, 987, 1597, 2584, 4181, 6765, //
    10946, 17711, 28657, 46368, 75025, 121393, //
    196418, 317811, 514229, 832040, 1346269, 2178309, //
    3524578, 5702887, 9227465, 14930352, 24157817, 39088169, //
    63245986, 102334155, 165580141, 267914296, 433494437, 701408733, //
    1134903170, 1836311903,
];

/// Largest root count for which removal only rescans for the minimum
///
/// Empirically tuned per milestone index.
pub const SKIP_CONSOLIDATION: [usize; 44] = [
    8, 8, 8, 8, 8, 8, //
    8, 8, 8, 8, 8, 8, //
    8, 8, 8, 8, 8, 8, //
    89, 89, 89, 89, 89, 89, //
    89, 89, 89, 89, 89, 89, //
    114, 114, 114, 114, 233, 233, //
    233, 233, 233, 233, 233, 233, //
    233, 233,
];

/// Milestone number at `index`, or `usize::MAX` once past the table
fn milestone(index: usize) -> usize {
    FIBONACCI_NUMBERS.get(index).copied().unwrap_or(usize::MAX)
}

/// Lazy-consolidation bookkeeping of one heap
///
/// `target` is the size at which the next insertion consolidates, `previous`
/// the size at which removals roll the schedule back one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Milestones {
    index: usize,
    target: usize,
    previous: usize,
}

impl Milestones {
    /// State of an empty heap
    pub const fn new() -> Self {
        Self {
            index: 0,
            target: FIBONACCI_NUMBERS[0],
            previous: FIBONACCI_NUMBERS[0],
        }
    }

    /// State for a heap that already holds `size` elements
    ///
    /// Picks the first milestone strictly above `size`.
    pub fn for_size(size: usize) -> Self {
        let index = FIBONACCI_NUMBERS.partition_point(|&n| n <= size);
        Self {
            index,
            target: milestone(index),
            previous: milestone(index.saturating_sub(1)),
        }
    }

    /// Position in the milestone table
    pub fn index(&self) -> usize {
        self.index
    }

    /// Size at which the next insertion consolidates
    pub fn target(&self) -> usize {
        self.target
    }

    /// Size at which removals roll the schedule back
    pub fn previous(&self) -> usize {
        self.previous
    }

    /// Root-count bound under which removal skips the merge pass
    pub fn skip_threshold(&self) -> usize {
        SKIP_CONSOLIDATION[self.index.min(SKIP_CONSOLIDATION.len() - 1)]
    }

    /// Records an insertion that brought the heap to `size`
    ///
    /// Returns true when a milestone was reached and the caller must
    /// consolidate.
    pub fn on_insert(&mut self, size: usize) -> bool {
        if size < self.target {
            return false;
        }

        self.previous = self.target;
        self.index = (self.index + 1).min(FIBONACCI_NUMBERS.len());
        self.target = milestone(self.index);
        debug!(
            "milestone {} reached at size {}, next target {}",
            self.previous, size, self.target
        );
        true
    }

    /// Records a removal that brought the heap down to `size`
    pub fn on_remove(&mut self, size: usize) {
        if size != self.previous {
            return;
        }

        self.target = self.previous;
        self.index = self.index.saturating_sub(1);
        self.previous = milestone(self.index.saturating_sub(1));
        debug!(
            "size fell to {}, milestone rolled back to index {}",
            size, self.index
        );
    }
}

impl Default for Milestones {
    fn default() -> Self {
        Self::new()
    }
}
