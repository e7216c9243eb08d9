//! Fibonacci Heap implementation
//!
//! A Fibonacci heap is a collection of heap-ordered trees whose roots are
//! linked in a circular doubly linked list. The heap keeps a pointer to the
//! minimum root and defers restructuring ("consolidation") for as long as it
//! can:
//!
//! | Operation     | Complexity                                  |
//! |---------------|---------------------------------------------|
//! | `insert`      | O(1) amortized                              |
//! | `peek`        | O(1)                                        |
//! | `remove_min`  | O(log n) amortized                          |
//! | `consolidate` | O(roots + log n)                            |
//! | `merge`       | O(m) to re-key the other heap's nodes       |
//!
//! Unlike the textbook structure, this heap also consolidates during
//! insertion, each time its size reaches the next Fibonacci number (see
//! [`schedule`](crate::schedule)). Removal may then skip the merge pass and
//! only rescan a short root list, as selected by
//! [`ConsolidationPolicy`](crate::config::ConsolidationPolicy).
//!
//! Nodes live in a slotmap arena owned by the heap; all links between them are
//! generational keys.
//!
//! There is no `decrease_key`. Nodes carry the `marked` flag used by cascading
//! cuts, and linking clears it, but nothing ever sets it.

use std::cmp::Ordering;
use std::fmt;

use log::{debug, trace, warn};
use smallvec::SmallVec;

use crate::config::HeapConfig;
use crate::schedule::Milestones;
use crate::storage::{NodeArena, NodeKey};
use crate::traits::{Heap, HeapError, MergeableHeap};

/// Comparator used by heaps of `Ord` values
pub type OrdComparator<T> = fn(&T, &T) -> Ordering;

/// Slots the degree index keeps inline
const DEGREE_INDEX_INLINE: usize = 8;

/// Fibonacci min-heap ordered by a caller-supplied comparator
///
/// # Example
///
/// ```rust
/// use lazy_fibonacci_heap::fibonacci::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// heap.insert(5);
/// heap.insert(1);
/// heap.insert(3);
/// assert_eq!(heap.peek(), Some(&1));
/// assert_eq!(heap.remove_min(), Ok(1));
/// assert_eq!(heap.size(), 2);
/// ```
///
/// Any total order works, for instance a max-heap:
///
/// ```rust
/// use lazy_fibonacci_heap::fibonacci::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::with_comparator(|a: &i32, b: &i32| b.cmp(a));
/// heap.extend([1, 7, 3]);
/// assert_eq!(heap.remove_min(), Ok(7));
/// ```
pub struct FibonacciHeap<T, C = OrdComparator<T>> {
    arena: NodeArena<T>,
    compare: C,
    minimum: Option<NodeKey>,
    size: usize,
    roots: usize,
    milestones: Milestones,
    // Scratch index for consolidate, empty between calls
    degrees: SmallVec<[Option<NodeKey>; DEGREE_INDEX_INLINE]>,
    config: HeapConfig,
}

impl<T: Ord> FibonacciHeap<T> {
    /// Creates an empty heap ordered by `T`'s `Ord` implementation
    pub fn new() -> Self {
        Self::with_comparator(T::cmp)
    }
}

impl<T, C> FibonacciHeap<T, C> {
    /// Number of elements in the heap
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.minimum.is_none()
    }

    /// Current length of the root list
    pub fn root_count(&self) -> usize {
        self.roots
    }

    /// Returns the minimum element without removing it
    pub fn peek(&self) -> Option<&T> {
        self.minimum.map(|key| &self.arena[key].value)
    }

    pub fn config(&self) -> &HeapConfig {
        &self.config
    }

    /// Lazy-consolidation bookkeeping
    pub fn milestones(&self) -> Milestones {
        self.milestones
    }

    /// Drops every element, keeping the comparator and configuration
    pub fn clear(&mut self) {
        self.arena.clear();
        self.minimum = None;
        self.size = 0;
        self.roots = 0;
        self.milestones = Milestones::new();
        self.degrees.clear();
    }
}

impl<T, C> FibonacciHeap<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    /// Creates an empty heap ordered by `compare`
    pub fn with_comparator(compare: C) -> Self {
        Self::with_config(compare, HeapConfig::default())
    }

    /// Creates an empty heap with explicit options
    pub fn with_config(compare: C, config: HeapConfig) -> Self {
        Self {
            arena: NodeArena::with_capacity(config.capacity()),
            compare,
            minimum: None,
            size: 0,
            roots: 0,
            milestones: Milestones::new(),
            degrees: SmallVec::new(),
            config,
        }
    }

    /// Inserts a value
    ///
    /// The new node joins the root list next to the minimum. When the size
    /// reaches the next Fibonacci milestone the heap consolidates before
    /// returning.
    pub fn insert(&mut self, value: T) {
        let node = self.arena.alloc(value);

        match self.minimum {
            Some(min) => {
                self.arena.splice_after(min, node);
                if self.is_less(node, min) {
                    self.minimum = Some(node);
                }
            }
            None => self.minimum = Some(node),
        }

        self.size += 1;
        self.roots += 1;

        if self.milestones.on_insert(self.size) {
            self.consolidate();
        }
    }

    /// Removes and returns the minimum element
    ///
    /// # Errors
    /// Returns [`HeapError::Empty`] if the heap holds no element; the heap is
    /// left untouched.
    pub fn remove_min(&mut self) -> Result<T, HeapError> {
        let old = self.minimum.ok_or(HeapError::Empty)?;
        self.roots -= 1;

        let child = self.arena[old].child.take();
        match child {
            Some(child) => {
                self.roots += self.arena[old].degree;
                self.arena[old].degree = 0;
                self.arena.for_each_in_ring_mut(child, |node| node.parent = None);
                self.arena.replace_with_ring(old, child);
                self.minimum = Some(child);
            }
            None => {
                self.minimum = self.arena.detach(old);
            }
        }

        if let Some(start) = self.minimum {
            let threshold = self.milestones.skip_threshold();
            if self.config.policy().skips(self.roots, threshold) {
                self.rescan_minimum(start);
            } else {
                self.consolidate();
            }
        }

        self.size -= 1;
        self.milestones.on_remove(self.size);

        let value = self
            .arena
            .free(old)
            .expect("minimum key refers to a live node");
        Ok(value)
    }

    /// Links roots of equal degree until every root degree is unique
    ///
    /// Leaves the minimum pointer on the smallest root. Runs automatically at
    /// insertion milestones and during removal; calling it explicitly moves
    /// that cost to a point of the caller's choosing, e.g. after a bulk load.
    pub fn consolidate(&mut self) {
        let Some(start) = self.minimum else {
            return;
        };
        let before = self.roots;

        let wanted = (self.milestones.index() + 1).max(DEGREE_INDEX_INLINE);
        if self.degrees.len() < wanted {
            self.degrees.resize(wanted, None);
        }

        let mut next = start;
        let mut survivor = start;
        for _ in 0..before {
            let mut current = next;
            next = self.arena[next].right;

            loop {
                let degree = self.arena[current].degree;
                if degree >= self.degrees.len() {
                    self.degrees.resize(degree + 1, None);
                }
                let Some(same) = self.degrees[degree].take() else {
                    self.degrees[degree] = Some(current);
                    break;
                };

                self.roots -= 1;
                // Ties keep the root found first as the parent
                if self.cmp_nodes(same, current) == Ordering::Greater {
                    self.link(current, same);
                } else {
                    self.link(same, current);
                    current = same;
                }
            }
            survivor = current;
        }

        self.degrees.fill(None);
        self.rescan_minimum(survivor);
        debug!("consolidated {} roots into {}", before, self.roots);
    }

    /// Moves every element of `other` into this heap
    ///
    /// `other`'s nodes are re-keyed into this heap's arena and its root list
    /// is concatenated with ours. No consolidation happens here; the
    /// milestones are recomputed for the combined size. Ordering follows this
    /// heap's comparator; `other`'s is dropped.
    pub fn merge(&mut self, other: Self) {
        let FibonacciHeap {
            arena,
            minimum,
            size,
            roots,
            ..
        } = other;
        let Some(other_min) = minimum else {
            return;
        };

        let remap = self.arena.absorb(arena);
        let other_min = remap[other_min];

        match self.minimum {
            Some(min) => {
                self.arena.splice_ring(min, other_min);
                if self.is_less(other_min, min) {
                    self.minimum = Some(other_min);
                }
            }
            None => self.minimum = Some(other_min),
        }

        self.size += size;
        self.roots += roots;
        self.milestones = Milestones::for_size(self.size);
    }

    /// Drains the heap in ascending order
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.size);
        while let Ok(value) = self.remove_min() {
            sorted.push(value);
        }
        sorted
    }

    /// Checks every structural invariant of the node graph
    ///
    /// Verifies that each root and child list is a closed ring with mutual
    /// `left`/`right` links, that `parent` and `degree` agree with the child
    /// rings, that heap order holds along every edge, that the minimum is the
    /// smallest root, and that `size` and `root_count` match the graph. The
    /// first violation found is logged at `warn` level.
    ///
    /// Walks the whole heap; meant for tests.
    pub fn verify_internal_structure(&self) -> bool {
        let limit = self.arena.len();
        let Some(min) = self.minimum else {
            if self.size != 0 || self.roots != 0 || limit != 0 {
                warn!(
                    "empty heap reports size {}, {} roots, {} nodes",
                    self.size, self.roots, limit
                );
                return false;
            }
            return true;
        };
        if !self.arena.contains(min) {
            warn!("minimum key is not live");
            return false;
        }

        let mut total = 0;
        let mut stack = vec![(min, None)];
        while let Some((head, parent)) = stack.pop() {
            let Some(members) = self.check_ring(head, parent, limit) else {
                return false;
            };

            match parent {
                Some(p) if self.arena[p].degree != members.len() => {
                    warn!(
                        "degree {} but {} children",
                        self.arena[p].degree,
                        members.len()
                    );
                    return false;
                }
                None if members.len() != self.roots => {
                    warn!(
                        "root count {} but root list holds {}",
                        self.roots,
                        members.len()
                    );
                    return false;
                }
                _ => {}
            }

            total += members.len();
            if total > limit {
                warn!("child links revisit nodes");
                return false;
            }
            for key in members {
                if let Some(child) = self.arena[key].child {
                    stack.push((child, Some(key)));
                }
            }
        }

        if total != self.size || total != limit {
            warn!(
                "size {} but {} reachable of {} stored nodes",
                self.size, total, limit
            );
            return false;
        }

        if self.arena.ring(min).any(|key| self.is_less(key, min)) {
            warn!("a root is smaller than the minimum");
            return false;
        }

        true
    }

    /// Validates one ring and returns its members
    fn check_ring(
        &self,
        head: NodeKey,
        parent: Option<NodeKey>,
        limit: usize,
    ) -> Option<Vec<NodeKey>> {
        let mut members = Vec::new();
        let mut cursor = head;
        loop {
            if !self.arena.contains(cursor) {
                warn!("ring refers to a freed node");
                return None;
            }
            if members.len() >= limit {
                warn!("ring does not close");
                return None;
            }

            let node = &self.arena[cursor];
            if !self.arena.contains(node.right) || self.arena[node.right].left != cursor {
                warn!("left/right links are not mutual");
                return None;
            }
            if node.parent != parent {
                warn!("parent link disagrees with the owning child list");
                return None;
            }
            if node.child.is_some() != (node.degree > 0) {
                warn!("degree {} with child {:?}", node.degree, node.child);
                return None;
            }
            if node.marked {
                warn!("node is marked");
                return None;
            }
            if let Some(p) = parent {
                if self.cmp_nodes(p, cursor) == Ordering::Greater {
                    warn!("child is smaller than its parent");
                    return None;
                }
            }

            members.push(cursor);
            cursor = node.right;
            if cursor == head {
                return Some(members);
            }
        }
    }

    /// Makes `child` a child of `parent`, taking it out of the root list
    fn link(&mut self, parent: NodeKey, child: NodeKey) {
        trace!("linking two degree-{} trees", self.arena[parent].degree);
        self.arena.detach(child);

        match self.arena[parent].child {
            Some(head) => self.arena.splice_after(head, child),
            None => self.arena[parent].child = Some(child),
        }

        let node = &mut self.arena[child];
        node.parent = Some(parent);
        node.marked = false;
        self.arena[parent].degree += 1;
    }

    /// Points `minimum` at the smallest root of the ring containing `start`
    fn rescan_minimum(&mut self, start: NodeKey) {
        let mut best = start;
        let mut cursor = self.arena[start].right;
        while cursor != start {
            if self.is_less(cursor, best) {
                best = cursor;
            }
            cursor = self.arena[cursor].right;
        }

        debug_assert_eq!(
            self.cmp_nodes(best, best),
            Ordering::Equal,
            "comparator is not reflexive"
        );
        self.minimum = Some(best);
    }

    fn cmp_nodes(&self, a: NodeKey, b: NodeKey) -> Ordering {
        (self.compare)(&self.arena[a].value, &self.arena[b].value)
    }

    fn is_less(&self, a: NodeKey, b: NodeKey) -> bool {
        self.cmp_nodes(a, b) == Ordering::Less
    }
}

impl<T: Ord> Heap<T> for FibonacciHeap<T> {
    fn new() -> Self {
        Self::with_comparator(T::cmp)
    }

    fn is_empty(&self) -> bool {
        self.minimum.is_none()
    }

    fn len(&self) -> usize {
        self.size
    }

    fn push(&mut self, value: T) {
        self.insert(value);
    }

    fn peek(&self) -> Option<&T> {
        self.minimum.map(|key| &self.arena[key].value)
    }

    fn pop(&mut self) -> Option<T> {
        self.remove_min().ok()
    }
}

impl<T: Ord> MergeableHeap<T> for FibonacciHeap<T> {
    fn merge(&mut self, other: Self) {
        FibonacciHeap::merge(self, other);
    }
}

impl<T: Ord> Default for FibonacciHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> Extend<T> for FibonacciHeap<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord> FromIterator<T> for FibonacciHeap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut heap = Self::new();
        heap.extend(iter);
        heap
    }
}

impl<T: fmt::Debug, C> fmt::Debug for FibonacciHeap<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FibonacciHeap")
            .field("size", &self.size)
            .field("roots", &self.roots)
            .field("minimum", &self.peek())
            .finish()
    }
}
