//! Heap configuration

/// How `remove_min` restores the minimum pointer
///
/// Consolidation only bounds amortized cost; every policy returns elements in
/// the same order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsolidationPolicy {
    /// Always run the full degree-merge pass
    Always,
    /// Rescan the root list instead of merging while it holds at most this
    /// many roots
    FixedThreshold(usize),
    /// Like `FixedThreshold`, with the bound looked up per milestone in
    /// [`SKIP_CONSOLIDATION`](crate::schedule::SKIP_CONSOLIDATION)
    #[default]
    FibonacciTable,
}

impl ConsolidationPolicy {
    /// Whether a removal leaving `roots` roots may skip the merge pass
    pub(crate) fn skips(&self, roots: usize, table_threshold: usize) -> bool {
        match *self {
            ConsolidationPolicy::Always => false,
            ConsolidationPolicy::FixedThreshold(limit) => roots <= limit,
            ConsolidationPolicy::FibonacciTable => roots <= table_threshold,
        }
    }
}

/// Construction-time options of a [`FibonacciHeap`](crate::fibonacci::FibonacciHeap)
///
/// # Example
///
/// ```rust
/// use lazy_fibonacci_heap::config::{ConsolidationPolicy, HeapConfig};
///
/// let config = HeapConfig::new()
///     .with_policy(ConsolidationPolicy::Always)
///     .with_capacity(1024);
/// assert_eq!(config.policy(), ConsolidationPolicy::Always);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeapConfig {
    policy: ConsolidationPolicy,
    capacity: usize,
}

impl HeapConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the removal-time consolidation policy
    pub fn with_policy(mut self, policy: ConsolidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Pre-allocates room for `capacity` nodes
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn policy(&self) -> ConsolidationPolicy {
        self.policy
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
