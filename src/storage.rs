//! Arena storage for heap nodes
//!
//! Every node of a [`FibonacciHeap`](crate::fibonacci::FibonacciHeap) lives in a
//! [`NodeArena`], a thin wrapper around a `slotmap::SlotMap`. Links between
//! nodes (`left`, `right`, `child`, `parent`) are [`NodeKey`]s rather than
//! pointers, so the circular sibling lists and parent back-references never form
//! ownership cycles:
//!
//! - The arena is the only owner of node memory
//! - Keys are generational: a key to a freed node never aliases a later node
//! - `parent` is a plain key and therefore weak by construction
//!
//! The arena also provides the list primitives the heap is built from. All of
//! them are O(1) except ring traversal and [`NodeArena::absorb`].

use std::ops::{Index, IndexMut};

use slotmap::{new_key_type, SecondaryMap, SlotMap};

new_key_type! {
    /// Key of a node stored in a [`NodeArena`]
    pub struct NodeKey;
}

/// One tree node
///
/// `left`/`right` form a circular doubly-linked list with the node's siblings
/// (or with the other roots). A node alone in its list points to itself.
#[derive(Debug, Clone)]
pub(crate) struct HeapNode<T> {
    pub(crate) value: T,
    /// Number of nodes in the `child` ring
    pub(crate) degree: usize,
    /// Cascading-cut flag. Nothing sets it; `link` clears it.
    pub(crate) marked: bool,
    pub(crate) parent: Option<NodeKey>,
    pub(crate) child: Option<NodeKey>,
    pub(crate) left: NodeKey,
    pub(crate) right: NodeKey,
}

/// Slotmap-backed node storage with circular-list primitives
#[derive(Debug, Clone)]
pub(crate) struct NodeArena<T> {
    nodes: SlotMap<NodeKey, HeapNode<T>>,
}

impl<T> NodeArena<T> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotMap::with_capacity_and_key(capacity),
        }
    }

    /// Number of live nodes
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Allocates a self-linked singleton node holding `value`
    pub(crate) fn alloc(&mut self, value: T) -> NodeKey {
        self.nodes.insert_with_key(|key| HeapNode {
            value,
            degree: 0,
            marked: false,
            parent: None,
            child: None,
            left: key,
            right: key,
        })
    }

    /// Frees a node and hands back its value
    ///
    /// The caller must have unlinked the node from every list first. The key
    /// is stale afterwards.
    pub(crate) fn free(&mut self, key: NodeKey) -> Option<T> {
        self.nodes.remove(key).map(|node| node.value)
    }

    /// Inserts `node` immediately to the right of `anchor` in `anchor`'s ring
    ///
    /// `node` must be a self-linked singleton.
    pub(crate) fn splice_after(&mut self, anchor: NodeKey, node: NodeKey) {
        let right = self.nodes[anchor].right;
        {
            let n = &mut self.nodes[node];
            n.left = anchor;
            n.right = right;
        }
        self.nodes[right].left = node;
        self.nodes[anchor].right = node;
    }

    /// Removes `node` from whatever ring contains it
    ///
    /// The node is left as a self-linked singleton. Returns its former right
    /// neighbour, or `None` if it was alone (the ring is now empty).
    pub(crate) fn detach(&mut self, node: NodeKey) -> Option<NodeKey> {
        let (left, right) = {
            let n = &self.nodes[node];
            (n.left, n.right)
        };
        if right == node {
            return None;
        }

        self.nodes[left].right = right;
        self.nodes[right].left = left;

        let n = &mut self.nodes[node];
        n.left = node;
        n.right = node;
        Some(right)
    }

    /// Concatenates the whole ring containing `head` right after `anchor`
    ///
    /// The two rings must be distinct.
    pub(crate) fn splice_ring(&mut self, anchor: NodeKey, head: NodeKey) {
        let anchor_right = self.nodes[anchor].right;
        let tail = self.nodes[head].left;

        self.nodes[anchor].right = head;
        self.nodes[head].left = anchor;
        self.nodes[tail].right = anchor_right;
        self.nodes[anchor_right].left = tail;
    }

    /// Puts the ring containing `head` where `node` was in its own ring
    ///
    /// If `node` was alone, the `head` ring simply stands on its own. Either
    /// way `node` ends up self-linked.
    pub(crate) fn replace_with_ring(&mut self, node: NodeKey, head: NodeKey) {
        let (left, right) = {
            let n = &self.nodes[node];
            (n.left, n.right)
        };

        if right != node {
            let tail = self.nodes[head].left;
            self.nodes[left].right = head;
            self.nodes[head].left = left;
            self.nodes[tail].right = right;
            self.nodes[right].left = tail;
        }

        let n = &mut self.nodes[node];
        n.left = node;
        n.right = node;
    }

    /// Applies `f` to every node of the ring starting at `start`
    pub(crate) fn for_each_in_ring_mut(
        &mut self,
        start: NodeKey,
        mut f: impl FnMut(&mut HeapNode<T>),
    ) {
        let mut cursor = start;
        loop {
            let node = &mut self.nodes[cursor];
            f(node);
            cursor = node.right;
            if cursor == start {
                break;
            }
        }
    }

    /// Iterates the keys of the ring containing `start`, beginning at `start`
    pub(crate) fn ring(&self, start: NodeKey) -> Ring<'_, T> {
        Ring {
            arena: self,
            start,
            next: Some(start),
        }
    }

    /// Moves every node of `other` into this arena
    ///
    /// All links of the moved nodes are rewritten to the new keys. Returns the
    /// old-to-new key mapping so the caller can translate its own entry points.
    pub(crate) fn absorb(&mut self, other: NodeArena<T>) -> SecondaryMap<NodeKey, NodeKey> {
        let mut remap = SecondaryMap::with_capacity(other.len());
        let mut moved = Vec::with_capacity(other.len());

        for (old_key, node) in other.nodes {
            let new_key = self.nodes.insert(node);
            remap.insert(old_key, new_key);
            moved.push(new_key);
        }

        for key in moved {
            let node = &mut self.nodes[key];
            node.left = remap[node.left];
            node.right = remap[node.right];
            node.parent = node.parent.map(|p| remap[p]);
            node.child = node.child.map(|c| remap[c]);
        }

        remap
    }
}

impl<T> Index<NodeKey> for NodeArena<T> {
    type Output = HeapNode<T>;

    fn index(&self, key: NodeKey) -> &HeapNode<T> {
        &self.nodes[key]
    }
}

impl<T> IndexMut<NodeKey> for NodeArena<T> {
    fn index_mut(&mut self, key: NodeKey) -> &mut HeapNode<T> {
        &mut self.nodes[key]
    }
}

/// Iterator over one circular list, see [`NodeArena::ring`]
pub(crate) struct Ring<'a, T> {
    arena: &'a NodeArena<T>,
    start: NodeKey,
    next: Option<NodeKey>,
}

impl<T> Iterator for Ring<'_, T> {
    type Item = NodeKey;

    fn next(&mut self) -> Option<NodeKey> {
        let current = self.next?;
        let right = self.arena.nodes[current].right;
        self.next = if right == self.start {
            None
        } else {
            Some(right)
        };
        Some(current)
    }
}
