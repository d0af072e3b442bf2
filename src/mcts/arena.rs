//! Fixed-capacity node arena.
//!
//! Nodes live in a flat `Vec<Node>` sized once at construction and are
//! referenced by `NodeId` indices. Free nodes form a singly-linked list
//! threaded through their column-0 child slot, so allocation and release
//! never touch the system allocator.

use std::mem::size_of;

use crate::error::SearchError;

use super::node::{Child, Node, NodeId};

/// Index values at the top of the `u32` range that are never handed out.
///
/// Keeps node indices distinguishable from integer encodings of the four
/// child sentinels.
pub const RESERVED_INDICES: usize = 4;

/// Largest supported capacity.
pub const MAX_CAPACITY: usize = u32::MAX as usize - (RESERVED_INDICES - 1);

/// Pool of search nodes with a free list.
#[derive(Clone, Debug)]
pub struct NodeArena {
    /// Backing storage, allocated in full up front.
    nodes: Vec<Node>,

    /// Head of the free list.
    free: Option<NodeId>,

    /// Number of nodes currently handed out.
    allocated: usize,
}

impl NodeArena {
    /// Create an arena holding `capacity` nodes, all free.
    pub fn with_capacity(capacity: usize) -> Result<Self, SearchError> {
        if capacity == 0 {
            return Err(SearchError::ZeroCapacity);
        }
        let capacity = capacity.min(MAX_CAPACITY);

        let mut nodes = vec![Node::default(); capacity];
        for (i, node) in nodes.iter_mut().enumerate().take(capacity - 1) {
            node.children[0] = Child::Node(NodeId::new((i + 1) as u32));
        }

        Ok(Self {
            nodes,
            free: Some(NodeId::new(0)),
            allocated: 0,
        })
    }

    /// Number of nodes that fit in `budget_bytes` after `header_bytes`.
    ///
    /// `capacity = (budget_bytes - header_bytes) / size_of::<Node>()`.
    #[must_use]
    pub const fn capacity_for_budget(budget_bytes: usize, header_bytes: usize) -> usize {
        budget_bytes.saturating_sub(header_bytes) / size_of::<Node>()
    }

    /// Create an arena sized to a byte budget.
    pub fn from_budget(budget_bytes: usize, header_bytes: usize) -> Result<Self, SearchError> {
        match Self::capacity_for_budget(budget_bytes, header_bytes) {
            0 => Err(SearchError::BudgetTooSmall {
                budget: budget_bytes,
                required: header_bytes + size_of::<Node>(),
            }),
            capacity => Self::with_capacity(capacity),
        }
    }

    /// Take a node off the free list, reset to its unexplored state.
    ///
    /// Returns `None` when every node is in use.
    pub fn allocate(&mut self) -> Option<NodeId> {
        let id = self.free?;
        let node = &mut self.nodes[id.index()];
        self.free = node.children[0].node();
        node.reset();
        self.allocated += 1;
        Some(id)
    }

    /// Return a subtree to the free list.
    ///
    /// Every node reachable from `child` is released. Terminal and empty
    /// children own no nodes and are ignored. Releasing a node that is
    /// already free corrupts the free list.
    pub fn release(&mut self, child: Child) {
        let Some(root) = child.node() else {
            return;
        };

        let mut pending = vec![root];
        while let Some(id) = pending.pop() {
            let node = &mut self.nodes[id.index()];
            pending.extend(node.child_nodes());
            node.children[0] = self.free.map_or(Child::Empty, Child::Node);
            self.free = Some(id);
            self.allocated -= 1;
        }
    }

    /// Get a node by ID.
    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Get a mutable node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// Total number of nodes.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.nodes.len()
    }

    /// Number of nodes in use.
    #[must_use]
    pub fn allocated(&self) -> usize {
        self.allocated
    }

    /// Number of free nodes.
    #[must_use]
    pub fn available(&self) -> usize {
        self.capacity() - self.allocated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_capacity_rejected() {
        assert_eq!(NodeArena::with_capacity(0).unwrap_err(), SearchError::ZeroCapacity);
    }

    #[test]
    fn test_allocates_in_index_order() {
        let mut arena = NodeArena::with_capacity(3).unwrap();

        assert_eq!(arena.allocate(), Some(NodeId::new(0)));
        assert_eq!(arena.allocate(), Some(NodeId::new(1)));
        assert_eq!(arena.allocate(), Some(NodeId::new(2)));
        assert_eq!(arena.allocated(), 3);
        assert_eq!(arena.available(), 0);
    }

    #[test]
    fn test_exhaustion_returns_none() {
        let mut arena = NodeArena::with_capacity(4).unwrap();
        for _ in 0..4 {
            assert!(arena.allocate().is_some());
        }
        assert_eq!(arena.allocate(), None);
        assert_eq!(arena.allocate(), None);
    }

    #[test]
    fn test_allocation_resets_node() {
        let mut arena = NodeArena::with_capacity(2).unwrap();
        let id = arena.allocate().unwrap();
        arena.get_mut(id).visits[3] = 7;
        arena.get_mut(id).scores[3] = 2.5;
        arena.release(Child::Node(id));

        let again = arena.allocate().unwrap();
        assert_eq!(again, id);
        assert_eq!(arena.get(again), &Node::default());
    }

    #[test]
    fn test_release_subtree() {
        let mut arena = NodeArena::with_capacity(5).unwrap();
        let root = arena.allocate().unwrap();
        let a = arena.allocate().unwrap();
        let b = arena.allocate().unwrap();
        let c = arena.allocate().unwrap();
        arena.get_mut(root).children[0] = Child::Node(a);
        arena.get_mut(root).children[6] = Child::Node(b);
        arena.get_mut(root).children[3] = Child::Draw;
        arena.get_mut(b).children[2] = Child::Node(c);
        arena.get_mut(b).children[5] = Child::Win(crate::core::PlayerId::SECOND);
        assert_eq!(arena.available(), 1);

        arena.release(Child::Node(root));

        assert_eq!(arena.allocated(), 0);
        assert_eq!(arena.available(), 5);
        let mut ids: Vec<_> = (0..5).map_while(|_| arena.allocate()).collect();
        ids.sort();
        assert_eq!(ids.len(), 5);
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn test_release_sentinels_is_noop() {
        let mut arena = NodeArena::with_capacity(2).unwrap();
        let _ = arena.allocate();
        arena.release(Child::Empty);
        arena.release(Child::Draw);
        arena.release(Child::Win(crate::core::PlayerId::FIRST));
        assert_eq!(arena.allocated(), 1);
    }

    #[test]
    fn test_budget_conversion() {
        let node = size_of::<Node>();
        assert_eq!(NodeArena::capacity_for_budget(100 + 3 * node, 100), 3);
        assert_eq!(NodeArena::capacity_for_budget(100 + 3 * node + node - 1, 100), 3);
        assert_eq!(NodeArena::capacity_for_budget(50, 100), 0);

        let arena = NodeArena::from_budget(64 + 10 * node, 64).unwrap();
        assert_eq!(arena.capacity(), 10);
    }

    #[test]
    fn test_budget_too_small() {
        let node = size_of::<Node>();
        let err = NodeArena::from_budget(64 + node - 1, 64).unwrap_err();
        assert_eq!(
            err,
            SearchError::BudgetTooSmall {
                budget: 64 + node - 1,
                required: 64 + node,
            }
        );
    }
}
