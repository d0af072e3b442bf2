//! Search tree with reuse across real moves.
//!
//! The tree mirrors the real game at its root: the board, the side to move,
//! and the node whose statistics describe that position. When a move is
//! played the subtree behind it becomes the new root and its siblings go
//! back to the arena.

use tracing::trace;

use crate::core::{Board, PlayerId};
use crate::error::SearchError;
use crate::rules::{drop_position, is_valid_move};

use super::arena::NodeArena;
use super::node::{Child, Node, NodeId};

/// Arena-backed MCTS tree rooted at the current game position.
#[derive(Clone, Debug)]
pub struct SearchTree {
    /// Owner of every node in the tree.
    arena: NodeArena,

    /// Node describing the current position.
    root: NodeId,

    /// Position at the root.
    board: Board,

    /// Player to move at the root.
    turn: PlayerId,
}

impl SearchTree {
    /// Create a tree for an empty board, allocating the root from `arena`.
    pub fn new(mut arena: NodeArena) -> Result<Self, SearchError> {
        let root = arena.allocate().ok_or(SearchError::ZeroCapacity)?;
        Ok(Self {
            arena,
            root,
            board: Board::new(),
            turn: PlayerId::FIRST,
        })
    }

    /// Get the root node ID.
    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get the root node.
    #[must_use]
    pub fn root_node(&self) -> &Node {
        self.arena.get(self.root)
    }

    /// Position at the root.
    #[inline]
    #[must_use]
    pub fn board(&self) -> Board {
        self.board
    }

    /// Player to move at the root.
    #[inline]
    #[must_use]
    pub fn turn(&self) -> PlayerId {
        self.turn
    }

    /// The node arena.
    #[must_use]
    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    pub(crate) fn arena_mut(&mut self) -> &mut NodeArena {
        &mut self.arena
    }

    /// Get a node by ID.
    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &Node {
        self.arena.get(id)
    }

    /// Commit a real move by the player to move.
    ///
    /// The subtree behind `column` becomes the new root with its statistics
    /// intact. Every sibling subtree and the old root node are released. If
    /// the column was never expanded, or it ends the game, a fresh root is
    /// allocated.
    ///
    /// # Panics
    ///
    /// Panics if `column` is not a legal move at the root.
    pub fn advance(&mut self, column: usize) {
        let occupied = self.board.occupied();
        assert!(
            is_valid_move(occupied, column),
            "illegal move: column {column} is not playable"
        );

        let position = drop_position(occupied, column);
        self.board.place(self.turn, position);
        self.turn = self.turn.opponent();

        let old_root = self.root;
        let next = std::mem::take(&mut self.arena.get_mut(old_root).children[column]);
        self.arena.release(Child::Node(old_root));

        self.root = match next {
            Child::Node(id) => id,
            // The old root was just released, so the free list is not empty.
            _ => self
                .arena
                .allocate()
                .expect("releasing the old root frees at least one node"),
        };

        trace!(
            column,
            position,
            reused = next.node().is_some(),
            allocated = self.arena.allocated(),
            "advanced root"
        );
    }

    /// Get statistics about the tree.
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        let root = self.root_node();
        TreeStats {
            capacity: self.arena.capacity(),
            allocated: self.arena.allocated(),
            root_visits: root.total_visits(),
            root_expanded: root.children.iter().filter(|c| c.is_expanded()).count(),
        }
    }
}

/// Statistics about the MCTS tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Nodes the arena can hold.
    pub capacity: usize,

    /// Nodes currently in the tree.
    pub allocated: usize,

    /// Visits summed over the root's columns.
    pub root_visits: u32,

    /// Root columns with a child or terminal result.
    pub root_expanded: usize,
}

impl TreeStats {
    /// Fraction of the arena in use.
    #[must_use]
    pub fn occupancy(&self) -> f64 {
        if self.capacity == 0 {
            0.0
        } else {
            self.allocated as f64 / self.capacity as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{bit, cell};

    fn tree(capacity: usize) -> SearchTree {
        SearchTree::new(NodeArena::with_capacity(capacity).unwrap()).unwrap()
    }

    #[test]
    fn test_tree_new() {
        let tree = tree(8);

        assert_eq!(tree.board(), Board::new());
        assert_eq!(tree.turn(), PlayerId::FIRST);
        assert_eq!(tree.arena().allocated(), 1);
        assert_eq!(tree.root_node(), &Node::default());
    }

    #[test]
    fn test_advance_applies_move_and_flips_turn() {
        let mut tree = tree(8);

        tree.advance(3);
        assert_eq!(tree.board().stones(PlayerId::FIRST), bit(cell(3, 0)));
        assert_eq!(tree.turn(), PlayerId::SECOND);

        tree.advance(3);
        assert_eq!(tree.board().stones(PlayerId::SECOND), bit(cell(3, 1)));
        assert_eq!(tree.turn(), PlayerId::FIRST);
    }

    #[test]
    fn test_advance_unexplored_allocates_fresh_root() {
        let mut tree = tree(8);
        tree.advance(0);
        assert_eq!(tree.arena().allocated(), 1);
        assert_eq!(tree.root_node(), &Node::default());
    }

    #[test]
    fn test_advance_reuses_played_subtree() {
        let mut tree = tree(8);
        let root = tree.root();
        let kept = tree.arena_mut().allocate().unwrap();
        let dropped = tree.arena_mut().allocate().unwrap();
        let grandchild = tree.arena_mut().allocate().unwrap();
        {
            let arena = tree.arena_mut();
            arena.get_mut(root).children[2] = Child::Node(kept);
            arena.get_mut(root).visits[2] = 5;
            arena.get_mut(root).children[4] = Child::Node(dropped);
            arena.get_mut(root).visits[4] = 3;
            arena.get_mut(dropped).children[1] = Child::Node(grandchild);
            arena.get_mut(kept).visits[6] = 4;
            arena.get_mut(kept).scores[6] = 2.0;
        }
        let before = tree.get(kept).clone();
        assert_eq!(tree.arena().allocated(), 4);

        tree.advance(2);

        assert_eq!(tree.root(), kept);
        assert_eq!(tree.root_node(), &before);
        assert_eq!(tree.arena().allocated(), 1);
    }

    #[test]
    fn test_advance_onto_terminal_child() {
        let mut tree = tree(4);
        let root = tree.root();
        tree.arena_mut().get_mut(root).children[5] = Child::Win(PlayerId::FIRST);

        tree.advance(5);

        assert_eq!(tree.arena().allocated(), 1);
        assert_eq!(tree.root_node(), &Node::default());
    }

    #[test]
    fn test_advance_with_single_node_arena() {
        let mut tree = tree(1);
        for column in [0, 1, 2, 3] {
            tree.advance(column);
            assert_eq!(tree.arena().allocated(), 1);
        }
    }

    #[test]
    #[should_panic(expected = "illegal move")]
    fn test_advance_full_column_panics() {
        let mut tree = tree(4);
        for _ in 0..7 {
            tree.advance(0);
        }
    }

    #[test]
    #[should_panic(expected = "illegal move")]
    fn test_advance_off_board_panics() {
        let mut tree = tree(4);
        tree.advance(7);
    }

    #[test]
    fn test_tree_stats() {
        let mut tree = tree(10);
        let root = tree.root();
        let child = tree.arena_mut().allocate().unwrap();
        tree.arena_mut().get_mut(root).children[0] = Child::Node(child);
        tree.arena_mut().get_mut(root).visits[0] = 3;
        tree.arena_mut().get_mut(root).children[1] = Child::Draw;
        tree.arena_mut().get_mut(root).visits[1] = 1;

        let stats = tree.stats();

        assert_eq!(stats.capacity, 10);
        assert_eq!(stats.allocated, 2);
        assert_eq!(stats.root_visits, 4);
        assert_eq!(stats.root_expanded, 2);
        assert_eq!(stats.occupancy(), 0.2);
    }
}
