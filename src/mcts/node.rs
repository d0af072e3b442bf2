//! MCTS node and child-reference structures.
//!
//! A node stores one slot per column. Each slot holds a [`Child`] reference
//! plus the visit count and accumulated score of the move into that column.

use crate::core::{PlayerId, WIDTH};
use crate::rules::GameResult;

/// Index into the node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Create a new node ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw index value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// What lies behind a column of a node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Child {
    /// Column not expanded yet.
    #[default]
    Empty,
    /// Expanded into a real node.
    Node(NodeId),
    /// The move ends the game with a win for this player.
    Win(PlayerId),
    /// The move fills the board with no winner.
    Draw,
}

impl Child {
    /// Check if the column has been expanded.
    #[inline]
    #[must_use]
    pub const fn is_expanded(self) -> bool {
        !matches!(self, Child::Empty)
    }

    /// Node index, if this is a real node.
    #[inline]
    #[must_use]
    pub const fn node(self) -> Option<NodeId> {
        match self {
            Child::Node(id) => Some(id),
            _ => None,
        }
    }

    /// The game result stored in a terminal child.
    #[must_use]
    pub const fn terminal(self) -> Option<GameResult> {
        match self {
            Child::Win(player) => Some(GameResult::Winner(player)),
            Child::Draw => Some(GameResult::Draw),
            Child::Empty | Child::Node(_) => None,
        }
    }

    /// Terminal child recording `result`.
    #[must_use]
    pub const fn from_result(result: GameResult) -> Self {
        match result {
            GameResult::Winner(player) => Child::Win(player),
            GameResult::Draw => Child::Draw,
        }
    }
}

/// A decision point in the search tree.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Node {
    /// Child reference per column.
    ///
    /// While the node is on the free list, column 0 links to the next free
    /// node.
    pub children: [Child; WIDTH],

    /// Visit count per column.
    pub visits: [u32; WIDTH],

    /// Accumulated score per column.
    pub scores: [f32; WIDTH],
}

impl Node {
    /// Reset every column to its unexplored state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Sum of visits over all columns.
    #[must_use]
    pub fn total_visits(&self) -> u32 {
        self.visits.iter().sum()
    }

    /// Mean score of a column, 0 if unvisited.
    #[must_use]
    pub fn mean_score(&self, column: usize) -> f64 {
        if self.visits[column] == 0 {
            0.0
        } else {
            f64::from(self.scores[column]) / f64::from(self.visits[column])
        }
    }

    /// Columns that have not been expanded.
    pub fn unexpanded(&self) -> impl Iterator<Item = usize> + '_ {
        self.children
            .iter()
            .enumerate()
            .filter(|(_, child)| !child.is_expanded())
            .map(|(column, _)| column)
    }

    /// Real child nodes of this node.
    pub fn child_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.children.iter().filter_map(|child| child.node())
    }
}
