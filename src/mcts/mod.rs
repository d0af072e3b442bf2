//! Monte Carlo Tree Search for connect-four.
//!
//! ## Overview
//!
//! - **Node arena**: fixed pool of nodes with a free list; exhaustion stops
//!   the current batch of playouts instead of failing
//! - **Tree reuse**: after a real move, the played subtree keeps its
//!   statistics and becomes the new root
//! - **UCB1 selection** with uniform tie-breaks, single random rollout per
//!   expansion
//! - **Deterministic**: a fixed seed reproduces a search exactly
//!
//! ## Usage
//!
//! ```rust
//! use connect4_mcts::mcts::{MCTSSearch, SearchConfig};
//!
//! let config = SearchConfig::default()
//!     .with_arena_bytes(1 << 20)
//!     .with_seed(42);
//! let mut search = MCTSSearch::new(config).unwrap();
//!
//! // Run 1000 playouts and play the chosen column.
//! if let Some(column) = search.choose_move(1000) {
//!     search.advance(column);
//! }
//!
//! // The opponent's reply is committed the same way.
//! search.advance(3);
//! ```

pub mod arena;
pub mod config;
pub mod node;
pub mod policy;
pub mod search;
pub mod stats;
pub mod tree;

// Re-export main types
pub use arena::NodeArena;
pub use config::SearchConfig;
pub use node::{Child, Node, NodeId};
pub use policy::{BACKUP_DRAW_SCORE, DRAW_SCORE, EXPLORATION, ROLLOUT_DRAW_SCORE, WIN_SCORE};
pub use search::MCTSSearch;
pub use stats::SearchStats;
pub use tree::{SearchTree, TreeStats};
