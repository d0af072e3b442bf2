//! # connect4-mcts
//!
//! A Monte Carlo Tree Search engine for connect-four (7 columns x 6 rows,
//! gravity drops, four in a row wins).
//!
//! ## Design Principles
//!
//! 1. **Bitboards**: A position is two 64-bit occupancy masks. Win checks
//!    test the precomputed lines through the last disc.
//!
//! 2. **Fixed Memory**: The search tree lives in a node arena sized once
//!    from a byte budget. Running out of nodes ends a search early, it never
//!    fails.
//!
//! 3. **Tree Reuse**: Committing a real move keeps the statistics of the
//!    played branch and releases the rest.
//!
//! 4. **Explicit State**: The line table is shared read-only; the random
//!    stream is owned by each search, so seeded searches are repeatable.
//!
//! ## Modules
//!
//! - `core`: Players, bitboard positions, random stream
//! - `rules`: Move legality, landing cells, win/draw detection
//! - `mcts`: Node arena, search tree, playout algorithm
//! - `error`: Setup errors and the arena exhaustion signal

pub mod core;
pub mod error;
pub mod mcts;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{Board, GameRng, PlayerId, PlayerPair, CELLS, HEIGHT, WIDTH};

pub use crate::error::{ArenaExhausted, SearchError};

pub use crate::rules::{
    check_outcome, drop_position, is_valid_move, CheckResult, GameResult, LineTable,
};

pub use crate::mcts::{
    Child, MCTSSearch, Node, NodeArena, NodeId, SearchConfig, SearchStats, SearchTree, TreeStats,
};
