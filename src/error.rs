//! Error types.

use thiserror::Error;

/// Failures when setting up a search.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The byte budget cannot hold the header plus a single node.
    #[error("arena budget of {budget} bytes is too small; at least {required} bytes are needed")]
    BudgetTooSmall {
        /// Bytes offered.
        budget: usize,
        /// Bytes needed for the header and one node.
        required: usize,
    },

    /// An arena was requested with room for no nodes.
    #[error("arena capacity must be at least one node")]
    ZeroCapacity,
}

/// The node arena ran out of free nodes during a playout.
///
/// Recovered inside the search: the current batch of playouts stops and
/// the statistics gathered so far are used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("node arena exhausted")]
pub struct ArenaExhausted;
