//! MCTS search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Statistics collected during one call to `choose_move`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Playouts that completed.
    pub playouts: u32,

    /// Nodes allocated for newly expanded edges.
    pub nodes_expanded: u32,

    /// Edges resolved as immediate wins or draws.
    pub terminal_edges: u32,

    /// Whether the batch stopped early because the arena filled up.
    pub aborted: bool,

    /// Total time spent searching (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Calculate playouts per second.
    #[must_use]
    pub fn playouts_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            f64::from(self.playouts) / (self.time_us as f64 / 1_000_000.0)
        }
    }
}
