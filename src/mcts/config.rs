//! MCTS configuration parameters.

use serde::{Deserialize, Serialize};

use crate::core::rng::wall_clock_seed;

/// Default arena budget: 16 MiB.
pub const DEFAULT_ARENA_BYTES: usize = 16 * 1024 * 1024;

/// Default number of playouts per decision.
pub const DEFAULT_PLAYOUTS: u32 = 100_000;

/// MCTS configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Byte budget for the search handle and its node arena.
    /// The arena holds as many nodes as fit after the handle's header.
    pub arena_bytes: usize,

    /// Maximum playouts per call to `choose_move`.
    /// A search may stop earlier if the arena fills up.
    pub playouts: u32,

    /// Random seed for the search stream.
    /// `None` seeds from wall-clock time; a fixed seed makes searches
    /// repeatable.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            arena_bytes: DEFAULT_ARENA_BYTES,
            playouts: DEFAULT_PLAYOUTS,
            seed: None,
        }
    }
}

impl SearchConfig {
    /// Create a new config with a custom arena budget.
    pub fn with_arena_bytes(mut self, bytes: usize) -> Self {
        self.arena_bytes = bytes;
        self
    }

    /// Create a new config with a custom playout count.
    pub fn with_playouts(mut self, playouts: u32) -> Self {
        self.playouts = playouts;
        self
    }

    /// Create a new config with a fixed seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The seed to use: the configured one, or the current time.
    #[must_use]
    pub fn resolved_seed(&self) -> u64 {
        self.seed.unwrap_or_else(wall_clock_seed)
    }
}
