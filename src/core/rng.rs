//! Two-stage random stream for search.
//!
//! ## Stages
//!
//! - **Seed expander**: SplitMix64 turns a coarse seed word (wall-clock time
//!   in production) into two well-mixed 64-bit words.
//! - **Generator**: xoroshiro128+ takes those two words as its state and
//!   produces every draw made during search (untried-column choice, UCB
//!   tie-breaks, rollout moves).
//!
//! ## Usage
//!
//! ```
//! use connect4_mcts::core::GameRng;
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//!
//! // Same seed, same stream
//! assert_eq!(a.choose_index(7), b.choose_index(7));
//! ```

use rand::{Rng, RngCore, SeedableRng};
use rand_xoshiro::{SplitMix64, Xoroshiro128Plus};

/// Deterministic RNG used by the search.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: Xoroshiro128Plus,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG from a seed word.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        let [s0, s1] = expand_seed(seed);
        let mut state = [0u8; 16];
        state[..8].copy_from_slice(&s0.to_le_bytes());
        state[8..].copy_from_slice(&s1.to_le_bytes());

        Self {
            inner: Xoroshiro128Plus::from_seed(state),
            seed,
        }
    }

    /// Create an RNG seeded from the current wall-clock time in seconds.
    #[must_use]
    pub fn from_time() -> Self {
        Self::new(wall_clock_seed())
    }

    /// The seed word this RNG was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform index in `0..len`.
    ///
    /// # Panics
    ///
    /// Panics if `len` is zero.
    #[inline]
    pub fn choose_index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }

    /// Choose a random element from a slice.
    ///
    /// A single-element slice is answered without consuming a draw.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        match slice.len() {
            0 => None,
            1 => slice.first(),
            len => slice.get(self.choose_index(len)),
        }
    }

    /// Raw 64-bit output.
    pub fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }
}

/// Expand a seed word into the generator's two state words.
#[must_use]
pub fn expand_seed(seed: u64) -> [u64; 2] {
    let mut expander = SplitMix64::seed_from_u64(seed);
    [expander.next_u64(), expander.next_u64()]
}

/// Seconds since the Unix epoch, used when no seed is configured.
#[must_use]
pub fn wall_clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs())
}
