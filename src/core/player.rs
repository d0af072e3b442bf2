//! Player identification for the two sides of a game.
//!
//! ## PlayerId
//!
//! Type-safe identifier for one of the two players. The first player to move
//! on an empty board is `PlayerId::FIRST`.
//!
//! ## PlayerPair
//!
//! Fixed two-slot storage indexed by `PlayerId`, used for per-player
//! occupancy masks.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Identifier for one of the two players.
///
/// Player indices are 0-based: the first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(u8);

impl PlayerId {
    /// The player that moves first on an empty board.
    pub const FIRST: PlayerId = PlayerId(0);

    /// The player that moves second.
    pub const SECOND: PlayerId = PlayerId(1);

    /// Create a player ID from a raw index.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not 0 or 1.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        assert!(id < 2, "Only two players are supported");
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other player.
    ///
    /// ```
    /// use connect4_mcts::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::FIRST.opponent(), PlayerId::SECOND);
    /// assert_eq!(PlayerId::SECOND.opponent(), PlayerId::FIRST);
    /// ```
    #[inline]
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self(self.0 ^ 1)
    }

    /// Iterate over both player IDs.
    pub fn all() -> impl Iterator<Item = PlayerId> {
        [Self::FIRST, Self::SECOND].into_iter()
    }

    /// Disc symbol used when printing a board.
    #[must_use]
    pub const fn symbol(self) -> char {
        if self.0 == 0 {
            'O'
        } else {
            'X'
        }
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data with one slot for each side.
///
/// ## Example
///
/// ```
/// use connect4_mcts::core::{PlayerId, PlayerPair};
///
/// let mut stones: PlayerPair<u64> = PlayerPair::default();
/// stones[PlayerId::SECOND] |= 1 << 3;
/// assert_eq!(stones[PlayerId::FIRST], 0);
/// assert_eq!(stones[PlayerId::SECOND], 8);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerPair<T> {
    data: [T; 2],
}

impl<T> PlayerPair<T> {
    /// Create a pair from the first and second player's values.
    pub const fn new(first: T, second: T) -> Self {
        Self {
            data: [first, second],
        }
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::all().zip(self.data.iter())
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        PlayerId::all().zip(self.data.iter_mut())
    }
}

impl<T> Index<PlayerId> for PlayerPair<T> {
    type Output = T;

    #[inline]
    fn index(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerPair<T> {
    #[inline]
    fn index_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }
}
