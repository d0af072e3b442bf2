//! Rules oracle: move legality, landing cells, and win/draw detection.
//!
//! All queries are pure functions of occupancy masks. Win detection only
//! looks at the lines through the last disc placed, so callers check after
//! every drop.

use crate::core::{bit, cell, PlayerId, FULL_BOARD, HEIGHT, WIDTH};

use super::lines::LineTable;

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Board filled with no four-in-a-row.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }
}

/// Outcome of checking the position after a drop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CheckResult {
    /// Game continues.
    Unresolved,
    /// Board is full and nobody connected four.
    Draw,
    /// The mover connected four; carries the winning line.
    Win(u64),
}

impl CheckResult {
    /// Convert to a game result for the player who made the drop.
    #[must_use]
    pub fn into_result(self, mover: PlayerId) -> Option<GameResult> {
        match self {
            CheckResult::Unresolved => None,
            CheckResult::Draw => Some(GameResult::Draw),
            CheckResult::Win(_) => Some(GameResult::Winner(mover)),
        }
    }
}

/// Whether a disc can be dropped into `column`.
///
/// ```
/// use connect4_mcts::rules::is_valid_move;
///
/// assert!(is_valid_move(0, 0));
/// assert!(!is_valid_move(0, 7));
/// ```
#[inline]
#[must_use]
pub fn is_valid_move(occupied: u64, column: usize) -> bool {
    column < WIDTH && occupied & bit(cell(column, HEIGHT - 1)) == 0
}

/// Cell index where a disc dropped into `column` lands.
///
/// The column must be valid; a full column yields its top cell.
#[inline]
#[must_use]
pub fn drop_position(occupied: u64, column: usize) -> usize {
    debug_assert!(column < WIDTH, "column {column} is off the board");
    (0..HEIGHT)
        .map(|row| cell(column, row))
        .find(|&position| occupied & bit(position) == 0)
        .unwrap_or(cell(column, HEIGHT - 1))
}

/// Valid columns in ascending order.
pub fn legal_columns(occupied: u64) -> impl Iterator<Item = usize> {
    (0..WIDTH).filter(move |&column| is_valid_move(occupied, column))
}

impl LineTable {
    /// Check the position after the mover dropped a disc at `last_position`.
    ///
    /// The first line through `last_position` fully held by `mover` wins.
    #[must_use]
    pub fn check(&self, mover: u64, opponent: u64, last_position: usize) -> CheckResult {
        if let Some(mask) = self.through(last_position).find(|&mask| mask & mover == mask) {
            CheckResult::Win(mask)
        } else if mover | opponent == FULL_BOARD {
            CheckResult::Draw
        } else {
            CheckResult::Unresolved
        }
    }
}

/// [`LineTable::check`] against the shared table.
///
/// ```
/// use connect4_mcts::rules::{check_outcome, CheckResult};
///
/// assert_eq!(check_outcome(0b1111, 0, 3), CheckResult::Win(0b1111));
/// ```
#[must_use]
pub fn check_outcome(mover: u64, opponent: u64, last_position: usize) -> CheckResult {
    LineTable::shared().check(mover, opponent, last_position)
}
