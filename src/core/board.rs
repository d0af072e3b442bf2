//! Bitboard position: one occupancy mask per player.
//!
//! Cells are numbered in row-major order with row 0 at the bottom:
//!
//! ```text
//! Row 5: [35][36][37][38][39][40][41]  <- Top
//! Row 4: [28][29][30][31][32][33][34]
//! Row 3: [21][22][23][24][25][26][27]
//! Row 2: [14][15][16][17][18][19][20]
//! Row 1: [ 7][ 8][ 9][10][11][12][13]
//! Row 0: [ 0][ 1][ 2][ 3][ 4][ 5][ 6]  <- Bottom
//!         Col 0  1  2  3  4  5  6
//! ```

use serde::{Deserialize, Serialize};

use super::player::{PlayerId, PlayerPair};

/// Number of columns.
pub const WIDTH: usize = 7;

/// Number of rows.
pub const HEIGHT: usize = 6;

/// Number of cells on the board.
pub const CELLS: usize = WIDTH * HEIGHT;

const _: () = assert!(CELLS <= 64, "board must fit in a 64-bit mask");

/// Mask with every cell of the board set.
pub const FULL_BOARD: u64 = (1 << CELLS) - 1;

/// Cell index of `(column, row)`.
#[inline]
#[must_use]
pub const fn cell(column: usize, row: usize) -> usize {
    row * WIDTH + column
}

/// Single-bit mask for a cell index.
#[inline]
#[must_use]
pub const fn bit(position: usize) -> u64 {
    1 << position
}

/// A position as two disjoint occupancy masks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    stones: PlayerPair<u64>,
}

impl Board {
    /// Create an empty board.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            stones: PlayerPair::new(0, 0),
        }
    }

    /// Create a board from both players' masks.
    ///
    /// # Panics
    ///
    /// Panics if the masks overlap or cover cells outside the board.
    #[must_use]
    pub fn from_masks(first: u64, second: u64) -> Self {
        assert_eq!(first & second, 0, "Player masks must be disjoint");
        assert_eq!((first | second) & !FULL_BOARD, 0, "Mask exceeds board");
        Self {
            stones: PlayerPair::new(first, second),
        }
    }

    /// Cells occupied by `player`.
    #[inline]
    #[must_use]
    pub fn stones(&self, player: PlayerId) -> u64 {
        self.stones[player]
    }

    /// Cells occupied by either player.
    #[inline]
    #[must_use]
    pub fn occupied(&self) -> u64 {
        self.stones[PlayerId::FIRST] | self.stones[PlayerId::SECOND]
    }

    /// Place a disc for `player` at a cell index.
    #[inline]
    pub fn place(&mut self, player: PlayerId, position: usize) {
        debug_assert_eq!(self.occupied() & bit(position), 0, "cell {position} is taken");
        self.stones[player] |= bit(position);
    }

    /// Copy of this board with a disc placed for `player`.
    #[inline]
    #[must_use]
    pub fn with_disc(mut self, player: PlayerId, position: usize) -> Self {
        self.place(player, position);
        self
    }

    /// Number of discs on the board.
    #[must_use]
    pub fn disc_count(&self) -> u32 {
        self.occupied().count_ones()
    }

    /// Whether every cell is taken.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.occupied() == FULL_BOARD
    }

    /// Owner of a cell, if any.
    #[must_use]
    pub fn owner(&self, position: usize) -> Option<PlayerId> {
        PlayerId::all().find(|&p| self.stones[p] & bit(position) != 0)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for column in 0..WIDTH {
            write!(f, "{} ", column + 1)?;
        }
        writeln!(f)?;
        for row in (0..HEIGHT).rev() {
            for column in 0..WIDTH {
                let symbol = self.owner(cell(column, row)).map_or('.', PlayerId::symbol);
                write!(f, "{symbol} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_board_mask() {
        assert_eq!(FULL_BOARD, 0x3ff_ffff_ffff);
        assert_eq!(FULL_BOARD.count_ones() as usize, CELLS);
    }

    #[test]
    fn test_cell_numbering() {
        assert_eq!(cell(0, 0), 0);
        assert_eq!(cell(6, 0), 6);
        assert_eq!(cell(0, 1), 7);
        assert_eq!(cell(6, 5), 41);
    }

    #[test]
    fn test_place_and_owner() {
        let mut board = Board::new();
        board.place(PlayerId::FIRST, 3);
        board.place(PlayerId::SECOND, 10);

        assert_eq!(board.owner(3), Some(PlayerId::FIRST));
        assert_eq!(board.owner(10), Some(PlayerId::SECOND));
        assert_eq!(board.owner(4), None);
        assert_eq!(board.occupied(), bit(3) | bit(10));
        assert_eq!(board.disc_count(), 2);
        assert!(!board.is_full());
    }

    #[test]
    #[should_panic(expected = "disjoint")]
    fn test_from_masks_rejects_overlap() {
        let _ = Board::from_masks(0b11, 0b10);
    }

    #[test]
    fn test_display_bottom_row_last() {
        let board = Board::new().with_disc(PlayerId::FIRST, 0).with_disc(PlayerId::SECOND, 1);
        let text = board.to_string();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), HEIGHT + 1);
        assert_eq!(lines[0], "1 2 3 4 5 6 7 ");
        assert_eq!(lines[HEIGHT], "O X . . . . . ");
        assert_eq!(lines[1], ". . . . . . . ");
    }
}
