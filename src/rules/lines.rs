//! Precomputed four-in-a-row masks.
//!
//! For every cell the table lists each run of four cells that passes through
//! it, along the four axes (horizontal, vertical, both diagonals) and at each
//! of the four window offsets. Windows that leave the board are dropped, so a
//! cell has at most 16 lines. Unused slots hold `0`.

use std::sync::OnceLock;

use crate::core::{bit, cell, CELLS, HEIGHT, WIDTH};

/// Maximum number of lines through a single cell (4 axes x 4 offsets).
pub const LINES_PER_CELL: usize = 16;

/// Length of a winning run.
pub const RUN: i32 = 4;

/// Unit steps for the four axes: horizontal, vertical, rising and falling
/// diagonal.
const AXES: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

/// Line masks indexed by cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineTable {
    lines: [[u64; LINES_PER_CELL]; CELLS],
}

static SHARED: OnceLock<LineTable> = OnceLock::new();

impl LineTable {
    /// Build the table.
    #[must_use]
    pub fn new() -> Self {
        let mut lines = [[0u64; LINES_PER_CELL]; CELLS];

        for y in 0..HEIGHT as i32 {
            for x in 0..WIDTH as i32 {
                let slots = &mut lines[cell(x as usize, y as usize)];
                let mut count = 0;
                for (dx, dy) in AXES {
                    for start in -(RUN - 1)..=0 {
                        if let Some(mask) = window(x, y, dx, dy, start) {
                            slots[count] = mask;
                            count += 1;
                        }
                    }
                }
            }
        }

        Self { lines }
    }

    /// The process-wide table, built on first use.
    #[must_use]
    pub fn shared() -> &'static LineTable {
        SHARED.get_or_init(LineTable::new)
    }

    /// Lines passing through `position`.
    #[inline]
    pub fn through(&self, position: usize) -> impl Iterator<Item = u64> + '_ {
        self.lines[position].iter().copied().take_while(|&mask| mask != 0)
    }
}

impl Default for LineTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Mask of the run starting `start` steps from `(x, y)` along `(dx, dy)`,
/// or `None` if any of its cells is off the board.
fn window(x: i32, y: i32, dx: i32, dy: i32, start: i32) -> Option<u64> {
    (start..start + RUN).try_fold(0u64, |mask, step| {
        let xx = x + dx * step;
        let yy = y + dy * step;
        let on_board = (0..WIDTH as i32).contains(&xx) && (0..HEIGHT as i32).contains(&yy);
        on_board.then(|| mask | bit(cell(xx as usize, yy as usize)))
    })
}
