//! Rules oracle for connect-four.
//!
//! - `lines`: precomputed four-in-a-row masks per cell
//! - `engine`: legality, landing cells, and outcome checks
//!
//! The oracle carries no state beyond the line table, which is built once
//! and shared read-only.

pub mod engine;
pub mod lines;

pub use engine::{
    check_outcome, drop_position, is_valid_move, legal_columns, CheckResult, GameResult,
};
pub use lines::{LineTable, LINES_PER_CELL};
