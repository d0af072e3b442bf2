//! Scoring, selection, and rollout policies.
//!
//! - Scores credited to an edge for wins and draws
//! - UCB1 selection at fully expanded nodes
//! - Uniform random rollouts from freshly expanded edges
//! - Final move choice by mean score

use smallvec::SmallVec;

use crate::core::{Board, GameRng, PlayerId, WIDTH};
use crate::rules::{drop_position, legal_columns, GameResult, LineTable};

use super::node::Node;

/// Candidate columns, never more than the board width.
pub type Columns = SmallVec<[usize; WIDTH]>;

// =============================================================================
// Scores
// =============================================================================

/// Score credited to an edge whose mover won.
pub const WIN_SCORE: f32 = 1.0;

/// Score credited to an edge whose move immediately fills the board.
pub const DRAW_SCORE: f32 = 0.1;

/// Score credited to a freshly expanded edge when its rollout is drawn.
///
/// Equal to [`WIN_SCORE`]: draws found by rollouts are valued as wins.
pub const ROLLOUT_DRAW_SCORE: f32 = WIN_SCORE;

/// Score credited to an edge during backup when the playout drew.
///
/// Equal to [`WIN_SCORE`], like [`ROLLOUT_DRAW_SCORE`].
pub const BACKUP_DRAW_SCORE: f32 = WIN_SCORE;

/// UCB1 exploration constant `C` in `sqrt(C * ln(N) / n)`.
pub const EXPLORATION: f32 = 2.0;

/// Score credited to `mover`'s edge for a finished playout.
///
/// `draw_score` selects between the rollout and backup draw credits.
#[inline]
#[must_use]
pub fn credit(result: GameResult, mover: PlayerId, draw_score: f32) -> f32 {
    match result {
        GameResult::Winner(winner) if winner == mover => WIN_SCORE,
        GameResult::Winner(_) => 0.0,
        GameResult::Draw => draw_score,
    }
}

// =============================================================================
// Selection
// =============================================================================

/// UCB1 value of a column.
#[inline]
#[must_use]
pub fn ucb1(score: f32, visits: u32, numerator: f32) -> f32 {
    let visits = visits as f32;
    score / visits + (numerator / visits).sqrt()
}

/// Columns tied for the highest UCB1 value among `legal`.
///
/// The visit total is summed once over the legal columns before the
/// values are computed; ties are exact floating-point equality.
///
/// # Panics
///
/// Panics if a legal column has never been visited; a fully expanded node
/// always has visits on every legal column.
#[must_use]
pub fn ucb1_best(node: &Node, legal: &[usize]) -> Columns {
    let total: u32 = legal.iter().map(|&column| node.visits[column]).sum();
    let numerator = EXPLORATION * (total as f32).ln();

    let mut best_value = f32::NEG_INFINITY;
    let mut best = Columns::new();
    for &column in legal {
        let visits = node.visits[column];
        assert!(visits > 0, "expanded column {column} has no visits");
        let value = ucb1(node.scores[column], visits, numerator);
        if value > best_value {
            best_value = value;
            best.clear();
            best.push(column);
        } else if value == best_value {
            best.push(column);
        }
    }
    best
}

/// Root column with the highest mean score, lowest column on ties.
///
/// Columns without visits are skipped; `None` if no column has any.
#[must_use]
pub fn best_mean_column(node: &Node) -> Option<usize> {
    let mut best_ratio = f64::NEG_INFINITY;
    let mut best = None;
    for column in (0..WIDTH).filter(|&column| node.visits[column] > 0) {
        let ratio = node.mean_score(column);
        if ratio > best_ratio {
            best_ratio = ratio;
            best = Some(column);
        }
    }
    best
}

/// Uniform choice among candidate columns.
///
/// A single candidate is taken without consuming a draw.
///
/// # Panics
///
/// Panics if `columns` is empty.
#[inline]
pub fn pick(rng: &mut GameRng, columns: &[usize]) -> usize {
    match columns {
        [only] => *only,
        _ => columns[rng.choose_index(columns.len())],
    }
}

// =============================================================================
// Simulation
// =============================================================================

/// Play uniformly random legal moves until the game ends.
///
/// `to_move` makes the first move on `board`, then sides alternate.
pub fn rollout(
    lines: &LineTable,
    rng: &mut GameRng,
    mut board: Board,
    mut to_move: PlayerId,
) -> GameResult {
    loop {
        let occupied = board.occupied();
        let options: Columns = legal_columns(occupied).collect();
        let Some(&column) = rng.choose(&options) else {
            // Only reachable from a full board, which is already a draw.
            return GameResult::Draw;
        };

        let position = drop_position(occupied, column);
        board.place(to_move, position);
        let check = lines.check(board.stones(to_move), board.stones(to_move.opponent()), position);
        if let Some(result) = check.into_result(to_move) {
            return result;
        }
        to_move = to_move.opponent();
    }
}
