//! Core MCTS search algorithm.
//!
//! Each playout walks from the root: at a node with untried columns it
//! expands one of them and runs a single random rollout; at a fully
//! expanded node it follows UCB1 and recurses. Results are credited to each
//! edge on the way back up from the perspective of the player who made that
//! edge's move.

use std::mem::size_of;
use std::time::Instant;

use tracing::debug;

use crate::core::{Board, GameRng, PlayerId};
use crate::error::{ArenaExhausted, SearchError};
use crate::rules::{drop_position, is_valid_move, legal_columns, GameResult, LineTable};

use super::arena::NodeArena;
use super::config::SearchConfig;
use super::node::{Child, Node, NodeId};
use super::policy::{
    best_mean_column, credit, pick, rollout, ucb1_best, Columns, BACKUP_DRAW_SCORE, DRAW_SCORE,
    ROLLOUT_DRAW_SCORE, WIN_SCORE,
};
use super::stats::SearchStats;
use super::tree::SearchTree;

/// Main MCTS search context.
///
/// Owns the search tree, its arena, and the random stream. Two players
/// searching in the same game need two contexts.
#[derive(Clone, Debug)]
pub struct MCTSSearch {
    /// Search configuration.
    config: SearchConfig,

    /// The search tree.
    tree: SearchTree,

    /// RNG for expansion choices, tie-breaks, and rollouts.
    rng: GameRng,

    /// Shared line table.
    lines: &'static LineTable,

    /// Statistics of the last search.
    stats: SearchStats,
}

impl MCTSSearch {
    /// Bytes of the budget taken by the search context itself.
    pub const HEADER_BYTES: usize = size_of::<Self>();

    /// Create a search context for an empty board.
    ///
    /// The arena holds as many nodes as fit in `config.arena_bytes` after
    /// [`Self::HEADER_BYTES`].
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        let arena = NodeArena::from_budget(config.arena_bytes, Self::HEADER_BYTES)?;
        let seed = config.resolved_seed();
        Self::with_arena(config, arena, seed)
    }

    /// Create a search context with an exact node capacity and seed.
    ///
    /// The stored config reports the budget that yields this capacity.
    pub fn with_capacity(capacity: usize, seed: u64) -> Result<Self, SearchError> {
        let arena = NodeArena::with_capacity(capacity)?;
        let arena_bytes = Self::HEADER_BYTES + arena.capacity() * size_of::<Node>();
        let config = SearchConfig::default()
            .with_arena_bytes(arena_bytes)
            .with_seed(seed);
        Self::with_arena(config, arena, seed)
    }

    fn with_arena(config: SearchConfig, arena: NodeArena, seed: u64) -> Result<Self, SearchError> {
        let tree = SearchTree::new(arena)?;
        debug!(
            seed,
            capacity = tree.arena().capacity(),
            "created search context"
        );
        Ok(Self {
            config,
            tree,
            rng: GameRng::new(seed),
            lines: LineTable::shared(),
            stats: SearchStats::default(),
        })
    }

    /// Choose a column for the player to move after up to `max_playouts`
    /// playouts.
    pub fn choose_move(&mut self, max_playouts: u32) -> Option<usize> {
        self.run_playouts(max_playouts)
    }

    /// Run up to `count` playouts from the root and return the column with
    /// the best mean score.
    ///
    /// Stops early if the arena fills up. Returns `None` if no root column
    /// has been visited. The root position is left unchanged.
    pub fn run_playouts(&mut self, count: u32) -> Option<usize> {
        let start = Instant::now();
        self.stats.reset();

        let root = self.tree.root();
        let board = self.tree.board();
        let turn = self.tree.turn();
        for _ in 0..count {
            if self.playout(root, board, turn).is_err() {
                self.stats.aborted = true;
                break;
            }
            self.stats.playouts += 1;
        }

        self.stats.time_us = start.elapsed().as_micros() as u64;
        let best = best_mean_column(self.tree.root_node());

        debug!(
            playouts = self.stats.playouts,
            aborted = self.stats.aborted,
            expanded = self.stats.nodes_expanded,
            allocated = self.tree.arena().allocated(),
            capacity = self.tree.arena().capacity(),
            time_us = self.stats.time_us,
            best = ?best,
            "search finished"
        );

        best
    }

    /// Commit a real move by either side.
    ///
    /// # Panics
    ///
    /// Panics if `column` is not a legal move at the root.
    pub fn advance(&mut self, column: usize) {
        self.tree.advance(column);
    }

    /// One playout from `id`, where `turn` is to move on `board`.
    fn playout(
        &mut self,
        id: NodeId,
        board: Board,
        turn: PlayerId,
    ) -> Result<GameResult, ArenaExhausted> {
        let occupied = board.occupied();
        let node = self.tree.get(id);
        let untried: Columns = node
            .unexpanded()
            .filter(|&column| is_valid_move(occupied, column))
            .collect();

        if untried.is_empty() {
            self.select(id, board, turn)
        } else {
            self.expand(id, board, turn, &untried)
        }
    }

    /// Fully expanded node: follow UCB1 and back the result up.
    fn select(
        &mut self,
        id: NodeId,
        board: Board,
        turn: PlayerId,
    ) -> Result<GameResult, ArenaExhausted> {
        let occupied = board.occupied();
        let legal: Columns = legal_columns(occupied).collect();
        if legal.is_empty() {
            return Ok(GameResult::Draw);
        }

        let best = ucb1_best(self.tree.get(id), &legal);
        let column = pick(&mut self.rng, &best);
        let next = board.with_disc(turn, drop_position(occupied, column));

        let child = self.tree.get(id).children[column];
        let result = match child {
            Child::Node(child) => self.playout(child, next, turn.opponent())?,
            Child::Win(player) => GameResult::Winner(player),
            Child::Draw => GameResult::Draw,
            Child::Empty => unreachable!("selected column {column} was never expanded"),
        };

        let node = self.tree.arena_mut().get_mut(id);
        node.visits[column] += 1;
        node.scores[column] += credit(result, turn, BACKUP_DRAW_SCORE);
        Ok(result)
    }

    /// Expand one untried column and evaluate it.
    fn expand(
        &mut self,
        id: NodeId,
        board: Board,
        turn: PlayerId,
        untried: &[usize],
    ) -> Result<GameResult, ArenaExhausted> {
        let column = pick(&mut self.rng, untried);
        let position = drop_position(board.occupied(), column);
        let next = board.with_disc(turn, position);
        let check = self.lines.check(next.stones(turn), next.stones(turn.opponent()), position);

        if let Some(result) = check.into_result(turn) {
            let node = self.tree.arena_mut().get_mut(id);
            node.children[column] = Child::from_result(result);
            node.visits[column] += 1;
            node.scores[column] += match result {
                GameResult::Draw => DRAW_SCORE,
                GameResult::Winner(_) => WIN_SCORE,
            };
            self.stats.terminal_edges += 1;
            return Ok(result);
        }

        let child = self.tree.arena_mut().allocate().ok_or(ArenaExhausted)?;
        self.stats.nodes_expanded += 1;
        {
            let node = self.tree.arena_mut().get_mut(id);
            node.children[column] = Child::Node(child);
            node.visits[column] += 1;
        }

        let result = rollout(self.lines, &mut self.rng, next, turn.opponent());
        self.tree.arena_mut().get_mut(id).scores[column] +=
            credit(result, turn, ROLLOUT_DRAW_SCORE);
        Ok(result)
    }

    /// Get search statistics from the last call to `run_playouts`.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Get the search tree.
    #[must_use]
    pub fn tree(&self) -> &SearchTree {
        &self.tree
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Position at the root.
    #[must_use]
    pub fn board(&self) -> Board {
        self.tree.board()
    }

    /// Player to move at the root.
    #[must_use]
    pub fn turn(&self) -> PlayerId {
        self.tree.turn()
    }

    /// Whether `column` is playable at the root.
    #[must_use]
    pub fn is_valid_move(&self, column: usize) -> bool {
        is_valid_move(self.tree.board().occupied(), column)
    }

    /// Root (column, visits, mean score) for every visited column.
    pub fn column_stats(&self) -> Vec<(usize, u32, f64)> {
        let root = self.tree.root_node();
        (0..root.visits.len())
            .filter(|&column| root.visits[column] > 0)
            .map(|column| (column, root.visits[column], root.mean_score(column)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::WIDTH;

    #[test]
    fn test_first_playout_expands_one_root_column() {
        let mut search = MCTSSearch::with_capacity(64, 1).unwrap();
        search.run_playouts(1);

        let root = search.tree().root_node();
        assert_eq!(root.total_visits(), 1);
        assert_eq!(root.children.iter().filter(|c| c.is_expanded()).count(), 1);
        assert_eq!(search.tree().arena().allocated(), 2);
        assert_eq!(search.stats().playouts, 1);
        assert_eq!(search.stats().nodes_expanded, 1);
    }

    #[test]
    fn test_root_fully_expanded_after_width_playouts() {
        let mut search = MCTSSearch::with_capacity(64, 2).unwrap();
        search.run_playouts(WIDTH as u32);

        let root = search.tree().root_node();
        assert!(root.children.iter().all(|c| c.is_expanded()));
        assert!(root.visits.iter().all(|&v| v == 1));
    }

    #[test]
    fn test_visits_count_playouts() {
        let mut search = MCTSSearch::with_capacity(10_000, 3).unwrap();
        search.run_playouts(200);

        assert_eq!(search.stats().playouts, 200);
        assert!(!search.stats().aborted);
        assert_eq!(search.tree().root_node().total_visits(), 200);
    }

    #[test]
    fn test_scores_bounded_by_visits() {
        let mut search = MCTSSearch::with_capacity(10_000, 4).unwrap();
        search.run_playouts(300);

        let root = search.tree().root_node();
        for column in 0..WIDTH {
            assert!(root.scores[column] >= 0.0);
            assert!(root.scores[column] <= root.visits[column] as f32 * WIN_SCORE);
        }
    }

    #[test]
    fn test_exhaustion_aborts_without_recording() {
        let mut search = MCTSSearch::with_capacity(1, 5).unwrap();
        let best = search.run_playouts(10);

        assert_eq!(best, None);
        assert!(search.stats().aborted);
        assert_eq!(search.stats().playouts, 0);
        assert_eq!(search.tree().root_node(), &Node::default());
    }

    #[test]
    fn test_takes_immediate_win() {
        // Player 0 has three on the bottom row (columns 0-2), player 1 three
        // stacked in column 6; player 0 to move.
        let mut search = MCTSSearch::with_capacity(50_000, 6).unwrap();
        for column in [0, 6, 1, 6, 2, 6] {
            search.advance(column);
        }
        assert_eq!(search.turn(), PlayerId::FIRST);

        assert_eq!(search.run_playouts(2_000), Some(3));
    }

    #[test]
    fn test_terminal_edge_recorded_as_sentinel() {
        let mut search = MCTSSearch::with_capacity(50_000, 7).unwrap();
        for column in [0, 6, 1, 6, 2, 6] {
            search.advance(column);
        }
        search.run_playouts(500);

        let root = search.tree().root_node();
        assert_eq!(root.children[3], Child::Win(PlayerId::FIRST));
        assert_eq!(root.scores[3], root.visits[3] as f32 * WIN_SCORE);
    }

    #[test]
    fn test_root_position_unchanged_by_search() {
        let mut search = MCTSSearch::with_capacity(5_000, 8).unwrap();
        search.advance(3);
        let board = search.board();
        let turn = search.turn();

        search.run_playouts(100);

        assert_eq!(search.board(), board);
        assert_eq!(search.turn(), turn);
    }

    #[test]
    fn test_budget_header_accounting() {
        let node = size_of::<Node>();
        let config = SearchConfig::default()
            .with_arena_bytes(MCTSSearch::HEADER_BYTES + 3 * node)
            .with_seed(1);
        let search = MCTSSearch::new(config).unwrap();
        assert_eq!(search.tree().arena().capacity(), 3);

        let config = SearchConfig::default()
            .with_arena_bytes(MCTSSearch::HEADER_BYTES)
            .with_seed(1);
        assert!(matches!(
            MCTSSearch::new(config),
            Err(SearchError::BudgetTooSmall { .. })
        ));
    }

    #[test]
    fn test_with_capacity_config_matches_arena() {
        let search = MCTSSearch::with_capacity(3, 1).unwrap();
        let config = search.config();
        assert_eq!(config.arena_bytes, MCTSSearch::HEADER_BYTES + 3 * size_of::<Node>());
        assert_eq!(config.seed, Some(1));

        // The reported budget rebuilds an arena of the same size.
        let rebuilt = MCTSSearch::new(config.clone()).unwrap();
        assert_eq!(rebuilt.tree().arena().capacity(), 3);
    }

    #[test]
    fn test_column_stats() {
        let mut search = MCTSSearch::with_capacity(1_000, 9).unwrap();
        search.run_playouts(20);
        let stats = search.column_stats();
        let visits: u32 = stats.iter().map(|&(_, v, _)| v).sum();
        assert_eq!(visits, 20);
        assert!(stats.iter().all(|&(column, _, _)| column < WIDTH));
    }
}
