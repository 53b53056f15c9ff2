//! Depth-limited minimax with alpha-beta pruning.
//!
//! The root side is MAX. Children are the `top_k` empty cells ranked by the
//! combined attack/defense matrix, so the branching factor stays bounded on
//! large boards. Leaves are scored by the pattern table: own fragments count
//! at face value, opponent fragments are weighted as threats.
//!
//! A win found deeper in the tree is worth slightly less than one found
//! sooner, so the search takes an immediate five over a slower one.

use std::time::Instant;

use smallvec::SmallVec;

use crate::core::{GomokuError, Position, Result};

use super::board::SearchBoard;
use super::config::SearchConfig;
use super::evaluator::{combined_scores, LineEvaluator, WeightCurve};
use super::patterns::{score_fragment, threat_weight};
use super::stats::SearchStats;

/// Score of a completed five for the root side.
pub const WIN_SCORE: i64 = 1_000_000;

/// The move chosen by a search and what it was worth.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult {
    pub best_move: Position,
    pub score: i64,
    pub stats: SearchStats,
}

/// Minimax search context.
pub struct MinimaxSearch {
    config: SearchConfig,
    stats: SearchStats,
    deadline: Option<Instant>,
}

impl MinimaxSearch {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            stats: SearchStats::default(),
            deadline: None,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Statistics of the most recent search.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Pick the best move for the side to move on `root`.
    ///
    /// An empty board opens at the centre. Fails with
    /// [`GomokuError::NoCandidateMove`] when the board is full.
    pub fn search(&mut self, root: &SearchBoard) -> Result<SearchResult> {
        let start = Instant::now();
        self.stats.reset();
        self.deadline = self.config.time_limit.map(|limit| start + limit);
        self.stats.nodes += 1;

        if root.is_empty() {
            let centre = root.size() / 2;
            return Ok(self.finish(start, Position::new(centre, centre), 0));
        }

        let depth = self.config.depth.max(1);
        let mut alpha = i64::MIN;
        let mut best: Option<(Position, i64)> = None;

        for candidate in candidates(root, self.config.top_k) {
            let value = self.min_value(&root.play(candidate), depth - 1, alpha, i64::MAX);
            if best.map_or(true, |(_, score)| value > score) {
                best = Some((candidate, value));
            }
            alpha = alpha.max(value);
        }

        let (best_move, score) = best.ok_or(GomokuError::NoCandidateMove)?;
        Ok(self.finish(start, best_move, score))
    }

    fn finish(&mut self, start: Instant, best_move: Position, score: i64) -> SearchResult {
        self.stats.time_us = start.elapsed().as_micros() as u64;
        SearchResult {
            best_move,
            score,
            stats: self.stats.clone(),
        }
    }

    /// Root side to move.
    fn max_value(&mut self, node: &SearchBoard, depth: u32, mut alpha: i64, beta: i64) -> i64 {
        self.stats.nodes += 1;
        if node.has_winner() {
            self.stats.terminal_wins += 1;
            return -(WIN_SCORE + i64::from(depth));
        }
        if depth == 0 || self.out_of_time() {
            self.stats.leaves += 1;
            return evaluate(node, 1);
        }

        let children = candidates(node, self.config.top_k);
        if children.is_empty() {
            self.stats.leaves += 1;
            return evaluate(node, 1);
        }

        let mut value = i64::MIN;
        for child in children {
            value = value.max(self.min_value(&node.play(child), depth - 1, alpha, beta));
            if value >= beta {
                self.stats.cutoffs += 1;
                return value;
            }
            alpha = alpha.max(value);
        }
        value
    }

    /// Opponent to move. Children are tried weakest-ranked first.
    fn min_value(&mut self, node: &SearchBoard, depth: u32, alpha: i64, mut beta: i64) -> i64 {
        self.stats.nodes += 1;
        if node.has_winner() {
            self.stats.terminal_wins += 1;
            return WIN_SCORE + i64::from(depth);
        }
        if depth == 0 || self.out_of_time() {
            self.stats.leaves += 1;
            return evaluate(node, -1);
        }

        let children = candidates(node, self.config.top_k);
        if children.is_empty() {
            self.stats.leaves += 1;
            return evaluate(node, -1);
        }

        let mut value = i64::MAX;
        for child in children.into_iter().rev() {
            value = value.min(self.max_value(&node.play(child), depth - 1, alpha, beta));
            if value <= alpha {
                self.stats.cutoffs += 1;
                return value;
            }
            beta = beta.min(value);
        }
        value
    }

    fn out_of_time(&mut self) -> bool {
        let expired = self.deadline.is_some_and(|deadline| Instant::now() >= deadline);
        if expired {
            self.stats.timed_out = true;
        }
        expired
    }
}

/// The `top_k` empty cells with the highest combined score, best first.
/// Ties go to the lower row-major index.
pub fn candidates(board: &SearchBoard, top_k: usize) -> SmallVec<[Position; 8]> {
    let size = board.size();
    let scores = combined_scores(size, &board.values(1), WeightCurve::Steep);

    let mut ranked: Vec<(usize, i64)> = board
        .empty_cells()
        .map(|position| {
            let index = position.index(size);
            (index, scores[index])
        })
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    ranked
        .into_iter()
        .take(top_k.max(1))
        .map(|(index, _)| Position::from_index(index, size))
        .collect()
}

/// Static score of `board` for the root side, whose stones carry `polarity`.
pub fn evaluate(board: &SearchBoard, polarity: i32) -> i64 {
    let size = board.size();
    let own = board.values(polarity);
    let other = board.values(-polarity);

    let attack: i64 = LineEvaluator::new(size, &own)
        .fragments()
        .iter()
        .map(score_fragment)
        .sum();
    let threat: i64 = LineEvaluator::new(size, &other)
        .fragments()
        .iter()
        .map(|fragment| threat_weight(score_fragment(fragment)))
        .sum();

    attack - threat
}
