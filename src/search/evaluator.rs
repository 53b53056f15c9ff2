//! Directional line evaluator shared by every computer strategy.
//!
//! The input is one signed value per cell: positive for the evaluating side
//! (weighted by token value), negative for the other side, zero for empty.
//! Flipping the sign turns an "attack" evaluation into a "defense" one.
//!
//! ## Traversal
//!
//! From each friendly cell and each of the 8 directions, a walk starts only
//! if the cell opens a run in that direction: no friendly cell sits within
//! the 4 cells behind it before an opposing cell (which marks the start as
//! blocked). The walk records, for each cell, the index of the closest
//! preceding friendly cell (its anchor) so that a trailing 5-cell window can
//! be scored. Visited directions are memoized per cell, so a line is not
//! rescanned from its far end.
//!
//! Two products come out of the same traversal:
//!
//! - [`LineEvaluator::score_matrix`] scores every empty cell by the
//!   formations it would extend (used to rank candidate moves)
//! - [`LineEvaluator::fragments`] lists the maximal friendly runs with their
//!   blocked ends (fed to the pattern table at search leaves)
//!
//! A window's token weight is the exponent of its distance sum. The
//! [`WeightCurve`] decides how sharply three and four tokens are boosted:
//! the heuristic players use [`WeightCurve::Gradual`], minimax ranks its
//! candidates with [`WeightCurve::Steep`].

use smallvec::SmallVec;

use crate::core::{Direction, Position};

/// Length of the sliding window around a candidate cell.
pub const WINDOW: usize = 5;

/// How far back a walk looks for an earlier friendly cell.
const LOOKBACK: isize = 4;

const ALL_DIRECTIONS: u8 = 0xFF;

#[derive(Clone, Copy, Debug, Default)]
struct Cell {
    value: i32,
    visited: u8,
    anchor: Option<usize>,
    blocked: bool,
}

impl Cell {
    fn visited_in(&self, direction: usize) -> bool {
        self.visited & (1 << direction) != 0
    }

    fn visit(&mut self, direction: usize) {
        self.visited |= 1 << direction;
    }

    fn fully_visited(&self) -> bool {
        self.visited == ALL_DIRECTIONS
    }
}

/// A maximal friendly run found by the traversal, with what ends it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fragment {
    /// Cell values along the walk, the stopping cell included.
    pub values: SmallVec<[i32; 8]>,
    /// An opposing cell sits just behind the start.
    pub head_blocked: bool,
    /// The walk ran into the board edge.
    pub tail_blocked: bool,
}

/// Boost applied to a window's token weight before it becomes an exponent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WeightCurve {
    /// Three or more tokens count one extra.
    Gradual,
    /// Three tokens count as four, four as six.
    #[default]
    Steep,
}

impl WeightCurve {
    #[must_use]
    pub fn apply(self, weight: i32) -> i32 {
        match (self, weight) {
            (Self::Gradual, w) if w >= 3 => w + 1,
            (Self::Steep, 3) => 4,
            (Self::Steep, 4) => 6,
            (_, w) => w,
        }
    }
}

/// Scratch grid for one evaluation.
pub struct LineEvaluator {
    size: usize,
    cells: Vec<Cell>,
    curve: WeightCurve,
}

impl LineEvaluator {
    #[must_use]
    pub fn new(size: usize, values: &[i32]) -> Self {
        let cells = values
            .iter()
            .map(|&value| Cell {
                value,
                ..Cell::default()
            })
            .collect();
        Self {
            size,
            cells,
            curve: WeightCurve::default(),
        }
    }

    #[must_use]
    pub fn with_curve(mut self, curve: WeightCurve) -> Self {
        self.curve = curve;
        self
    }

    /// Score every empty cell by the friendly formations it would extend.
    ///
    /// Occupied cells score 0.
    #[must_use]
    pub fn score_matrix(mut self) -> Vec<i64> {
        let mut scores = vec![0i64; self.cells.len()];
        for index in 0..self.cells.len() {
            let cell = self.cells[index];
            if cell.value <= 0 || cell.fully_visited() {
                continue;
            }
            for direction in 0..Direction::ALL.len() {
                if self.opens_run(index, direction) {
                    let path = self.walk_window(index, direction);
                    self.score_path(&path, &mut scores);
                    self.reset(&path);
                }
            }
        }
        scores
    }

    /// Every maximal friendly run, in discovery order.
    #[must_use]
    pub fn fragments(mut self) -> Vec<Fragment> {
        let mut fragments = Vec::new();
        for index in 0..self.cells.len() {
            let cell = self.cells[index];
            if cell.value <= 0 || cell.fully_visited() {
                continue;
            }
            for direction in 0..Direction::ALL.len() {
                if self.opens_run(index, direction) {
                    let path = self.walk_fragment(index, direction);
                    fragments.push(Fragment {
                        values: path.iter().map(|&i| self.cells[i].value).collect(),
                        head_blocked: self.cells[path[0]].blocked,
                        tail_blocked: self.cells[path[path.len() - 1]].blocked,
                    });
                    self.reset(&path);
                }
            }
        }
        fragments
    }

    fn position(&self, index: usize) -> Position {
        Position::from_index(index, self.size)
    }

    fn neighbor(&self, index: usize, direction: usize) -> Option<usize> {
        self.position(index)
            .step(Direction::ALL[direction], self.size)
            .map(|p| p.index(self.size))
    }

    /// Whether `index` starts a run toward `direction`. An opposing cell
    /// found first behind it marks the start as blocked.
    fn opens_run(&mut self, index: usize, direction: usize) -> bool {
        let behind = Direction::ALL[Direction::ALL.len() - 1 - direction];
        let origin = self.position(index);
        for step in 1..=LOOKBACK {
            let Some(previous) = origin.offset(behind, step, self.size) else {
                break;
            };
            let value = self.cells[previous.index(self.size)].value;
            if value > 0 {
                return false;
            }
            if value < 0 {
                self.cells[index].blocked = true;
                break;
            }
        }
        true
    }

    /// Walk used by the score matrix: continues through empty cells until
    /// the window past the last friendly cell is exhausted.
    fn walk_window(&mut self, start: usize, direction: usize) -> SmallVec<[usize; 16]> {
        let mut path = SmallVec::new();
        let mut current = start;
        loop {
            path.push(current);
            let cell = self.cells[current];

            if cell.anchor.is_some_and(|anchor| anchor + WINDOW == path.len()) {
                break;
            }
            if cell.value < 0 {
                self.cells[current].blocked = true;
                break;
            }

            self.cells[current].visit(direction);
            match self.neighbor(current, direction) {
                Some(next) if !self.cells[next].visited_in(direction) => {
                    self.cells[next].anchor = if cell.value > 0 {
                        Some(path.len() - 1)
                    } else {
                        cell.anchor
                    };
                    current = next;
                }
                Some(_) => break,
                None => {
                    self.cells[current].blocked = true;
                    break;
                }
            }
        }
        path
    }

    /// Walk used for fragments: stops at the first empty or opposing cell.
    fn walk_fragment(&mut self, start: usize, direction: usize) -> SmallVec<[usize; 16]> {
        let reverse = Direction::ALL.len() - 1 - direction;
        let mut path = SmallVec::new();
        let mut current = start;
        loop {
            path.push(current);
            self.cells[current].visit(direction);
            self.cells[current].visit(reverse);

            let value = self.cells[current].value;
            if value < 0 || (path.len() > 1 && value == 0) {
                break;
            }
            match self.neighbor(current, direction) {
                Some(next) if !self.cells[next].visited_in(direction) => current = next,
                Some(_) => break,
                None => {
                    self.cells[current].blocked = true;
                    break;
                }
            }
        }
        path
    }

    /// Add window scores for the empty cells along `path`.
    fn score_path(&self, path: &[usize], scores: &mut [i64]) {
        let first_blocked = self.cells[path[0]].blocked;

        for (position, &index) in path.iter().enumerate() {
            let cell = self.cells[index];
            if cell.value != 0 || cell.anchor.is_none() {
                continue;
            }

            let start = position.saturating_sub(WINDOW - 1);
            let end = (start + WINDOW).min(path.len());

            let mut distance = 0.0f64;
            let mut weight = 0i32;
            for k in start..end {
                let other = self.cells[path[k]];
                // Skip a friendly cell whose run continues from before the window.
                let carried = other.anchor.is_some_and(|a| a < start && a + 1 == k);
                if other.value > 0 && !carried {
                    distance += WINDOW as f64 - position.abs_diff(k) as f64;
                    weight += other.value;
                }
            }

            let mut contribution = distance.powi(self.curve.apply(weight));
            if first_blocked || self.cells[path[end - 1]].blocked {
                contribution = contribution.sqrt();
            }
            scores[index] = scores[index].saturating_add(contribution as i64);
        }
    }

    fn reset(&mut self, path: &[usize]) {
        for &index in path {
            self.cells[index].anchor = None;
            self.cells[index].blocked = false;
        }
    }
}

/// Average of attack and defense matrices over `values`.
///
/// `values` are from the evaluating side's point of view.
#[must_use]
pub fn combined_scores(size: usize, values: &[i32], curve: WeightCurve) -> Vec<i64> {
    let attack = LineEvaluator::new(size, values).with_curve(curve).score_matrix();
    let flipped: Vec<i32> = values.iter().map(|v| -v).collect();
    let defense = LineEvaluator::new(size, &flipped)
        .with_curve(curve)
        .score_matrix();
    attack
        .iter()
        .zip(&defense)
        .map(|(a, d)| a.saturating_add(*d) / 2)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(size: usize, cells: &[(usize, usize, i32)]) -> Vec<i32> {
        let mut values = vec![0; size * size];
        for &(row, col, value) in cells {
            values[row * size + col] = value;
        }
        values
    }

    #[test]
    fn test_empty_board_scores_nothing() {
        let scores = LineEvaluator::new(10, &vec![0; 100]).score_matrix();
        assert!(scores.iter().all(|&s| s == 0));
        assert!(LineEvaluator::new(10, &vec![0; 100]).fragments().is_empty());
    }

    #[test]
    fn test_cells_next_to_a_run_score_highest() {
        let values = grid(10, &[(5, 3, 1), (5, 4, 1), (5, 5, 1)]);
        let scores = LineEvaluator::new(10, &values).score_matrix();

        let extend = scores[5 * 10 + 6].max(scores[5 * 10 + 2]);
        let far = scores[0];
        assert!(extend > 0);
        assert_eq!(far, 0);
        // Occupied cells never score.
        assert_eq!(scores[5 * 10 + 4], 0);
        // Extending the line beats touching it diagonally.
        assert!(extend > scores[4 * 10 + 4]);
    }

    #[test]
    fn test_blocked_run_is_dampened() {
        let open = grid(10, &[(5, 3, 1), (5, 4, 1), (5, 5, 1)]);
        let closed = grid(10, &[(5, 2, -1), (5, 3, 1), (5, 4, 1), (5, 5, 1)]);

        let open_score = LineEvaluator::new(10, &open).score_matrix()[5 * 10 + 6];
        let closed_score = LineEvaluator::new(10, &closed).score_matrix()[5 * 10 + 6];
        assert!(closed_score < open_score);
    }

    #[test]
    fn test_heavier_tokens_weigh_more() {
        let light = grid(10, &[(2, 2, 1), (2, 3, 1)]);
        let heavy = grid(10, &[(2, 2, 2), (2, 3, 1)]);

        let light_score = LineEvaluator::new(10, &light).score_matrix()[2 * 10 + 4];
        let heavy_score = LineEvaluator::new(10, &heavy).score_matrix()[2 * 10 + 4];
        assert!(heavy_score > light_score);
    }

    #[test]
    fn test_fragment_of_open_three() {
        let values = grid(10, &[(4, 3, 1), (4, 4, 1), (4, 5, 1)]);
        let fragments = LineEvaluator::new(10, &values).fragments();

        let horizontal = Fragment {
            values: SmallVec::from_slice(&[1, 1, 1, 0]),
            head_blocked: false,
            tail_blocked: false,
        };
        assert!(fragments.contains(&horizontal), "{fragments:?}");
    }

    #[test]
    fn test_fragment_blocked_by_opponent_and_edge() {
        let values = grid(10, &[(0, 5, -1), (0, 6, 1), (0, 7, 1), (0, 8, 1), (0, 9, 1)]);
        let fragments = LineEvaluator::new(10, &values).fragments();

        let edge_run = Fragment {
            values: SmallVec::from_slice(&[1, 1, 1, 1]),
            head_blocked: true,
            tail_blocked: true,
        };
        assert!(fragments.contains(&edge_run), "{fragments:?}");
    }

    #[test]
    fn test_combined_scores_see_both_sides() {
        let values = grid(10, &[(1, 1, -1), (1, 2, -1), (1, 3, -1), (8, 8, 1)]);
        let scores = combined_scores(10, &values, WeightCurve::Steep);
        // The opponent's three dominates our lone stone.
        assert!(scores[10 + 4] > scores[8 * 10 + 9]);
    }

    #[test]
    fn test_weight_curves() {
        assert_eq!(WeightCurve::Gradual.apply(2), 2);
        assert_eq!(WeightCurve::Gradual.apply(3), 4);
        assert_eq!(WeightCurve::Gradual.apply(4), 5);
        assert_eq!(WeightCurve::Steep.apply(4), 6);
        assert_eq!(WeightCurve::Steep.apply(5), 5);

        let values = grid(10, &[(5, 3, 1), (5, 4, 1), (5, 5, 1), (5, 6, 1)]);
        let gradual = LineEvaluator::new(10, &values)
            .with_curve(WeightCurve::Gradual)
            .score_matrix()[5 * 10 + 7];
        let steep = LineEvaluator::new(10, &values).score_matrix()[5 * 10 + 7];
        assert!(gradual > 0);
        assert!(steep > gradual);
    }
}
