//! Pattern table for leaf evaluation.
//!
//! Each fragment found by the line evaluator is encoded as a run over
//! `{-1, 0, 1}` (opposing, empty, friendly), with `-1` added at a blocked
//! end, then matched against this ordered table. A fragment matches a
//! pattern as-is, reversed, or padded with one empty cell at an end that is
//! not blocked.

use smallvec::SmallVec;

use super::evaluator::Fragment;

/// A run encoding and its heuristic weight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pattern {
    pub cells: &'static [i32],
    pub weight: i64,
}

const fn pattern(cells: &'static [i32], weight: i64) -> Pattern {
    Pattern { cells, weight }
}

/// Ordered pattern table: fives, fours, threes, twos, then dead shapes.
pub const PATTERNS: [Pattern; 24] = [
    pattern(&[1, 1, 1, 1, 1, 0], 100_000),
    pattern(&[-1, 1, 1, 1, 1, 1, -1], 100_000),
    pattern(&[-1, 1, 1, 1, 1, 1, 0], 100_000),
    pattern(&[0, 1, 1, 1, 1, 0], 1_000),
    pattern(&[0, 1, 1, 1, 1, -1], 1_000),
    pattern(&[0, 1, 0, 1, 1, 1, 0], 1_000),
    pattern(&[0, 1, 1, 0, 1, 1, 0], 1_000),
    pattern(&[0, 1, 1, 1, 0], 200),
    pattern(&[0, 1, 0, 1, 1, 0], 200),
    pattern(&[0, 0, 1, 1, 1, -1], 20),
    pattern(&[0, 1, 0, 1, 1, -1], 20),
    pattern(&[0, 1, 1, 0, 1, -1], 20),
    pattern(&[1, 0, 0, 1, 1, 0], 20),
    pattern(&[1, 0, 1, 0, 1, 0], 20),
    pattern(&[-1, 0, 1, 1, 1, 0, -1], 20),
    pattern(&[0, 0, 1, 1, 0], 10),
    pattern(&[0, 1, 0, 1, 0], 10),
    pattern(&[0, 1, 0, 0, 1, 0], 10),
    pattern(&[0, 0, 1, 1, -1], 5),
    pattern(&[0, 0, 1, 0, 1, -1], 5),
    pattern(&[0, 1, 0, 0, 1, -1], 5),
    pattern(&[-1, 0, 1, 0, 1, 0, -1], 5),
    pattern(&[-1, 1, 1, 1, 1, -1], -10),
    pattern(&[-1, 1, 1, 1, 1, 1, -1], -15),
];

/// Encode a fragment with its blocked ends.
fn encode(fragment: &Fragment) -> SmallVec<[i32; 12]> {
    let mut run = SmallVec::new();
    if fragment.head_blocked {
        run.push(-1);
    }
    run.extend(fragment.values.iter().copied());
    if fragment.tail_blocked && fragment.values.last().is_some_and(|&v| v > 0) {
        run.push(-1);
    }
    run
}

fn matches(run: &[i32], pattern: &[i32], pad_front: bool, pad_back: bool) -> bool {
    let extra = usize::from(pad_front) + usize::from(pad_back);
    if run.len() + extra != pattern.len() {
        return false;
    }
    let body = if pad_front { &pattern[1..] } else { pattern };
    let body = if pad_back { &body[..body.len() - 1] } else { body };
    (!pad_front || pattern[0] == 0) && (!pad_back || pattern[pattern.len() - 1] == 0) && body == run
}

/// Sum of the weights of every pattern the fragment matches.
#[must_use]
pub fn score_fragment(fragment: &Fragment) -> i64 {
    let run = encode(fragment);
    let reversed: SmallVec<[i32; 12]> = run.iter().rev().copied().collect();

    PATTERNS
        .iter()
        .filter(|p| {
            matches(&run, p.cells, false, false)
                || matches(&reversed, p.cells, false, false)
                || (!fragment.head_blocked && matches(&run, p.cells, true, false))
                || (!fragment.tail_blocked && matches(&run, p.cells, false, true))
        })
        .map(|p| p.weight)
        .sum()
}

/// Weight of an opponent fragment: dead fours and fives count as threats.
#[must_use]
pub fn threat_weight(score: i64) -> i64 {
    match score {
        -10..=-1 => 1_000,
        -20..=-11 => 10_000,
        other => other,
    }
}
