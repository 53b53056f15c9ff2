//! Built-in strategies.
//!
//! - `Aggressive` only defends: it plays where the opponent's formations
//!   are strongest.
//! - `Expert` averages attack and defense.
//! - `Perfect` runs the minimax search.
//!
//! The two heuristic players boost three- and four-token windows gradually.
//! All three open at the centre of an empty board.

use crate::core::{GomokuError, PlayerId, Position, Result};
use crate::rules::GameState;
use crate::search::{
    combined_scores, LineEvaluator, MinimaxSearch, SearchBoard, SearchConfig, WeightCurve,
};

use super::Strategy;

fn centre(state: &GameState) -> Position {
    let middle = state.size() / 2;
    Position::new(middle, middle)
}

/// Highest-scoring empty cell; ties go to the lower row-major index.
fn best_empty(state: &GameState, scores: &[i64]) -> Result<Position> {
    let size = state.size();
    state
        .board()
        .empty_positions()
        .map(|position| (position, scores[position.index(size)]))
        .fold(None, |best: Option<(Position, i64)>, (position, score)| match best {
            Some((_, top)) if top >= score => best,
            _ => Some((position, score)),
        })
        .map(|(position, _)| position)
        .ok_or(GomokuError::NoCandidateMove)
}

/// Blocks the opponent's best formation.
#[derive(Clone, Copy, Debug, Default)]
pub struct Aggressive;

impl Strategy for Aggressive {
    fn name(&self) -> &'static str {
        "aggressive"
    }

    fn choose_move(&self, state: &GameState, player: PlayerId) -> Result<Position> {
        if state.board().occupied() == 0 {
            return Ok(centre(state));
        }
        let opponent = state.player(player.opponent()).color;
        let values = state.board().signed_values(opponent);
        let scores = LineEvaluator::new(state.size(), &values)
            .with_curve(WeightCurve::Gradual)
            .score_matrix();
        best_empty(state, &scores)
    }
}

/// Balances extending its own lines with blocking the opponent's.
#[derive(Clone, Copy, Debug, Default)]
pub struct Expert;

impl Strategy for Expert {
    fn name(&self) -> &'static str {
        "expert"
    }

    fn choose_move(&self, state: &GameState, player: PlayerId) -> Result<Position> {
        if state.board().occupied() == 0 {
            return Ok(centre(state));
        }
        let own = state.player(player).color;
        let values = state.board().signed_values(own);
        best_empty(
            state,
            &combined_scores(state.size(), &values, WeightCurve::Gradual),
        )
    }
}

/// Minimax with alpha-beta over the top candidate cells.
#[derive(Clone, Debug, Default)]
pub struct Perfect {
    config: SearchConfig,
}

impl Perfect {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

impl Strategy for Perfect {
    fn name(&self) -> &'static str {
        "perfect"
    }

    fn choose_move(&self, state: &GameState, player: PlayerId) -> Result<Position> {
        let root = SearchBoard::from_state(state, player);
        let mut search = MinimaxSearch::new(self.config.clone());
        Ok(search.search(&root)?.best_move)
    }
}
