//! Move search for computer players.
//!
//! ## Overview
//!
//! - **Line evaluator**: scores empty cells by the formations they extend,
//!   and lists friendly runs for leaf evaluation
//! - **Pattern table**: weights runs (fives, open and closed fours, ...)
//! - **Minimax**: depth-limited alpha-beta over a `{-1, 0, +1}` board, with
//!   candidate moves pruned to the best `top_k` cells
//!
//! ## Usage
//!
//! ```rust
//! use special_gomoku::core::{GameConfig, Position};
//! use special_gomoku::rules::GameState;
//! use special_gomoku::search::{MinimaxSearch, SearchBoard, SearchConfig};
//!
//! let mut game = GameState::new(GameConfig::default()).unwrap();
//! game.play(Position::new(7, 7)).unwrap();
//!
//! let root = SearchBoard::from_state(&game, game.current_player());
//! let mut search = MinimaxSearch::new(SearchConfig::default().with_depth(2));
//! let result = search.search(&root).unwrap();
//! assert!(game.board().is_empty_at(result.best_move));
//! ```

pub mod board;
pub mod config;
pub mod evaluator;
pub mod minimax;
pub mod patterns;
pub mod stats;

pub use board::SearchBoard;
pub use config::SearchConfig;
pub use evaluator::{combined_scores, Fragment, LineEvaluator, WeightCurve};
pub use minimax::{candidates, evaluate, MinimaxSearch, SearchResult, WIN_SCORE};
pub use patterns::{score_fragment, threat_weight, Pattern, PATTERNS};
pub use stats::SearchStats;
