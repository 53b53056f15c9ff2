//! # special-gomoku
//!
//! A five-in-a-row rules engine with special squares, special tokens, and
//! computer players.
//!
//! ## Design Principles
//!
//! 1. **Per-game state**: everything lives in a `GameState`. There are no
//!    globals, so games can run side by side and be tested in isolation.
//!
//! 2. **Static registries**: token, square, and strategy variants are
//!    explicit tables with factories. Nothing is discovered at runtime.
//!
//! 3. **Atomic moves**: a move either fully applies, effect cascade
//!    included, or leaves the game exactly as it was.
//!
//! ## Architecture
//!
//! - **Effect queue**: after a placement, squares and tokens attached to
//!   the queue run their effects in order. Entities detach themselves
//!   mid-pass without disturbing the rest of the pass.
//!
//! - **Persistent Data Structures**: O(1) cloning via `im-rs` for rollback
//!   and search snapshots.
//!
//! - **Deterministic randomness**: a seeded ChaCha stream drives layout,
//!   token draws, teleports, and golden squares, and is saved with the game.
//!
//! ## Modules
//!
//! - `core`: positions, players, token ids, RNG, configuration, errors
//! - `pieces`: token and square variants and their registry
//! - `board`: the grid, the token arena, and win detection
//! - `effects`: the effect queue and the square/token effect resolver
//! - `rules`: `GameState`, players, inventories, outcomes
//! - `search`: line evaluator, pattern table, minimax with alpha-beta
//! - `players`: computer strategies
//! - `session`: shared game, computer driver, clocks, change events
//!
//! ```
//! use special_gomoku::{GameConfig, GameState, PlayerId, Position};
//!
//! let mut game = GameState::new(GameConfig::default()).unwrap();
//! for col in 0..4 {
//!     game.play(Position::new(0, col)).unwrap();
//!     game.play(Position::new(5, col)).unwrap();
//! }
//! let outcome = game.play(Position::new(0, 4)).unwrap();
//! assert_eq!(outcome.winner, Some(PlayerId::ONE));
//! ```

pub mod board;
pub mod core;
pub mod effects;
pub mod pieces;
pub mod players;
pub mod rules;
pub mod search;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Color, Controller, Direction, GameConfig, GameMode, GameRng, GameRngState, GomokuError,
    PlayerConfig, PlayerId, PlayerMap, Position, Result, TokenId, MIN_BOARD_SIZE,
};

pub use crate::pieces::{Square, SquareKind, Token, TokenKind};

pub use crate::board::{Board, WIN_VALUE};

pub use crate::effects::{EffectQueue, Observer};

pub use crate::rules::{GameResult, GameState, Inventory, MoveOutcome, Player};

pub use crate::search::{MinimaxSearch, SearchBoard, SearchConfig, SearchResult, SearchStats};

pub use crate::players::{Strategy, StrategyKind};

pub use crate::session::{ClockTick, Session, SessionEvent};
