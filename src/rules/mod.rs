//! Game rules: state, players, inventories, outcomes.
//!
//! `GameState` is the single entry point for playing a game. Placement and
//! effect resolution live in `effects::resolver` as further `GameState`
//! methods.

pub mod inventory;
pub mod outcome;
pub mod player;
pub mod state;

pub use inventory::Inventory;
pub use outcome::{GameResult, MoveOutcome};
pub use player::{Player, SCORE_REWARD_STEP};
pub use state::GameState;
