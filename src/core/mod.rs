//! Core engine types: positions, players, token ids, RNG, configuration, errors.
//!
//! Everything above this module (pieces, board, rules, search) is built on
//! these types and shares them through re-exports.

pub mod config;
pub mod entity;
pub mod error;
pub mod player;
pub mod position;
pub mod rng;

pub use config::{Controller, GameConfig, GameMode, PlayerConfig, MIN_BOARD_SIZE};
pub use entity::TokenId;
pub use error::{GomokuError, Result};
pub use player::{Color, PlayerId, PlayerMap};
pub use position::{Direction, Position};
pub use rng::{GameRng, GameRngState};
