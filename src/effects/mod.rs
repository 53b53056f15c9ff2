//! Post-placement effects.
//!
//! - `queue`: the re-entrant effect queue with tombstoning removal
//! - `resolver`: what each square and token does when its turn comes

pub mod queue;
pub mod resolver;

use serde::{Deserialize, Serialize};

use crate::core::{Position, TokenId};

pub use queue::EffectQueue;
pub use resolver::{EFFECT_REWARD, GOLDEN_DELAY, MINE_PENALTY, MINE_REWARD, TEMPORARY_LIFETIME};

/// An entity waiting in the effect queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Observer {
    /// The square at this cell.
    Square(Position),
    Token(TokenId),
}
