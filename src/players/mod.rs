//! Computer players.
//!
//! Strategies are registered statically in [`StrategyKind`]; a config names
//! the kind and the session builds the strategy with [`StrategyKind::create`].
//! Every strategy reads a snapshot of the game and never mutates it.

pub mod strategies;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::{GomokuError, PlayerId, Position, Result};
use crate::rules::GameState;
use crate::search::SearchConfig;

pub use strategies::{Aggressive, Expert, Perfect};

/// Decides the next move for one player.
pub trait Strategy: Send + Sync {
    /// Short name for diagnostics.
    fn name(&self) -> &'static str;

    /// Choose where `player` should play next on `state`.
    fn choose_move(&self, state: &GameState, player: PlayerId) -> Result<Position>;
}

/// Registered computer strategies, weakest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrategyKind {
    Aggressive,
    Expert,
    Perfect,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 3] =
        [StrategyKind::Aggressive, StrategyKind::Expert, StrategyKind::Perfect];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            StrategyKind::Aggressive => "aggressive",
            StrategyKind::Expert => "expert",
            StrategyKind::Perfect => "perfect",
        }
    }

    /// Build the strategy with its default parameters.
    #[must_use]
    pub fn create(self) -> Box<dyn Strategy> {
        match self {
            StrategyKind::Aggressive => Box::new(Aggressive),
            StrategyKind::Expert => Box::new(Expert),
            StrategyKind::Perfect => Box::new(Perfect::new(SearchConfig::default())),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for StrategyKind {
    type Err = GomokuError;

    fn from_str(s: &str) -> Result<Self> {
        StrategyKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| GomokuError::InvalidConfig(format!("unknown strategy `{s}`")))
    }
}
