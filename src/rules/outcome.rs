//! Game outcomes and per-move reports.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, Position, TokenId};
use crate::pieces::TokenKind;

/// Result of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Winner(PlayerId),
    /// Board full, or the player to move has nothing left to play.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }
}

/// What happened when a move was applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub player: PlayerId,
    pub kind: TokenKind,
    pub token: TokenId,
    /// Where the token ended up. Differs from the target after a teleport;
    /// `None` when an effect removed it.
    pub landed: Option<Position>,
    pub winner: Option<PlayerId>,
}
