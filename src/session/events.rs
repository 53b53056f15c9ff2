//! Change notifications for a presentation layer.

use crate::core::{GomokuError, PlayerId};

/// Emitted by a [`Session`](super::Session) after every change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// A move was applied, or the next token changed.
    StateChanged,
    ClockTick(ClockTick),
    /// A computer player could not produce a legal move this round.
    ComputerMoveFailed { player: PlayerId, error: GomokuError },
}

/// One clock update for the player to move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClockTick {
    pub player: PlayerId,
    /// Remaining time on a limited clock, elapsed time otherwise.
    /// Negative once the player's clock has run out.
    pub millis: i64,
}

impl ClockTick {
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.millis < 0
    }
}
