//! Squares: the cells of the board.
//!
//! A square holds at most one token. Special squares change what happens
//! when a token lands on them:
//!
//! - **Golden**: grants a random token type; when that type is Normal, the
//!   mover must play two Normal tokens in a row two turns later
//! - **Mine**: scores and then wipes the surrounding 3×3 block
//! - **Teleport**: sends the token to a random empty cell

use serde::{Deserialize, Serialize};

use crate::core::{Position, TokenId};

/// Square variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SquareKind {
    Normal,
    Golden,
    Mine,
    Teleport,
}

impl SquareKind {
    pub const ALL: [SquareKind; 4] = [
        SquareKind::Normal,
        SquareKind::Golden,
        SquareKind::Mine,
        SquareKind::Teleport,
    ];

    #[must_use]
    pub const fn is_special(self) -> bool {
        !matches!(self, SquareKind::Normal)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            SquareKind::Normal => "normal",
            SquareKind::Golden => "golden",
            SquareKind::Mine => "mine",
            SquareKind::Teleport => "teleport",
        }
    }
}

impl std::fmt::Display for SquareKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Two-activation protocol state of a golden square.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoldenState {
    /// Turn of the first activation; `None` when idle.
    pub created_turn: Option<i32>,
    /// Set once the first of the two forced Normal tokens has been played.
    pub entered: bool,
}

/// A board cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Square {
    pub kind: SquareKind,
    pub position: Position,
    /// Occupant, including a token that is pending installation.
    pub token: Option<TokenId>,
    pub golden: GoldenState,
}

impl Square {
    #[must_use]
    pub fn new(kind: SquareKind, position: Position) -> Self {
        Self {
            kind,
            position,
            token: None,
            golden: GoldenState::default(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.token.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_square_is_idle() {
        let square = Square::new(SquareKind::Golden, Position::new(1, 2));
        assert!(square.is_empty());
        assert_eq!(square.golden, GoldenState::default());
        assert!(square.kind.is_special());
        assert!(!SquareKind::Normal.is_special());
    }
}
