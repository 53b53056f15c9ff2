//! Token identification.
//!
//! Every token created during a game gets a unique `TokenId`. Squares and the
//! effect queue refer to tokens by id; the board's token arena owns the data.
//!
//! Ids are allocated sequentially per game and never reused, so a stale id
//! held by an effect can always be told apart from the token that replaced it.
//!
//! ```
//! use special_gomoku::core::TokenId;
//!
//! let first = TokenId::new(0);
//! assert_eq!(first.next(), TokenId::new(1));
//! assert_eq!(format!("{}", first), "Token(0)");
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a token within one game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TokenId(pub u32);

impl TokenId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw id value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// The id allocated after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token({})", self.0)
    }
}
