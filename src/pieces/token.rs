//! Tokens: the stones players place.
//!
//! Four variants exist. All of them carry an owner, a color and a value used
//! by win detection (Heavy counts double). Effects run when the token is
//! installed; see `effects::resolver` for what each variant does.
//!
//! ## Placement legality
//!
//! | incoming | occupant                 | result                     |
//! |----------|--------------------------|----------------------------|
//! | any      | none                     | legal                      |
//! | non-Overlap | any                   | `InvalidOverlap`           |
//! | Overlap  | same color               | `InvalidOverlapSameColor`  |
//! | Overlap  | other color, Overlap     | `InvalidOverlap`           |
//! | Overlap  | other color, other kind  | legal, occupant displaced  |

use serde::{Deserialize, Serialize};

use crate::core::{Color, GomokuError, PlayerId, Position, Result, TokenId};

/// Token variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TokenKind {
    Normal,
    /// Worth two cells toward a five.
    Heavy,
    /// Vanishes three turns after it was placed.
    Temporary,
    /// May cover an opponent's token.
    Overlap,
}

impl TokenKind {
    /// Registry order. Quantity splits and weighted draws walk this order.
    pub const ALL: [TokenKind; 4] = [
        TokenKind::Normal,
        TokenKind::Heavy,
        TokenKind::Temporary,
        TokenKind::Overlap,
    ];

    /// Contribution to a winning line.
    #[must_use]
    pub const fn value(self) -> i32 {
        match self {
            TokenKind::Heavy => 2,
            TokenKind::Normal | TokenKind::Temporary | TokenKind::Overlap => 1,
        }
    }

    #[must_use]
    pub const fn is_special(self) -> bool {
        !matches!(self, TokenKind::Normal)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            TokenKind::Normal => "normal",
            TokenKind::Heavy => "heavy",
            TokenKind::Temporary => "temporary",
            TokenKind::Overlap => "overlap",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for TokenKind {
    type Err = GomokuError;

    fn from_str(s: &str) -> Result<Self> {
        TokenKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| GomokuError::InvalidConfig(format!("unknown token type `{s}`")))
    }
}

/// A token instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub id: TokenId,
    pub kind: TokenKind,
    pub owner: PlayerId,
    pub color: Color,
    /// Cell the token is installed on; `None` while pending or after removal.
    pub position: Option<Position>,
    /// Temporary: turn of its first activation.
    pub created_turn: Option<i32>,
    /// Overlap: the token it covered.
    pub displaced: Option<TokenId>,
}

impl Token {
    #[must_use]
    pub fn new(id: TokenId, kind: TokenKind, owner: PlayerId, color: Color) -> Self {
        Self {
            id,
            kind,
            owner,
            color,
            position: None,
            created_turn: None,
            displaced: None,
        }
    }

    #[must_use]
    pub const fn value(&self) -> i32 {
        self.kind.value()
    }

    /// Decide whether this token may be placed over `occupant`.
    ///
    /// On success returns the token that gets displaced, which is only ever
    /// `Some` for an Overlap covering an opponent's token.
    pub fn admits(&self, occupant: Option<&Token>) -> Result<Option<TokenId>> {
        let Some(occupant) = occupant else {
            return Ok(None);
        };

        match self.kind {
            TokenKind::Overlap if occupant.color == self.color => {
                Err(GomokuError::InvalidOverlapSameColor)
            }
            TokenKind::Overlap if occupant.kind == TokenKind::Overlap => {
                Err(GomokuError::InvalidOverlap)
            }
            TokenKind::Overlap => Ok(Some(occupant.id)),
            TokenKind::Normal | TokenKind::Heavy | TokenKind::Temporary => {
                Err(GomokuError::InvalidOverlap)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(id: u32, kind: TokenKind, color: Color) -> Token {
        let owner = if color == Color::Black {
            PlayerId::ONE
        } else {
            PlayerId::TWO
        };
        Token::new(TokenId::new(id), kind, owner, color)
    }

    #[test]
    fn test_values() {
        assert_eq!(TokenKind::Normal.value(), 1);
        assert_eq!(TokenKind::Heavy.value(), 2);
        assert_eq!(TokenKind::Temporary.value(), 1);
        assert_eq!(TokenKind::Overlap.value(), 1);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("Heavy".parse::<TokenKind>(), Ok(TokenKind::Heavy));
        assert_eq!("overlap".parse::<TokenKind>(), Ok(TokenKind::Overlap));
        assert!("golden".parse::<TokenKind>().is_err());
    }

    // =========================================================================
    // Overlap legality matrix
    // =========================================================================

    #[test]
    fn test_empty_cell_is_legal() {
        for kind in TokenKind::ALL {
            let incoming = token(0, kind, Color::Black);
            assert_eq!(incoming.admits(None), Ok(None));
        }
    }

    #[test]
    fn test_same_color_normal_occupant() {
        let incoming = token(0, TokenKind::Normal, Color::Black);
        let occupant = token(1, TokenKind::Normal, Color::Black);
        assert_eq!(incoming.admits(Some(&occupant)), Err(GomokuError::InvalidOverlap));
    }

    #[test]
    fn test_overlap_onto_same_color_overlap() {
        let incoming = token(0, TokenKind::Overlap, Color::Black);
        let occupant = token(1, TokenKind::Overlap, Color::Black);
        assert_eq!(
            incoming.admits(Some(&occupant)),
            Err(GomokuError::InvalidOverlapSameColor)
        );
    }

    #[test]
    fn test_overlap_onto_other_color_normal() {
        let incoming = token(0, TokenKind::Overlap, Color::Black);
        let occupant = token(1, TokenKind::Normal, Color::White);
        assert_eq!(incoming.admits(Some(&occupant)), Ok(Some(TokenId::new(1))));
    }

    #[test]
    fn test_overlap_onto_other_color_overlap() {
        let incoming = token(0, TokenKind::Overlap, Color::Black);
        let occupant = token(1, TokenKind::Overlap, Color::White);
        assert_eq!(incoming.admits(Some(&occupant)), Err(GomokuError::InvalidOverlap));
    }

    #[test]
    fn test_overlap_onto_other_color_heavy() {
        let incoming = token(0, TokenKind::Overlap, Color::White);
        let occupant = token(1, TokenKind::Heavy, Color::Black);
        assert_eq!(incoming.admits(Some(&occupant)), Ok(Some(TokenId::new(1))));
    }

    #[test]
    fn test_plain_tokens_never_cover() {
        let occupant = token(1, TokenKind::Temporary, Color::White);
        for kind in [TokenKind::Normal, TokenKind::Heavy, TokenKind::Temporary] {
            let incoming = token(0, kind, Color::Black);
            assert_eq!(incoming.admits(Some(&occupant)), Err(GomokuError::InvalidOverlap));
        }
    }
}
