//! Static variant registry for tokens and squares.
//!
//! Each family is an explicit list of variants paired with a factory. The
//! engine never enumerates variants any other way: quantity splits, random
//! grants, and special-square layout all go through these tables.
//!
//! ```
//! use special_gomoku::pieces::registry;
//! use special_gomoku::pieces::TokenKind;
//!
//! assert_eq!(registry::tokens().len(), 4);
//! assert_eq!(registry::token_entry(TokenKind::Heavy).name, "heavy");
//! assert!(registry::special_squares().all(|entry| entry.kind.is_special()));
//! ```

use crate::core::{Color, GameRng, PlayerId, Position, TokenId};

use super::square::{Square, SquareKind};
use super::token::{Token, TokenKind};

/// Registered token variant.
#[derive(Clone, Copy, Debug)]
pub struct TokenEntry {
    pub kind: TokenKind,
    pub name: &'static str,
    pub create: fn(TokenId, PlayerId, Color) -> Token,
}

/// Registered square variant.
#[derive(Clone, Copy, Debug)]
pub struct SquareEntry {
    pub kind: SquareKind,
    pub name: &'static str,
    pub create: fn(Position) -> Square,
}

static TOKENS: [TokenEntry; 4] = [
    TokenEntry {
        kind: TokenKind::Normal,
        name: "normal",
        create: |id, owner, color| Token::new(id, TokenKind::Normal, owner, color),
    },
    TokenEntry {
        kind: TokenKind::Heavy,
        name: "heavy",
        create: |id, owner, color| Token::new(id, TokenKind::Heavy, owner, color),
    },
    TokenEntry {
        kind: TokenKind::Temporary,
        name: "temporary",
        create: |id, owner, color| Token::new(id, TokenKind::Temporary, owner, color),
    },
    TokenEntry {
        kind: TokenKind::Overlap,
        name: "overlap",
        create: |id, owner, color| Token::new(id, TokenKind::Overlap, owner, color),
    },
];

static SQUARES: [SquareEntry; 4] = [
    SquareEntry {
        kind: SquareKind::Normal,
        name: "normal",
        create: |position| Square::new(SquareKind::Normal, position),
    },
    SquareEntry {
        kind: SquareKind::Golden,
        name: "golden",
        create: |position| Square::new(SquareKind::Golden, position),
    },
    SquareEntry {
        kind: SquareKind::Mine,
        name: "mine",
        create: |position| Square::new(SquareKind::Mine, position),
    },
    SquareEntry {
        kind: SquareKind::Teleport,
        name: "teleport",
        create: |position| Square::new(SquareKind::Teleport, position),
    },
];

/// All token variants in registry order.
#[must_use]
pub fn tokens() -> &'static [TokenEntry] {
    &TOKENS
}

/// All square variants in registry order.
#[must_use]
pub fn squares() -> &'static [SquareEntry] {
    &SQUARES
}

#[must_use]
pub fn token_entry(kind: TokenKind) -> &'static TokenEntry {
    &TOKENS[kind as usize]
}

#[must_use]
pub fn square_entry(kind: SquareKind) -> &'static SquareEntry {
    &SQUARES[kind as usize]
}

/// Token variants other than Normal, in registry order.
pub fn special_tokens() -> impl Iterator<Item = &'static TokenEntry> {
    TOKENS.iter().filter(|entry| entry.kind.is_special())
}

/// Square variants other than Normal, in registry order.
pub fn special_squares() -> impl Iterator<Item = &'static SquareEntry> {
    SQUARES.iter().filter(|entry| entry.kind.is_special())
}

/// Uniformly random token variant.
pub fn random_token(rng: &mut GameRng) -> TokenKind {
    TOKENS[rng.gen_index(TOKENS.len())].kind
}

/// Uniformly random special square variant.
pub fn random_special_square(rng: &mut GameRng) -> SquareKind {
    let specials: Vec<SquareKind> = special_squares().map(|entry| entry.kind).collect();
    specials[rng.gen_index(specials.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_match_kind_order() {
        for (entry, kind) in tokens().iter().zip(TokenKind::ALL) {
            assert_eq!(entry.kind, kind);
            assert_eq!(entry.name, kind.name());
        }
        for (entry, kind) in squares().iter().zip(SquareKind::ALL) {
            assert_eq!(entry.kind, kind);
            assert_eq!(entry.name, kind.name());
        }
    }

    #[test]
    fn test_factories_build_their_kind() {
        for entry in tokens() {
            let token = (entry.create)(TokenId::new(9), PlayerId::TWO, Color::White);
            assert_eq!(token.kind, entry.kind);
            assert_eq!(token.owner, PlayerId::TWO);
            assert_eq!(token.position, None);
        }
        for entry in squares() {
            let square = (entry.create)(Position::new(4, 4));
            assert_eq!(square.kind, entry.kind);
            assert!(square.is_empty());
        }
    }

    #[test]
    fn test_special_filters() {
        let tokens: Vec<_> = special_tokens().map(|e| e.kind).collect();
        assert_eq!(
            tokens,
            vec![TokenKind::Heavy, TokenKind::Temporary, TokenKind::Overlap]
        );
        assert_eq!(special_squares().count(), 3);
    }

    #[test]
    fn test_random_special_square_never_normal() {
        let mut rng = GameRng::new(3);
        for _ in 0..100 {
            assert_ne!(random_special_square(&mut rng), SquareKind::Normal);
        }
    }
}
