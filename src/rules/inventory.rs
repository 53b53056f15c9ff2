//! Token quantities per player.
//!
//! Quantities are seeded once per game from the token budget: the special
//! share is split pseudo-randomly across the special token types, and the
//! rest are Normal. Both players receive identical inventories.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{GameRng, GomokuError, Result};
use crate::pieces::{registry, TokenKind};

/// Remaining quantity of each token type.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    counts: FxHashMap<TokenKind, u32>,
}

impl Inventory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Split `budget` tokens, `special_percentage` percent of them special.
    ///
    /// ```
    /// use special_gomoku::core::GameRng;
    /// use special_gomoku::rules::Inventory;
    /// use special_gomoku::pieces::TokenKind;
    ///
    /// let mut rng = GameRng::new(1);
    /// let inventory = Inventory::split(100, 30, &mut rng);
    /// assert_eq!(inventory.total(), 100);
    /// assert_eq!(inventory.quantity(TokenKind::Normal), 70);
    /// ```
    pub fn split(budget: u32, special_percentage: u32, rng: &mut GameRng) -> Self {
        let mut inventory = Self::new();
        let special = u64::from(budget) * u64::from(special_percentage.min(100)) / 100;
        let mut remaining = u32::try_from(special).unwrap_or(budget);
        inventory.set(TokenKind::Normal, budget - remaining);

        let specials: Vec<TokenKind> = registry::special_tokens().map(|entry| entry.kind).collect();
        for &kind in &specials {
            let share = rng.gen_below(remaining);
            inventory.set(kind, share);
            remaining -= share;
        }
        if let Some(&last) = specials.last() {
            inventory.grant(last, remaining);
        }

        inventory
    }

    #[must_use]
    pub fn quantity(&self, kind: TokenKind) -> u32 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn set(&mut self, kind: TokenKind, quantity: u32) {
        self.counts.insert(kind, quantity);
    }

    pub fn grant(&mut self, kind: TokenKind, amount: u32) {
        let count = self.counts.entry(kind).or_insert(0);
        *count = count.saturating_add(amount);
    }

    /// Take one token of `kind`.
    pub fn consume(&mut self, kind: TokenKind) -> Result<()> {
        match self.counts.get_mut(&kind) {
            Some(count) if *count > 0 => {
                *count -= 1;
                Ok(())
            }
            _ => Err(GomokuError::NoTokensRemaining),
        }
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.counts.values().fold(0, |total, &count| total.saturating_add(count))
    }

    /// (kind, quantity) pairs in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (TokenKind, u32)> + '_ {
        TokenKind::ALL.into_iter().map(|kind| (kind, self.quantity(kind)))
    }

    /// Draw a type with probability proportional to its remaining quantity.
    pub fn draw(&self, rng: &mut GameRng) -> Option<TokenKind> {
        let weights: Vec<u32> = TokenKind::ALL.iter().map(|&kind| self.quantity(kind)).collect();
        rng.choose_weighted(&weights).map(|index| TokenKind::ALL[index])
    }
}
