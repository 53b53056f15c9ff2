//! Player state: inventory, upcoming tokens, and score.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::core::{Color, Controller, GameRng, PlayerConfig, Result};
use crate::pieces::{registry, TokenKind};

use super::inventory::Inventory;

/// Score step at which a bonus token is granted.
pub const SCORE_REWARD_STEP: i64 = 1000;

/// One participant in a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub color: Color,
    pub controller: Controller,
    inventory: Inventory,
    upcoming: VecDeque<TokenKind>,
    score: i64,
    next_reward: i64,
}

impl Player {
    pub(crate) fn new(config: &PlayerConfig, inventory: Inventory) -> Self {
        Self {
            name: config.name.clone(),
            color: config.color,
            controller: config.controller,
            inventory,
            upcoming: VecDeque::new(),
            score: 0,
            next_reward: 1,
        }
    }

    #[must_use]
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    #[must_use]
    pub fn quantity(&self, kind: TokenKind) -> u32 {
        self.inventory.quantity(kind)
    }

    #[must_use]
    pub fn score(&self) -> i64 {
        self.score
    }

    /// The type that will be played next.
    #[must_use]
    pub fn next_token(&self) -> Option<TokenKind> {
        self.upcoming.front().copied()
    }

    /// Queued types, front first.
    pub fn upcoming(&self) -> impl Iterator<Item = TokenKind> + '_ {
        self.upcoming.iter().copied()
    }

    #[must_use]
    pub fn is_computer(&self) -> bool {
        matches!(self.controller, Controller::Computer(_))
    }

    pub(crate) fn push_front(&mut self, kind: TokenKind) {
        self.upcoming.push_front(kind);
    }

    pub(crate) fn pop_next(&mut self) -> Option<TokenKind> {
        self.upcoming.pop_front()
    }

    /// Draw a new upcoming type when nothing is queued.
    pub(crate) fn refill(&mut self, rng: &mut GameRng) {
        if self.upcoming.is_empty() {
            if let Some(kind) = self.inventory.draw(rng) {
                self.upcoming.push_back(kind);
            }
        }
    }

    pub(crate) fn grant(&mut self, kind: TokenKind, amount: u32) {
        self.inventory.grant(kind, amount);
    }

    pub(crate) fn consume(&mut self, kind: TokenKind) -> Result<()> {
        self.inventory.consume(kind)
    }

    /// Add `amount` to the score, granting a random token type each time the
    /// score passes the next multiple of [`SCORE_REWARD_STEP`].
    ///
    /// Returns the granted type, if any.
    pub(crate) fn add_score(&mut self, amount: i64, rng: &mut GameRng) -> Option<TokenKind> {
        self.score += amount;
        if self.score > SCORE_REWARD_STEP * self.next_reward {
            let kind = registry::random_token(rng);
            self.inventory.grant(kind, 1);
            self.next_reward += 1;
            Some(kind)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        let mut inventory = Inventory::new();
        inventory.set(TokenKind::Normal, 3);
        Player::new(&PlayerConfig::human("Ada", Color::Black), inventory)
    }

    #[test]
    fn test_refill_only_when_empty() {
        let mut rng = GameRng::new(1);
        let mut p = player();
        p.refill(&mut rng);
        assert_eq!(p.next_token(), Some(TokenKind::Normal));

        p.push_front(TokenKind::Heavy);
        p.refill(&mut rng);
        assert_eq!(p.upcoming().collect::<Vec<_>>(), vec![TokenKind::Heavy, TokenKind::Normal]);
    }

    #[test]
    fn test_score_reward_threshold() {
        let mut rng = GameRng::new(1);
        let mut p = player();
        let before = p.inventory().total();

        assert_eq!(p.add_score(1000, &mut rng), None);
        assert!(p.add_score(100, &mut rng).is_some());
        assert_eq!(p.inventory().total(), before + 1);

        // Next reward needs more than 2000.
        assert_eq!(p.add_score(800, &mut rng), None);
        assert!(p.add_score(200, &mut rng).is_some());
        assert_eq!(p.score(), 2100);
    }

    #[test]
    fn test_negative_score_allowed() {
        let mut rng = GameRng::new(1);
        let mut p = player();
        p.add_score(-50, &mut rng);
        assert_eq!(p.score(), -50);
    }
}
