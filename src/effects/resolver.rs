//! Placement and effect resolution.
//!
//! ## Placement path
//!
//! 1. `play_token` checks the incoming token against the occupant, puts it
//!    on the square as pending, attaches the square, and drains the queue.
//! 2. The square's effect installs the token (`set_token`), which attaches
//!    the token and drains again, then adjusts the turn.
//! 3. Token effects score, expire, or resolve what an Overlap covered.
//!
//! Effects may call back into `play_token` and `set_token`, so drains nest.
//! Any error aborts the drain and propagates to `GameState::play`, which
//! rolls the whole move back.

use crate::core::{GomokuError, Position, Result, TokenId};
use crate::pieces::{registry, GoldenState, SquareKind, TokenKind};
use crate::rules::GameState;

use super::Observer;

/// Score for placing a special token, and for each extra Overlap bonus.
pub const EFFECT_REWARD: i64 = 100;
/// Mine score per opposing token caught in the blast.
pub const MINE_REWARD: i64 = 100;
/// Mine score per own token caught in the blast.
pub const MINE_PENALTY: i64 = -50;
/// Turns a Temporary token survives after its first activation.
pub const TEMPORARY_LIFETIME: i32 = 3;
/// Turns between a golden square's activation and its forced Normal pair.
pub const GOLDEN_DELAY: i32 = 2;

impl GameState {
    /// Place `token` at `position` after checking the occupant.
    pub(crate) fn play_token(&mut self, token: TokenId, position: Position) -> Result<()> {
        self.board.set_last_token(token);

        let occupant = self.board.square(position).token;
        let displaced = self
            .board
            .token_unchecked(token)
            .admits(occupant.and_then(|id| self.board.token(id)))?;
        if let Some(incoming) = self.board.token_mut(token) {
            incoming.displaced = displaced;
        }

        self.board.square_mut(position).token = Some(token);
        self.queue.attach(Observer::Square(position));
        self.notify()
    }

    /// Install `token` at `position` without any check, or clear the square
    /// when `token` is `None`.
    pub(crate) fn set_token(&mut self, token: Option<TokenId>, position: Position) -> Result<()> {
        match token {
            Some(id) => {
                self.board.install(id, position);
                self.queue.attach(Observer::Token(id));
                self.notify()
            }
            None => {
                self.clear_square(position);
                Ok(())
            }
        }
    }

    /// Remove whatever token sits at `position` and cancel its effects.
    pub(crate) fn clear_square(&mut self, position: Position) {
        if let Some(id) = self.board.remove(position) {
            self.queue.detach(&Observer::Token(id));
        }
    }

    /// Run one pass over the effect queue.
    pub(crate) fn notify(&mut self) -> Result<()> {
        self.queue.begin_pass();

        let mut result = Ok(());
        let mut index = 0;
        while let Some(slot) = self.queue.slot(index) {
            if let Some(observer) = slot {
                result = self.act(observer);
                if result.is_err() {
                    break;
                }
            }
            index += 1;
        }

        self.queue.end_pass();
        result
    }

    fn act(&mut self, observer: Observer) -> Result<()> {
        match observer {
            Observer::Square(position) => {
                let kind = self.board.square(position).kind;
                match kind {
                    SquareKind::Normal => self.settle(position),
                    SquareKind::Mine => self.detonate(position),
                    SquareKind::Teleport => self.teleport(position),
                    SquareKind::Golden => self.golden(position),
                }
            }
            Observer::Token(id) => {
                let (kind, owner) = {
                    let token = self.board.token_unchecked(id);
                    (token.kind, token.owner)
                };
                match kind {
                    TokenKind::Normal => {
                        self.queue.detach(&observer);
                        Ok(())
                    }
                    TokenKind::Heavy => {
                        self.queue.detach(&observer);
                        self.award(owner, EFFECT_REWARD);
                        Ok(())
                    }
                    TokenKind::Temporary => {
                        self.tick_temporary(id);
                        Ok(())
                    }
                    TokenKind::Overlap => self.resolve_overlap(id),
                }
            }
        }
    }

    // =========================================================================
    // Squares
    // =========================================================================

    /// Install the token pending on `position`.
    fn install_pending(&mut self, position: Position) -> Result<()> {
        let pending = self.board.square(position).token;
        self.set_token(pending, position)
    }

    fn settle(&mut self, position: Position) -> Result<()> {
        self.queue.detach(&Observer::Square(position));
        self.install_pending(position)?;
        self.advance_turn();
        Ok(())
    }

    fn detonate(&mut self, position: Position) -> Result<()> {
        self.queue.detach(&Observer::Square(position));
        let placed = self
            .board
            .square(position)
            .token
            .map(|id| self.board.token_unchecked(id))
            .map(|token| (token.owner, token.color));
        self.install_pending(position)?;

        let size = self.board.size();
        if let Some((owner, color)) = placed {
            for cell in position.neighborhood(size) {
                if let Some(other) = self.board.color_at(cell) {
                    let delta = if other == color {
                        MINE_PENALTY
                    } else {
                        MINE_REWARD
                    };
                    self.award(owner, delta);
                }
            }
        }
        for cell in position.neighborhood(size) {
            self.clear_square(cell);
        }

        self.advance_turn();
        Ok(())
    }

    fn teleport(&mut self, position: Position) -> Result<()> {
        self.queue.detach(&Observer::Square(position));
        let Some(token) = self.board.square(position).token else {
            return Ok(());
        };

        let empty: Vec<Position> = self.board.empty_positions().collect();
        match self.rng.choose(&empty).copied() {
            Some(destination) => {
                self.board.square_mut(position).token = None;
                self.play_token(token, destination)
            }
            // Nowhere to go: the token stays.
            None => {
                self.set_token(Some(token), position)?;
                self.advance_turn();
                Ok(())
            }
        }
    }

    fn golden(&mut self, position: Position) -> Result<()> {
        let state = self.board.square(position).golden;
        let Some(created) = state.created_turn else {
            return self.open_golden(position);
        };
        if created + GOLDEN_DELAY == self.turn {
            self.enforce_golden(position, state)?;
        }
        self.settle_golden(position)
    }

    /// A token played onto a golden square that is already open is still
    /// pending, since the square stays attached: install it like a Normal
    /// square would.
    fn settle_golden(&mut self, position: Position) -> Result<()> {
        let pending = self
            .board
            .square(position)
            .token
            .filter(|&id| self.board.token_unchecked(id).position != Some(position));
        if pending.is_some() {
            self.set_token(pending, position)?;
            self.advance_turn();
        }
        Ok(())
    }

    fn open_golden(&mut self, position: Position) -> Result<()> {
        self.board.square_mut(position).golden.created_turn = Some(self.turn);

        let mover = self.current_player();
        let kind = registry::random_token(&mut self.rng);
        if kind == TokenKind::Normal {
            // Two Normal tokens are owed at turn + 2.
            self.players[mover].grant(kind, 1);
            self.players[mover].push_front(kind);
            self.players[mover].push_front(kind);
        } else {
            self.queue.detach(&Observer::Square(position));
            self.board.square_mut(position).golden = GoldenState::default();
        }
        self.players[mover].grant(kind, 1);

        self.install_pending(position)?;
        self.advance_turn();
        Ok(())
    }

    fn enforce_golden(&mut self, position: Position, state: GoldenState) -> Result<()> {
        let Some(last) = self.board.last_token().map(|token| token.kind) else {
            return Ok(());
        };

        if last != TokenKind::Normal {
            return Err(GomokuError::InvalidTokenToPlay);
        }
        if state.entered {
            self.queue.detach(&Observer::Square(position));
            self.board.square_mut(position).golden = GoldenState::default();
        } else {
            self.rewind_turn();
            self.board.square_mut(position).golden.entered = true;
        }
        Ok(())
    }

    // =========================================================================
    // Tokens
    // =========================================================================

    fn tick_temporary(&mut self, id: TokenId) {
        let (owner, position, created_turn) = {
            let token = self.board.token_unchecked(id);
            (token.owner, token.position, token.created_turn)
        };

        match created_turn {
            None => {
                let turn = self.turn;
                if let Some(token) = self.board.token_mut(id) {
                    token.created_turn = Some(turn);
                }
                self.award(owner, EFFECT_REWARD);
            }
            Some(created) if created + TEMPORARY_LIFETIME == self.turn => {
                self.queue.detach(&Observer::Token(id));
                if let Some(position) = position {
                    if self.board.square(position).token == Some(id) {
                        self.clear_square(position);
                    }
                }
            }
            Some(_) => {}
        }
    }

    fn resolve_overlap(&mut self, id: TokenId) -> Result<()> {
        self.queue.detach(&Observer::Token(id));
        let token = self.board.token_unchecked(id).clone();
        self.award(token.owner, EFFECT_REWARD);

        let Some(displaced_id) = token.displaced else {
            return Ok(());
        };
        let displaced = self.board.token_unchecked(displaced_id).clone();

        match displaced.kind {
            TokenKind::Heavy => {
                let Some(position) = token.position else {
                    return Ok(());
                };
                // The heavy token comes back as a Normal one of its owner.
                self.clear_square(position);
                self.board.retire(displaced_id);
                let replacement =
                    self.board
                        .create_token(TokenKind::Normal, displaced.owner, displaced.color);
                self.set_token(Some(replacement), position)?;
                self.check_winner_at(position);
                Ok(())
            }
            TokenKind::Temporary => {
                let empty: Vec<Position> = self.board.empty_positions().collect();
                match self.rng.choose(&empty).copied() {
                    Some(destination) => {
                        self.play_token(displaced_id, destination)?;
                        self.rewind_turn();
                    }
                    None => self.board.retire(displaced_id),
                }
                Ok(())
            }
            TokenKind::Normal | TokenKind::Overlap => {
                self.board.retire(displaced_id);
                self.award(token.owner, EFFECT_REWARD);
                Ok(())
            }
        }
    }
}
