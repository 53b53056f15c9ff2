//! Game state and the move pipeline.
//!
//! `GameState` owns everything a game needs: board, players, the turn
//! counter, the winner, the pending effect queue, and the RNG. Nothing is
//! global, so any number of games can coexist.
//!
//! ## Turn economy
//!
//! Even turns belong to Player One, odd turns to Player Two. A move never
//! advances the turn itself; square and token effects apply every +1/−1, so
//! special effects can hand out extra turns by rewinding the counter.
//!
//! ## Rollback
//!
//! `play` snapshots the state before applying a move (O(1) thanks to the
//! persistent collections) and restores it on any error. A rejected move
//! leaves the board, queue, turn, scores, quantities, and the mover's
//! upcoming tokens exactly as they were.
//!
//! ```
//! use special_gomoku::core::{GameConfig, PlayerId, Position};
//! use special_gomoku::rules::GameState;
//!
//! let mut game = GameState::new(GameConfig::default()).unwrap();
//! game.play(Position::new(7, 7)).unwrap();
//! assert_eq!(game.turn(), 1);
//! assert_eq!(game.current_player(), PlayerId::TWO);
//!
//! // Occupied: rejected, nothing changes.
//! assert!(game.play(Position::new(7, 7)).is_err());
//! assert_eq!(game.turn(), 1);
//! ```

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::core::{
    Color, GameConfig, GameRng, GomokuError, PlayerId, PlayerMap, Position, Result, TokenId,
};
use crate::effects::{EffectQueue, Observer};
use crate::pieces::{Token, TokenKind};

use super::inventory::Inventory;
use super::outcome::{GameResult, MoveOutcome};
use super::player::Player;

/// Complete state of one game.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) config: GameConfig,
    pub(crate) board: Board,
    pub(crate) players: PlayerMap<Player>,
    pub(crate) turn: i32,
    pub(crate) winner: Option<PlayerId>,
    pub(crate) queue: EffectQueue<Observer>,
    pub(crate) rng: GameRng,
}

impl GameState {
    /// Set up a new game: board layout, starting inventories, first draws.
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;

        let mut rng = GameRng::new(config.seed);
        let mut board = Board::new(config.board_size)?;
        let mut layout_rng = rng.for_context("squares");
        board.place_special_squares(config.special_square_percentage, &mut layout_rng);
        for &(position, kind) in &config.square_overrides {
            board.set_square_kind(position, kind);
        }

        let mut inventory =
            Inventory::split(config.token_budget(), config.special_token_percentage, &mut rng);
        for &(kind, quantity) in &config.quantity_overrides {
            inventory.set(kind, quantity);
        }

        let mut players = PlayerMap::new(|id| Player::new(&config.players[id], inventory.clone()));
        for (_, player) in players.iter_mut() {
            player.refill(&mut rng);
        }

        Ok(Self {
            config,
            board,
            players,
            turn: 0,
            winner: None,
            queue: EffectQueue::new(),
            rng,
        })
    }

    // =========================================================================
    // Queries
    // =========================================================================

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.board.size()
    }

    #[must_use]
    pub fn turn(&self) -> i32 {
        self.turn
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        PlayerId::for_turn(self.turn)
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<Player> {
        &self.players
    }

    /// The player owning `color`.
    #[must_use]
    pub fn player_with_color(&self, color: Color) -> Option<PlayerId> {
        self.players
            .iter()
            .find(|(_, player)| player.color == color)
            .map(|(id, _)| id)
    }

    #[must_use]
    pub fn token_at(&self, position: Position) -> Option<&Token> {
        self.board.token_at(position)
    }

    #[must_use]
    pub fn color_at(&self, position: Position) -> Option<Color> {
        self.board.color_at(position)
    }

    #[must_use]
    pub fn kind_at(&self, position: Position) -> Option<TokenKind> {
        self.board.kind_at(position)
    }

    #[must_use]
    pub fn quantity(&self, player: PlayerId, kind: TokenKind) -> u32 {
        self.players[player].quantity(kind)
    }

    /// Squares and tokens with effects still pending.
    #[must_use]
    pub fn pending_effects(&self) -> usize {
        self.queue.len()
    }

    /// `Some` once the game is over.
    #[must_use]
    pub fn outcome(&self) -> Option<GameResult> {
        if let Some(winner) = self.winner {
            return Some(GameResult::Winner(winner));
        }
        let mover = &self.players[self.current_player()];
        if self.board.is_full() || mover.inventory().total() == 0 {
            return Some(GameResult::Draw);
        }
        None
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Place the current player's next token at `position`.
    pub fn play(&mut self, position: Position) -> Result<MoveOutcome> {
        if self.winner.is_some() {
            return Err(GomokuError::GameFinished);
        }
        if !self.board.contains(position) {
            return Err(GomokuError::out_of_bounds(position));
        }

        let snapshot = self.clone();
        let result = self.apply_move(position);
        if result.is_err() {
            *self = snapshot;
        }
        result
    }

    /// Queue `kind` as the current player's next token.
    pub fn set_next_token(&mut self, kind: TokenKind) {
        let mover = self.current_player();
        self.players[mover].push_front(kind);
    }

    /// Report that `player`'s clock ran out.
    ///
    /// In timed games the opponent wins. Returns `true` when that decided
    /// the game.
    pub fn expire_clock(&mut self, player: PlayerId) -> bool {
        if !self.config.mode.is_timed() || self.winner.is_some() {
            return false;
        }
        self.winner = Some(player.opponent());
        true
    }

    /// Serialize the whole game.
    pub fn save(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| GomokuError::Encode(e.to_string()))
    }

    /// Rebuild a game from [`GameState::save`] output.
    pub fn restore(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(|e| GomokuError::Decode(e.to_string()))
    }

    fn apply_move(&mut self, position: Position) -> Result<MoveOutcome> {
        let mover = self.current_player();
        let kind = self.players[mover]
            .pop_next()
            .ok_or(GomokuError::NoTokensRemaining)?;
        if self.players[mover].quantity(kind) == 0 {
            return Err(GomokuError::NoTokensRemaining);
        }

        let color = self.players[mover].color;
        let token = self.board.create_token(kind, mover, color);
        self.play_token(token, position)?;
        self.players[mover].consume(kind)?;
        self.check_winner(token);
        self.players[mover].refill(&mut self.rng);

        Ok(MoveOutcome {
            player: mover,
            kind,
            token,
            landed: self.board.token(token).and_then(|t| t.position),
            winner: self.winner,
        })
    }

    // =========================================================================
    // Helpers shared with the effect resolver
    // =========================================================================

    pub(crate) fn advance_turn(&mut self) {
        self.turn += 1;
    }

    pub(crate) fn rewind_turn(&mut self) {
        self.turn -= 1;
    }

    pub(crate) fn award(&mut self, player: PlayerId, amount: i64) {
        self.players[player].add_score(amount, &mut self.rng);
    }

    /// Declare the owner of `token` the winner if it completes a five where it
    /// stands. A token removed by its own effects never wins.
    pub(crate) fn check_winner(&mut self, token: TokenId) {
        if self.winner.is_some() {
            return;
        }
        let Some(position) = self.board.token(token).and_then(|t| t.position) else {
            return;
        };
        self.check_winner_at(position);
    }

    /// Declare the owner of the token at `position` the winner if it
    /// completes a five.
    pub(crate) fn check_winner_at(&mut self, position: Position) {
        if self.winner.is_none() && self.board.validate(position) {
            self.winner = self.board.token_at(position).map(|t| t.owner);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerConfig;
    use crate::core::GameMode;
    use std::time::Duration;

    fn game() -> GameState {
        GameState::new(GameConfig::default()).unwrap()
    }

    #[test]
    fn test_new_game_seeds_queues() {
        let game = game();
        for (_, player) in game.players().iter() {
            assert_eq!(player.next_token(), Some(TokenKind::Normal));
            assert_eq!(player.quantity(TokenKind::Normal), 225);
        }
        assert_eq!(game.turn(), 0);
        assert_eq!(game.outcome(), None);
    }

    #[test]
    fn test_out_of_bounds_move() {
        let mut game = game();
        assert_eq!(
            game.play(Position::new(15, 3)),
            Err(GomokuError::InvalidMovePosition { row: 15, col: 3 })
        );
    }

    #[test]
    fn test_move_decrements_quantity() {
        let mut game = game();
        let outcome = game.play(Position::new(0, 0)).unwrap();
        assert_eq!(outcome.player, PlayerId::ONE);
        assert_eq!(outcome.landed, Some(Position::new(0, 0)));
        assert_eq!(game.quantity(PlayerId::ONE, TokenKind::Normal), 224);
        assert_eq!(game.quantity(PlayerId::TWO, TokenKind::Normal), 225);
        assert_eq!(game.pending_effects(), 0);
    }

    #[test]
    fn test_missing_type_restores_queue() {
        let mut game = game();
        game.set_next_token(TokenKind::Heavy);
        assert_eq!(
            game.play(Position::new(3, 3)),
            Err(GomokuError::NoTokensRemaining)
        );
        assert_eq!(game.player(PlayerId::ONE).next_token(), Some(TokenKind::Heavy));
        assert!(game.board().is_empty_at(Position::new(3, 3)));
        assert_eq!(game.turn(), 0);
    }

    #[test]
    fn test_expire_clock_only_in_timed_games() {
        let mut game = game();
        assert!(!game.expire_clock(PlayerId::ONE));
        assert_eq!(game.winner(), None);

        let config = GameConfig::default()
            .with_mode(GameMode::QuickTime)
            .with_time_limit(Duration::from_secs(5));
        let mut timed = GameState::new(config).unwrap();
        assert!(timed.expire_clock(PlayerId::ONE));
        assert_eq!(timed.winner(), Some(PlayerId::TWO));
        assert_eq!(timed.play(Position::new(0, 0)), Err(GomokuError::GameFinished));
    }

    #[test]
    fn test_player_with_color() {
        let config = GameConfig::default()
            .with_player(PlayerId::ONE, PlayerConfig::human("A", Color::White))
            .with_player(PlayerId::TWO, PlayerConfig::human("B", Color::Black));
        let game = GameState::new(config).unwrap();
        assert_eq!(game.player_with_color(Color::Black), Some(PlayerId::TWO));
    }

    #[test]
    fn test_limited_mode_budget() {
        let config = GameConfig::default()
            .with_mode(GameMode::Limited)
            .with_token_limit(2);
        let mut game = GameState::new(config).unwrap();

        game.play(Position::new(0, 0)).unwrap();
        game.play(Position::new(1, 0)).unwrap();
        game.play(Position::new(0, 1)).unwrap();
        game.play(Position::new(1, 1)).unwrap();

        assert_eq!(game.outcome(), Some(GameResult::Draw));
        assert_eq!(game.play(Position::new(5, 5)), Err(GomokuError::NoTokensRemaining));
    }
}
