//! Game configuration.
//!
//! A game is described entirely by a `GameConfig`: board size, how the token
//! budget is split, how many special squares are laid out, who controls each
//! player, the clock, and the RNG seed. Configs are plain serde data built
//! with `with_*` methods:
//!
//! ```
//! use special_gomoku::core::{GameConfig, GameMode};
//!
//! let config = GameConfig::default()
//!     .with_mode(GameMode::Limited)
//!     .with_board_size(12)
//!     .with_token_limit(60)
//!     .with_special_tokens(20)
//!     .with_seed(7);
//!
//! assert!(config.validate().is_ok());
//! assert_eq!(config.token_budget(), 60);
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::core::error::{GomokuError, Result};
use crate::core::player::{Color, PlayerId, PlayerMap};
use crate::core::position::Position;
use crate::pieces::{SquareKind, TokenKind};
use crate::players::StrategyKind;

/// Smallest supported board dimension.
pub const MIN_BOARD_SIZE: usize = 10;

/// Variations on the base game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// One token per cell, clocks count up.
    #[default]
    Normal,
    /// One token per cell, clocks count down; running out loses the game.
    QuickTime,
    /// Fixed token budget per player, clocks count up.
    Limited,
}

impl GameMode {
    #[must_use]
    pub const fn is_timed(self) -> bool {
        matches!(self, GameMode::QuickTime)
    }
}

/// Who makes the decisions for a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Controller {
    Human,
    Computer(StrategyKind),
}

/// Per-player setup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub name: String,
    pub color: Color,
    pub controller: Controller,
}

impl PlayerConfig {
    /// A human-controlled player.
    pub fn human(name: impl Into<String>, color: Color) -> Self {
        Self {
            name: name.into(),
            color,
            controller: Controller::Human,
        }
    }

    /// A computer-controlled player.
    pub fn computer(name: impl Into<String>, color: Color, strategy: StrategyKind) -> Self {
        Self {
            name: name.into(),
            color,
            controller: Controller::Computer(strategy),
        }
    }
}

/// Full description of a game.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameConfig {
    pub mode: GameMode,

    /// Board dimension; the board is `board_size × board_size`.
    pub board_size: usize,

    /// Tokens per player in `Limited` mode. Other modes use one per cell.
    pub token_limit: Option<u32>,

    /// Share of the token budget given to special token types, in percent.
    pub special_token_percentage: u32,

    /// Share of the cells turned into special squares, in percent.
    pub special_square_percentage: u32,

    /// Per-player time allowance for `QuickTime` games.
    pub time_limit: Option<Duration>,

    pub players: PlayerMap<PlayerConfig>,

    /// Squares pinned to a variant after the random layout.
    pub square_overrides: Vec<(Position, SquareKind)>,

    /// Starting quantities pinned after the random split, for both players.
    pub quantity_overrides: Vec<(TokenKind, u32)>,

    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::Normal,
            board_size: 15,
            token_limit: None,
            special_token_percentage: 0,
            special_square_percentage: 0,
            time_limit: None,
            players: PlayerMap::new(|player| {
                if player == PlayerId::ONE {
                    PlayerConfig::human("Player One", Color::Black)
                } else {
                    PlayerConfig::human("Player Two", Color::White)
                }
            }),
            square_overrides: Vec::new(),
            quantity_overrides: Vec::new(),
            seed: 42,
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_board_size(mut self, size: usize) -> Self {
        self.board_size = size;
        self
    }

    #[must_use]
    pub fn with_token_limit(mut self, limit: u32) -> Self {
        self.token_limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_special_tokens(mut self, percentage: u32) -> Self {
        self.special_token_percentage = percentage;
        self
    }

    #[must_use]
    pub fn with_special_squares(mut self, percentage: u32) -> Self {
        self.special_square_percentage = percentage;
        self
    }

    #[must_use]
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_player(mut self, player: PlayerId, config: PlayerConfig) -> Self {
        self.players[player] = config;
        self
    }

    /// Pin the square at `position` to `kind`.
    #[must_use]
    pub fn with_square(mut self, position: Position, kind: SquareKind) -> Self {
        self.square_overrides.push((position, kind));
        self
    }

    /// Pin the starting quantity of `kind` for both players.
    #[must_use]
    pub fn with_quantity(mut self, kind: TokenKind, quantity: u32) -> Self {
        self.quantity_overrides.push((kind, quantity));
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Tokens each player starts with, before overrides.
    #[must_use]
    pub fn token_budget(&self) -> u32 {
        let cells = (self.board_size * self.board_size) as u32;
        match self.mode {
            GameMode::Limited => self.token_limit.unwrap_or(cells),
            GameMode::Normal | GameMode::QuickTime => cells,
        }
    }

    /// Clock allowance, `None` meaning the clock only counts elapsed time.
    #[must_use]
    pub fn clock_limit(&self) -> Option<Duration> {
        if self.mode.is_timed() {
            self.time_limit
        } else {
            None
        }
    }

    /// Check that the config describes a playable game.
    pub fn validate(&self) -> Result<()> {
        if self.board_size < MIN_BOARD_SIZE {
            return Err(GomokuError::InvalidBoardSize {
                size: self.board_size,
                min: MIN_BOARD_SIZE,
            });
        }
        if self.special_token_percentage > 100 || self.special_square_percentage > 100 {
            return Err(GomokuError::InvalidConfig(
                "percentages must be between 0 and 100".into(),
            ));
        }
        if self.players[PlayerId::ONE].color == self.players[PlayerId::TWO].color {
            return Err(GomokuError::InvalidConfig(
                "players must have different colors".into(),
            ));
        }
        if self.mode.is_timed() && self.time_limit.is_none() {
            return Err(GomokuError::InvalidConfig(
                "timed games need a time limit".into(),
            ));
        }
        if let Some((position, _)) = self
            .square_overrides
            .iter()
            .find(|(p, _)| p.row >= self.board_size || p.col >= self.board_size)
        {
            return Err(GomokuError::out_of_bounds(*position));
        }
        Ok(())
    }
}
