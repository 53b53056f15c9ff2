//! Player identification, colors and per-player data storage.
//!
//! ## PlayerId
//!
//! Exactly two players take part in a game. Turn parity decides who moves:
//! even turns belong to `PlayerId::ONE`, odd turns to `PlayerId::TWO`.
//!
//! ## PlayerMap
//!
//! Fixed two-slot storage indexed by `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(u8);

impl PlayerId {
    pub const ONE: PlayerId = PlayerId(0);
    pub const TWO: PlayerId = PlayerId(1);

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[must_use]
    pub const fn opponent(self) -> Self {
        Self(1 - self.0)
    }

    /// The player to move on `turn`.
    ///
    /// ```
    /// use special_gomoku::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::for_turn(0), PlayerId::ONE);
    /// assert_eq!(PlayerId::for_turn(7), PlayerId::TWO);
    /// ```
    #[must_use]
    pub fn for_turn(turn: i32) -> Self {
        if turn.rem_euclid(2) == 0 {
            Self::ONE
        } else {
            Self::TWO
        }
    }

    /// Both players in turn order.
    pub fn both() -> impl Iterator<Item = PlayerId> {
        [Self::ONE, Self::TWO].into_iter()
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            0 => write!(f, "Player One"),
            _ => write!(f, "Player Two"),
        }
    }
}

/// Stone color. Each player owns exactly one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Black,
    White,
}

impl Color {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::Black => write!(f, "black"),
            Color::White => write!(f, "white"),
        }
    }
}

/// Per-player data storage with O(1) access.
///
/// ```
/// use special_gomoku::core::{PlayerId, PlayerMap};
///
/// let mut scores: PlayerMap<i64> = PlayerMap::with_value(0);
/// scores[PlayerId::TWO] += 100;
/// assert_eq!(scores[PlayerId::ONE], 0);
/// assert_eq!(scores[PlayerId::TWO], 100);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; 2],
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(mut factory: impl FnMut(PlayerId) -> T) -> Self {
        Self {
            data: [factory(PlayerId::ONE), factory(PlayerId::TWO)],
        }
    }

    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::both().zip(self.data.iter())
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        PlayerId::both().zip(self.data.iter_mut())
    }
}

impl<T: Default> Default for PlayerMap<T> {
    fn default() -> Self {
        Self::new(|_| T::default())
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &T {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut T {
        self.get_mut(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_parity() {
        assert_eq!(PlayerId::for_turn(0), PlayerId::ONE);
        assert_eq!(PlayerId::for_turn(1), PlayerId::TWO);
        assert_eq!(PlayerId::for_turn(2), PlayerId::ONE);
        assert_eq!(PlayerId::for_turn(-1), PlayerId::TWO);
    }

    #[test]
    fn test_opponent() {
        assert_eq!(PlayerId::ONE.opponent(), PlayerId::TWO);
        assert_eq!(PlayerId::TWO.opponent(), PlayerId::ONE);
    }

    #[test]
    fn test_color_opposite() {
        assert_eq!(Color::Black.opposite(), Color::White);
        assert_eq!(Color::White.opposite(), Color::Black);
    }

    #[test]
    fn test_player_map_factory() {
        let map = PlayerMap::new(|p| p.index() * 10);
        assert_eq!(map[PlayerId::ONE], 0);
        assert_eq!(map[PlayerId::TWO], 10);
    }

    #[test]
    fn test_player_map_iter_mut() {
        let mut map: PlayerMap<i32> = PlayerMap::default();
        for (player, value) in map.iter_mut() {
            *value = player.index() as i32 + 1;
        }
        let collected: Vec<_> = map.iter().map(|(_, v)| *v).collect();
        assert_eq!(collected, vec![1, 2]);
    }

    #[test]
    fn test_player_map_serde() {
        let map = PlayerMap::new(|p| format!("{p}"));
        let json = serde_json::to_string(&map).unwrap();
        let back: PlayerMap<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, back);
    }
}
