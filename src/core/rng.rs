//! Deterministic random number generation.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Serializable**: O(1) state capture and restore, so a saved game
//!   continues the same random stream after it is restored
//! - **Context streams**: Independent sequences for different purposes
//!   (board layout vs in-game effects)
//!
//! ```
//! use special_gomoku::core::GameRng;
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//! assert_eq!(a.gen_index(100), b.gen_index(100));
//!
//! // Weighted draw: index 1 is the only one with weight.
//! assert_eq!(a.choose_weighted(&[0, 3, 0]), Some(1));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use rustc_hash::FxHasher;
use std::hash::Hasher;

/// Deterministic game RNG.
///
/// Uses ChaCha8 for speed while keeping a high quality stream. Serializes
/// through [`GameRngState`] so it can live inside a saved game.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(into = "GameRngState", from = "GameRngState")]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an independent stream for a specific context.
    ///
    /// The same context always produces the same stream from the same seed,
    /// across builds, so saved seeds replay the same layout.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let mut hasher = FxHasher::default();
        hasher.write_u64(self.seed);
        hasher.write(context.as_bytes());
        Self::new(hasher.finish())
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    pub fn gen_index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }

    /// Uniform value in `0..upper`, or 0 when `upper` is 0.
    pub fn gen_below(&mut self, upper: u32) -> u32 {
        if upper == 0 {
            0
        } else {
            self.inner.gen_range(0..upper)
        }
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }

    /// Choose an index with probability proportional to its integer weight.
    ///
    /// Returns `None` if weights are empty or all zero.
    pub fn choose_weighted(&mut self, weights: &[u32]) -> Option<usize> {
        let total: u64 = weights.iter().map(|&w| u64::from(w)).sum();
        if total == 0 {
            return None;
        }

        let mut threshold = self.inner.gen_range(0..total);
        for (i, &weight) in weights.iter().enumerate() {
            let weight = u64::from(weight);
            if threshold < weight {
                return Some(i);
            }
            threshold -= weight;
        }

        None
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable RNG state for checkpointing.
///
/// Uses ChaCha8 word position for O(1) serialization regardless of
/// how many random numbers have been generated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

impl From<GameRng> for GameRngState {
    fn from(rng: GameRng) -> Self {
        rng.state()
    }
}

impl From<GameRngState> for GameRng {
    fn from(state: GameRngState) -> Self {
        GameRng::from_state(&state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.gen_index(1000), rng2.gen_index(1000));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        let seq1: Vec<_> = (0..10).map(|_| rng1.gen_index(1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| rng2.gen_index(1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_context_streams_differ() {
        let rng = GameRng::new(42);
        let mut layout = rng.for_context("squares");
        let mut effects = rng.for_context("effects");

        let seq1: Vec<_> = (0..10).map(|_| layout.gen_index(1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| effects.gen_index(1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_context_seed_is_pinned() {
        let mut rng = GameRng::new(42);
        rng.gen_index(10);
        let layout = rng.for_context("squares");
        assert_eq!(layout.state().seed, 814_433_041_704_372_557);
        assert_eq!(layout.state().word_pos, 0);
    }

    #[test]
    fn test_gen_below_zero() {
        let mut rng = GameRng::new(7);
        assert_eq!(rng.gen_below(0), 0);
        for _ in 0..50 {
            assert!(rng.gen_below(3) < 3);
        }
    }

    #[test]
    fn test_choose_weighted() {
        let mut rng = GameRng::new(42);

        for _ in 0..10 {
            assert_eq!(rng.choose_weighted(&[0, 0, 5]), Some(2));
        }

        assert_eq!(rng.choose_weighted(&[]), None);
        assert_eq!(rng.choose_weighted(&[0, 0]), None);
    }

    #[test]
    fn test_choose_weighted_is_proportional() {
        let mut rng = GameRng::new(9);
        let mut hits = [0u32; 2];
        for _ in 0..4000 {
            if let Some(i) = rng.choose_weighted(&[1, 3]) {
                hits[i] += 1;
            }
        }
        // Expect roughly 1000 / 3000.
        assert!(hits[0] > 800 && hits[0] < 1200, "got {hits:?}");
    }

    #[test]
    fn test_state_round_trip() {
        let mut rng = GameRng::new(42);
        for _ in 0..100 {
            rng.gen_index(1000);
        }

        let state = rng.state();
        let expected: Vec<_> = (0..10).map(|_| rng.gen_index(1000)).collect();

        let mut restored = GameRng::from_state(&state);
        let actual: Vec<_> = (0..10).map(|_| restored.gen_index(1000)).collect();

        assert_eq!(expected, actual);
    }

    #[test]
    fn test_rng_serde_continues_stream() {
        let mut rng = GameRng::new(5);
        rng.gen_index(10);

        let json = serde_json::to_string(&rng).unwrap();
        let mut back: GameRng = serde_json::from_str(&json).unwrap();

        assert_eq!(rng.gen_index(1_000_000), back.gen_index(1_000_000));
    }
}
