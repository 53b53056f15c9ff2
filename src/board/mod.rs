//! The game board: squares, the token arena, and win detection.

pub mod grid;

pub use grid::{Board, WIN_VALUE};
