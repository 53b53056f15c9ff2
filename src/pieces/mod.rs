//! Token and square variants.
//!
//! - `token`: the four token variants and their placement legality
//! - `square`: the four square variants and golden-square state
//! - `registry`: static variant tables with factories

pub mod registry;
pub mod square;
pub mod token;

pub use registry::{SquareEntry, TokenEntry};
pub use square::{GoldenState, Square, SquareKind};
pub use token::{Token, TokenKind};
