//! Board coordinates and line directions.
//!
//! ## Directions
//!
//! `Direction::ALL` lists the 8 compass steps in a fixed order such that
//! `ALL[7 - i]` is always the reverse of `ALL[i]`. The line evaluator relies
//! on that pairing to memoize visited directions per cell.
//!
//! `Direction::AXES` holds one direction per line axis (horizontal, vertical
//! and both diagonals) for win detection.
//!
//! ```
//! use special_gomoku::core::{Direction, Position};
//!
//! let origin = Position::new(0, 0);
//! assert_eq!(origin.step(Direction::ALL[7], 15), Some(Position::new(1, 1)));
//! assert_eq!(origin.step(Direction::ALL[0], 15), None);
//! ```

use serde::{Deserialize, Serialize};

/// A cell on the board, addressed by row and column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Row-major index into a `size × size` grid.
    #[must_use]
    pub const fn index(self, size: usize) -> usize {
        self.row * size + self.col
    }

    /// Inverse of [`Position::index`].
    #[must_use]
    pub const fn from_index(index: usize, size: usize) -> Self {
        Self::new(index / size, index % size)
    }

    /// Move `steps` cells along `direction`, or `None` when that leaves the board.
    #[must_use]
    pub fn offset(self, direction: Direction, steps: isize, size: usize) -> Option<Self> {
        let row = self.row as isize + direction.dr * steps;
        let col = self.col as isize + direction.dc * steps;
        let limit = size as isize;
        if (0..limit).contains(&row) && (0..limit).contains(&col) {
            Some(Self::new(row as usize, col as usize))
        } else {
            None
        }
    }

    /// Move one cell along `direction`.
    #[must_use]
    pub fn step(self, direction: Direction, size: usize) -> Option<Self> {
        self.offset(direction, 1, size)
    }

    /// The in-bounds cells of the 3×3 block centred here, this cell included.
    pub fn neighborhood(self, size: usize) -> impl Iterator<Item = Position> {
        (-1isize..=1).flat_map(move |dr| {
            (-1isize..=1).filter_map(move |dc| self.offset(Direction { dr, dc }, 1, size))
        })
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A unit step between neighbouring cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Direction {
    pub dr: isize,
    pub dc: isize,
}

impl Direction {
    /// All 8 neighbour steps; `ALL[7 - i]` reverses `ALL[i]`.
    pub const ALL: [Direction; 8] = [
        Direction { dr: -1, dc: -1 },
        Direction { dr: -1, dc: 0 },
        Direction { dr: -1, dc: 1 },
        Direction { dr: 0, dc: -1 },
        Direction { dr: 0, dc: 1 },
        Direction { dr: 1, dc: -1 },
        Direction { dr: 1, dc: 0 },
        Direction { dr: 1, dc: 1 },
    ];

    /// One direction per line axis.
    pub const AXES: [Direction; 4] = [
        Direction { dr: 0, dc: 1 },
        Direction { dr: 1, dc: 0 },
        Direction { dr: 1, dc: 1 },
        Direction { dr: 1, dc: -1 },
    ];

    #[must_use]
    pub const fn reverse(self) -> Self {
        Self {
            dr: -self.dr,
            dc: -self.dc,
        }
    }
}
