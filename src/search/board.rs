//! Abstract board used by the minimax search.
//!
//! Cells hold `+1` for the side to move, `-1` for the side that just moved,
//! and `0` for empty. Playing a move flips every sign and puts `-1` on the
//! target, so the side to move is implicit in the polarity. The caller
//! remembers which real player the root polarity belongs to.

use crate::core::{Direction, PlayerId, Position};
use crate::rules::GameState;

/// `{-1, 0, +1}` matrix with the most recent hypothetical move.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SearchBoard {
    size: usize,
    cells: Vec<i8>,
    last_move: Option<Position>,
}

impl SearchBoard {
    /// An empty board.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![0; size * size],
            last_move: None,
        }
    }

    /// Snapshot `state` with `perspective` to move: their tokens are `+1`.
    #[must_use]
    pub fn from_state(state: &GameState, perspective: PlayerId) -> Self {
        let own = state.player(perspective).color;
        let board = state.board();
        let cells = board
            .squares()
            .map(|square| match board.color_at(square.position) {
                Some(color) if color == own => 1,
                Some(_) => -1,
                None => 0,
            })
            .collect();

        Self {
            size: board.size(),
            cells,
            last_move: None,
        }
    }

    /// Set a cell directly. Used to build positions.
    pub fn set(&mut self, position: Position, value: i8) {
        self.cells[position.index(self.size)] = value.signum();
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    #[must_use]
    pub fn get(&self, position: Position) -> i8 {
        self.cells[position.index(self.size)]
    }

    #[must_use]
    pub fn last_move(&self) -> Option<Position> {
        self.last_move
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| cell == 0)
    }

    /// Empty cells in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = Position> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &cell)| cell == 0)
            .map(move |(index, _)| Position::from_index(index, size))
    }

    /// Cell values multiplied by `polarity`, widened for the evaluator.
    #[must_use]
    pub fn values(&self, polarity: i32) -> Vec<i32> {
        self.cells.iter().map(|&cell| i32::from(cell) * polarity).collect()
    }

    /// The board after the side to move plays `position`.
    #[must_use]
    pub fn play(&self, position: Position) -> Self {
        let mut cells: Vec<i8> = self.cells.iter().map(|&cell| -cell).collect();
        cells[position.index(self.size)] = -1;
        Self {
            size: self.size,
            cells,
            last_move: Some(position),
        }
    }

    /// Whether the last move made exactly five in a row.
    #[must_use]
    pub fn has_winner(&self) -> bool {
        let Some(last) = self.last_move else {
            return false;
        };
        let mark = self.get(last);
        if mark == 0 {
            return false;
        }

        Direction::AXES.iter().any(|&axis| {
            1 + self.run_length(last, axis, mark) + self.run_length(last, axis.reverse(), mark) == 5
        })
    }

    fn run_length(&self, start: Position, direction: Direction, mark: i8) -> usize {
        let mut length = 0;
        let mut cursor = start;
        while let Some(next) = cursor.step(direction, self.size) {
            if self.get(next) != mark {
                break;
            }
            length += 1;
            cursor = next;
        }
        length
    }
}
