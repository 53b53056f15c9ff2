//! Board storage and weighted win detection.
//!
//! The board owns every square and every token created during the game.
//! Squares live in an `im::Vector` and tokens in an `im::HashMap` arena so
//! that cloning the board (for move rollback or a search snapshot) is O(1).
//!
//! ## Win detection
//!
//! A line wins when the token values of a contiguous same-color run through
//! the placed token sum to exactly 5. Heavy tokens count 2, so four cells can
//! win, while six Normal tokens in a row do not.

use im::{HashMap as ImHashMap, Vector};
use serde::{Deserialize, Serialize};

use crate::core::{Color, Direction, GameRng, GomokuError, PlayerId, Position, Result, TokenId};
use crate::core::MIN_BOARD_SIZE;
use crate::pieces::{registry, Square, SquareKind, Token, TokenKind};

/// Sum of token values that makes a five.
pub const WIN_VALUE: i32 = 5;

/// The square grid plus the token arena.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    squares: Vector<Square>,
    tokens: ImHashMap<TokenId, Token>,
    next_token: TokenId,
    last_token: Option<TokenId>,
}

impl Board {
    /// Create an empty board of Normal squares.
    pub fn new(size: usize) -> Result<Self> {
        if size < MIN_BOARD_SIZE {
            return Err(GomokuError::InvalidBoardSize {
                size,
                min: MIN_BOARD_SIZE,
            });
        }

        let normal = registry::square_entry(SquareKind::Normal);
        let squares = (0..size * size)
            .map(|index| (normal.create)(Position::from_index(index, size)))
            .collect();

        Ok(Self {
            size,
            squares,
            tokens: ImHashMap::new(),
            next_token: TokenId::new(0),
            last_token: None,
        })
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        position.row < self.size && position.col < self.size
    }

    /// The square at `position`. Panics when out of bounds.
    #[must_use]
    pub fn square(&self, position: Position) -> &Square {
        &self.squares[position.index(self.size)]
    }

    pub(crate) fn square_mut(&mut self, position: Position) -> &mut Square {
        &mut self.squares[position.index(self.size)]
    }

    /// All squares in row-major order.
    pub fn squares(&self) -> impl Iterator<Item = &Square> {
        self.squares.iter()
    }

    /// Replace the variant of the square at `position`, keeping its occupant.
    pub(crate) fn set_square_kind(&mut self, position: Position, kind: SquareKind) {
        let occupant = self.square(position).token;
        let mut square = (registry::square_entry(kind).create)(position);
        square.token = occupant;
        *self.square_mut(position) = square;
    }

    /// Turn `percentage` percent of the cells into random special squares.
    pub(crate) fn place_special_squares(&mut self, percentage: u32, rng: &mut GameRng) {
        let cells = self.size * self.size;
        let wanted = cells * percentage.min(100) as usize / 100;
        let mut free: Vec<Position> = self
            .squares
            .iter()
            .filter(|square| !square.kind.is_special())
            .map(|square| square.position)
            .collect();

        for _ in 0..wanted {
            if free.is_empty() {
                break;
            }
            let position = free.swap_remove(rng.gen_index(free.len()));
            let kind = registry::random_special_square(rng);
            self.set_square_kind(position, kind);
        }
    }

    // === Tokens ===

    #[must_use]
    pub fn token(&self, id: TokenId) -> Option<&Token> {
        self.tokens.get(&id)
    }

    pub(crate) fn token_mut(&mut self, id: TokenId) -> Option<&mut Token> {
        self.tokens.get_mut(&id)
    }

    /// Get a token that must exist.
    ///
    /// Ids only come from `create_token`, and the arena never drops entries.
    pub(crate) fn token_unchecked(&self, id: TokenId) -> &Token {
        self.tokens
            .get(&id)
            .unwrap_or_else(|| panic!("{id} missing from the token arena"))
    }

    /// Allocate a new token in the arena. It is not on any square yet.
    pub(crate) fn create_token(&mut self, kind: TokenKind, owner: PlayerId, color: Color) -> TokenId {
        let id = self.next_token;
        self.next_token = id.next();
        let token = (registry::token_entry(kind).create)(id, owner, color);
        self.tokens.insert(id, token);
        id
    }

    /// Put `id` on the square at `position` and record its position.
    pub(crate) fn install(&mut self, id: TokenId, position: Position) {
        self.square_mut(position).token = Some(id);
        if let Some(token) = self.tokens.get_mut(&id) {
            token.position = Some(position);
        }
    }

    /// Empty the square at `position`, returning the token that was there.
    pub(crate) fn remove(&mut self, position: Position) -> Option<TokenId> {
        let id = self.square_mut(position).token.take()?;
        self.retire(id);
        Some(id)
    }

    /// Mark a token as off the board without touching any square.
    pub(crate) fn retire(&mut self, id: TokenId) {
        if let Some(token) = self.tokens.get_mut(&id) {
            token.position = None;
        }
    }

    /// The most recently placed token, wherever it ended up.
    #[must_use]
    pub fn last_token(&self) -> Option<&Token> {
        self.last_token.and_then(|id| self.token(id))
    }

    pub(crate) fn set_last_token(&mut self, id: TokenId) {
        self.last_token = Some(id);
    }

    // === Queries ===

    #[must_use]
    pub fn token_at(&self, position: Position) -> Option<&Token> {
        self.square(position).token.and_then(|id| self.token(id))
    }

    #[must_use]
    pub fn color_at(&self, position: Position) -> Option<Color> {
        self.token_at(position).map(|token| token.color)
    }

    #[must_use]
    pub fn kind_at(&self, position: Position) -> Option<TokenKind> {
        self.token_at(position).map(|token| token.kind)
    }

    #[must_use]
    pub fn is_empty_at(&self, position: Position) -> bool {
        self.square(position).is_empty()
    }

    /// Empty cells in row-major order.
    pub fn empty_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.squares
            .iter()
            .filter(|square| square.is_empty())
            .map(|square| square.position)
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.squares.iter().all(|square| !square.is_empty())
    }

    /// Cells holding a token of `color`.
    pub fn positions_of(&self, color: Color) -> Vec<Position> {
        self.squares
            .iter()
            .filter(|square| self.color_at(square.position) == Some(color))
            .map(|square| square.position)
            .collect()
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn occupied(&self) -> usize {
        self.squares.iter().filter(|square| !square.is_empty()).count()
    }

    /// Per-cell signed token values: `color` positive, the other color negative.
    #[must_use]
    pub fn signed_values(&self, color: Color) -> Vec<i32> {
        self.squares
            .iter()
            .map(|square| match self.token_at(square.position) {
                Some(token) if token.color == color => token.value(),
                Some(token) => -token.value(),
                None => 0,
            })
            .collect()
    }

    // === Win detection ===

    /// Whether the token at `position` completes a line worth exactly 5.
    #[must_use]
    pub fn validate(&self, position: Position) -> bool {
        let Some(token) = self.token_at(position) else {
            return false;
        };

        Direction::AXES.iter().any(|&axis| {
            let forward = self.run_value(position, axis, token.color);
            let backward = self.run_value(position, axis.reverse(), token.color);
            token.value() + forward + backward == WIN_VALUE
        })
    }

    fn run_value(&self, start: Position, direction: Direction, color: Color) -> i32 {
        let mut total = 0;
        let mut cursor = start;
        while let Some(next) = cursor.step(direction, self.size) {
            match self.token_at(next) {
                Some(token) if token.color == color => total += token.value(),
                _ => break,
            }
            cursor = next;
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(board: &mut Board, kind: TokenKind, color: Color, row: usize, col: usize) -> TokenId {
        let owner = if color == Color::Black {
            PlayerId::ONE
        } else {
            PlayerId::TWO
        };
        let id = board.create_token(kind, owner, color);
        board.install(id, Position::new(row, col));
        id
    }

    #[test]
    fn test_board_size_minimum() {
        assert!(Board::new(10).is_ok());
        assert_eq!(
            Board::new(9).unwrap_err(),
            GomokuError::InvalidBoardSize { size: 9, min: 10 }
        );
    }

    #[test]
    fn test_every_cell_has_one_square() {
        let board = Board::new(12).unwrap();
        assert_eq!(board.squares().count(), 144);
        for (index, square) in board.squares().enumerate() {
            assert_eq!(square.position, Position::from_index(index, 12));
        }
    }

    #[test]
    fn test_five_normal_wins() {
        let mut board = Board::new(15).unwrap();
        for col in 0..5 {
            place(&mut board, TokenKind::Normal, Color::Black, 0, col);
        }
        for col in 0..5 {
            assert!(board.validate(Position::new(0, col)));
        }
    }

    #[test]
    fn test_heavy_makes_five_with_four_cells() {
        let mut board = Board::new(15).unwrap();
        place(&mut board, TokenKind::Heavy, Color::White, 3, 3);
        place(&mut board, TokenKind::Normal, Color::White, 4, 4);
        place(&mut board, TokenKind::Normal, Color::White, 5, 5);
        place(&mut board, TokenKind::Normal, Color::White, 6, 6);
        assert!(board.validate(Position::new(6, 6)));
    }

    #[test]
    fn test_six_in_a_row_is_not_a_win() {
        let mut board = Board::new(15).unwrap();
        for row in 2..8 {
            place(&mut board, TokenKind::Normal, Color::Black, row, 7);
        }
        assert!(!board.validate(Position::new(7, 7)));
        assert!(!board.validate(Position::new(2, 7)));
    }

    #[test]
    fn test_heavy_overshoot_is_not_a_win() {
        let mut board = Board::new(15).unwrap();
        place(&mut board, TokenKind::Heavy, Color::Black, 0, 0);
        for col in 1..5 {
            place(&mut board, TokenKind::Normal, Color::Black, 0, col);
        }
        assert!(!board.validate(Position::new(0, 4)));
    }

    #[test]
    fn test_opponent_breaks_the_run() {
        let mut board = Board::new(15).unwrap();
        for col in [0, 1, 3, 4, 5] {
            place(&mut board, TokenKind::Normal, Color::Black, 9, col);
        }
        place(&mut board, TokenKind::Normal, Color::White, 9, 2);
        assert!(!board.validate(Position::new(9, 3)));
    }

    #[test]
    fn test_anti_diagonal_win() {
        let mut board = Board::new(10).unwrap();
        for i in 0..5 {
            place(&mut board, TokenKind::Normal, Color::White, i, 9 - i);
        }
        assert!(board.validate(Position::new(2, 7)));
    }

    #[test]
    fn test_remove_retires_token() {
        let mut board = Board::new(10).unwrap();
        let id = place(&mut board, TokenKind::Normal, Color::Black, 1, 1);
        assert_eq!(board.remove(Position::new(1, 1)), Some(id));
        assert!(board.is_empty_at(Position::new(1, 1)));
        assert_eq!(board.token(id).unwrap().position, None);
    }

    #[test]
    fn test_special_square_layout() {
        let mut board = Board::new(10).unwrap();
        let mut rng = GameRng::new(11);
        board.place_special_squares(20, &mut rng);

        let specials = board.squares().filter(|s| s.kind.is_special()).count();
        assert_eq!(specials, 20);
    }

    #[test]
    fn test_signed_values() {
        let mut board = Board::new(10).unwrap();
        place(&mut board, TokenKind::Heavy, Color::Black, 0, 0);
        place(&mut board, TokenKind::Normal, Color::White, 0, 1);

        let values = board.signed_values(Color::White);
        assert_eq!(values[0], -2);
        assert_eq!(values[1], 1);
        assert_eq!(values[2], 0);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut board = Board::new(10).unwrap();
        let snapshot = board.clone();
        place(&mut board, TokenKind::Normal, Color::Black, 5, 5);

        assert!(snapshot.is_empty_at(Position::new(5, 5)));
        assert!(!board.is_empty_at(Position::new(5, 5)));
    }
}
