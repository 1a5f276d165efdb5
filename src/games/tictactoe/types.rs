//! Core domain types for tic-tac-toe.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Side length of the board both front ends play on.
pub const BOARD_SIZE: usize = 5;

/// Number of cells on the standard board.
pub const TOTAL_CELLS: usize = BOARD_SIZE * BOARD_SIZE;

/// A player's symbol.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
pub enum Mark {
    /// Player X (moves first unless configured otherwise).
    #[default]
    X,
    /// Player O.
    O,
}

impl Mark {
    /// Returns the other player's mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Single-character form used on the wire.
    pub fn as_char(self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

/// A single addressable board position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    /// Nobody has played here.
    #[default]
    Empty,
    /// Cell holds a player's mark.
    Occupied(Mark),
}

impl Cell {
    /// Returns the mark in this cell, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(mark) => Some(mark),
        }
    }

    /// Checks whether the cell is empty.
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// Single-character form used on the wire (space for empty).
    pub fn as_char(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Occupied(mark) => mark.as_char(),
        }
    }

    /// Parses the single-character wire form.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            ' ' => Some(Cell::Empty),
            'X' => Some(Cell::Occupied(Mark::X)),
            'O' => Some(Cell::Occupied(Mark::O)),
            _ => None,
        }
    }
}

/// An N×N board stored in row-major order.
///
/// Index `i` maps to row `i / N` and column `i % N`. A board is never mutated
/// once built: placing a mark produces a new, independent board.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    cells: Box<[Cell]>,
}

impl Board {
    /// Creates an empty board of the standard size.
    pub fn new() -> Self {
        Self {
            size: BOARD_SIZE,
            cells: vec![Cell::Empty; TOTAL_CELLS].into_boxed_slice(),
        }
    }

    /// Creates an empty board with the given side length.
    ///
    /// Returns `None` for a side length of zero.
    pub fn with_size(size: usize) -> Option<Self> {
        Self::from_cells(size, vec![Cell::Empty; size * size])
    }

    /// Builds a board from cells in row-major order.
    ///
    /// Returns `None` unless `size >= 1` and there are exactly `size * size` cells.
    pub fn from_cells(size: usize, cells: Vec<Cell>) -> Option<Self> {
        if size == 0 || cells.len() != size * size {
            return None;
        }
        Some(Self {
            size,
            cells: cells.into_boxed_slice(),
        })
    }

    /// Side length N.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of cells (N²).
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Gets the cell at the given index.
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Checks if the cell at `index` exists and is empty.
    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Cell::Empty))
    }

    /// Returns all cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of cells holding a mark.
    pub fn filled(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// Iterates over the board one row at a time.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size)
    }

    /// Returns a copy of this board with `mark` placed at `index`.
    ///
    /// Callers check bounds first.
    pub(super) fn with_mark(&self, index: usize, mark: Mark) -> Self {
        let mut cells = self.cells.clone();
        cells[index] = Cell::Occupied(mark);
        Self {
            size: self.size,
            cells,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// A board paired with the mark that moves next.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameState {
    board: Board,
    active: Mark,
}

impl GameState {
    /// Creates a fresh standard-size game.
    pub fn new(starting: Mark) -> Self {
        Self::from_parts(Board::new(), starting)
    }

    /// Creates a fresh game on a board with the given side length.
    pub fn with_size(size: usize, starting: Mark) -> Option<Self> {
        Board::with_size(size).map(|board| Self::from_parts(board, starting))
    }

    /// Assembles a state from an existing board.
    pub fn from_parts(board: Board, active: Mark) -> Self {
        Self { board, active }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the mark placed by the next accepted move.
    pub fn active(&self) -> Mark {
        self.active
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Mark::X)
    }
}

/// Result of evaluating a game state. Always derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Moves are still accepted.
    InProgress,
    /// A player completed a line.
    Win(Mark),
    /// Board is full and nobody completed a line.
    Draw,
}

impl Outcome {
    /// True for `Win` and `Draw`.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    /// Returns the winner if there is one.
    pub fn winner(self) -> Option<Mark> {
        match self {
            Outcome::Win(mark) => Some(mark),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::InProgress => write!(f, "In progress"),
            Outcome::Win(mark) => write!(f, "Player {} wins!", mark),
            Outcome::Draw => write!(f, "It's a draw!"),
        }
    }
}
