//! Wire form of a game state.
//!
//! A board travels as one character per cell (space, `X`, or `O`) in
//! row-major order, and the active mark as `"X"` or `"O"`.

use super::{Board, Cell, GameState, Mark};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Serializable board plus active mark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// One character per cell, row-major.
    pub board: String,
    /// Mark that moves next.
    pub active: String,
}

/// Error decoding a [`Snapshot`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SnapshotError {
    /// Cell count is not the square of a positive side length.
    #[display("Board has {} cells, which is not a square board", _0)]
    BadLength(usize),

    /// A cell character is not space, `X`, or `O`.
    #[display("Unknown cell marker {:?} at position {}", _0, _1)]
    BadCell(char, usize),

    /// The active mark is not `X` or `O`.
    #[display("Unknown active mark {:?}", _0)]
    BadMark(String),
}

impl std::error::Error for SnapshotError {}

impl Board {
    /// Encodes the cells as a string of single-character markers.
    pub fn to_cell_string(&self) -> String {
        self.cells().iter().map(|cell| cell.as_char()).collect()
    }

    /// Decodes a string of single-character markers, inferring the side length.
    pub fn from_cell_string(encoded: &str) -> Result<Self, SnapshotError> {
        let cells = encoded
            .chars()
            .enumerate()
            .map(|(index, c)| Cell::from_char(c).ok_or(SnapshotError::BadCell(c, index)))
            .collect::<Result<Vec<_>, _>>()?;

        let count = cells.len();
        let size = side_length(count).ok_or(SnapshotError::BadLength(count))?;
        Board::from_cells(size, cells).ok_or(SnapshotError::BadLength(count))
    }
}

impl GameState {
    /// Encodes this state for storage.
    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board().to_cell_string(),
            active: self.active().to_string(),
        }
    }

    /// Decodes a stored state.
    #[instrument(skip(snapshot))]
    pub fn from_snapshot(snapshot: &Snapshot) -> Result<Self, SnapshotError> {
        let board = Board::from_cell_string(&snapshot.board)?;
        let active: Mark = snapshot
            .active
            .parse()
            .map_err(|_| SnapshotError::BadMark(snapshot.active.clone()))?;
        Ok(GameState::from_parts(board, active))
    }
}

/// Integer square root of `count`, if `count` is a positive perfect square.
fn side_length(count: usize) -> Option<usize> {
    (1..=count).take_while(|side| side * side <= count).find(|side| side * side == count)
}
