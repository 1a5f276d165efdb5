//! Move preconditions for tic-tac-toe.
//!
//! Each precondition is a small unit struct with a `check` function so the
//! rules can be tested one at a time and composed into [`LegalMove`].

use super::action::MoveError;
use super::rules;
use super::GameState;
use tracing::{instrument, warn};

/// Precondition: the game has not been won or drawn.
pub struct GameNotOver;

impl GameNotOver {
    /// Fails with `GameAlreadyOver` when the state is terminal.
    #[instrument(skip(state))]
    pub fn check(state: &GameState) -> Result<(), MoveError> {
        if rules::outcome(state.board()).is_terminal() {
            Err(MoveError::GameAlreadyOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: the index addresses a cell on the board.
pub struct InBounds;

impl InBounds {
    /// Returns the index as a cell offset, or `OutOfRange`.
    #[instrument(skip(state))]
    pub fn check(state: &GameState, index: isize) -> Result<usize, MoveError> {
        usize::try_from(index)
            .ok()
            .filter(|&cell| cell < state.board().cell_count())
            .ok_or(MoveError::OutOfRange(index))
    }
}

/// Precondition: the addressed cell is empty.
pub struct CellIsEmpty;

impl CellIsEmpty {
    /// Fails with `CellOccupied` when the cell already holds a mark.
    #[instrument(skip(state))]
    pub fn check(state: &GameState, cell: usize) -> Result<(), MoveError> {
        if state.board().is_empty(cell) {
            Ok(())
        } else {
            Err(MoveError::CellOccupied(cell))
        }
    }
}

/// Composite precondition: a move is legal if the game is still running,
/// the index is on the board, and the cell is empty.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions, returning the checked cell offset.
    #[instrument(skip(state), fields(active = %state.active()))]
    pub fn check(state: &GameState, index: isize) -> Result<usize, MoveError> {
        let result = GameNotOver::check(state)
            .and_then(|()| InBounds::check(state, index))
            .and_then(|cell| CellIsEmpty::check(state, cell).map(|()| cell));

        if let Err(e) = &result {
            warn!(index, error = %e, "Move rejected");
        }

        result
    }
}
