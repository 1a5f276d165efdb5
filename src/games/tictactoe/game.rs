//! Engine operations for tic-tac-toe.
//!
//! Every function here is pure: it reads a [`GameState`] and either reports
//! on it or returns a new one. Callers can keep earlier states around; they
//! are never touched by later moves.

use super::action::MoveError;
use super::contracts::LegalMove;
use super::{GameState, Mark, Outcome, rules};
use tracing::{debug, instrument};

pub use super::lines::winning_lines;

/// Creates a fresh standard-size game with `starting` to move.
#[instrument]
pub fn new_game(starting: Mark) -> GameState {
    GameState::new(starting)
}

/// Checks a move without applying it.
///
/// Fails with `GameAlreadyOver` once the state is terminal, then with
/// `OutOfRange` for an index outside `[0, N²)`, then with `CellOccupied`.
#[instrument(skip(state), fields(active = %state.active()))]
pub fn validate_move(state: &GameState, index: isize) -> Result<(), MoveError> {
    LegalMove::check(state, index).map(|_| ())
}

/// Places the active mark at `index` and hands the turn to the other player.
///
/// The move is validated again here, so an illegal move is rejected with the
/// same error as [`validate_move`] and `state` is left as it was.
#[instrument(skip(state), fields(active = %state.active()))]
pub fn apply_move(state: &GameState, index: isize) -> Result<GameState, MoveError> {
    let cell = LegalMove::check(state, index)?;
    let mark = state.active();
    let board = state.board().with_mark(cell, mark);
    let next = GameState::from_parts(board, mark.opponent());

    debug!(cell, %mark, filled = next.board().filled(), "Move applied");
    Ok(next)
}

/// Derives the outcome of a state.
pub fn evaluate(state: &GameState) -> Outcome {
    rules::outcome(state.board())
}
