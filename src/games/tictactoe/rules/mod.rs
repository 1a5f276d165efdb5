//! Game rules for tic-tac-toe.
//!
//! Pure functions evaluating a board against the win and draw conditions.
//! Rules are kept apart from board storage so the engine and the front ends
//! share one definition of a finished game.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{check_winner, winning_line};

use super::{Board, Outcome};

/// Derives the outcome of a board.
///
/// Lines are scanned in generation order and the first completed one
/// decides the winner. Without a winner, a full board is a draw.
pub fn outcome(board: &Board) -> Outcome {
    if let Some(mark) = check_winner(board) {
        Outcome::Win(mark)
    } else if is_full(board) {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}
