//! Tic-tac-toe engine on an N×N board.

mod action;
mod contracts;
mod display;
mod game;
mod lines;
pub mod rules;
mod snapshot;
mod types;

pub use action::MoveError;
pub use contracts::{CellIsEmpty, GameNotOver, InBounds, LegalMove};
pub use display::{display_value, render_board};
pub use game::{apply_move, evaluate, new_game, validate_move, winning_lines};
pub use lines::{WinningLine, generate_winning_lines};
pub use snapshot::{Snapshot, SnapshotError};
pub use types::{BOARD_SIZE, Board, Cell, GameState, Mark, Outcome, TOTAL_CELLS};
