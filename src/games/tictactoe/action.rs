//! Move errors for tic-tac-toe.
//!
//! Every error is recoverable: the caller keeps its current state and
//! presents it again.

/// Error that can occur when validating or applying a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum MoveError {
    /// The index does not address a cell on the board.
    #[display("Position {} is outside the board", _0)]
    OutOfRange(isize),

    /// The cell at the index already holds a mark.
    #[display("Square {} is already occupied", _0)]
    CellOccupied(usize),

    /// The game has already been won or drawn.
    #[display("Game is already over")]
    GameAlreadyOver,
}

impl MoveError {
    /// Sentence shown to players by the terminal and web front ends.
    pub fn user_message(&self) -> &'static str {
        match self {
            MoveError::OutOfRange(_) => "That position is outside the board.",
            MoveError::CellOccupied(_) => "That square is already taken.",
            MoveError::GameAlreadyOver => "The game is finished. Start a new game to continue.",
        }
    }
}

impl std::error::Error for MoveError {}
