//! Fivetoe - tic-tac-toe on a five-by-five board.
//!
//! # Architecture
//!
//! - **Engine**: pure functions over immutable game states (winning lines,
//!   move validation, outcome evaluation)
//! - **Console**: two players sharing a terminal
//! - **Web**: axum server keeping each visitor's game in a session store
//!
//! # Example
//!
//! ```
//! use fivetoe::{apply_move, evaluate, new_game, Mark, Outcome};
//!
//! let game = new_game(Mark::X);
//! let game = apply_move(&game, 12)?;
//! assert_eq!(game.active(), Mark::O);
//! assert_eq!(evaluate(&game), Outcome::InProgress);
//! # Ok::<(), fivetoe::MoveError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod console;
mod games;
mod session;
mod web;

// Crate-level exports - Configuration
pub use config::{AppConfig, ConfigError};

// Crate-level exports - Terminal front end
pub use console::{Console, run_stdio};

// Crate-level exports - Web front end
pub use web::{AppState, INVALID_SELECTION, MoveForm, NEW_GAME_STARTED, render_page, router, serve};

// Crate-level exports - Session storage
pub use session::{InMemorySessionStore, SessionId, SessionStore, VisitorSession};

// Crate-level exports - Game engine
pub use games::tictactoe::{
    BOARD_SIZE, Board, Cell, CellIsEmpty, GameNotOver, GameState, InBounds, LegalMove, Mark,
    MoveError, Outcome, Snapshot, SnapshotError, TOTAL_CELLS, WinningLine, apply_move,
    display_value, evaluate, generate_winning_lines, new_game, render_board, rules,
    validate_move, winning_lines,
};
