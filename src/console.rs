//! Line-oriented terminal front end for two players sharing a keyboard.

use crate::games::tictactoe::{
    GameState, Mark, Outcome, apply_move, evaluate, new_game, render_board, validate_move,
};
use anyhow::Result;
use std::io::{self, BufRead, Write};
use tracing::{debug, info, instrument};

/// Terminal game loop over any line reader and writer.
pub struct Console<R, W> {
    input: R,
    output: W,
    starting: Mark,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Creates a console that starts every round with `starting` to move.
    pub fn new(input: R, output: W, starting: Mark) -> Self {
        Self {
            input,
            output,
            starting,
        }
    }

    /// Plays rounds until the players decline another one or input ends.
    #[instrument(skip(self), fields(starting = %self.starting))]
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "Welcome to Tic Tac Toe!")?;

        loop {
            let Some(outcome) = self.play_round()? else {
                return self.interrupted();
            };
            info!(%outcome, winner = ?outcome.winner(), "Round finished");

            match self.want_to_continue()? {
                Some(true) => continue,
                Some(false) => {
                    writeln!(self.output, "Thanks for playing!")?;
                    return Ok(());
                }
                None => return self.interrupted(),
            }
        }
    }

    /// Plays one round to a win or draw.
    ///
    /// Returns `None` if input ended before the round finished.
    pub fn play_round(&mut self) -> Result<Option<Outcome>> {
        let mut state = new_game(self.starting);

        loop {
            writeln!(self.output, "\n{}", render_board(state.board()))?;
            let Some(index) = self.get_move(&state)? else {
                return Ok(None);
            };
            state = apply_move(&state, index)?;

            let outcome = evaluate(&state);
            if outcome.is_terminal() {
                writeln!(self.output, "\n{}", render_board(state.board()))?;
                writeln!(self.output, "\n{}", outcome)?;
                return Ok(Some(outcome));
            }
        }
    }

    /// Prompts the active player until they name a legal cell.
    ///
    /// Players type 1-based positions; the returned index is 0-based.
    fn get_move(&mut self, state: &GameState) -> Result<Option<isize>> {
        let total = state.board().cell_count();

        loop {
            write!(
                self.output,
                "Player {}, choose a position (1-{}): ",
                state.active(),
                total
            )?;
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };

            let slot = match parse_position(&line) {
                Some(slot) => slot,
                None => {
                    writeln!(self.output, "Please enter a number between 1 and {}.", total)?;
                    continue;
                }
            };

            match validate_move(state, slot - 1) {
                Ok(()) => return Ok(Some(slot - 1)),
                Err(e) => {
                    debug!(slot, error = %e, "Rejected terminal move");
                    writeln!(self.output, "{}", e.user_message())?;
                }
            }
        }
    }

    /// Asks whether to play again. `None` when input ended.
    fn want_to_continue(&mut self) -> Result<Option<bool>> {
        loop {
            write!(self.output, "Play again? [y/n]: ")?;
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };

            match line.trim().to_lowercase().as_str() {
                "y" | "yes" => return Ok(Some(true)),
                "n" | "no" => return Ok(Some(false)),
                _ => writeln!(self.output, "Please answer with 'y' or 'n'.")?,
            }
        }
    }

    fn interrupted(&mut self) -> Result<()> {
        writeln!(self.output, "\nGame interrupted. Goodbye!")?;
        Ok(())
    }

    /// Reads one line, or `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

/// Parses a typed position made only of digits.
///
/// Numbers too large for `isize` saturate so the engine reports them as out
/// of range.
fn parse_position(line: &str) -> Option<isize> {
    let trimmed = line.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(trimmed.parse().unwrap_or(isize::MAX))
}

/// Runs the terminal game on standard input and output.
pub fn run_stdio(starting: Mark) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    Console::new(stdin.lock(), stdout.lock(), starting).run()
}
