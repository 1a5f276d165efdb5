//! Win detection logic for tic-tac-toe.

use super::super::lines::winning_lines;
use super::super::{Board, Cell, Mark};
use tracing::instrument;

/// Finds the first completed line, in generation order.
///
/// Returns the line's indices together with the mark that fills it.
#[instrument(skip(board), fields(size = board.size()))]
pub fn winning_line(board: &Board) -> Option<(&'static [usize], Mark)> {
    winning_lines(board.size())
        .iter()
        .find_map(|line| line_owner(board, line).map(|mark| (&line[..], mark)))
}

/// Checks if there is a winner on the board.
///
/// Returns `Some(mark)` if a whole row, column, or diagonal holds that mark.
pub fn check_winner(board: &Board) -> Option<Mark> {
    winning_line(board).map(|(_, mark)| mark)
}

/// Returns the mark that fills every cell of `line`, if one does.
fn line_owner(board: &Board, line: &[usize]) -> Option<Mark> {
    let (first, rest) = line.split_first()?;
    let mark = board.get(*first)?.mark()?;
    rest.iter()
        .all(|&index| board.get(index) == Some(Cell::Occupied(mark)))
        .then_some(mark)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_from(rows: &[&str]) -> Board {
        let cells = rows
            .iter()
            .flat_map(|row| row.chars())
            .map(|c| Cell::from_char(c).expect("valid cell"))
            .collect();
        Board::from_cells(rows.len(), cells).expect("square board")
    }

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(check_winner(&Board::new()), None);
    }

    #[test]
    fn test_winner_top_row() {
        let board = board_from(&["XXXXX", "OOOO ", "     ", "     ", "     "]);
        assert_eq!(check_winner(&board), Some(Mark::X));
    }

    #[test]
    fn test_winner_column() {
        let board = board_from(&["XO   ", "XO   ", " O  X", "XO   ", " O X "]);
        assert_eq!(check_winner(&board), Some(Mark::O));
        let (line, _) = winning_line(&board).expect("column is complete");
        assert_eq!(line, &[1, 6, 11, 16, 21]);
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let board = board_from(&["XX  O", "X  O ", "  O  ", " O X ", "O  X "]);
        assert_eq!(check_winner(&board), Some(Mark::O));
    }

    #[test]
    fn test_four_in_a_row_is_not_a_win() {
        let board = board_from(&["XXXX ", "OOOO ", "     ", "     ", "     "]);
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_first_line_in_order_wins_on_malformed_board() {
        // Unreachable in play: row 0 is X, row 1 is O. Rows come first, so row 0 decides.
        let board = board_from(&["XXXXX", "OOOOO", "     ", "     ", "     "]);
        let (line, mark) = winning_line(&board).expect("two complete rows");
        assert_eq!(mark, Mark::X);
        assert_eq!(line, &[0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_single_cell_board() {
        let empty = board_from(&[" "]);
        assert_eq!(check_winner(&empty), None);
        let marked = board_from(&["O"]);
        assert_eq!(check_winner(&marked), Some(Mark::O));
    }
}
