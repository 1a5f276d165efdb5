//! Human-facing rendering shared by the terminal and web front ends.

use super::{Board, Cell};

/// Value shown for a cell: its mark, or the 1-based position number if empty.
pub fn display_value(board: &Board, index: usize) -> String {
    match board.get(index) {
        Some(Cell::Occupied(mark)) => mark.to_string(),
        _ => (index + 1).to_string(),
    }
}

/// Renders the board as text, one row per line with dividers between rows.
///
/// Every cell is centred in a column as wide as the largest position number.
pub fn render_board(board: &Board) -> String {
    let width = board.cell_count().to_string().len().max(1);
    let size = board.size();

    let rows: Vec<String> = board
        .rows()
        .enumerate()
        .map(|(row, cells)| {
            let cells: Vec<String> = (0..cells.len())
                .map(|col| format!("{:^width$}", display_value(board, row * size + col)))
                .collect();
            format!(" {} ", cells.join(" | "))
        })
        .collect();

    let divider = vec!["-".repeat(width + 2); size].join("+");
    rows.join(&format!("\n{}\n", divider))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{Mark, apply_move, new_game};

    #[test]
    fn test_display_value_empty_is_one_based() {
        let board = Board::new();
        assert_eq!(display_value(&board, 0), "1");
        assert_eq!(display_value(&board, 24), "25");
    }

    #[test]
    fn test_display_value_occupied_shows_mark() {
        let state = apply_move(&new_game(Mark::X), 6).expect("legal");
        let state = apply_move(&state, 7).expect("legal");
        assert_eq!(display_value(state.board(), 6), "X");
        assert_eq!(display_value(state.board(), 7), "O");
    }

    #[test]
    fn test_render_empty_board() {
        let rendered = render_board(&Board::new());
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], " 1  | 2  | 3  | 4  | 5  ");
        assert_eq!(lines[1], "----+----+----+----+----");
        assert_eq!(lines[8], " 21 | 22 | 23 | 24 | 25 ");
    }

    #[test]
    fn test_render_marks() {
        let state = apply_move(&new_game(Mark::X), 0).expect("legal");
        let rendered = render_board(state.board());
        assert!(rendered.starts_with(" X  | 2  |"));
    }

    #[test]
    fn test_render_single_cell() {
        let board = Board::with_size(1).expect("size 1");
        assert_eq!(render_board(&board), " 1 ");
    }
}
