//! Winning-line generation for N×N boards.
//!
//! A line is won by filling a whole row, a whole column, or one of the two
//! full diagonals. Lines depend only on the side length, so each size is
//! generated once and kept for the life of the process.

use std::collections::HashMap;
use std::sync::{OnceLock, PoisonError, RwLock};
use tracing::{debug, instrument};

/// Board indices that win the game when they all hold the same mark.
pub type WinningLine = Box<[usize]>;

type LineCache = RwLock<HashMap<usize, &'static [WinningLine]>>;

static LINE_CACHE: OnceLock<LineCache> = OnceLock::new();

/// Builds every winning line for a board with side length `size`.
///
/// Lines come out in a fixed order: all rows top to bottom, all columns left
/// to right, the main diagonal, then the anti-diagonal. That is `2 * size + 2`
/// lines of `size` indices each. A size of zero has no lines.
#[instrument]
pub fn generate_winning_lines(size: usize) -> Vec<WinningLine> {
    if size == 0 {
        return Vec::new();
    }

    let mut lines: Vec<WinningLine> = Vec::with_capacity(2 * size + 2);

    // Rows
    for row in 0..size {
        lines.push((0..size).map(|col| row * size + col).collect());
    }

    // Columns
    for col in 0..size {
        lines.push((0..size).map(|row| row * size + col).collect());
    }

    // Diagonals
    lines.push((0..size).map(|i| i * size + i).collect());
    lines.push((0..size).map(|i| i * size + (size - 1 - i)).collect());

    lines
}

/// Returns the cached winning lines for `size`, generating them on first use.
///
/// The slice is leaked on purpose and shared read-only by every game.
pub fn winning_lines(size: usize) -> &'static [WinningLine] {
    let cache = LINE_CACHE.get_or_init(|| RwLock::new(HashMap::new()));

    let cached = cache
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&size)
        .copied();
    if let Some(lines) = cached {
        return lines;
    }

    let mut cache = cache.write().unwrap_or_else(PoisonError::into_inner);
    *cache.entry(size).or_insert_with(|| {
        debug!(size, "Caching winning lines");
        let lines: &'static [WinningLine] =
            Box::leak(generate_winning_lines(size).into_boxed_slice());
        lines
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_line_count_and_shape() {
        for size in 1..=8 {
            let lines = generate_winning_lines(size);
            assert_eq!(lines.len(), 2 * size + 2, "size {}", size);
            for line in &lines {
                assert_eq!(line.len(), size);
                assert!(line.iter().all(|&i| i < size * size));
            }
        }
    }

    #[test]
    fn test_indices_distinct_within_line() {
        for size in 1..=8 {
            for line in generate_winning_lines(size) {
                let unique: HashSet<_> = line.iter().copied().collect();
                assert_eq!(unique.len(), size);
            }
        }
    }

    #[test]
    fn test_single_cell_board() {
        let lines = generate_winning_lines(1);
        assert_eq!(lines.len(), 4);
        for line in &lines {
            assert_eq!(&line[..], &[0]);
        }
    }

    #[test]
    fn test_zero_size_has_no_lines() {
        assert!(generate_winning_lines(0).is_empty());
        assert!(winning_lines(0).is_empty());
    }

    #[test]
    fn test_order_rows_columns_diagonals() {
        let lines = generate_winning_lines(3);
        let as_vecs: Vec<Vec<usize>> = lines.iter().map(|l| l.to_vec()).collect();
        assert_eq!(
            as_vecs,
            vec![
                vec![0, 1, 2],
                vec![3, 4, 5],
                vec![6, 7, 8],
                vec![0, 3, 6],
                vec![1, 4, 7],
                vec![2, 5, 8],
                vec![0, 4, 8],
                vec![2, 4, 6],
            ]
        );
    }

    #[test]
    fn test_five_by_five_diagonals() {
        let lines = generate_winning_lines(5);
        assert_eq!(&lines[10][..], &[0, 6, 12, 18, 24]);
        assert_eq!(&lines[11][..], &[4, 8, 12, 16, 20]);
    }

    #[test]
    fn test_cache_returns_same_slice() {
        let first = winning_lines(5);
        let second = winning_lines(5);
        assert!(std::ptr::eq(first, second));
        assert_eq!(first, generate_winning_lines(5).as_slice());
    }
}
