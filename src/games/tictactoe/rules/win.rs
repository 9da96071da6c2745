//! Win detection logic for tic-tac-toe.

use super::super::{Board, CellIndex, Side};
use tracing::instrument;

/// Three cells that win when held by one side.
pub type WinPattern = [CellIndex; 3];

/// Every winning line on a 3x3 board.
///
/// The order is fixed: rows top to bottom, columns left to right, then the
/// main and anti diagonals. Win and block search scan it in this order.
pub const WIN_PATTERNS: [WinPattern; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Checks whether `side` holds every cell of at least one pattern.
///
/// Several simultaneous lines are not distinguished.
#[instrument(skip(board))]
pub fn has_won(board: &Board, side: Side) -> bool {
    let held = board.occupied_cells_of(side);
    WIN_PATTERNS
        .iter()
        .any(|pattern| pattern.iter().all(|cell| held.contains(cell)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_winner_empty_board() {
        let board = Board::new();
        assert!(!has_won(&board, Side::Human));
        assert!(!has_won(&board, Side::Opponent));
    }

    #[test]
    fn test_winner_top_row() {
        let board = Board::from_cells(&[0, 1, 2], &[3, 4]);
        assert!(has_won(&board, Side::Human));
        assert!(!has_won(&board, Side::Opponent));
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let board = Board::from_cells(&[0, 1], &[2, 4, 6]);
        assert!(has_won(&board, Side::Opponent));
    }

    #[test]
    fn test_no_winner_mixed_line() {
        let board = Board::from_cells(&[0, 1], &[2]);
        assert!(!has_won(&board, Side::Human));
        assert!(!has_won(&board, Side::Opponent));
    }

    #[test]
    fn test_every_pattern_wins() {
        for pattern in WIN_PATTERNS {
            let board = Board::from_cells(&pattern, &[]);
            assert!(has_won(&board, Side::Human), "pattern {pattern:?}");
        }
    }
}
