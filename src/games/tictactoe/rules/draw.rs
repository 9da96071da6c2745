//! Draw detection logic for tic-tac-toe.

use super::super::{BOARD_CELLS, Board, Side};
use super::win::has_won;
use tracing::instrument;

/// Checks if every cell is occupied.
///
/// A full board alone is not a draw; see [`is_draw`].
pub fn is_full(board: &Board) -> bool {
    board.occupied_count() == BOARD_CELLS
}

/// Checks for a draw: a full board where neither side has a line.
#[instrument(skip(board))]
pub fn is_draw(board: &Board) -> bool {
    is_full(board) && !has_won(board, Side::Human) && !has_won(board, Side::Opponent)
}
