//! Opponent move selection.
//!
//! A fixed priority list, not a search:
//!
//! 1. complete an opponent line,
//! 2. block a human line,
//! 3. take the center,
//! 4. pick uniformly among the free cells.

use super::rules::WIN_PATTERNS;
use super::{Board, CellIndex, Side};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, error, instrument};

/// Center cell of the board.
pub const CENTER: CellIndex = 4;

/// Finds the free cell that would complete a line for `side`.
///
/// For each pattern in table order, takes the pattern minus the cells
/// `side` holds. If exactly one cell is missing and it is unoccupied, that
/// cell is returned.
#[instrument(skip(board))]
pub fn completing_cell(board: &Board, side: Side) -> Option<CellIndex> {
    let held = board.occupied_cells_of(side);
    WIN_PATTERNS.iter().find_map(|pattern| {
        let mut missing = pattern.iter().filter(|cell| !held.contains(*cell));
        match (missing.next(), missing.next()) {
            (Some(&cell), None) if !board.is_occupied(cell) => Some(cell),
            _ => None,
        }
    })
}

/// Chooses the opponent's reply.
///
/// Returns `None` only when called on a full or already won board, which
/// is a sequencing bug in the caller; debug builds panic instead.
#[instrument(skip(board, rng))]
pub fn choose_opponent_move<R: Rng>(board: &Board, rng: &mut R) -> Option<CellIndex> {
    let finished =
        board.is_full() || board.has_won(Side::Human) || board.has_won(Side::Opponent);
    debug_assert!(!finished, "opponent asked to move on a finished board");
    if finished {
        error!("Opponent asked to move on a finished board");
        return None;
    }

    if let Some(cell) = completing_cell(board, Side::Opponent) {
        debug!(cell, "Opponent completes a line");
        return Some(cell);
    }

    if let Some(cell) = completing_cell(board, Side::Human) {
        debug!(cell, "Opponent blocks a human line");
        return Some(cell);
    }

    if !board.is_occupied(CENTER) {
        debug!("Opponent takes the center");
        return Some(CENTER);
    }

    let free = board.available_cells();
    let cell = free[rng.random_range(0..free.len())];
    debug!(cell, choices = free.len(), "Opponent picks a random free cell");
    Some(cell)
}

/// The opponent, holding its own random source.
#[derive(Debug, Clone)]
pub struct Heuristic {
    rng: StdRng,
}

impl Heuristic {
    /// Creates a heuristic seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates a heuristic whose random fallback is reproducible.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates a seeded heuristic when a seed is given, otherwise an OS-seeded one.
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::new, Self::seeded)
    }

    /// See [`choose_opponent_move`].
    pub fn choose(&mut self, board: &Board) -> Option<CellIndex> {
        choose_opponent_move(board, &mut self.rng)
    }
}

impl Default for Heuristic {
    fn default() -> Self {
        Self::new()
    }
}
