//! Core domain types for tic-tac-toe.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::instrument;

use super::rules;

/// Index of a cell on the board, row-major (0-8).
pub type CellIndex = usize;

/// Number of cells on a 3x3 board.
pub const BOARD_CELLS: usize = 9;

/// Side making a move.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum Side {
    /// The person tapping cells.
    Human,
    /// The automated opponent.
    Opponent,
}

impl Side {
    /// Returns the other side.
    pub fn other(self) -> Self {
        match self {
            Side::Human => Side::Opponent,
            Side::Opponent => Side::Human,
        }
    }

    /// Mark drawn for this side: a cross for the human, a circle for the opponent.
    pub fn symbol(self) -> char {
        match self {
            Side::Human => 'X',
            Side::Opponent => 'O',
        }
    }
}

/// A claimed cell. Never mutated once written to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    side: Side,
    cell: CellIndex,
}

impl Move {
    /// Creates a new move.
    pub fn new(side: Side, cell: CellIndex) -> Self {
        Self { side, cell }
    }

    /// Side that made the move.
    pub fn side(&self) -> Side {
        self.side
    }

    /// Cell the move claims.
    pub fn cell(&self) -> CellIndex {
        self.cell
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.side, self.cell)
    }
}

/// 3x3 board of optional moves.
///
/// A slot stays empty until exactly one move is written to it and is then
/// occupied for the rest of the game. The slot index always equals the
/// cell index stored in its move.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Board {
    slots: [Option<Move>; BOARD_CELLS],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from the cells each side holds.
    ///
    /// Cells listed for both sides, or out of range, are skipped.
    pub fn from_cells(human: &[CellIndex], opponent: &[CellIndex]) -> Self {
        let mut board = Self::new();
        let tagged = human
            .iter()
            .map(|&c| (Side::Human, c))
            .chain(opponent.iter().map(|&c| (Side::Opponent, c)));
        for (side, cell) in tagged {
            board.place(Move::new(side, cell));
        }
        board
    }

    /// Writes a move into its slot.
    ///
    /// Returns `false` and leaves the board untouched if the cell is out of
    /// range or already taken.
    pub(crate) fn place(&mut self, mv: Move) -> bool {
        match self.slots.get_mut(mv.cell()) {
            Some(slot @ None) => {
                *slot = Some(mv);
                true
            }
            _ => false,
        }
    }

    /// Returns the move in the given slot, if any.
    pub fn get(&self, cell: CellIndex) -> Option<Move> {
        self.slots.get(cell).copied().flatten()
    }

    /// All slots in row-major order.
    pub fn slots(&self) -> &[Option<Move>; BOARD_CELLS] {
        &self.slots
    }

    /// True iff some move on the board has this cell index.
    pub fn is_occupied(&self, cell: CellIndex) -> bool {
        self.slots.iter().flatten().any(|mv| mv.cell() == cell)
    }

    /// Cells held by `side`.
    #[instrument(skip(self))]
    pub fn occupied_cells_of(&self, side: Side) -> BTreeSet<CellIndex> {
        self.slots
            .iter()
            .flatten()
            .filter(|mv| mv.side() == side)
            .map(|mv| mv.cell())
            .collect()
    }

    /// Number of filled slots.
    pub fn occupied_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Unoccupied cells in ascending order.
    pub fn available_cells(&self) -> Vec<CellIndex> {
        (0..BOARD_CELLS).filter(|&c| !self.is_occupied(c)).collect()
    }

    /// See [`rules::has_won`].
    pub fn has_won(&self, side: Side) -> bool {
        rules::has_won(self, side)
    }

    /// See [`rules::is_full`].
    pub fn is_full(&self) -> bool {
        rules::is_full(self)
    }

    /// See [`rules::is_draw`].
    pub fn is_draw(&self) -> bool {
        rules::is_draw(self)
    }

    /// Formats the board as a human-readable grid.
    ///
    /// Empty cells show their cell index, the number a player types to claim them.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let cell = row * 3 + col;
                match self.get(cell) {
                    Some(mv) => result.push(mv.side().symbol()),
                    None => result.push_str(&cell.to_string()),
                }
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}
