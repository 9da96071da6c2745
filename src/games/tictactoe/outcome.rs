//! Outcome classification derived from a board.

use super::{Board, Side};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Classification of a board after a half-move.
///
/// Always recomputed from the board, never stored alongside it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum Outcome {
    /// No line and free cells remain.
    #[display("In progress")]
    InProgress,
    /// The human completed a line.
    #[display("Human wins")]
    HumanWin,
    /// The opponent completed a line.
    #[display("Opponent wins")]
    OpponentWin,
    /// Full board, no line.
    #[display("Draw")]
    Draw,
}

impl Outcome {
    /// Classifies a board. Wins are checked before the draw so a final
    /// winning move is never reported as a draw.
    #[instrument(skip(board))]
    pub fn evaluate(board: &Board) -> Self {
        if board.has_won(Side::Human) {
            Outcome::HumanWin
        } else if board.has_won(Side::Opponent) {
            Outcome::OpponentWin
        } else if board.is_full() {
            Outcome::Draw
        } else {
            Outcome::InProgress
        }
    }

    /// True for every variant except `InProgress`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    /// Returns the winning side if there is one.
    pub fn winner(&self) -> Option<Side> {
        match self {
            Outcome::HumanWin => Some(Side::Human),
            Outcome::OpponentWin => Some(Side::Opponent),
            Outcome::InProgress | Outcome::Draw => None,
        }
    }
}
