//! Turn sequencing for one human-vs-opponent game.
//!
//! [`GameSession`] is the synchronous core of the move arbiter: it owns the
//! board and the input flag and moves through [`ArbiterPhase`] one
//! half-move at a time. Timing lives in [`crate::MoveArbiter`].

use super::heuristic::Heuristic;
use super::{BOARD_CELLS, Board, CellIndex, Move, Outcome, Side};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

/// Where a session is within a turn.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum ArbiterPhase {
    /// Waiting for the human to pick a cell.
    AwaitingHuman,
    /// Human move applied, opponent reply pending.
    InputLocked,
    /// Game over until reset.
    Terminal,
}

/// Why a move was not applied.
///
/// [`crate::MoveArbiter::process_move`] treats every variant as a silent
/// no-op; the variants exist for logging and direct session callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// Cell index is not on the board.
    #[display("Cell {} is out of range (must be 0-8)", _0)]
    OutOfRange(CellIndex),

    /// Cell already holds a move.
    #[display("Cell {} is already occupied", _0)]
    Occupied(CellIndex),

    /// Input is disabled while the opponent reply is pending.
    #[display("Input is locked")]
    InputLocked,

    /// No reply is pending, so the opponent may not move.
    #[display("No opponent reply is pending")]
    NoReplyPending,

    /// The game has ended.
    #[display("Game is already over")]
    GameOver,
}

impl std::error::Error for MoveError {}

/// What the arbiter must do after a human move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HumanTurn {
    /// The game continues; schedule the opponent.
    ReplyDue,
    /// The human move ended the game.
    Finished(Outcome),
}

/// Observable session state, published after every change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// The board.
    pub board: Board,
    /// Whether human taps are currently accepted.
    pub input_enabled: bool,
    /// Emitted outcome; `None` while the game is in progress.
    pub outcome: Option<Outcome>,
    /// Current phase.
    pub phase: ArbiterPhase,
}

/// A single game's state: board, input flag, and emitted outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    board: Board,
    phase: ArbiterPhase,
    input_enabled: bool,
    outcome: Option<Outcome>,
}

impl GameSession {
    /// Creates a session with an empty board and input enabled.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            phase: ArbiterPhase::AwaitingHuman,
            input_enabled: true,
            outcome: None,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the current phase.
    pub fn phase(&self) -> ArbiterPhase {
        self.phase
    }

    /// Whether human taps are accepted.
    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    /// The emitted outcome, if the game has ended.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Copies the observable state.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            board: self.board.clone(),
            input_enabled: self.input_enabled,
            outcome: self.outcome,
            phase: self.phase,
        }
    }

    /// Applies the human half-move.
    ///
    /// On success input is locked. A human win or a draw ends the game
    /// here and no reply is due; input then stays locked until reset.
    ///
    /// # Errors
    ///
    /// Returns a [`MoveError`] and leaves the session untouched when the
    /// game is over, input is locked, or the cell is out of range or taken.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn apply_human_move(&mut self, cell: CellIndex) -> Result<HumanTurn, MoveError> {
        if self.phase == ArbiterPhase::Terminal {
            return Err(MoveError::GameOver);
        }
        if !self.input_enabled || self.phase == ArbiterPhase::InputLocked {
            return Err(MoveError::InputLocked);
        }
        if cell >= BOARD_CELLS {
            return Err(MoveError::OutOfRange(cell));
        }
        if !self.board.place(Move::new(Side::Human, cell)) {
            return Err(MoveError::Occupied(cell));
        }

        self.input_enabled = false;
        self.phase = ArbiterPhase::InputLocked;
        debug!(cell, "Human move applied");

        match Outcome::evaluate(&self.board) {
            Outcome::InProgress => Ok(HumanTurn::ReplyDue),
            outcome => Ok(HumanTurn::Finished(self.finish(outcome))),
        }
    }

    /// Applies the opponent half-move at `cell`.
    ///
    /// Input is re-enabled together with the write, whether or not the
    /// move ends the game. Returns the resulting outcome.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::NoReplyPending`] unless a reply is due, or a
    /// placement error if `cell` is out of range or taken.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn apply_opponent_move(&mut self, cell: CellIndex) -> Result<Outcome, MoveError> {
        if self.phase != ArbiterPhase::InputLocked {
            return Err(MoveError::NoReplyPending);
        }
        if cell >= BOARD_CELLS {
            return Err(MoveError::OutOfRange(cell));
        }
        if !self.board.place(Move::new(Side::Opponent, cell)) {
            return Err(MoveError::Occupied(cell));
        }

        self.input_enabled = true;
        debug!(cell, "Opponent move applied");

        let outcome = Outcome::evaluate(&self.board);
        if outcome.is_terminal() {
            return Ok(self.finish(outcome));
        }
        self.phase = ArbiterPhase::AwaitingHuman;
        Ok(outcome)
    }

    /// Asks `heuristic` for the reply and applies it.
    ///
    /// Returns `None` without touching the board if no reply is due or the
    /// heuristic declines, which only happens on a sequencing bug.
    #[instrument(skip(self, heuristic))]
    pub fn play_opponent_reply(&mut self, heuristic: &mut Heuristic) -> Option<Outcome> {
        if self.phase != ArbiterPhase::InputLocked {
            debug!(phase = %self.phase, "No opponent reply due");
            return None;
        }
        let Some(cell) = heuristic.choose(&self.board) else {
            error!("Heuristic produced no move for a pending reply");
            return None;
        };
        match self.apply_opponent_move(cell) {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                error!(error = %e, cell, "Heuristic chose an illegal cell");
                None
            }
        }
    }

    /// Restores the empty board with input enabled.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        info!(previous = ?self.outcome, "Resetting game session");
        *self = Self::new();
    }

    fn finish(&mut self, outcome: Outcome) -> Outcome {
        info!(%outcome, moves = self.board.occupied_count(), "Game over");
        self.phase = ArbiterPhase::Terminal;
        self.outcome = Some(outcome);
        outcome
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with(human: &[CellIndex], opponent: &[CellIndex]) -> GameSession {
        GameSession {
            board: Board::from_cells(human, opponent),
            ..GameSession::new()
        }
    }

    #[test]
    fn test_human_move_locks_input() {
        let mut session = GameSession::new();
        assert_eq!(session.apply_human_move(0), Ok(HumanTurn::ReplyDue));
        assert!(!session.input_enabled());
        assert_eq!(session.phase(), ArbiterPhase::InputLocked);
        assert_eq!(session.apply_human_move(1), Err(MoveError::InputLocked));
    }

    #[test]
    fn test_occupied_cell_is_rejected_without_change() {
        let mut session = session_with(&[], &[4]);
        let before = session.clone();
        assert_eq!(session.apply_human_move(4), Err(MoveError::Occupied(4)));
        assert_eq!(session, before);
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        let mut session = GameSession::new();
        assert_eq!(session.apply_human_move(9), Err(MoveError::OutOfRange(9)));
        assert!(session.input_enabled());
    }

    #[test]
    fn test_human_win_skips_reply() {
        let mut session = session_with(&[0, 1], &[3, 4]);
        assert_eq!(
            session.apply_human_move(2),
            Ok(HumanTurn::Finished(Outcome::HumanWin))
        );
        assert_eq!(session.phase(), ArbiterPhase::Terminal);
        assert!(!session.input_enabled());
        assert_eq!(session.apply_opponent_move(5), Err(MoveError::NoReplyPending));
    }

    #[test]
    fn test_opponent_reply_reenables_input_even_when_winning() {
        let mut session = session_with(&[0, 1], &[3, 4]);
        assert_eq!(session.apply_human_move(8), Ok(HumanTurn::ReplyDue));
        assert_eq!(session.apply_opponent_move(5), Ok(Outcome::OpponentWin));
        assert!(session.input_enabled());
        assert_eq!(session.phase(), ArbiterPhase::Terminal);
        assert_eq!(session.apply_human_move(2), Err(MoveError::GameOver));
    }

    #[test]
    fn test_reply_requires_pending_turn() {
        let mut session = GameSession::new();
        let mut heuristic = Heuristic::seeded(3);
        assert_eq!(session.play_opponent_reply(&mut heuristic), None);
        assert_eq!(session.board().occupied_count(), 0);
    }

    #[cfg(not(debug_assertions))]
    #[test]
    fn test_reply_on_finished_board_leaves_board_untouched() {
        // A reply marked due on a board that is already won.
        let mut session = GameSession {
            board: Board::from_cells(&[0, 1, 2], &[3, 4]),
            phase: ArbiterPhase::InputLocked,
            input_enabled: false,
            outcome: None,
        };
        let before = session.clone();
        let mut heuristic = Heuristic::seeded(3);
        assert_eq!(session.play_opponent_reply(&mut heuristic), None);
        assert_eq!(session, before);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "finished board")]
    fn test_reply_on_finished_board_asserts_in_debug() {
        let mut session = GameSession {
            board: Board::from_cells(&[0, 2, 3, 7, 8], &[1, 4, 5, 6]),
            phase: ArbiterPhase::InputLocked,
            input_enabled: false,
            outcome: None,
        };
        let mut heuristic = Heuristic::seeded(3);
        session.play_opponent_reply(&mut heuristic);
    }

    #[test]
    fn test_reset_restores_empty_session() {
        let mut session = session_with(&[0, 1], &[3, 4]);
        session.apply_human_move(2).unwrap();
        session.reset();
        assert_eq!(session, GameSession::new());
        assert_eq!(session.outcome(), None);
    }
}
