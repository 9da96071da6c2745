//! Tic-tac-toe rules, opponent heuristic, and turn sequencing.

mod heuristic;
mod outcome;
mod position;
pub mod rules;
mod session;
mod types;

pub use heuristic::{CENTER, Heuristic, choose_opponent_move, completing_cell};
pub use outcome::Outcome;
pub use position::Position;
pub use session::{ArbiterPhase, GameSession, HumanTurn, MoveError, SessionSnapshot};
pub use types::{BOARD_CELLS, Board, CellIndex, Move, Side};
