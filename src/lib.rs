//! Strictly Arbiter - tic-tac-toe against a heuristic opponent
//!
//! The rules engine and opponent for a one-human game of tic-tac-toe.
//!
//! # Architecture
//!
//! - **Board state**: the 9-cell board, occupancy queries, win and draw checks
//! - **Heuristic**: the opponent's fixed priority list (win, block, center, random)
//! - **Session**: synchronous turn sequencing and the input-enabled flag
//! - **Arbiter**: async wrapper that delays the opponent reply and publishes state
//!
//! # Example
//!
//! ```no_run
//! use strictly_arbiter::{ArbiterConfig, MoveArbiter};
//!
//! # async fn example() {
//! let arbiter = MoveArbiter::new(&ArbiterConfig::immediate(42));
//! arbiter.process_move(0);
//! arbiter.wait_for_reply().await;
//! println!("{}", arbiter.snapshot().board.display());
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod arbiter;
mod config;
mod games;

pub use arbiter::MoveArbiter;
pub use config::{ArbiterConfig, ConfigError};

pub use games::tictactoe::rules;
pub use games::tictactoe::{
    ArbiterPhase, BOARD_CELLS, Board, CENTER, CellIndex, GameSession, Heuristic, HumanTurn, Move,
    MoveError, Outcome, Position, SessionSnapshot, Side, choose_opponent_move, completing_cell,
};
