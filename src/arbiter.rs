//! Move arbiter: sequences human input and the delayed opponent reply.

use crate::config::ArbiterConfig;
use crate::games::tictactoe::{
    CellIndex, GameSession, Heuristic, HumanTurn, MoveError, Outcome, SessionSnapshot,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{Instrument, debug, error, info, info_span, instrument, warn};

#[derive(Debug)]
struct ArbiterState {
    session: GameSession,
    heuristic: Heuristic,
    /// Bumped on reset; a reply scheduled under an older value is stale.
    generation: u64,
    pending: Option<JoinHandle<()>>,
}

/// Owns one game session and plays the opponent against human input.
///
/// Cloning yields another handle to the same session. Observers either
/// poll [`MoveArbiter::snapshot`] or [`MoveArbiter::subscribe`] to receive
/// every published change.
///
/// [`MoveArbiter::process_move`] spawns the opponent reply on the current
/// Tokio runtime; taps made outside a runtime are ignored.
#[derive(Debug, Clone)]
pub struct MoveArbiter {
    state: Arc<Mutex<ArbiterState>>,
    updates: Arc<watch::Sender<SessionSnapshot>>,
    reply_delay: Duration,
}

fn lock(state: &Mutex<ArbiterState>) -> MutexGuard<'_, ArbiterState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MoveArbiter {
    /// Creates an arbiter from configuration.
    #[instrument(skip(config), fields(reply_delay_ms = *config.reply_delay_ms(), seed = ?config.seed()))]
    pub fn new(config: &ArbiterConfig) -> Self {
        Self::with_heuristic(Heuristic::from_seed(*config.seed()), config.reply_delay())
    }

    /// Creates an arbiter around an existing heuristic.
    pub fn with_heuristic(heuristic: Heuristic, reply_delay: Duration) -> Self {
        let session = GameSession::new();
        let (updates, _) = watch::channel(session.snapshot());
        Self {
            state: Arc::new(Mutex::new(ArbiterState {
                session,
                heuristic,
                generation: 0,
                pending: None,
            })),
            updates: Arc::new(updates),
            reply_delay,
        }
    }

    /// Handles one tap on `cell`.
    ///
    /// Taps on occupied or out-of-range cells, taps while input is locked,
    /// and taps after the game has ended are ignored. Otherwise the human
    /// move is applied and published, and unless it ended the game the
    /// opponent reply is scheduled after the configured delay.
    #[instrument(skip(self))]
    pub fn process_move(&self, cell: CellIndex) {
        let Ok(runtime) = Handle::try_current() else {
            error!("Ignoring tap made outside a Tokio runtime");
            return;
        };
        let mut state = lock(&self.state);
        match state.session.apply_human_move(cell) {
            Err(e @ MoveError::OutOfRange(_)) => {
                warn!(error = %e, "Ignoring tap");
            }
            Err(e) => {
                debug!(error = %e, "Ignoring tap");
            }
            Ok(HumanTurn::Finished(outcome)) => {
                info!(%outcome, "Human move ended the game");
                self.updates.send_replace(state.session.snapshot());
            }
            Ok(HumanTurn::ReplyDue) => {
                self.updates.send_replace(state.session.snapshot());
                let generation = state.generation;
                state.pending = Some(self.schedule_reply(&runtime, generation));
            }
        }
    }

    fn schedule_reply(&self, runtime: &Handle, generation: u64) -> JoinHandle<()> {
        let state = Arc::clone(&self.state);
        let updates = Arc::clone(&self.updates);
        let delay = self.reply_delay;
        debug!(generation, ?delay, "Scheduling opponent reply");

        let reply = async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            let mut guard = lock(&state);
            if guard.generation != generation {
                debug!(current = guard.generation, "Discarding stale opponent reply");
                return;
            }

            let ArbiterState {
                session, heuristic, ..
            } = &mut *guard;
            match session.play_opponent_reply(heuristic) {
                Some(Outcome::InProgress) => debug!("Awaiting human move"),
                Some(outcome) => info!(%outcome, "Opponent move ended the game"),
                None => error!("Opponent reply was not applied"),
            }
            updates.send_replace(session.snapshot());
        };

        runtime.spawn(reply.instrument(info_span!("opponent_reply", generation)))
    }

    /// Waits for a scheduled opponent reply, if one is pending.
    #[instrument(skip(self))]
    pub async fn wait_for_reply(&self) {
        let pending = lock(&self.state).pending.take();
        if let Some(handle) = pending
            && let Err(e) = handle.await
            && !e.is_cancelled()
        {
            error!(error = %e, "Opponent reply task failed");
        }
    }

    /// Cancels any pending reply and starts a fresh game.
    #[instrument(skip(self))]
    pub fn reset(&self) {
        let mut state = lock(&self.state);
        state.generation = state.generation.wrapping_add(1);
        if let Some(handle) = state.pending.take() {
            handle.abort();
        }
        state.session.reset();
        self.updates.send_replace(state.session.snapshot());
    }

    /// Copies the current observable state.
    pub fn snapshot(&self) -> SessionSnapshot {
        lock(&self.state).session.snapshot()
    }

    /// Subscribes to published state changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.updates.subscribe()
    }

    /// Configured pause before the opponent replies.
    pub fn reply_delay(&self) -> Duration {
        self.reply_delay
    }
}

impl Default for MoveArbiter {
    fn default() -> Self {
        Self::new(&ArbiterConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::ArbiterPhase;

    #[tokio::test]
    async fn test_reply_follows_human_move() {
        let arbiter = MoveArbiter::new(&ArbiterConfig::immediate(11));
        arbiter.process_move(0);
        arbiter.wait_for_reply().await;

        let snapshot = arbiter.snapshot();
        assert_eq!(snapshot.board.occupied_count(), 2);
        assert_eq!(snapshot.board.get(4).map(|mv| mv.side()), Some(crate::Side::Opponent));
        assert!(snapshot.input_enabled);
        assert_eq!(snapshot.phase, ArbiterPhase::AwaitingHuman);
    }

    #[test]
    fn test_tap_outside_runtime_is_ignored() {
        let arbiter = MoveArbiter::new(&ArbiterConfig::immediate(11));
        arbiter.process_move(0);

        let snapshot = arbiter.snapshot();
        assert_eq!(snapshot.board.occupied_count(), 0);
        assert!(snapshot.input_enabled);
        assert_eq!(snapshot.phase, ArbiterPhase::AwaitingHuman);
    }

    #[tokio::test]
    async fn test_reset_cancels_pending_reply() {
        let config = ArbiterConfig::immediate(11).with_reply_delay_ms(10_000);
        let arbiter = MoveArbiter::new(&config);
        arbiter.process_move(0);
        assert!(!arbiter.snapshot().input_enabled);

        arbiter.reset();
        arbiter.wait_for_reply().await;

        let snapshot = arbiter.snapshot();
        assert_eq!(snapshot.board.occupied_count(), 0);
        assert!(snapshot.input_enabled);
        assert_eq!(snapshot.outcome, None);
    }
}
