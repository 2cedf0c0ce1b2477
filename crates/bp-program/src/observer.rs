//! Round observer trait for tracing and data collection.

use bp_core::{BtId, Event};

/// Callbacks invoked by [`Program::run_with`][crate::Program::run_with] at
/// key points of the arbitration loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  Observers never influence arbitration;
/// they exist for tracing, progress reporting, and tests.
pub trait RoundObserver<E: Event> {
    /// Called once per round after selection, before delivery.
    ///
    /// `notified` lists the interested threads in delivery order
    /// (descending priority, then ascending id).
    fn on_round(&mut self, _round: u64, _selected: &E, _notified: &[BtId]) {}

    /// Called when a thread leaves arbitration (normal termination or
    /// failure).
    fn on_termination(&mut self, _thread: BtId) {}

    /// Called when quiescence is reached with requests on the table but
    /// every candidate vetoed.  The run returns `Stalled` right after.
    fn on_stall(&mut self, _round: u64) {}

    /// Called once after the loop finishes, with the number of completed
    /// rounds.
    fn on_end(&mut self, _rounds: u64) {}
}

/// A [`RoundObserver`] that does nothing.
pub struct NoopObserver;

impl<E: Event> RoundObserver<E> for NoopObserver {}

/// A [`RoundObserver`] that logs every round decision via `tracing` at
/// `info` level — the "verbose tracing" switch.  Semantics are unaffected;
/// filtering is up to the installed subscriber.
pub struct TraceObserver;

impl<E: Event> RoundObserver<E> for TraceObserver {
    fn on_round(&mut self, round: u64, selected: &E, notified: &[BtId]) {
        tracing::info!(round, event = ?selected, notified = notified.len(), "event selected");
    }

    fn on_termination(&mut self, thread: BtId) {
        tracing::info!(%thread, "thread left arbitration");
    }

    fn on_stall(&mut self, round: u64) {
        tracing::info!(round, "stalled: every requested event is blocked");
    }

    fn on_end(&mut self, rounds: u64) {
        tracing::info!(rounds, "program finished");
    }
}
