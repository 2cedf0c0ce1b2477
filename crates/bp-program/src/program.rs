//! The `Program` struct and its arbitration loop.

use bp_core::{Event, SyncPoint, ThreadReport};
use bp_thread::RegisteredBThread;
use crossbeam_channel::{Receiver, Sender};

use crate::select::{Verdict, select_event};
use crate::{NoopObserver, ProgramError, ProgramResult, RoundObserver};

/// How a run ended.  Both variants are orderly: the coordinator shut every
/// remaining thread down and joined it before returning.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every behavior thread terminated, or only pure waiters (threads
    /// requesting nothing) remained — with no external input, no event can
    /// ever fire again, so those waiters are shut down and the program is
    /// done.
    Completed { rounds: u64 },

    /// Quiescence was reached with requests on the table but every
    /// candidate vetoed by some block set.  A design-level deadlock of the
    /// user's program: the engine never retries or times out, it reports
    /// the stall.  `waiting` is the number of threads still live when the
    /// stall was detected.
    Stalled { rounds: u64, waiting: usize },
}

/// A built behavioral program: the fixed roster plus the channels wiring it
/// to the coordinator.
///
/// Create via [`ProgramBuilder`][crate::ProgramBuilder]; consume with
/// [`run`][Self::run] or [`run_with`][Self::run_with].
pub struct Program<E: Event> {
    pub(crate) threads:    Vec<RegisteredBThread<E>>,
    /// Sending halves of the per-thread mailboxes, indexed by `BtId`.
    /// A slot is dropped the moment its thread leaves arbitration, so a
    /// terminated thread can never be woken by accident.
    pub(crate) mailboxes:  Vec<Option<Sender<E>>>,
    pub(crate) priorities: Vec<f64>,
    pub(crate) names:      Vec<String>,
    pub(crate) reports:    Receiver<ThreadReport<E>>,
}

/// First behavior failure observed during a run.
struct BehaviorFailure {
    thread: String,
    reason: String,
}

impl<E: Event> Program<E> {
    /// Number of registered behavior threads.
    pub fn thread_count(&self) -> usize {
        self.threads.len()
    }

    /// Run to completion (or stall) without observation callbacks.
    pub fn run(self) -> ProgramResult<RunOutcome> {
        self.run_with(&mut NoopObserver)
    }

    /// Launch every behavior thread and drive arbitration until the program
    /// completes, stalls, or fails.
    ///
    /// Blocking call.  On return all behavior threads have been joined —
    /// including after a stall or failure, where remaining threads are
    /// released by dropping their mailboxes (their next `sync` observes the
    /// disconnect and unwinds).
    ///
    /// # Errors
    ///
    /// - [`ProgramError::BehaviorFailed`] if any behavior returned an error
    ///   or panicked (first failure wins; the rest of the run still
    ///   finished first).
    /// - [`ProgramError::Protocol`] for engine-level protocol violations —
    ///   fail-fast, indicates a bug.
    pub fn run_with<O: RoundObserver<E>>(self, observer: &mut O) -> ProgramResult<RunOutcome> {
        let Program {
            threads,
            mut mailboxes,
            priorities,
            names,
            reports,
        } = self;

        tracing::debug!(threads = threads.len(), "starting behavioral program");
        let mut handles = Vec::with_capacity(threads.len());
        let mut spawn_failed: Option<std::io::Error> = None;
        for thread in threads {
            match thread.spawn() {
                Ok(handle) => handles.push(handle),
                // Stop launching, but keep the error for after shutdown:
                // the threads already running still get disconnected and
                // joined below, like on every other exit path.
                Err(err) => {
                    spawn_failed = Some(err);
                    break;
                }
            }
        }

        let mut rounds: u64 = 0;
        let mut failure: Option<BehaviorFailure> = None;
        let end = match spawn_failed {
            Some(err) => Err(err.into()),
            None => arbitrate(
                &reports,
                &mut mailboxes,
                &priorities,
                &names,
                &mut rounds,
                &mut failure,
                observer,
            ),
        };

        // Controlled shutdown, on every path: drop all remaining mailboxes
        // so suspended threads unwind, stop listening for reports, join.
        for slot in mailboxes.iter_mut() {
            *slot = None;
        }
        drop(reports);
        for handle in handles {
            // A panicking behavior already reported through Failed; the
            // unwound thread itself carries nothing further.
            let _ = handle.join();
        }

        let end = end?;
        observer.on_end(rounds);
        if let Some(failure) = failure {
            return Err(ProgramError::BehaviorFailed {
                thread: failure.thread,
                reason: failure.reason,
            });
        }
        Ok(match end {
            LoopEnd::Drained => {
                tracing::debug!(rounds, "program completed: all threads terminated");
                RunOutcome::Completed { rounds }
            }
            LoopEnd::NoRequests { waiting } => {
                tracing::debug!(rounds, waiting, "program completed: only pure waiters left");
                RunOutcome::Completed { rounds }
            }
            LoopEnd::AllBlocked { waiting } => RunOutcome::Stalled { rounds, waiting },
        })
    }
}

// ── Arbitration loop ──────────────────────────────────────────────────────────

/// Why the loop stopped.
enum LoopEnd {
    /// Live count reached zero: every thread sent a termination notice.
    Drained,
    /// Quiescent with no requested events at all.
    NoRequests { waiting: usize },
    /// Quiescent with requests, but every candidate vetoed.
    AllBlocked { waiting: usize },
}

/// The coordinator's single-writer loop.  All roster state lives in locals
/// here; the only inputs are protocol messages, the only outputs mailbox
/// deliveries.
fn arbitrate<E: Event, O: RoundObserver<E>>(
    reports:    &Receiver<ThreadReport<E>>,
    mailboxes:  &mut [Option<Sender<E>>],
    priorities: &[f64],
    names:      &[String],
    rounds:     &mut u64,
    failure:    &mut Option<BehaviorFailure>,
    observer:   &mut O,
) -> ProgramResult<LoopEnd> {
    let roster = mailboxes.len();
    let mut points: Vec<Option<SyncPoint<E>>> = vec![None; roster];
    let mut alive: Vec<bool> = vec![true; roster];
    let mut live = roster;
    // Threads that have been started/notified but not yet reported back.
    // Quiescence is exactly `in_flight == 0`.
    let mut in_flight = roster;

    while live > 0 {
        let report = reports.recv().map_err(|_| {
            protocol("behavior threads disconnected without a termination notice")
        })?;
        let sender = report.sender();
        let idx = sender.index();
        if idx >= roster || !alive[idx] {
            return Err(protocol(format!("report from removed thread {sender}")));
        }
        in_flight = in_flight
            .checked_sub(1)
            .ok_or_else(|| protocol("quiescence counter underflow"))?;

        match report {
            ThreadReport::Synced(point) => {
                tracing::trace!(thread = %sender, "sync point recorded");
                // Replaces the previous point outright; points are never queued.
                points[idx] = Some(point);
            }
            ThreadReport::Terminated { .. } => {
                tracing::debug!(thread = %sender, name = %names[idx], "thread terminated");
                remove_thread(idx, &mut alive, &mut points, mailboxes, &mut live);
                observer.on_termination(sender);
            }
            ThreadReport::Failed { reason, .. } => {
                tracing::error!(thread = %sender, name = %names[idx], %reason, "behavior thread failed");
                remove_thread(idx, &mut alive, &mut points, mailboxes, &mut live);
                observer.on_termination(sender);
                if failure.is_none() {
                    *failure = Some(BehaviorFailure {
                        thread: names[idx].clone(),
                        reason,
                    });
                }
            }
        }

        if in_flight > 0 || live == 0 {
            continue;
        }

        // ── Quiescence: every live thread has a current sync point ────────
        match select_event(&points, priorities) {
            Verdict::Selected(selection) => {
                tracing::debug!(
                    round = *rounds,
                    event = ?selection.event,
                    notified = selection.notify.len(),
                    "event selected"
                );
                observer.on_round(*rounds, &selection.event, &selection.notify);
                for &id in &selection.notify {
                    // Mark in flight before delivery: the thread is live
                    // again the instant the event is in its mailbox.
                    in_flight += 1;
                    let mailbox = mailboxes[id.index()]
                        .as_ref()
                        .ok_or_else(|| protocol(format!("no mailbox for notified thread {id}")))?;
                    mailbox
                        .send(selection.event.clone())
                        .map_err(|_| protocol(format!("mailbox for {id} closed before delivery")))?;
                }
                *rounds += 1;
            }
            Verdict::NoRequests => {
                return Ok(LoopEnd::NoRequests { waiting: live });
            }
            Verdict::AllBlocked => {
                tracing::warn!(
                    round = *rounds,
                    waiting = live,
                    "stalled: every requested event is blocked"
                );
                observer.on_stall(*rounds);
                return Ok(LoopEnd::AllBlocked { waiting: live });
            }
        }
    }

    Ok(LoopEnd::Drained)
}

/// Permanently remove a thread from arbitration.  Dropping the mailbox
/// sender here is what makes later delivery to this thread impossible by
/// construction.
fn remove_thread<E: Event>(
    idx:       usize,
    alive:     &mut [bool],
    points:    &mut [Option<SyncPoint<E>>],
    mailboxes: &mut [Option<Sender<E>>],
    live:      &mut usize,
) {
    alive[idx] = false;
    points[idx] = None;
    mailboxes[idx] = None;
    *live -= 1;
}

fn protocol(msg: impl Into<String>) -> ProgramError {
    ProgramError::Protocol(msg.into())
}
