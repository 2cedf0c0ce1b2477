//! `RegisteredBThread` — the runtime instance of one behavior unit.
//!
//! Created at program-build time with its identity, priority, mailbox, and
//! behavior procedure; consumed by [`spawn`][RegisteredBThread::spawn], which
//! launches the OS thread and guarantees the coordinator always learns how
//! the procedure ended:
//!
//! | Procedure outcome              | Report sent                       |
//! |--------------------------------|-----------------------------------|
//! | returned `Ok(())`              | `Terminated`                      |
//! | returned `Err(Disconnected)`   | none (coordinated shutdown)       |
//! | returned any other error       | `Failed { reason }`               |
//! | panicked                       | `Failed { reason }`               |

use std::any::Any;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::thread::{self, JoinHandle};

use bp_core::{BtId, Event, ThreadReport};
use crossbeam_channel::{Receiver, Sender};

use crate::{Behavior, BtError, BtHandle};

/// One registered behavior thread, ready to spawn.
pub struct RegisteredBThread<E: Event> {
    /// Roster identity, assigned in registration order.
    pub id: BtId,
    /// Display name; also becomes the OS thread name.
    pub name: String,
    /// Immutable for the thread's lifetime.  Higher value = higher priority.
    pub priority: f64,
    behavior: Box<dyn Behavior<E>>,
    mailbox:  Receiver<E>,
    reports:  Sender<ThreadReport<E>>,
}

impl<E: Event> RegisteredBThread<E> {
    pub fn new(
        id:       BtId,
        name:     String,
        priority: f64,
        behavior: Box<dyn Behavior<E>>,
        mailbox:  Receiver<E>,
        reports:  Sender<ThreadReport<E>>,
    ) -> Self {
        Self {
            id,
            name,
            priority,
            behavior,
            mailbox,
            reports,
        }
    }

    /// Launch the behavior on its own named OS thread.
    ///
    /// The spawned thread runs the procedure under `catch_unwind` so that a
    /// panicking behavior still produces a `Failed` report instead of
    /// stranding the coordinator at its quiescence wait.
    pub fn spawn(self) -> io::Result<JoinHandle<()>> {
        let RegisteredBThread {
            id,
            name,
            priority,
            behavior,
            mailbox,
            reports,
        } = self;

        thread::Builder::new().name(name.clone()).spawn(move || {
            let mut bt = BtHandle::new(id, name, priority, reports.clone(), mailbox);
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| behavior.run(&mut bt)));

            let report = match outcome {
                Ok(Ok(())) => {
                    tracing::debug!(thread = %id, "behavior completed");
                    Some(ThreadReport::Terminated { thread: id })
                }
                // The coordinator initiated shutdown while we were suspended;
                // it is not listening for reports any more.
                Ok(Err(BtError::Disconnected)) => None,
                Ok(Err(err)) => Some(ThreadReport::Failed {
                    thread: id,
                    reason: err.to_string(),
                }),
                Err(payload) => Some(ThreadReport::Failed {
                    thread: id,
                    reason: panic_reason(payload.as_ref()),
                }),
            };

            if let Some(report) = report {
                // Send failure just means the coordinator is already gone.
                let _ = reports.send(report);
            }
        })
    }
}

/// Best-effort extraction of a panic message.
fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "behavior panicked".to_string()
    }
}
