//! `BtHandle` — what a behavior procedure sees of the engine.

use bp_core::{BtId, Event, SyncPoint, SyncSpec, ThreadReport};
use crossbeam_channel::{Receiver, Sender};

use crate::{BtError, BtResult};

/// The engine-side handle passed to every behavior procedure.
///
/// Owns the thread's mailbox and the sending half of the coordinator's
/// report channel.  All communication with the rest of the program goes
/// through [`sync`][Self::sync]; there is no shared mutable state.
pub struct BtHandle<E: Event> {
    id:         BtId,
    name:       String,
    priority:   f64,
    reports:    Sender<ThreadReport<E>>,
    mailbox:    Receiver<E>,
    last_event: Option<E>,
}

impl<E: Event> BtHandle<E> {
    pub fn new(
        id:       BtId,
        name:     String,
        priority: f64,
        reports:  Sender<ThreadReport<E>>,
        mailbox:  Receiver<E>,
    ) -> Self {
        Self {
            id,
            name,
            priority,
            reports,
            mailbox,
            last_event: None,
        }
    }

    /// Publish a synchronization point and suspend until one event arrives.
    ///
    /// The published point fully replaces this thread's previous one and
    /// stays in force until the thread is next notified — if the selected
    /// event is in neither `request` nor `wait_for`, the thread simply stays
    /// suspended here while other threads run.
    ///
    /// Returns the selected event, which is also recorded as
    /// [`last_event`][Self::last_event].  Re-entrant across any number of
    /// calls within one behavior's lifetime.
    ///
    /// # Errors
    ///
    /// [`BtError::Disconnected`] when the coordinator has shut the run down;
    /// propagate it with `?` so the thread unwinds promptly.
    pub fn sync(&mut self, spec: SyncSpec<E>) -> BtResult<E> {
        let point = SyncPoint::new(self.id, spec);
        tracing::trace!(thread = %self.id, name = %self.name, "publishing sync point");
        self.reports
            .send(ThreadReport::Synced(point))
            .map_err(|_| BtError::Disconnected)?;

        let event = self.mailbox.recv().map_err(|_| BtError::Disconnected)?;
        self.last_event = Some(event.clone());
        Ok(event)
    }

    /// The most recently delivered event, if any `sync` has completed.
    pub fn last_event(&self) -> Option<&E> {
        self.last_event.as_ref()
    }

    /// This thread's roster identity.
    pub fn id(&self) -> BtId {
        self.id
    }

    /// The name this thread was registered under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// This thread's immutable priority.
    pub fn priority(&self) -> f64 {
        self.priority
    }
}
