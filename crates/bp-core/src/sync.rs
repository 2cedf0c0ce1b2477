//! Synchronization-point types.
//!
//! A behavior thread pauses by publishing a [`SyncPoint`]: its identity plus
//! the request / wait-for / block triple it built as a [`SyncSpec`].  The
//! point is immutable once published and stays in force until the thread is
//! next notified — exactly one point is current per live thread at any time,
//! and a fresh `sync` call replaces it wholesale (never queues behind it).

use crate::{BtId, Event, EventSet};

// ── SyncSpec ──────────────────────────────────────────────────────────────────

/// The request / wait-for / block triple passed to `sync`.
///
/// All three positions default to the empty set, so call sites only name the
/// positions they use:
///
/// ```rust,ignore
/// bt.sync(SyncSpec::new().request(Tap::Hot).block(Tap::Cold))?;
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SyncSpec<E: Event> {
    /// Events this thread proposes to make happen.
    pub request: EventSet<E>,
    /// Events this thread passively observes.  `EventSet::All` is allowed
    /// here and matches every event.
    pub wait_for: EventSet<E>,
    /// Events this thread vetoes program-wide.  `EventSet::All` is allowed
    /// here and vetoes every event.
    pub block: EventSet<E>,
}

// Manual impl: a derived one would demand `E: Default` for no reason.
impl<E: Event> Default for SyncSpec<E> {
    fn default() -> Self {
        Self {
            request: EventSet::None,
            wait_for: EventSet::None,
            block: EventSet::None,
        }
    }
}

impl<E: Event> SyncSpec<E> {
    /// A spec with all three positions empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the request position.
    pub fn request(mut self, events: impl Into<EventSet<E>>) -> Self {
        self.request = events.into();
        self
    }

    /// Set the wait-for position.
    pub fn wait_for(mut self, events: impl Into<EventSet<E>>) -> Self {
        self.wait_for = events.into();
        self
    }

    /// Set the block position.
    pub fn block(mut self, events: impl Into<EventSet<E>>) -> Self {
        self.block = events.into();
        self
    }
}

// ── SyncPoint ─────────────────────────────────────────────────────────────────

/// A published synchronization point: sender identity plus its spec.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SyncPoint<E: Event> {
    /// The behavior thread that published this point.
    pub sender: BtId,
    /// The request / wait-for / block triple.
    pub spec: SyncSpec<E>,
}

impl<E: Event> SyncPoint<E> {
    pub fn new(sender: BtId, spec: SyncSpec<E>) -> Self {
        Self { sender, spec }
    }

    /// `true` if this thread must be notified when `event` is selected:
    /// the event is in its request or wait-for set.
    #[inline]
    pub fn wants(&self, event: &E) -> bool {
        self.spec.request.contains(event) || self.spec.wait_for.contains(event)
    }

    /// `true` if this thread vetoes `event`.
    #[inline]
    pub fn blocks(&self, event: &E) -> bool {
        self.spec.block.contains(event)
    }
}
