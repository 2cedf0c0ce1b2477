//! The thread → coordinator protocol.
//!
//! Behavior threads talk to the coordinator exclusively through these
//! messages on a shared channel; the coordinator talks back exclusively
//! through per-thread mailboxes carrying the selected event.  No other state
//! is shared, which is what lets the coordinator mutate its roster tables
//! without locks.

use crate::{BtId, Event, SyncPoint};

/// One message from a behavior thread to the coordinator.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ThreadReport<E: Event> {
    /// The thread published a fresh synchronization point and is now
    /// suspended on its mailbox.
    Synced(SyncPoint<E>),

    /// The thread's procedure returned normally.  One-shot: after this the
    /// thread never participates in arbitration again.
    Terminated {
        thread: BtId,
    },

    /// The thread's procedure failed (returned an error or panicked).
    /// Removes the thread exactly like `Terminated`, and additionally
    /// carries the reason so the run can surface it to the caller.
    Failed {
        thread: BtId,
        reason: String,
    },
}

impl<E: Event> ThreadReport<E> {
    /// The thread this report is about.
    pub fn sender(&self) -> BtId {
        match self {
            ThreadReport::Synced(point) => point.sender,
            ThreadReport::Terminated { thread } => *thread,
            ThreadReport::Failed { thread, .. } => *thread,
        }
    }
}
