//! Behavior-thread error type.

use thiserror::Error;

/// Errors a behavior procedure can observe or produce.
#[derive(Debug, Error)]
pub enum BtError {
    /// The coordinator dropped this thread's mailbox: the run is shutting
    /// down (completion, stall, or a fatal error elsewhere).  Behaviors
    /// propagate this with `?`; the runner treats it as a coordinated
    /// shutdown, not a failure.
    #[error("coordinator disconnected; run is shutting down")]
    Disconnected,

    /// A user-level failure inside the behavior procedure.  Surfaced to the
    /// program caller as a `BehaviorFailed` error.
    #[error("behavior failed: {0}")]
    Behavior(String),
}

impl BtError {
    /// Shorthand for a user-level failure.
    pub fn msg(reason: impl Into<String>) -> Self {
        BtError::Behavior(reason.into())
    }
}

/// Shorthand result type for behavior procedures.
pub type BtResult<T> = Result<T, BtError>;
