//! Coordinator error type.

use thiserror::Error;

/// Fatal conditions of a behavioral-program run.
///
/// A stall (no selectable event) is deliberately *not* an error — it is a
/// property of the user's program, reported through
/// [`RunOutcome::Stalled`][crate::RunOutcome::Stalled].
#[derive(Debug, Error)]
pub enum ProgramError {
    /// Invalid program construction (e.g. a non-finite priority).
    #[error("program configuration error: {0}")]
    Config(String),

    /// The thread-to-coordinator protocol was violated: a report from a
    /// removed thread, a quiescence-counter underflow, or a closed mailbox.
    /// Always an engine bug or API misuse; never user-recoverable.
    #[error("protocol violation: {0}")]
    Protocol(String),

    /// A behavior procedure returned an error or panicked.  The offending
    /// thread was dropped from arbitration and the rest of the run finished;
    /// the first failure is reported here.
    #[error("behavior thread '{thread}' failed: {reason}")]
    BehaviorFailed { thread: String, reason: String },

    /// Spawning an OS thread for a behavior failed.
    #[error("failed to spawn behavior thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Shorthand result type for bp-program.
pub type ProgramResult<T> = Result<T, ProgramError>;
