//! `bp-thread` — the behavior-thread side of the `rust_bp` framework.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`behavior`] | `Behavior` trait (+ closure blanket impl), `IdleBehavior`  |
//! | [`handle`]   | `BtHandle` — the `sync` primitive and last-event access    |
//! | [`runner`]   | `RegisteredBThread` — spawns the OS thread, reports exits  |
//! | [`error`]    | `BtError`, `BtResult<T>`                                   |
//!
//! # Design notes
//!
//! A behavior is an ordinary sequential procedure.  Its only connection to
//! the rest of the program is [`BtHandle::sync`]: publish a request /
//! wait-for / block triple, suspend, and wake with exactly one selected
//! event.  Each call fully replaces the thread's standing synchronization
//! point.
//!
//! The runner wraps the procedure so the coordinator can never be stranded:
//! normal return emits a termination notice automatically, and an error or
//! panic emits a failure notice carrying the reason.  A disconnect while
//! suspended means the coordinator is shutting the run down; the thread
//! unwinds silently through the `?` on its own `sync` calls.

pub mod behavior;
pub mod error;
pub mod handle;
pub mod runner;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use behavior::{Behavior, IdleBehavior};
pub use error::{BtError, BtResult};
pub use handle::BtHandle;
pub use runner::RegisteredBThread;
