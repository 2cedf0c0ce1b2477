//! `bp-program` — coordinator and program builder for the `rust_bp`
//! behavioral-programming framework.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`builder`]  | `ProgramBuilder` — ordered registration, priority policy    |
//! | [`program`]  | `Program` — the arbitration loop, `RunOutcome`              |
//! | `select`     | The event-selection algorithm (internal)                    |
//! | [`observer`] | `RoundObserver`, `NoopObserver`, `TraceObserver`            |
//! | [`error`]    | `ProgramError`, `ProgramResult<T>`                          |
//!
//! # Arbitration loop
//!
//! ```text
//! Idle ──start──▶ Running ──all terminated──▶ Draining ──▶ Terminated
//!
//! Running, one iteration:
//!   ① receive one ThreadReport (sync point / termination / failure)
//!   ② record or remove; decrement the in-flight counter
//!   ③ at quiescence (counter == 0), select one event:
//!        candidates = ⋃ requests \ ⋃ blocks
//!        winner     = max requester/waiter priority (ties: first collected)
//!      deliver it to every interested thread, re-incrementing the counter
//!      per delivery — or finish: no requests at all is completion, all
//!      candidates vetoed is a stall.
//! ```
//!
//! The roster and sync-point table are owned by the loop and mutated nowhere
//! else; behavior threads reach them only through the message protocol, so
//! no locking is involved anywhere in the engine.

pub mod builder;
pub mod error;
pub mod observer;
pub mod program;
mod select;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use builder::ProgramBuilder;
pub use error::{ProgramError, ProgramResult};
pub use observer::{NoopObserver, RoundObserver, TraceObserver};
pub use program::{Program, RunOutcome};
