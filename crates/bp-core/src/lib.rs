//! `bp-core` — foundational types for the `rust_bp` behavioral-programming
//! framework.
//!
//! This crate is a dependency of every other `bp-*` crate.  It intentionally
//! has no `bp-*` dependencies and minimal external ones (only `rustc-hash`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                 |
//! |------------|----------------------------------------------------------|
//! | [`event`]  | `Event` marker trait, `EventSet`                         |
//! | [`ids`]    | `BtId` — behavior-thread identifier                      |
//! | [`sync`]   | `SyncSpec`, `SyncPoint`                                  |
//! | [`report`] | `ThreadReport` — the thread → coordinator protocol       |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public data types.   |

pub mod event;
pub mod ids;
pub mod report;
pub mod sync;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use event::{Event, EventSet};
pub use ids::BtId;
pub use report::ThreadReport;
pub use sync::{SyncPoint, SyncSpec};
