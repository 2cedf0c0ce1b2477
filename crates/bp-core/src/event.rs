//! The event vocabulary: the [`Event`] marker trait and [`EventSet`].
//!
//! # Design
//!
//! Events are opaque, identity-comparable tokens.  A behavioral program
//! defines one closed enum per domain and matches on it exhaustively; the
//! engine never inspects an event beyond equality and hashing.  Equality and
//! hash must therefore be stable for the life of the program — guaranteed
//! automatically by deriving both on a value type.
//!
//! `EventSet` is the three-way set used in every synchronization position:
//! an explicit finite set, the empty-set singleton, or the universal-set
//! singleton.  The universal set answers `contains` in O(1) without ever
//! enumerating members — there is no "iterate the universe" path anywhere.

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashSet;

// ── Event ─────────────────────────────────────────────────────────────────────

/// Marker trait for event tokens.
///
/// Blanket-implemented for any `Clone + Eq + Hash + Debug + Send + 'static`
/// type, so a plain derived enum qualifies with no ceremony:
///
/// ```rust,ignore
/// #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
/// enum Tap { Hot, Cold }
/// ```
pub trait Event: Clone + Eq + Hash + fmt::Debug + Send + 'static {}

impl<T: Clone + Eq + Hash + fmt::Debug + Send + 'static> Event for T {}

// ── EventSet ──────────────────────────────────────────────────────────────────

/// A set of events in one synchronization position (request, wait-for, block).
///
/// Membership testing is O(1) for all three variants.  Only the `Of` variant
/// has enumerable members: `All` matches everything but enumerates nothing,
/// which is why it is meaningful in wait-for and block positions only — in
/// request position it requests nothing (see [`EventSet::requested`]).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventSet<E: Event> {
    /// The empty set: matches no event.  The default for every position.
    None,
    /// The universal set: matches every event without enumerating any.
    All,
    /// An explicit finite set.
    Of(FxHashSet<E>),
}

// Manual impl: a derived one would demand `E: Default` for no reason.
impl<E: Event> Default for EventSet<E> {
    fn default() -> Self {
        EventSet::None
    }
}

impl<E: Event> EventSet<E> {
    /// The empty set.
    pub fn none() -> Self {
        EventSet::None
    }

    /// The universal set.
    pub fn all() -> Self {
        EventSet::All
    }

    /// An explicit set built from any iterable of events.
    pub fn of(events: impl IntoIterator<Item = E>) -> Self {
        EventSet::Of(events.into_iter().collect())
    }

    /// A singleton set.
    pub fn just(event: E) -> Self {
        EventSet::Of(std::iter::once(event).collect())
    }

    /// Membership test.  O(1) for every variant.
    #[inline]
    pub fn contains(&self, event: &E) -> bool {
        match self {
            EventSet::None => false,
            EventSet::All => true,
            EventSet::Of(set) => set.contains(event),
        }
    }

    /// `true` if no event can match this set.
    ///
    /// Note `Of` with zero members is empty even though it is not the `None`
    /// singleton.
    #[inline]
    pub fn is_empty(&self) -> bool {
        match self {
            EventSet::None => true,
            EventSet::All => false,
            EventSet::Of(set) => set.is_empty(),
        }
    }

    /// The enumerable members of this set, as used in request position.
    ///
    /// `None` yields nothing.  `All` also yields nothing: requesting "all
    /// events" requests nothing enumerable, so a universal request can never
    /// put a candidate on the table.
    ///
    /// Iteration order is deterministic for a given build (FxHash has a fixed
    /// seed) but otherwise unspecified; callers must not rely on it for
    /// program correctness.
    pub fn requested(&self) -> impl Iterator<Item = &E> {
        let explicit = match self {
            EventSet::Of(set) => Some(set),
            _ => None,
        };
        explicit.into_iter().flatten()
    }
}

// ── Conversions ───────────────────────────────────────────────────────────────
//
// These let `sync` call sites pass a bare event, an array, or a Vec wherever
// an `EventSet` is expected.

impl<E: Event> From<E> for EventSet<E> {
    fn from(event: E) -> Self {
        EventSet::just(event)
    }
}

impl<E: Event, const N: usize> From<[E; N]> for EventSet<E> {
    fn from(events: [E; N]) -> Self {
        EventSet::of(events)
    }
}

impl<E: Event> From<Vec<E>> for EventSet<E> {
    fn from(events: Vec<E>) -> Self {
        EventSet::of(events)
    }
}

impl<E: Event> FromIterator<E> for EventSet<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        EventSet::of(iter)
    }
}
