//! The event-selection algorithm, run once per arbitration round.
//!
//! # Algorithm
//!
//! 1. Collect candidate events: the union of all request sets, minus every
//!    event any live thread blocks.  Block has absolute veto power — a
//!    blocked event is never selected no matter how many threads request it,
//!    including when the blocker is also the requester.
//! 2. Score each surviving candidate with the **maximum** priority among the
//!    threads whose request or wait-for set contains it.
//! 3. Select the highest-scoring candidate.
//!
//! # Determinism
//!
//! Candidates are collected in first-seen order: sync points are scanned in
//! ascending thread id, and each request set iterates in FxHash order (fixed
//! seed, stable for a given build).  Priority ties go to the
//! first-collected candidate.  This is documented so runs are reproducible
//! for debugging; user programs must not rely on it for correctness.

use std::cmp::Ordering;

use bp_core::{BtId, Event, SyncPoint};
use rustc_hash::FxHashSet;

/// The decision of one round.
pub(crate) enum Verdict<E: Event> {
    /// An event was selected; deliver it to `notify`.
    Selected(Selection<E>),
    /// Requests are on the table but every candidate is vetoed: the program
    /// is stalled (nothing can change the request/block sets without an
    /// event firing first).
    AllBlocked,
    /// No live thread requests anything.  Without external input no event
    /// can ever fire again, so remaining threads are pure waiters and the
    /// run can complete.
    NoRequests,
}

/// A selected event plus the threads to wake.
pub(crate) struct Selection<E: Event> {
    pub event: E,
    /// Interested threads (selected event ∈ request ∪ wait-for), in
    /// descending priority then ascending id.  Delivery order has no effect
    /// on correctness — each thread observes only its own single delivery —
    /// but is kept deterministic for debuggability.
    pub notify: Vec<BtId>,
}

pub(crate) fn select_event<E: Event>(
    points:     &[Option<SyncPoint<E>>],
    priorities: &[f64],
) -> Verdict<E> {
    // ── Candidates: ⋃ requests, in first-seen order ───────────────────────
    let mut candidates: Vec<&E> = Vec::new();
    let mut seen: FxHashSet<&E> = FxHashSet::default();
    let mut any_request = false;
    for point in points.iter().flatten() {
        for event in point.spec.request.requested() {
            any_request = true;
            if seen.insert(event) {
                candidates.push(event);
            }
        }
    }

    // ── Veto: drop anything any live thread blocks ────────────────────────
    candidates.retain(|&event| !points.iter().flatten().any(|p| p.blocks(event)));

    if candidates.is_empty() {
        return if any_request {
            Verdict::AllBlocked
        } else {
            Verdict::NoRequests
        };
    }

    // ── Score: max priority among interested threads; max wins ────────────
    let mut best_event = candidates[0];
    let mut best_priority = f64::NEG_INFINITY;
    for &event in &candidates {
        let priority = points
            .iter()
            .flatten()
            .filter(|p| p.wants(event))
            .map(|p| priorities[p.sender.index()])
            .fold(f64::NEG_INFINITY, f64::max);
        // Strict `>` keeps the first-collected candidate on ties.
        if priority > best_priority {
            best_priority = priority;
            best_event = event;
        }
    }

    // ── Notify set, descending priority then ascending id ─────────────────
    let mut notify: Vec<(BtId, f64)> = points
        .iter()
        .flatten()
        .filter(|p| p.wants(best_event))
        .map(|p| (p.sender, priorities[p.sender.index()]))
        .collect();
    notify.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then(a.0.cmp(&b.0))
    });

    Verdict::Selected(Selection {
        event: (*best_event).clone(),
        notify: notify.into_iter().map(|(id, _)| id).collect(),
    })
}
