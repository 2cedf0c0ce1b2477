//! Fluent builder for constructing a [`Program`].

use bp_core::{BtId, Event};
use bp_thread::{Behavior, RegisteredBThread};
use crossbeam_channel::unbounded;

use crate::{Program, ProgramError, ProgramResult};

/// Ordered registration of behavior units.
///
/// # Priority policy
///
/// Each thread carries one immutable real-valued priority; **higher value =
/// higher priority**.  [`add`][Self::add] assigns the default priority: the
/// thread's 0-based registration index.  Combined with
/// maximum-priority-wins selection this means that, among threads left at
/// their defaults, later-registered ones win ties.  Use
/// [`add_with_priority`][Self::add_with_priority] to set priorities
/// explicitly.
///
/// The roster is fixed once [`build`][Self::build] returns: there is no
/// dynamic add or remove after the run starts.
///
/// # Example
///
/// ```rust,ignore
/// let program = ProgramBuilder::new()
///     .add("hot water", hot)
///     .add("cold water", cold)
///     .add_with_priority("interleave", interleave, 10.0)
///     .build()?;
/// program.run()?;
/// ```
pub struct ProgramBuilder<E: Event> {
    pending: Vec<Pending<E>>,
}

struct Pending<E: Event> {
    name:     String,
    priority: Option<f64>,
    behavior: Box<dyn Behavior<E>>,
}

impl<E: Event> ProgramBuilder<E> {
    pub fn new() -> Self {
        Self { pending: Vec::new() }
    }

    /// Register `behavior` under `name` with the default priority (its
    /// registration index).
    ///
    /// Names are labels for logs and error messages only — identity is by
    /// registration order, so duplicate names are allowed and remain
    /// distinct participants.
    pub fn add(mut self, name: impl Into<String>, behavior: impl Behavior<E>) -> Self {
        self.pending.push(Pending {
            name:     name.into(),
            priority: None,
            behavior: Box::new(behavior),
        });
        self
    }

    /// Register `behavior` with an explicit priority (higher wins).
    pub fn add_with_priority(
        mut self,
        name:     impl Into<String>,
        behavior: impl Behavior<E>,
        priority: f64,
    ) -> Self {
        self.pending.push(Pending {
            name:     name.into(),
            priority: Some(priority),
            behavior: Box::new(behavior),
        });
        self
    }

    /// Number of registered behaviors so far.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Wire up the report channel and per-thread mailboxes and produce a
    /// ready-to-run [`Program`].
    ///
    /// # Errors
    ///
    /// [`ProgramError::Config`] for a non-finite explicit priority.
    pub fn build(self) -> ProgramResult<Program<E>> {
        let (report_tx, report_rx) = unbounded();
        let count = self.pending.len();

        let mut threads = Vec::with_capacity(count);
        let mut mailboxes = Vec::with_capacity(count);
        let mut priorities = Vec::with_capacity(count);
        let mut names = Vec::with_capacity(count);

        for (index, pending) in self.pending.into_iter().enumerate() {
            let priority = pending.priority.unwrap_or(index as f64);
            if !priority.is_finite() {
                return Err(ProgramError::Config(format!(
                    "priority for '{}' must be finite, got {priority}",
                    pending.name
                )));
            }
            let id = BtId::try_from(index).map_err(|_| {
                ProgramError::Config(format!("roster too large: {count} threads"))
            })?;

            let (mail_tx, mail_rx) = unbounded();
            names.push(pending.name.clone());
            priorities.push(priority);
            mailboxes.push(Some(mail_tx));
            threads.push(RegisteredBThread::new(
                id,
                pending.name,
                priority,
                pending.behavior,
                mail_rx,
                report_tx.clone(),
            ));
        }

        // `report_tx` drops here: once every thread is gone the report
        // channel disconnects, which the run loop treats as a protocol
        // violation (threads must announce how they ended).
        Ok(Program {
            threads,
            mailboxes,
            priorities,
            names,
            reports: report_rx,
        })
    }
}

impl<E: Event> Default for ProgramBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}
