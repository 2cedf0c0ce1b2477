//! The `Behavior` trait — the main extension point for user code.

use bp_core::Event;

use crate::{BtHandle, BtResult};

/// A sequential behavior procedure.
///
/// Implemented automatically for any `FnOnce(&mut BtHandle<E>) -> BtResult<()>`
/// closure, which is the usual way to write one:
///
/// ```rust,ignore
/// let hot = |bt: &mut BtHandle<Tap>| {
///     for _ in 0..3 {
///         bt.sync(SyncSpec::new().request(Tap::Hot))?;
///     }
///     Ok(())
/// };
/// ```
///
/// Returning `Ok(())` is normal completion: the runner emits the termination
/// notice on the procedure's behalf.  Returning an error (or panicking) is a
/// failure of this one thread; the coordinator drops the thread and surfaces
/// the reason to the caller instead of hanging.
///
/// The procedure runs on its own OS thread, hence `Send + 'static`.  It runs
/// exactly once, hence `self: Box<Self>`.
pub trait Behavior<E: Event>: Send + 'static {
    /// Run the procedure to completion.
    fn run(self: Box<Self>, bt: &mut BtHandle<E>) -> BtResult<()>;
}

impl<E, F> Behavior<E> for F
where
    E: Event,
    F: FnOnce(&mut BtHandle<E>) -> BtResult<()> + Send + 'static,
{
    fn run(self: Box<Self>, bt: &mut BtHandle<E>) -> BtResult<()> {
        (*self)(bt)
    }
}

/// A [`Behavior`] that returns immediately without ever synchronizing.
///
/// Useful as a placeholder in tests: it terminates in the first round and
/// never influences arbitration.
pub struct IdleBehavior;

impl<E: Event> Behavior<E> for IdleBehavior {
    fn run(self: Box<Self>, _bt: &mut BtHandle<E>) -> BtResult<()> {
        Ok(())
    }
}
