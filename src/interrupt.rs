//local shortcuts

//third-party shortcuts

//standard shortcuts
use core::fmt::Debug;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicBool, Ordering};

//-------------------------------------------------------------------------------------------------------------------

/// Something a thread can be blocked on that an interrupt needs to wake.
pub(crate) trait Unpark: Send + Sync
{
    /// Wake every thread blocked on this object.
    fn unpark(&self);
}

//-------------------------------------------------------------------------------------------------------------------

#[derive(Default)]
struct InterruptState
{
    /// set when the thread is interrupted
    flag: AtomicBool,
    /// object the thread is currently blocked on
    parked_on: Mutex<Option<Arc<dyn Unpark>>>,
}

thread_local!
{
    static CURRENT: Interrupter = Interrupter{ state: Arc::new(InterruptState::default()) };
}

//-------------------------------------------------------------------------------------------------------------------

/// Cooperative interruption handle for one thread.
///
/// Interrupting a thread sets its interrupt flag and wakes it if it is blocked waiting on a
/// [`WorkHandle`](crate::WorkHandle). Waits observe the flag and give up with
/// [`WaitError::Interrupted`](crate::WaitError::Interrupted), leaving the flag set so outer callers can react to it.
/// Use [`take_interrupt()`] to clear it.
#[derive(Clone)]
pub struct Interrupter
{
    state: Arc<InterruptState>,
}

impl Interrupter
{
    /// Get the interrupter for the calling thread.
    pub fn current() -> Interrupter
    {
        CURRENT.with(|interrupter| interrupter.clone())
    }

    /// Interrupt the thread.
    pub fn interrupt(&self)
    {
        self.state.flag.store(true, Ordering::SeqCst);

        // clone the blocker out so it is not unparked while holding our lock (the blocked thread registers with its
        // own lock held)
        let parked_on = match self.state.parked_on.lock()
        {
            Ok(parked_on) => parked_on.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        let Some(parked_on) = parked_on else { return; };

        tracing::trace!("waking interrupted thread");
        parked_on.unpark();
    }

    /// Check if the thread is interrupted (does not clear the flag).
    pub fn is_interrupted(&self) -> bool
    {
        self.state.flag.load(Ordering::SeqCst)
    }

    /// Clear the interrupt flag, returning its previous value.
    pub fn clear(&self) -> bool
    {
        self.state.flag.swap(false, Ordering::SeqCst)
    }

    /// Register the object the thread is about to block on.
    /// - Must be called before the final check of the interrupt flag, otherwise a wakeup can be lost.
    pub(crate) fn park_on(&self, blocker: Arc<dyn Unpark>) -> ParkGuard
    {
        self.set_parked(Some(blocker));
        ParkGuard{ interrupter: self.clone() }
    }

    fn set_parked(&self, blocker: Option<Arc<dyn Unpark>>)
    {
        match self.state.parked_on.lock()
        {
            Ok(mut parked_on) => *parked_on = blocker,
            Err(poisoned) => *poisoned.into_inner() = blocker,
        }
    }
}

impl Debug for Interrupter
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result
    {
        f.debug_struct("Interrupter")
            .field("interrupted", &self.is_interrupted())
            .finish()
    }
}

//-------------------------------------------------------------------------------------------------------------------

/// Unregisters a blocker when dropped.
pub(crate) struct ParkGuard
{
    interrupter: Interrupter,
}

impl Drop for ParkGuard
{
    fn drop(&mut self)
    {
        self.interrupter.set_parked(None);
    }
}

//-------------------------------------------------------------------------------------------------------------------

/// Check if the calling thread is interrupted (does not clear the flag).
pub fn is_interrupted() -> bool
{
    CURRENT.with(|interrupter| interrupter.is_interrupted())
}

//-------------------------------------------------------------------------------------------------------------------

/// Clear the calling thread's interrupt flag, returning its previous value.
pub fn take_interrupt() -> bool
{
    CURRENT.with(|interrupter| interrupter.clear())
}

//-------------------------------------------------------------------------------------------------------------------
