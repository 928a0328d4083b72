//local shortcuts
use crate::*;
use crate::interrupt::Unpark;

//third-party shortcuts

//standard shortcuts
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::time::Duration;

//-------------------------------------------------------------------------------------------------------------------

/// State of a unit of work as observed through its handle.
///
/// Transitions are one-way: `Pending` moves to exactly one terminal state and never leaves it.
#[derive(Debug, Clone)]
pub enum WorkState<R>
{
    /// The work has not finished.
    Pending,
    /// The work finished and produced a value.
    Succeeded(R),
    /// The work finished with an error.
    Failed(WorkFailure),
    /// The work was cancelled and will never produce an outcome.
    Cancelled,
    /// The work succeeded and its value was moved out with [`WorkHandle::take()`].
    Taken,
}

impl<R> WorkState<R>
{
    /// Payload-free view of the state.
    pub fn status(&self) -> WorkStatus
    {
        match self
        {
            WorkState::Pending      => WorkStatus::Pending,
            WorkState::Succeeded(_) => WorkStatus::Succeeded,
            WorkState::Failed(_)    => WorkStatus::Failed,
            WorkState::Cancelled    => WorkStatus::Cancelled,
            WorkState::Taken        => WorkStatus::Succeeded,
        }
    }
}

//-------------------------------------------------------------------------------------------------------------------

/// Payload-free view of a [`WorkState`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum WorkStatus
{
    Pending,
    Succeeded,
    Failed,
    Cancelled,
}

impl WorkStatus
{
    /// Check if the status is terminal.
    pub fn is_terminal(&self) -> bool
    {
        *self != WorkStatus::Pending
    }
}

//-------------------------------------------------------------------------------------------------------------------

/// Outcome of a unit of work that finished running (successfully or not).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Completion
{
    Succeeded,
    Failed,
}

//-------------------------------------------------------------------------------------------------------------------

/// Type-erased view of a pending unit of work.
///
/// This is what the composite waits operate on, so handles with different result types can be waited on together.
pub trait PendingWork: Send + Sync
{
    /// Check if the work reached any terminal state (including cancellation).
    fn is_done(&self) -> bool;

    /// Check if the work was cancelled.
    fn is_cancelled(&self) -> bool;

    /// Try to cancel the work. Returns `false` if it already reached a terminal state.
    fn cancel(&self) -> bool;

    /// Block until the work finishes or the timeout elapses.
    /// - Returns [`WaitError::Interrupted`] if the calling thread is interrupted.
    fn wait_timeout(&self, timeout: Duration) -> Result<Completion, WaitError>;
}

//-------------------------------------------------------------------------------------------------------------------

#[derive(Debug)]
struct HandleInner<R>
{
    state: Mutex<WorkState<R>>,
    signal: Condvar,
}

impl<R> HandleInner<R>
{
    fn lock(&self) -> MutexGuard<'_, WorkState<R>>
    {
        // the state is only ever replaced whole, so a poisoned lock still holds a valid state
        match self.state.lock()
        {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Move out of `Pending`. Returns `false` if the state was already terminal.
    fn transition(&self, next: WorkState<R>) -> bool
    {
        let mut state = self.lock();
        if !matches!(*state, WorkState::Pending) { return false; }
        *state = next;
        self.signal.notify_all();
        true
    }
}

impl<R: Send> Unpark for HandleInner<R>
{
    fn unpark(&self)
    {
        // take the lock so the wakeup cannot slip in between a waiter's flag check and its wait
        let _state = self.lock();
        self.signal.notify_all();
    }
}

//-------------------------------------------------------------------------------------------------------------------

/// Make a new pending handle and the completer that drives it.
pub fn pending<R>() -> (WorkHandle<R>, WorkCompleter<R>)
{
    let inner = Arc::new(HandleInner{ state: Mutex::new(WorkState::Pending), signal: Condvar::new() });
    (WorkHandle{ inner: inner.clone() }, WorkCompleter{ inner })
}

//-------------------------------------------------------------------------------------------------------------------

/// Handle for the eventual outcome of a submitted unit of work.
///
/// Handles are cheap to clone. All clones observe the same state.
#[derive(Debug)]
pub struct WorkHandle<R>
{
    inner: Arc<HandleInner<R>>,
}

impl<R> Clone for WorkHandle<R>
{
    fn clone(&self) -> Self
    {
        Self{ inner: self.inner.clone() }
    }
}

impl<R: Send + 'static> WorkHandle<R>
{
    /// Make a handle that already succeeded.
    pub fn immediate(result: R) -> WorkHandle<R>
    {
        let (handle, completer) = pending();
        completer.complete(Ok(result));
        handle
    }

    /// Make a handle that already failed.
    pub fn failed(failure: WorkFailure) -> WorkHandle<R>
    {
        let (handle, completer) = pending();
        completer.complete(Err(failure));
        handle
    }

    /// Current status of the work.
    pub fn status(&self) -> WorkStatus
    {
        self.inner.lock().status()
    }

    /// Check if the work reached a terminal state (succeeded, failed, or cancelled).
    pub fn is_done(&self) -> bool
    {
        self.status().is_terminal()
    }

    /// Check if the work was cancelled.
    pub fn is_cancelled(&self) -> bool
    {
        self.status() == WorkStatus::Cancelled
    }

    /// Cancel the work if it is still pending.
    /// - Work that is already running is not stopped, but its result will be discarded.
    /// - Returns `false` if the work already reached a terminal state.
    pub fn cancel(&self) -> bool
    {
        let cancelled = self.inner.transition(WorkState::Cancelled);
        if cancelled { tracing::trace!("work cancelled"); }
        cancelled
    }

    /// Block until the work reaches a terminal state or the timeout elapses.
    pub fn wait_timeout(&self, timeout: Duration) -> Result<Completion, WaitError>
    {
        self.wait_then(Some(Deadline::new(timeout)), |state| Self::completion(state))
    }

    /// Block until the work reaches a terminal state.
    pub fn wait(&self) -> Result<Completion, WaitError>
    {
        self.wait_then(None, |state| Self::completion(state))
    }

    /// Get a copy of the current state (non-blocking).
    pub fn state(&self) -> WorkState<R>
    where
        R: Clone
    {
        self.inner.lock().clone()
    }

    /// Get the result if the work already finished (non-blocking).
    /// - Returns `None` if the work is still pending.
    pub fn try_get(&self) -> Option<Result<R, ResultError>>
    where
        R: Clone
    {
        let state = self.inner.lock();
        if matches!(*state, WorkState::Pending) { return None; }
        Some(Self::extract(&*state))
    }

    /// Get the result (blocking).
    /// - A failed unit of work returns [`ResultError::Failed`] with the error it produced.
    pub fn get(&self) -> Result<R, ResultError>
    where
        R: Clone
    {
        self.wait_then(None, |state| Self::extract(state))
    }

    /// Get the result, waiting at most `timeout`.
    pub fn get_timeout(&self, timeout: Duration) -> Result<R, ResultError>
    where
        R: Clone
    {
        self.wait_then(Some(Deadline::new(timeout)), |state| Self::extract(state))
    }

    /// Move the result out of the handle if the work already finished (non-blocking).
    /// - Returns `None` if the work is still pending.
    /// - See [`WorkHandle::take()`].
    pub fn try_take(&self) -> Option<Result<R, ResultError>>
    {
        let mut state = self.inner.lock();
        if matches!(*state, WorkState::Pending) { return None; }
        Some(Self::take_out(&mut *state))
    }

    /// Move the result out of the handle (blocking).
    ///
    /// Works for results that cannot be cloned. Only one caller across all clones of the handle receives the value;
    /// later retrievals return [`ResultError::Taken`]. The handle still reports [`WorkStatus::Succeeded`].
    pub fn take(&self) -> Result<R, ResultError>
    {
        self.wait_then(None, Self::take_out)
    }

    /// Move the result out of the handle, waiting at most `timeout`.
    pub fn take_timeout(&self, timeout: Duration) -> Result<R, ResultError>
    {
        self.wait_then(Some(Deadline::new(timeout)), Self::take_out)
    }

    fn completion(state: &WorkState<R>) -> Result<Completion, WaitError>
    {
        match state
        {
            WorkState::Succeeded(_) |
            WorkState::Taken        => Ok(Completion::Succeeded),
            WorkState::Failed(_)    => Ok(Completion::Failed),
            _                       => Err(WaitError::Cancelled),
        }
    }

    fn extract(state: &WorkState<R>) -> Result<R, ResultError>
    where
        R: Clone
    {
        match state
        {
            WorkState::Succeeded(result) => Ok(result.clone()),
            _                            => Err(Self::unavailable(state)),
        }
    }

    fn take_out(state: &mut WorkState<R>) -> Result<R, ResultError>
    {
        if !matches!(*state, WorkState::Succeeded(_)) { return Err(Self::unavailable(state)); }

        match std::mem::replace(state, WorkState::Taken)
        {
            WorkState::Succeeded(result) => Ok(result),
            _                            => Err(ResultError::Taken),
        }
    }

    /// Error for a terminal state that holds no value.
    fn unavailable(state: &WorkState<R>) -> ResultError
    {
        match state
        {
            WorkState::Failed(failure) => ResultError::Failed(failure.clone()),
            WorkState::Taken           => ResultError::Taken,
            _                          => ResultError::Wait(WaitError::Cancelled),
        }
    }

    /// Wait for a terminal state then read it with `read`.
    /// - `read` is only called with terminal states.
    fn wait_then<T, E>(&self, deadline: Option<Deadline>, read: impl FnOnce(&mut WorkState<R>) -> Result<T, E>)
        -> Result<T, E>
    where
        E: From<WaitError>
    {
        let interrupter = Interrupter::current();
        let mut state = self.inner.lock();

        // fast path: already finished
        if !matches!(*state, WorkState::Pending) { return read(&mut *state); }

        let _guard = interrupter.park_on(self.inner.clone());

        loop
        {
            if !matches!(*state, WorkState::Pending) { return read(&mut *state); }
            if interrupter.is_interrupted() { return Err(E::from(WaitError::Interrupted)); }

            match deadline
            {
                None =>
                {
                    state = match self.inner.signal.wait(state)
                    {
                        Ok(state) => state,
                        Err(poisoned) => poisoned.into_inner(),
                    };
                }
                Some(deadline) =>
                {
                    let Some(remaining) = deadline.remaining() else { return Err(E::from(WaitError::TimedOut)); };
                    state = match self.inner.signal.wait_timeout(state, remaining)
                    {
                        Ok((state, _)) => state,
                        Err(poisoned) => poisoned.into_inner().0,
                    };
                }
            }
        }
    }
}

impl<R: Send + 'static> PendingWork for WorkHandle<R>
{
    fn is_done(&self) -> bool
    {
        WorkHandle::is_done(self)
    }

    fn is_cancelled(&self) -> bool
    {
        WorkHandle::is_cancelled(self)
    }

    fn cancel(&self) -> bool
    {
        WorkHandle::cancel(self)
    }

    fn wait_timeout(&self, timeout: Duration) -> Result<Completion, WaitError>
    {
        WorkHandle::wait_timeout(self, timeout)
    }
}

//-------------------------------------------------------------------------------------------------------------------

/// Backend side of a [`WorkHandle`]. Moves the handle into a terminal state.
///
/// Dropping a completer that never completed cancels its handle, so work discarded by a backend cannot leave waiters
/// hanging.
#[derive(Debug)]
pub struct WorkCompleter<R>
{
    inner: Arc<HandleInner<R>>,
}

impl<R> WorkCompleter<R>
{
    /// Set the outcome of the work.
    /// - Returns `false` if the handle already reached a terminal state (e.g. it was cancelled), in which case the
    ///   outcome is discarded.
    pub fn complete(&self, result: Result<R, WorkFailure>) -> bool
    {
        let next = match result
        {
            Ok(result)   => WorkState::Succeeded(result),
            Err(failure) => WorkState::Failed(failure),
        };
        self.inner.transition(next)
    }

    /// Check if the handle was cancelled.
    pub fn is_cancelled(&self) -> bool
    {
        matches!(*self.inner.lock(), WorkState::Cancelled)
    }

    /// Run a unit of work and record its outcome.
    /// - The work is skipped if the handle was cancelled before it started.
    /// - Panics are captured as failures.
    pub fn run<F, E>(self, work: F)
    where
        F: FnOnce() -> Result<R, E>,
        E: Into<BoxError>,
    {
        if self.is_cancelled()
        {
            tracing::trace!("skipping cancelled work");
            return;
        }

        let result = match std::panic::catch_unwind(std::panic::AssertUnwindSafe(work))
        {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(err))   => Err(WorkFailure::new(err)),
            Err(payload)   =>
            {
                let failure = WorkFailure::from_panic(payload);
                tracing::warn!(?failure, "work panicked");
                Err(failure)
            }
        };

        if !self.complete(result) { tracing::trace!("discarding outcome of cancelled work"); }
    }
}

impl<R> Drop for WorkCompleter<R>
{
    fn drop(&mut self)
    {
        if self.inner.transition(WorkState::Cancelled)
        {
            tracing::debug!("work dropped before completing, handle cancelled");
        }
    }
}

//-------------------------------------------------------------------------------------------------------------------
