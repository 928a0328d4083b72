//local shortcuts
use crate::*;

//third-party shortcuts

//standard shortcuts
use std::sync::Arc;
use std::time::Duration;

//-------------------------------------------------------------------------------------------------------------------

/// A type-erased job handed to a backend for execution.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

//-------------------------------------------------------------------------------------------------------------------

/// A unit of work that produces no value.
///
/// Submitting an action with [`WorkExecutor::submit_action()`] yields the action itself on success, so callers can
/// identify finished work by the object they submitted.
pub trait Action: Send + Sync + 'static
{
    fn run(&self) -> Result<(), BoxError>;
}

impl<F, E> Action for F
where
    F: Fn() -> Result<(), E> + Send + Sync + 'static,
    E: Into<BoxError>,
{
    fn run(&self) -> Result<(), BoxError>
    {
        (self)().map_err(Into::into)
    }
}

//-------------------------------------------------------------------------------------------------------------------

/// Submits units of work to a backend and waits on their outcomes.
///
/// Backends only need to implement [`WorkExecutor::execute()`]. Submissions return a [`WorkHandle`] driven by the
/// job the backend runs.
pub trait WorkExecutor: Send + Sync
{
    /// Hand a job to the backend.
    /// - The job should start eventually, on some other thread.
    /// - Errors if the backend cannot schedule the job at all.
    fn execute(&self, job: Job) -> Result<(), SubmitError>;

    /// Config used by composite waits.
    fn wait_config(&self) -> &WaitConfig;

    /// Submit an action for execution.
    ///
    /// On success the handle yields the submitted `Arc` itself (see [`Arc::ptr_eq`]).
    fn submit_action<A: Action>(&self, action: Arc<A>) -> Result<WorkHandle<Arc<A>>, SubmitError>
    {
        let (handle, completer) = work_handle::pending();
        self.execute(Box::new(move || completer.run(move || action.run().map(|()| action))))?;

        tracing::trace!("submitted action");
        Ok(handle)
    }

    /// Submit a computation for execution.
    ///
    /// On success the handle yields the value the computation returns. A returned error or a panic is recorded as a
    /// failure.
    fn submit<T, E, F>(&self, computation: F) -> Result<WorkHandle<T>, SubmitError>
    where
        T: Send + 'static,
        E: Into<BoxError>,
        F: FnOnce() -> Result<T, E> + Send + 'static,
    {
        let (handle, completer) = work_handle::pending();
        self.execute(Box::new(move || completer.run(computation)))?;

        tracing::trace!("submitted computation");
        Ok(handle)
    }

    /// See [`wait_for_completion()`].
    fn wait_for_completion(&self, handle: &dyn PendingWork, timeout: Duration) -> bool
    {
        wait::wait_for_completion(handle, timeout)
    }

    /// See [`wait_for_any_to_complete()`].
    fn wait_for_any_to_complete(&self, handles: &[&dyn PendingWork], timeout: Duration) -> bool
    {
        wait::wait_for_any_to_complete(handles, timeout, self.wait_config())
    }

    /// See [`wait_for_all_to_complete()`].
    fn wait_for_all_to_complete(&self, handles: &[&dyn PendingWork], timeout: Duration) -> bool
    {
        wait::wait_for_all_to_complete(handles, timeout)
    }
}

//-------------------------------------------------------------------------------------------------------------------
