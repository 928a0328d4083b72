//local shortcuts
use crate::*;

//third-party shortcuts

//standard shortcuts
use std::time::Duration;

//-------------------------------------------------------------------------------------------------------------------

/// Config for composite waits.
#[derive(Debug, Copy, Clone)]
pub struct WaitConfig
{
    /// Ceiling on the time spent waiting on a single handle in [`wait_for_any_to_complete()`].
    /// Defaults to 100 milliseconds.
    ///
    /// Bounds how long a slow handle early in the list can delay noticing that a later handle finished.
    pub max_time_slice: Duration,
}

impl Default for WaitConfig
{
    fn default() -> WaitConfig
    {
        WaitConfig{
                max_time_slice: Duration::from_millis(100u64),
            }
    }
}

//-------------------------------------------------------------------------------------------------------------------

/// Wait for a unit of work to complete by any means (successfully or with an error).
///
/// Returns `false` if the work was cancelled, if the timeout elapsed, or if the calling thread was interrupted.
/// An interrupted thread keeps its interrupt flag.
pub fn wait_for_completion(handle: &dyn PendingWork, timeout: Duration) -> bool
{
    match handle.wait_timeout(timeout)
    {
        Ok(_) => true,
        Err(WaitError::Interrupted) =>
        {
            tracing::debug!("wait for completion interrupted");
            false
        }
        Err(err) =>
        {
            tracing::trace!(?err, "work did not complete");
            false
        }
    }
}

//-------------------------------------------------------------------------------------------------------------------

/// Wait for any of the handles to reach a terminal state.
///
/// Handles are examined once each, in list order. Each handle is waited on for a slice of the remaining time (the
/// remaining time divided by the number of handles not yet examined, capped at [`WaitConfig::max_time_slice`]).
///
/// Returns `true` as soon as an examined handle is found succeeded, failed, or cancelled. The handle that triggers
/// the result is the first one found finished, not necessarily the first one to have finished.
///
/// Returns `false` once every handle was examined without finding one finished, if the timeout elapses first, if the
/// list is empty, or if the calling thread is interrupted (the interrupt flag is left set). Because of the slice cap
/// a single pass can end well before the timeout.
pub fn wait_for_any_to_complete(handles: &[&dyn PendingWork], timeout: Duration, config: &WaitConfig) -> bool
{
    let deadline = Deadline::new(timeout);

    for (index, handle) in handles.iter().enumerate()
    {
        let Some(remaining) = deadline.remaining() else
        {
            tracing::trace!(?timeout, "wait for any timed out");
            return false;
        };

        if handle.is_done() || handle.is_cancelled()
        {
            tracing::trace!(index, "wait for any found finished work");
            return true;
        }

        // divide remaining time into per-handle slices
        let unexamined = u32::try_from(handles.len() - index).unwrap_or(u32::MAX);
        let slice = (remaining / unexamined).min(config.max_time_slice);

        match handle.wait_timeout(slice)
        {
            Ok(completion) =>
            {
                tracing::trace!(index, ?completion, "wait for any observed completion");
                return true;
            }
            Err(WaitError::Cancelled) =>
            {
                tracing::trace!(index, "wait for any observed cancellation");
                return true;
            }
            Err(WaitError::Interrupted) =>
            {
                tracing::debug!("wait for any interrupted");
                return false;
            }
            Err(WaitError::TimedOut) => (),
        }
    }

    tracing::trace!(num_handles = handles.len(), "wait for any found no finished work");
    false
}

//-------------------------------------------------------------------------------------------------------------------

/// Wait for all of the handles to complete (successfully or with an error).
///
/// Handles are examined in list order under one shared deadline. Each pending handle may use all of the remaining
/// time.
///
/// Returns `false` if the timeout elapses, if any handle is cancelled, or if the calling thread is interrupted (the
/// interrupt flag is left set). An empty list returns `true`.
pub fn wait_for_all_to_complete(handles: &[&dyn PendingWork], timeout: Duration) -> bool
{
    let deadline = Deadline::new(timeout);

    for (index, handle) in handles.iter().enumerate()
    {
        let Some(remaining) = deadline.remaining() else
        {
            tracing::trace!(?timeout, "wait for all timed out");
            return false;
        };

        if handle.is_cancelled()
        {
            tracing::trace!(index, "wait for all found cancelled work");
            return false;
        }
        if handle.is_done() { continue; }

        match handle.wait_timeout(remaining)
        {
            Ok(_) => (),
            Err(WaitError::Interrupted) =>
            {
                tracing::debug!("wait for all interrupted");
                return false;
            }
            Err(err) =>
            {
                tracing::trace!(index, ?err, "wait for all stopped early");
                return false;
            }
        }
    }

    true
}

//-------------------------------------------------------------------------------------------------------------------
