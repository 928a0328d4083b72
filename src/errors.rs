//local shortcuts

//third-party shortcuts

//standard shortcuts
use std::sync::Arc;

//-------------------------------------------------------------------------------------------------------------------

/// Boxed error type produced by units of work.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

//-------------------------------------------------------------------------------------------------------------------

/// Error raised when a unit of work panics instead of returning.
#[derive(Debug, Clone, thiserror::Error)]
#[error("work panicked: {0}")]
pub struct WorkPanicked(pub String);

//-------------------------------------------------------------------------------------------------------------------

/// The error a unit of work produced while running.
///
/// Cloning is cheap: every clone refers to the same original error.
#[derive(Debug, Clone)]
pub struct WorkFailure
{
    error: Arc<dyn std::error::Error + Send + Sync + 'static>,
}

impl WorkFailure
{
    /// Wrap an error produced by a unit of work.
    pub fn new(error: impl Into<BoxError>) -> Self
    {
        let error: BoxError = error.into();
        Self{ error: Arc::from(error) }
    }

    /// Make a failure from a panic payload (as returned by [`std::panic::catch_unwind`]).
    pub fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self
    {
        let msg = if let Some(msg) = payload.downcast_ref::<&'static str>()
        {
            String::from(*msg)
        }
        else if let Some(msg) = payload.downcast_ref::<String>()
        {
            msg.clone()
        }
        else
        {
            String::from("unknown panic payload")
        };

        Self::new(WorkPanicked(msg))
    }

    /// Access the original error.
    pub fn error(&self) -> &(dyn std::error::Error + Send + Sync + 'static)
    {
        &*self.error
    }

    /// Try to recover the original error as a concrete type.
    pub fn downcast_ref<E: std::error::Error + 'static>(&self) -> Option<&E>
    {
        self.error.downcast_ref::<E>()
    }

    /// Check if the failure was caused by a panic.
    pub fn is_panic(&self) -> bool
    {
        self.downcast_ref::<WorkPanicked>().is_some()
    }
}

impl std::fmt::Display for WorkFailure
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result
    {
        std::fmt::Display::fmt(&*self.error, f)
    }
}

impl std::error::Error for WorkFailure
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)>
    {
        Some(&*self.error)
    }
}

//-------------------------------------------------------------------------------------------------------------------

/// Reasons a bounded wait on a handle ended without observing a completed unit of work.
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum WaitError
{
    /// The timeout elapsed while the work was still pending.
    #[error("WaitError::TimedOut")]
    TimedOut,
    /// The work was cancelled and will never produce an outcome.
    #[error("WaitError::Cancelled")]
    Cancelled,
    /// The waiting thread was interrupted. Its interrupt flag is left set.
    #[error("WaitError::Interrupted")]
    Interrupted,
}

//-------------------------------------------------------------------------------------------------------------------

/// Errors emitted when extracting the result of a [`WorkHandle`](crate::WorkHandle).
#[derive(Debug, Clone, thiserror::Error)]
pub enum ResultError
{
    /// The unit of work failed. Contains the error it produced.
    #[error("ResultError::Failed({0})")]
    Failed(#[source] WorkFailure),
    /// No result was available.
    #[error(transparent)]
    Wait(#[from] WaitError),
    /// The work succeeded but its value was already moved out of the handle.
    #[error("ResultError::Taken")]
    Taken,
}

impl ResultError
{
    /// Get the work failure if this is a [`ResultError::Failed`].
    pub fn failure(&self) -> Option<&WorkFailure>
    {
        match self
        {
            ResultError::Failed(failure) => Some(failure),
            ResultError::Wait(_)         => None,
            ResultError::Taken           => None,
        }
    }
}

//-------------------------------------------------------------------------------------------------------------------

/// Errors emitted by a [`WorkManager`](crate::WorkManager) that refuses to schedule work.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum WorkRejected
{
    /// The facility has no room for more work.
    #[error("WorkRejected::AtCapacity")]
    AtCapacity,
    /// The facility was shut down.
    #[error("WorkRejected::ShutDown")]
    ShutDown,
    /// Facility-specific rejection.
    #[error("WorkRejected::Other({0})")]
    Other(String),
}

//-------------------------------------------------------------------------------------------------------------------

/// Errors emitted when a backend cannot schedule a unit of work.
///
/// A scheduling failure is a configuration or resource problem, so it is reported at submission time instead of
/// through the handle's failed state.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum SubmitError
{
    /// The backend refused the work.
    #[error("could not schedule work: {0}")]
    Rejected(#[from] WorkRejected),
}

//-------------------------------------------------------------------------------------------------------------------
