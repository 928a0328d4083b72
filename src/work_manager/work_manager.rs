//local shortcuts
use crate::*;

//third-party shortcuts

//standard shortcuts


//-------------------------------------------------------------------------------------------------------------------

/// An opaque item of work accepted by a [`WorkManager`].
pub trait Work: Send + 'static
{
    /// Run the work. Called at most once, on a thread owned by the work manager.
    fn run(self: Box<Self>);

    /// Ask the work to give up without running.
    ///
    /// Work managers call this for work they accepted but will never run (e.g. on shutdown).
    fn release(&self) {}
}

//-------------------------------------------------------------------------------------------------------------------

/// A legacy work-scheduling facility.
///
/// The facility owns its own threads and has no future type of its own, so [`WorkManagerExecutor`] bridges it with
/// locally-owned [`WorkHandle`]s.
pub trait WorkManager: Send + Sync
{
    /// Start running the work asynchronously.
    /// - Errors synchronously if the work cannot be scheduled.
    fn start_work(&self, work: Box<dyn Work>) -> Result<(), WorkRejected>;
}

impl<M: WorkManager + ?Sized> WorkManager for std::sync::Arc<M>
{
    fn start_work(&self, work: Box<dyn Work>) -> Result<(), WorkRejected>
    {
        (**self).start_work(work)
    }
}

//-------------------------------------------------------------------------------------------------------------------
