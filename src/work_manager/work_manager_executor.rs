//local shortcuts
use crate::*;

//third-party shortcuts

//standard shortcuts
use std::sync::Mutex;

//-------------------------------------------------------------------------------------------------------------------

/// Adapts a job to the [`Work`] interface of a legacy facility.
struct WorkWrapper
{
    job: Mutex<Option<Job>>,
}

impl WorkWrapper
{
    fn new(job: Job) -> Self
    {
        Self{ job: Mutex::new(Some(job)) }
    }

    fn take(&self) -> Option<Job>
    {
        match self.job.lock()
        {
            Ok(mut job) => job.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        }
    }
}

impl Work for WorkWrapper
{
    fn run(self: Box<Self>)
    {
        let Some(job) = self.take() else { return; };
        job();
    }

    fn release(&self)
    {
        // dropping the job drops its completer, which cancels the pending handle
        if self.take().is_some() { tracing::debug!("work released before running"); }
    }
}

//-------------------------------------------------------------------------------------------------------------------

/// Runs submitted work on a legacy [`WorkManager`].
///
/// Each submission makes a local [`WorkHandle`], wraps the job in a [`Work`] that completes the handle, and passes it
/// to [`WorkManager::start_work()`]. If the work manager rejects the work, submission fails with
/// [`SubmitError::Rejected`].
#[derive(Debug)]
pub struct WorkManagerExecutor<M: WorkManager>
{
    /// facility that runs jobs
    manager: M,
    /// composite wait config
    config: WaitConfig,
}

impl<M: WorkManager> WorkManagerExecutor<M>
{
    /// Make a new executor on the given work manager.
    pub fn new(manager: M) -> Self
    {
        Self::with_config(manager, WaitConfig::default())
    }

    /// Make a new executor on the given work manager with a custom wait config.
    pub fn with_config(manager: M, config: WaitConfig) -> Self
    {
        Self{ manager, config }
    }

    /// Access the work manager.
    pub fn manager(&self) -> &M
    {
        &self.manager
    }
}

impl<M: WorkManager> WorkExecutor for WorkManagerExecutor<M>
{
    fn execute(&self, job: Job) -> Result<(), SubmitError>
    {
        if let Err(err) = self.manager.start_work(Box::new(WorkWrapper::new(job)))
        {
            tracing::warn!(?err, "could not schedule work");
            return Err(SubmitError::Rejected(err));
        }

        tracing::debug!("work started on work manager");
        Ok(())
    }

    fn wait_config(&self) -> &WaitConfig
    {
        &self.config
    }
}

//-------------------------------------------------------------------------------------------------------------------
