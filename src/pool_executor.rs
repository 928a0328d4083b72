//local shortcuts
use crate::*;

//third-party shortcuts

//standard shortcuts
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

//-------------------------------------------------------------------------------------------------------------------

/// Handle to the statically-initialized pool used when no runtime is available.
fn default_pool() -> tokio::runtime::Handle
{
    static RUNTIME: OnceLock<tokio::runtime::Runtime> = OnceLock::new();

    let runtime = RUNTIME.get_or_init(
            ||
            {
                tokio::runtime::Builder::new_multi_thread()
                    .thread_name("work-executor-pool")
                    .build()
                    .expect("unable to start default work executor pool")
            }
        );
    runtime.handle().clone()
}

//-------------------------------------------------------------------------------------------------------------------

/// A job handed to the pool. Records if the pool dropped it without running it.
struct ScheduledJob
{
    job: Option<Job>,
    dropped_unrun: Arc<AtomicBool>,
}

impl ScheduledJob
{
    fn run(mut self)
    {
        if let Some(job) = self.job.take() { job(); }
    }
}

impl Drop for ScheduledJob
{
    fn drop(&mut self)
    {
        if self.job.is_some() { self.dropped_unrun.store(true, Ordering::Release); }
    }
}

//-------------------------------------------------------------------------------------------------------------------

/// Runs submitted work on a thread pool.
///
/// Jobs run on the blocking pool of a tokio runtime, so long-running or sleeping work does not stall the runtime's
/// async workers. Submitting to a runtime that has shut down fails with [`WorkRejected::ShutDown`].
#[derive(Debug, Clone)]
pub struct PoolWorkExecutor
{
    /// pool that runs jobs
    pool: tokio::runtime::Handle,
    /// composite wait config
    config: WaitConfig,
}

impl PoolWorkExecutor
{
    /// Make a new executor on the given pool.
    pub fn new(pool: tokio::runtime::Handle) -> PoolWorkExecutor
    {
        Self::with_config(pool, WaitConfig::default())
    }

    /// Make a new executor on the given pool with a custom wait config.
    pub fn with_config(pool: tokio::runtime::Handle, config: WaitConfig) -> PoolWorkExecutor
    {
        PoolWorkExecutor{ pool, config }
    }

    /// Make a new executor on the runtime entered by the current thread.
    /// - Returns `None` if the current thread is not inside a tokio runtime.
    pub fn try_adopt() -> Option<PoolWorkExecutor>
    {
        let Ok(pool) = tokio::runtime::Handle::try_current() else { return None; };
        Some(PoolWorkExecutor::new(pool))
    }

    /// Make a new executor on the runtime entered by the current thread, falling back to a statically-initialized
    /// pool.
    pub fn adopt_or_default() -> PoolWorkExecutor
    {
        Self::try_adopt().unwrap_or_else(|| PoolWorkExecutor::new(default_pool()))
    }

    /// Access the pool.
    pub fn pool(&self) -> &tokio::runtime::Handle
    {
        &self.pool
    }
}

impl Default for PoolWorkExecutor
{
    fn default() -> PoolWorkExecutor
    {
        PoolWorkExecutor::adopt_or_default()
    }
}

impl WorkExecutor for PoolWorkExecutor
{
    fn execute(&self, job: Job) -> Result<(), SubmitError>
    {
        let dropped_unrun = Arc::new(AtomicBool::new(false));
        let scheduled = ScheduledJob{ job: Some(job), dropped_unrun: dropped_unrun.clone() };

        // the join handle is not needed: the job drives its own work handle
        let _ = self.pool.spawn_blocking(move || scheduled.run());

        // a runtime that is shutting down drops the job before returning
        if dropped_unrun.load(Ordering::Acquire)
        {
            tracing::warn!("pool is shut down, job rejected");
            return Err(SubmitError::Rejected(WorkRejected::ShutDown));
        }

        tracing::debug!("job sent to pool");
        Ok(())
    }

    fn wait_config(&self) -> &WaitConfig
    {
        &self.config
    }
}

//-------------------------------------------------------------------------------------------------------------------
