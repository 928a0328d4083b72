//local shortcuts

//third-party shortcuts

//standard shortcuts


//-------------------------------------------------------------------------------------------------------------------

/// Config for the [`ThreadWorkManager`](crate::ThreadWorkManager).
#[derive(Debug, Clone)]
pub struct WorkManagerConfig
{
    /// Number of threads that run work. Defaults to 4.
    pub worker_threads: usize,
    /// Maximum number of accepted work items waiting for a free thread. Defaults to 64.
    ///
    /// Work submitted while the queue is full is rejected. A capacity of zero only accepts work when a thread is
    /// idle and waiting for it.
    pub queue_capacity: usize,
    /// Prefix for worker thread names. Defaults to `"work-manager"`.
    pub thread_name: String,
}

impl Default for WorkManagerConfig
{
    fn default() -> WorkManagerConfig
    {
        WorkManagerConfig{
                worker_threads : 4,
                queue_capacity : 64,
                thread_name    : String::from("work-manager"),
            }
    }
}

//-------------------------------------------------------------------------------------------------------------------
