//local shortcuts
use crate::*;

//third-party shortcuts
use crossbeam::channel::{Receiver, Sender, TrySendError};

//standard shortcuts
use core::fmt::Debug;
use std::sync::Mutex;

//-------------------------------------------------------------------------------------------------------------------

fn worker_loop(receiver: Receiver<Box<dyn Work>>)
{
    // exits once the manager shuts down and the queue is empty
    for work in receiver.iter()
    {
        if std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || work.run())).is_err()
        {
            tracing::warn!("work panicked on work manager thread");
        }
    }
    tracing::trace!("work manager thread exiting");
}

//-------------------------------------------------------------------------------------------------------------------

/// A [`WorkManager`] that runs work on a fixed set of threads fed by a bounded queue.
///
/// Work is rejected with [`WorkRejected::AtCapacity`] when the queue is full, and with [`WorkRejected::ShutDown`]
/// after [`ThreadWorkManager::shutdown()`]. Dropping the manager shuts it down.
pub struct ThreadWorkManager
{
    /// queue sender; `None` after shutdown
    sender: Mutex<Option<Sender<Box<dyn Work>>>>,
    /// queue receiver, kept to release queued work on shutdown
    receiver: Receiver<Box<dyn Work>>,
    /// config
    config: WorkManagerConfig,
}

impl ThreadWorkManager
{
    /// Make a new work manager and start its threads.
    pub fn new(config: WorkManagerConfig) -> std::io::Result<ThreadWorkManager>
    {
        let (sender, receiver) = crossbeam::channel::bounded::<Box<dyn Work>>(config.queue_capacity);

        for idx in 0..config.worker_threads.max(1)
        {
            let receiver = receiver.clone();
            std::thread::Builder::new()
                .name(format!("{}-{}", config.thread_name, idx))
                .spawn(move || worker_loop(receiver))?;
        }

        tracing::debug!(worker_threads = config.worker_threads.max(1), queue_capacity = config.queue_capacity,
            "started work manager");

        Ok(ThreadWorkManager{ sender: Mutex::new(Some(sender)), receiver, config })
    }

    /// Access the config.
    pub fn config(&self) -> &WorkManagerConfig
    {
        &self.config
    }

    /// Number of accepted work items waiting for a thread.
    pub fn num_queued(&self) -> usize
    {
        self.receiver.len()
    }

    /// Check if the manager was shut down.
    pub fn is_shut_down(&self) -> bool
    {
        match self.sender.lock()
        {
            Ok(sender) => sender.is_none(),
            Err(_) => true,
        }
    }

    /// Stop accepting work and release work that has not started yet.
    /// - Running work is not interrupted. Threads exit once they finish their current work.
    pub fn shutdown(&self)
    {
        let sender = match self.sender.lock()
        {
            Ok(mut sender) => sender.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if sender.is_none() { return; }
        drop(sender);

        let mut released = 0usize;
        while let Ok(work) = self.receiver.try_recv()
        {
            work.release();
            released += 1;
        }
        tracing::debug!(released, "work manager shut down");
    }
}

impl WorkManager for ThreadWorkManager
{
    fn start_work(&self, work: Box<dyn Work>) -> Result<(), WorkRejected>
    {
        let Ok(sender) = self.sender.lock()
        else
        {
            tracing::error!("the work manager experienced a critical internal error");
            return Err(WorkRejected::Other(String::from("work manager lock poisoned")));
        };
        let Some(sender) = sender.as_ref() else { return Err(WorkRejected::ShutDown); };

        match sender.try_send(work)
        {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(work)) =>
            {
                work.release();
                Err(WorkRejected::AtCapacity)
            }
            Err(TrySendError::Disconnected(work)) =>
            {
                work.release();
                Err(WorkRejected::ShutDown)
            }
        }
    }
}

impl Drop for ThreadWorkManager
{
    fn drop(&mut self)
    {
        self.shutdown();
    }
}

impl Debug for ThreadWorkManager
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result
    {
        f.debug_struct("ThreadWorkManager")
            .field("config", &self.config)
            .field("num_queued", &self.num_queued())
            .field("shut_down", &self.is_shut_down())
            .finish()
    }
}

//-------------------------------------------------------------------------------------------------------------------
