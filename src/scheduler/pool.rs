// ============================================================================
// Thread-Pool Executor
// Fixed set of workers sharing one queue; no ordering between jobs
// ============================================================================

use super::errors::SchedulerError;
use super::worker::{join_workers, spawn_worker};
use crate::interfaces::{Executor, Job};
use crossbeam::channel::{self, Sender};
use std::thread::JoinHandle;

/// Executes jobs concurrently on `threads` workers.
pub struct ThreadPoolExecutor {
    name: String,
    queue: Sender<Job>,
    workers: Vec<JoinHandle<()>>,
}

impl ThreadPoolExecutor {
    /// Start `threads` workers named `<name>-1` .. `<name>-N`.
    pub fn new(name: impl Into<String>, threads: usize) -> Result<Self, SchedulerError> {
        let name = name.into();
        if threads == 0 {
            return Err(SchedulerError::InvalidConfig(
                "thread pool needs at least one worker".to_string(),
            ));
        }

        let (sender, receiver) = channel::unbounded();
        let mut workers = Vec::with_capacity(threads);
        for index in 1..=threads {
            match spawn_worker(format!("{}-{}", name, index), receiver.clone()) {
                Ok(worker) => workers.push(worker),
                Err(error) => {
                    drop(sender);
                    join_workers(workers);
                    return Err(error);
                }
            }
        }

        tracing::debug!(executor = %name, threads, "thread-pool executor started");
        Ok(Self {
            name,
            queue: sender,
            workers,
        })
    }

    pub fn threads(&self) -> usize {
        self.workers.len()
    }

    /// Close the queue, let queued jobs finish, and join every worker.
    pub fn shutdown(self) {
        let Self { queue, workers, .. } = self;
        drop(queue);
        join_workers(workers);
    }
}

impl Executor for ThreadPoolExecutor {
    fn execute(&self, job: Job) {
        if let Err(rejected) = self.queue.send(job) {
            tracing::warn!(executor = %self.name, "workers gone, running job inline");
            (rejected.into_inner())();
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
