// ============================================================================
// Single-Thread Executor
// One dedicated worker; jobs run in submission order
// ============================================================================

use super::errors::SchedulerError;
use super::worker::{join_workers, spawn_worker};
use crate::interfaces::{Executor, Job};
use crossbeam::channel::{self, Sender};
use std::thread::JoinHandle;

/// Executes jobs one at a time on a dedicated thread, FIFO.
///
/// Dropping the executor closes its queue; the worker drains what is left
/// and exits without being joined.
pub struct SingleThreadExecutor {
    name: String,
    queue: Sender<Job>,
    worker: JoinHandle<()>,
}

impl SingleThreadExecutor {
    /// Start the worker thread, named `<name>-1`.
    pub fn new(name: impl Into<String>) -> Result<Self, SchedulerError> {
        let name = name.into();
        let (sender, receiver) = channel::unbounded();
        let worker = spawn_worker(format!("{}-1", name), receiver)?;

        tracing::debug!(executor = %name, "single-thread executor started");
        Ok(Self {
            name,
            queue: sender,
            worker,
        })
    }

    /// Close the queue, let queued jobs finish, and join the worker.
    pub fn shutdown(self) {
        let Self { queue, worker, .. } = self;
        drop(queue);
        join_workers(vec![worker]);
    }
}

impl Executor for SingleThreadExecutor {
    fn execute(&self, job: Job) {
        if let Err(rejected) = self.queue.send(job) {
            tracing::warn!(executor = %self.name, "worker gone, running job inline");
            (rejected.into_inner())();
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
