// ============================================================================
// Worker Thread
// Drains a job queue until every sender is gone
// ============================================================================

use super::errors::SchedulerError;
use crate::deferred::panic_message;
use crate::interfaces::Job;
use crossbeam::channel::Receiver;
use std::panic::{self, AssertUnwindSafe};
use std::thread::{self, JoinHandle};

pub(crate) fn spawn_worker(
    name: String,
    queue: Receiver<Job>,
) -> Result<JoinHandle<()>, SchedulerError> {
    thread::Builder::new()
        .name(name.clone())
        .spawn(move || run(queue))
        .map_err(|source| SchedulerError::Spawn { name, source })
}

fn run(queue: Receiver<Job>) {
    let current = thread::current();
    let worker = current.name().unwrap_or("unnamed");

    for job in queue.iter() {
        // Deferred work guards itself; this only catches raw jobs.
        if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(job)) {
            tracing::error!(
                worker,
                panic = %panic_message(payload.as_ref()),
                "job panicked on worker thread"
            );
        }
    }
    tracing::trace!(worker, "job queue closed, worker exiting");
}

/// True when called from one of `workers`.
pub(crate) fn is_worker_thread(workers: &[JoinHandle<()>]) -> bool {
    let current = thread::current().id();
    workers.iter().any(|worker| worker.thread().id() == current)
}

/// Join workers unless the caller is one of them.
pub(crate) fn join_workers(workers: Vec<JoinHandle<()>>) {
    if is_worker_thread(&workers) {
        tracing::warn!("executor shut down from its own worker; not joining");
        return;
    }
    for worker in workers {
        if worker.join().is_err() {
            tracing::error!("worker thread terminated abnormally");
        }
    }
}
