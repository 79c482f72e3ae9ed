// ============================================================================
// Schedulers
// Process-wide, lazily started execution contexts
// ============================================================================

use crate::config::SchedulerConfig;
use crate::deferred::Deferred;
use super::pool::ThreadPoolExecutor;
use crate::interfaces::{Executor, ImmediateExecutor};
use std::error::Error as StdError;
use std::sync::{Arc, OnceLock};

static SINGLE: OnceLock<Arc<dyn Executor>> = OnceLock::new();
static PARALLEL: OnceLock<Arc<ThreadPoolExecutor>> = OnceLock::new();
static IMMEDIATE: OnceLock<Arc<dyn Executor>> = OnceLock::new();

/// Named, shared execution contexts.
///
/// Each context is started on first use and lives for the rest of the
/// process; every caller gets the same instance.
pub struct Schedulers;

impl Schedulers {
    /// One dedicated worker, jobs in submission order.
    pub fn single() -> Arc<dyn Executor> {
        Arc::clone(SINGLE.get_or_init(|| {
            let executor = SchedulerConfig::default()
                .build_single()
                .unwrap_or_else(|error| panic!("cannot start single scheduler: {}", error));
            let executor: Arc<dyn Executor> = Arc::new(executor);
            executor
        }))
    }

    /// Pool sized to the available hardware threads.
    pub fn parallel() -> Arc<dyn Executor> {
        Self::parallel_pool()
    }

    fn parallel_pool() -> Arc<ThreadPoolExecutor> {
        Arc::clone(PARALLEL.get_or_init(|| {
            let pool = SchedulerConfig::default()
                .build_parallel()
                .unwrap_or_else(|error| panic!("cannot start parallel scheduler: {}", error));
            Arc::new(pool)
        }))
    }

    /// Runs work on the thread that launches it.
    pub fn immediate() -> Arc<dyn Executor> {
        Arc::clone(IMMEDIATE.get_or_init(|| {
            let executor: Arc<dyn Executor> = Arc::new(ImmediateExecutor);
            executor
        }))
    }

    /// Dispatch `work` onto `context` right away.
    ///
    /// Returns without waiting; the returned value is already scheduled.
    pub fn submit<T, F, E>(context: &Arc<dyn Executor>, work: F) -> Deferred<T>
    where
        T: Clone + Send + 'static,
        F: FnOnce() -> Result<T, E> + Send + 'static,
        E: StdError + Send + Sync + 'static,
    {
        let deferred = Deferred::from_work(work).schedule_on(Arc::clone(context));
        deferred.start();
        deferred
    }
}
