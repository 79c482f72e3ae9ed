// ============================================================================
// Executor Interface
// Defines the contract for execution contexts that run units of work
// ============================================================================

/// A unit of work handed to an executor.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Execution context onto which deferred work is dispatched.
/// Implementations: single worker thread, shared thread pool, caller thread.
pub trait Executor: Send + Sync {
    /// Run `job` at some point, possibly on another thread.
    ///
    /// Must not block waiting for the job to finish.
    fn execute(&self, job: Job);

    /// Get the context name for logging
    fn name(&self) -> &str;
}

/// Runs every job inline on the thread that submits it.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImmediateExecutor;

impl Executor for ImmediateExecutor {
    fn execute(&self, job: Job) {
        job();
    }

    fn name(&self) -> &str {
        "immediate"
    }
}
