// ============================================================================
// Scheduler Module
// Execution contexts for deferred work
// ============================================================================
//
// Contexts:
// - single: one dedicated worker, FIFO
// - parallel: shared pool sized to hardware concurrency, unordered
// - immediate: the launching thread

mod errors;
mod pool;
mod schedulers;
mod single;
mod worker;

pub use crate::interfaces::ImmediateExecutor;
pub use errors::SchedulerError;
pub use pool::ThreadPoolExecutor;
pub use schedulers::Schedulers;
pub use single::SingleThreadExecutor;
