// ============================================================================
// Deferred Fractions Library
// Asynchronous pipelines over arbitrary-precision fractions
// ============================================================================

//! # Deferred Fractions
//!
//! Values are produced by background work, transformed, combined pairwise,
//! and delivered either to a callback or to a blocked caller.
//!
//! ## Features
//!
//! - **Arbitrary-precision fractions** with explicit reduction
//! - **Deferred values** with `map`, `on_success`, `then`, `zip` and blocking retrieval
//! - **Named execution contexts**: a single FIFO worker and a parallel pool
//! - **Failure capture**: errors and panics in work become a failed value
//!
//! ## Example
//!
//! ```rust
//! use deferred_fractions::prelude::*;
//!
//! let mixed = Deferred::from_work(|| "5000000000/3768296432".parse::<Fraction>())
//!     .schedule_on(Schedulers::single())
//!     .map(|f| f.reduce())
//!     .map(|f| f.to_mixed_string())
//!     .block_and_get();
//!
//! assert_eq!(mixed.as_deref(), Some("1 76981473/235518527"));
//!
//! // Failures come back as `None`, or as the error through `block()`.
//! let broken = Deferred::from_work(|| "1/0".parse::<Fraction>())
//!     .schedule_on(Schedulers::parallel());
//! assert!(broken.block_and_get().is_none());
//! ```

pub mod config;
pub mod deferred;
pub mod interfaces;
pub mod numeric;
pub mod pipeline;
pub mod scheduler;

// Re-exports for convenience
pub mod prelude {
    pub use crate::config::{Diagnostics, Options, SchedulerConfig};
    pub use crate::deferred::{Deferred, DeferredState, Promise, TaskError};
    pub use crate::interfaces::{DiagnosticSink, Executor, MemorySink, NoOpSink, TracingSink};
    pub use crate::numeric::{Fraction, FractionError};
    pub use crate::scheduler::{Schedulers, SingleThreadExecutor, ThreadPoolExecutor};
}
