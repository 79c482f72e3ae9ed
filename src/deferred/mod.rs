// ============================================================================
// Deferred Module
// Asynchronously produced values and their composition operators
// ============================================================================
//
// This module provides:
// - Deferred<T>: lazily launched handle with map/on_success/then/zip
// - Promise<T>: manual completion of a Deferred
// - TaskError: failure state carried instead of escaping worker threads
//
// Design principles:
// - Terminal outcome is written exactly once; a second write panics
// - Only block/block_and_get suspend the caller
// - Continuations run on the thread that completes the upstream value

#[allow(clippy::module_inception)]
mod deferred;
mod errors;
mod join;
mod launcher;
mod state;

pub use deferred::{Deferred, Promise};
pub use errors::TaskError;
pub use state::{DeferredState, Outcome};

pub(crate) use errors::panic_message;

use std::panic::{self, AssertUnwindSafe};

/// Run `f`, turning a panic into `TaskError::Panicked`.
pub(crate) fn guard<R>(f: impl FnOnce() -> R) -> Outcome<R> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(TaskError::from_panic)
}
