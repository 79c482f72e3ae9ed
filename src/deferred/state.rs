// ============================================================================
// Deferred State
// Write-once completion cell shared by a deferred value and its continuations
// ============================================================================

use super::errors::TaskError;
use parking_lot::{Condvar, Mutex};
use smallvec::SmallVec;
use std::sync::Arc;

/// Outcome of a unit of work.
pub type Outcome<T> = Result<T, TaskError>;

pub(crate) type Continuation<T> = Box<dyn FnOnce(Outcome<T>) + Send + 'static>;

/// Lifecycle of a deferred value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredState {
    /// Assembled but its work has not been launched
    Pending,
    /// Work dispatched onto an execution context
    Scheduled,
    /// Completed with a value
    Fulfilled,
    /// Completed with a `TaskError`
    Failed,
}

impl DeferredState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, DeferredState::Fulfilled | DeferredState::Failed)
    }
}

struct Slot<T> {
    outcome: Option<Outcome<T>>,
    continuations: SmallVec<[Continuation<T>; 2]>,
}

/// Holds the terminal outcome once written and the continuations waiting on it.
///
/// The outcome is written exactly once. Continuations run outside the lock,
/// on the completing thread, or on the registering thread when the outcome
/// is already present.
pub(crate) struct Completion<T> {
    slot: Mutex<Slot<T>>,
    ready: Condvar,
}

impl<T: Clone + Send + 'static> Completion<T> {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            slot: Mutex::new(Slot {
                outcome: None,
                continuations: SmallVec::new(),
            }),
            ready: Condvar::new(),
        })
    }

    pub(crate) fn completed(outcome: Outcome<T>) -> Arc<Self> {
        let completion = Self::new();
        completion.complete(outcome);
        completion
    }

    /// Record the terminal outcome and run pending continuations.
    ///
    /// # Panics
    /// If an outcome was already recorded.
    pub(crate) fn complete(&self, outcome: Outcome<T>) {
        let continuations = {
            let mut slot = self.slot.lock();
            if slot.outcome.is_some() {
                panic!("deferred value completed twice");
            }
            slot.outcome = Some(outcome.clone());
            std::mem::take(&mut slot.continuations)
        };
        self.ready.notify_all();

        tracing::trace!(
            ok = outcome.is_ok(),
            continuations = continuations.len(),
            "deferred value completed"
        );
        for continuation in continuations {
            continuation(outcome.clone());
        }
    }

    /// Run `continuation` once the outcome is known.
    pub(crate) fn on_complete(&self, continuation: Continuation<T>) {
        let ready = {
            let mut slot = self.slot.lock();
            match slot.outcome.clone() {
                Some(outcome) => outcome,
                None => {
                    slot.continuations.push(continuation);
                    return;
                }
            }
        };
        continuation(ready);
    }

    /// Block until the outcome is known.
    pub(crate) fn wait(&self) -> Outcome<T> {
        let mut slot = self.slot.lock();
        loop {
            if let Some(outcome) = &slot.outcome {
                return outcome.clone();
            }
            self.ready.wait(&mut slot);
        }
    }

    /// `Some(true)` when fulfilled, `Some(false)` when failed, `None` while open.
    pub(crate) fn terminal(&self) -> Option<bool> {
        self.slot.lock().outcome.as_ref().map(Result::is_ok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[test]
    fn test_continuations_run_once_completed() {
        let completion = Completion::<u32>::new();
        let hits = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let hits = Arc::clone(&hits);
            completion.on_complete(Box::new(move |outcome| {
                assert_eq!(outcome.unwrap(), 7);
                hits.fetch_add(1, Ordering::SeqCst);
            }));
        }
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert_eq!(completion.terminal(), None);

        completion.complete(Ok(7));
        assert_eq!(hits.load(Ordering::SeqCst), 3);
        assert_eq!(completion.terminal(), Some(true));
    }

    #[test]
    fn test_late_continuation_runs_inline() {
        let completion = Completion::<u32>::completed(Err(TaskError::Abandoned));
        let seen = Arc::new(AtomicUsize::new(0));
        let flag = Arc::clone(&seen);
        completion.on_complete(Box::new(move |outcome| {
            assert!(outcome.is_err());
            flag.fetch_add(1, Ordering::SeqCst);
        }));
        assert_eq!(seen.load(Ordering::SeqCst), 1);
        assert_eq!(completion.terminal(), Some(false));
    }

    #[test]
    fn test_wait_across_threads() {
        let completion = Completion::<String>::new();
        let writer = Arc::clone(&completion);
        let handle = thread::spawn(move || writer.complete(Ok("done".to_string())));
        assert_eq!(completion.wait().unwrap(), "done");
        handle.join().unwrap();
    }

    #[test]
    #[should_panic(expected = "completed twice")]
    fn test_double_completion_is_fatal() {
        let completion = Completion::<u32>::new();
        completion.complete(Ok(1));
        completion.complete(Ok(2));
    }

    #[test]
    fn test_state_terminality() {
        assert!(!DeferredState::Pending.is_terminal());
        assert!(!DeferredState::Scheduled.is_terminal());
        assert!(DeferredState::Fulfilled.is_terminal());
        assert!(DeferredState::Failed.is_terminal());
    }
}
