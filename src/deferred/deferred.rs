// ============================================================================
// Deferred
// Handle to a value produced asynchronously, with non-blocking combinators
// ============================================================================

use super::errors::TaskError;
use super::guard;
use super::join::Join;
use super::launcher::Launcher;
use super::state::{Completion, DeferredState, Outcome};
use crate::interfaces::{Executor, Job};
use smallvec::{smallvec, SmallVec};
use std::convert::Infallible;
use std::error::Error as StdError;
use std::sync::Arc;

/// A value that becomes available once some unit of work completes.
///
/// A `Deferred` is assembled lazily: [`Deferred::from_work`] captures the
/// work, [`Deferred::schedule_on`] picks where it runs, and combinators such
/// as [`Deferred::map`] and [`Deferred::zip`] register continuations without
/// blocking. The work is launched by [`Deferred::start`],
/// [`Deferred::subscribe`] or one of the blocking calls. Work that was never
/// bound to a context runs inline on the launching thread.
///
/// Handles are cheap to clone; clones observe the same outcome.
///
/// # Example
/// ```
/// use deferred_fractions::prelude::*;
///
/// let half: Fraction = "1/2".parse().unwrap();
/// let third: Fraction = "1/3".parse().unwrap();
///
/// let a = Deferred::from_fn(move || half).schedule_on(Schedulers::parallel());
/// let b = Deferred::from_fn(move || third).schedule_on(Schedulers::parallel());
///
/// let sum = a.zip(&b, |x, y| x.add(&y)).block_and_get().unwrap();
/// assert_eq!(sum.to_string(), "5/6");
/// ```
pub struct Deferred<T> {
    completion: Arc<Completion<T>>,
    roots: SmallVec<[Arc<Launcher>; 2]>,
}

impl<T> Clone for Deferred<T> {
    fn clone(&self) -> Self {
        Self {
            completion: Arc::clone(&self.completion),
            roots: self.roots.clone(),
        }
    }
}

impl<T: Clone + Send + 'static> Deferred<T> {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Wrap a fallible unit of work. Nothing runs until the value is launched.
    ///
    /// An `Err` returned by `work` becomes [`TaskError::Failed`]; a panic
    /// becomes [`TaskError::Panicked`].
    pub fn from_work<F, E>(work: F) -> Self
    where
        F: FnOnce() -> Result<T, E> + Send + 'static,
        E: StdError + Send + Sync + 'static,
    {
        let completion = Completion::new();
        let target = Arc::clone(&completion);
        let job: Job = Box::new(move || {
            let outcome = guard(work).and_then(|result| result.map_err(TaskError::failed));
            target.complete(outcome);
        });

        Self {
            completion,
            roots: smallvec![Launcher::new(job)],
        }
    }

    /// Wrap an infallible unit of work.
    pub fn from_fn<F>(work: F) -> Self
    where
        F: FnOnce() -> T + Send + 'static,
    {
        Self::from_work(move || Ok::<T, Infallible>(work()))
    }

    /// Already fulfilled with `value`.
    pub fn fulfilled(value: T) -> Self {
        Self::from_completion(Completion::completed(Ok(value)), SmallVec::new())
    }

    /// Already failed with `error`.
    pub fn failed(error: TaskError) -> Self {
        Self::from_completion(Completion::completed(Err(error)), SmallVec::new())
    }

    pub(crate) fn from_completion(
        completion: Arc<Completion<T>>,
        roots: SmallVec<[Arc<Launcher>; 2]>,
    ) -> Self {
        Self { completion, roots }
    }

    // ========================================================================
    // Scheduling
    // ========================================================================

    /// Run the root work of this chain on `context`.
    ///
    /// Rebinding is allowed until the work is launched; roots that already
    /// launched keep running where they are.
    pub fn schedule_on(&self, context: Arc<dyn Executor>) -> Self {
        for root in &self.roots {
            if !root.bind(Arc::clone(&context)) {
                tracing::warn!(
                    context = context.name(),
                    "schedule_on ignored: deferred work already launched"
                );
            }
        }
        self.clone()
    }

    /// Launch every root of this chain that has not been launched yet.
    pub fn start(&self) -> &Self {
        for root in &self.roots {
            root.launch();
        }
        self
    }

    /// Launch and deliver the outcome to `callback`.
    ///
    /// The callback runs on whichever thread completes the value. A panic in
    /// the callback is logged and contained.
    pub fn subscribe<F>(&self, callback: F)
    where
        F: FnOnce(Result<T, TaskError>) + Send + 'static,
    {
        self.completion.on_complete(Box::new(move |outcome| {
            if let Err(error) = guard(move || callback(outcome)) {
                tracing::error!(%error, "deferred subscriber panicked");
            }
        }));
        self.start();
    }

    pub fn state(&self) -> DeferredState {
        match self.completion.terminal() {
            Some(true) => DeferredState::Fulfilled,
            Some(false) => DeferredState::Failed,
            None if self.roots.iter().all(|root| root.is_launched()) => DeferredState::Scheduled,
            None => DeferredState::Pending,
        }
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.completion.terminal().is_some()
    }

    // ========================================================================
    // Combinators
    // ========================================================================

    fn chain<U, F>(&self, step: F) -> Deferred<U>
    where
        U: Clone + Send + 'static,
        F: FnOnce(Outcome<T>) -> Outcome<U> + Send + 'static,
    {
        let completion = Completion::new();
        let target = Arc::clone(&completion);
        self.completion
            .on_complete(Box::new(move |outcome| target.complete(step(outcome))));
        Deferred::from_completion(completion, self.roots.clone())
    }

    /// Transform the eventual value.
    ///
    /// `f` runs on the thread that delivers this value. Upstream failures pass
    /// through untouched; a panic in `f` fails the result.
    pub fn map<U, F>(&self, f: F) -> Deferred<U>
    where
        U: Clone + Send + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        self.chain(move |outcome| outcome.and_then(|value| guard(move || f(value))))
    }

    /// Transform the eventual value with a fallible function.
    pub fn try_map<U, E, F>(&self, f: F) -> Deferred<U>
    where
        U: Clone + Send + 'static,
        E: StdError + Send + Sync + 'static,
        F: FnOnce(T) -> Result<U, E> + Send + 'static,
    {
        self.chain(move |outcome| {
            outcome
                .and_then(|value| guard(move || f(value)))
                .and_then(|result| result.map_err(TaskError::failed))
        })
    }

    /// Observe the value on success and pass it through unchanged.
    ///
    /// Skipped when this value fails. A panic in `observer` replaces the value
    /// with a failure.
    pub fn on_success<F>(&self, observer: F) -> Deferred<T>
    where
        F: FnOnce(&T) + Send + 'static,
    {
        self.chain(move |outcome| {
            outcome.and_then(|value| guard(|| observer(&value)).map(|()| value))
        })
    }

    /// Observe the failure and pass it through unchanged.
    pub fn on_error<F>(&self, observer: F) -> Deferred<T>
    where
        F: FnOnce(&TaskError) + Send + 'static,
    {
        self.chain(move |outcome| match outcome {
            Ok(value) => Ok(value),
            Err(error) => guard(|| observer(&error)).and_then(|()| Err(error)),
        })
    }

    /// Drop the value, keeping only success or failure.
    pub fn then(&self) -> Deferred<()> {
        self.chain(|outcome| outcome.map(|_| ()))
    }

    /// Combine with `other` once both values are terminal.
    ///
    /// If both fulfill, the result is `combiner(a, b)`. Otherwise the result
    /// fails; when both sides failed, this side's error is reported. Starting
    /// the result starts both inputs.
    pub fn zip<U, R, F>(&self, other: &Deferred<U>, combiner: F) -> Deferred<R>
    where
        U: Clone + Send + 'static,
        R: Clone + Send + 'static,
        F: FnOnce(T, U) -> R + Send + 'static,
    {
        let completion = Completion::new();
        let join = Join::new(Arc::clone(&completion), combiner);

        let left = Arc::clone(&join);
        self.completion
            .on_complete(Box::new(move |outcome| left.deliver_left(outcome)));
        other
            .completion
            .on_complete(Box::new(move |outcome| join.deliver_right(outcome)));

        let mut roots = self.roots.clone();
        roots.extend(other.roots.iter().cloned());
        Deferred::from_completion(completion, roots)
    }

    // ========================================================================
    // Blocking retrieval
    // ========================================================================

    /// Launch, then block until terminal and return the outcome.
    pub fn block(self) -> Result<T, TaskError> {
        self.start();
        self.completion.wait()
    }

    /// Launch, then block until terminal.
    ///
    /// Returns `None` if the value failed; the error itself is discarded. Use
    /// [`Deferred::block`] to keep it.
    pub fn block_and_get(self) -> Option<T> {
        match self.block() {
            Ok(value) => Some(value),
            Err(error) => {
                tracing::debug!(%error, "block_and_get discarding failure");
                None
            }
        }
    }

    /// Convert into a `std::future::Future`.
    ///
    /// Launches on first poll. Unbound work runs inline inside that poll.
    #[cfg(feature = "async")]
    pub async fn into_async(self) -> Result<T, TaskError> {
        let (sender, receiver) = tokio::sync::oneshot::channel();
        self.subscribe(move |outcome| {
            let _ = sender.send(outcome);
        });
        receiver.await.unwrap_or(Err(TaskError::Abandoned))
    }
}

// ============================================================================
// Promise
// ============================================================================

/// Write side of a manually completed [`Deferred`].
///
/// Dropping an uncompleted promise fails its deferred with
/// [`TaskError::Abandoned`].
pub struct Promise<T: Clone + Send + 'static> {
    completion: Option<Arc<Completion<T>>>,
}

impl<T: Clone + Send + 'static> Deferred<T> {
    /// A deferred value completed by hand through the returned [`Promise`].
    pub fn promise() -> (Promise<T>, Deferred<T>) {
        let completion = Completion::new();
        let promise = Promise {
            completion: Some(Arc::clone(&completion)),
        };
        (promise, Deferred::from_completion(completion, SmallVec::new()))
    }
}

impl<T: Clone + Send + 'static> Promise<T> {
    pub fn fulfill(mut self, value: T) {
        if let Some(completion) = self.completion.take() {
            completion.complete(Ok(value));
        }
    }

    pub fn fail(mut self, error: TaskError) {
        if let Some(completion) = self.completion.take() {
            completion.complete(Err(error));
        }
    }
}

impl<T: Clone + Send + 'static> Drop for Promise<T> {
    fn drop(&mut self) {
        if let Some(completion) = self.completion.take() {
            completion.complete(Err(TaskError::Abandoned));
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::ImmediateExecutor;
    use crate::numeric::{Fraction, FractionError};
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn frac(s: &str) -> Fraction {
        s.parse().unwrap()
    }

    #[test]
    fn test_lazy_until_started() {
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&runs);
        let deferred = Deferred::from_fn(move || counter.fetch_add(1, Ordering::SeqCst));

        assert_eq!(deferred.state(), DeferredState::Pending);
        assert_eq!(runs.load(Ordering::SeqCst), 0);

        deferred.start();
        deferred.start();
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert_eq!(deferred.state(), DeferredState::Fulfilled);
    }

    #[test]
    fn test_map_chain_shares_roots() {
        let reduced = Deferred::from_work(|| "10/4".parse::<Fraction>())
            .map(|f| f.reduce())
            .map(|f| f.to_mixed_string());
        assert_eq!(reduced.state(), DeferredState::Pending);
        assert_eq!(reduced.block_and_get().as_deref(), Some("2 1/2"));
    }

    #[test]
    fn test_work_error_fails() {
        let deferred = Deferred::from_work(|| "1/0".parse::<Fraction>());
        let error = deferred.clone().block().unwrap_err();
        assert_eq!(
            error.downcast_ref::<FractionError>(),
            Some(&FractionError::ZeroDenominator)
        );
        assert_eq!(deferred.state(), DeferredState::Failed);
        assert!(deferred.block_and_get().is_none());
    }

    #[test]
    fn test_map_panic_fails_result() {
        let deferred = Deferred::fulfilled(1u32).map(|_| -> u32 { panic!("bad map") });
        match deferred.block() {
            Err(TaskError::Panicked(message)) => assert_eq!(message, "bad map"),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_try_map() {
        let ok = Deferred::fulfilled(frac("1/2")).try_map(|f| f.divide(&frac("1/4")));
        assert_eq!(ok.block().unwrap(), frac("4/2"));

        let err = Deferred::fulfilled(frac("1/2")).try_map(|f| f.divide(&frac("0/4")));
        assert!(err.block_and_get().is_none());
    }

    #[test]
    fn test_on_success_passes_value_through() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let value = Deferred::fulfilled(frac("3/4"))
            .on_success(move |f| sink.lock().push(f.to_string()))
            .block()
            .unwrap();
        assert_eq!(value, frac("3/4"));
        assert_eq!(*seen.lock(), vec!["3/4".to_string()]);
    }

    #[test]
    fn test_on_success_skipped_on_failure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let deferred = Deferred::<u32>::failed(TaskError::Abandoned)
            .on_success(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        assert!(deferred.block_and_get().is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_on_success_panic_becomes_failure() {
        let deferred = Deferred::fulfilled(5u32).on_success(|_| panic!("observer"));
        assert!(matches!(deferred.block(), Err(TaskError::Panicked(_))));
    }

    #[test]
    fn test_on_error_observes_failure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let deferred = Deferred::<u32>::failed(TaskError::Abandoned).on_error(move |error| {
            assert!(matches!(error, TaskError::Abandoned));
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert!(matches!(deferred.block(), Err(TaskError::Abandoned)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let untouched = Deferred::fulfilled(1u32).on_error(|_| panic!("not called"));
        assert_eq!(untouched.block().unwrap(), 1);
    }

    #[test]
    fn test_then_discards_value() {
        assert_eq!(Deferred::fulfilled(frac("1/2")).then().block_and_get(), Some(()));
        assert_eq!(
            Deferred::<u8>::failed(TaskError::Abandoned).then().block_and_get(),
            None
        );
    }

    #[test]
    fn test_zip_adds_fractions() {
        let a = Deferred::from_fn(|| frac("1/2"));
        let b = Deferred::from_fn(|| frac("1/3"));
        let sum = a.zip(&b, |x, y| x.add(&y));
        assert_eq!(sum.state(), DeferredState::Pending);
        assert_eq!(sum.block().unwrap(), frac("5/6"));
        assert!(a.is_terminal() && b.is_terminal());
    }

    #[test]
    fn test_zip_waits_for_both_sides() {
        let (promise, pending) = Deferred::<Fraction>::promise();
        let ready = Deferred::fulfilled(frac("1/2"));
        let sum = ready.zip(&pending, |x, y| x.add(&y));

        sum.start();
        assert_eq!(sum.state(), DeferredState::Scheduled);
        assert!(!sum.is_terminal());

        promise.fulfill(frac("1/3"));
        assert_eq!(sum.state(), DeferredState::Fulfilled);
        assert_eq!(sum.block().unwrap(), frac("5/6"));
    }

    #[test]
    fn test_zip_failure_waits_then_fails() {
        let (promise, pending) = Deferred::<u32>::promise();
        let failed = Deferred::<u32>::failed(TaskError::Abandoned);
        let zipped = failed.zip(&pending, |a, b| a + b);
        assert!(!zipped.is_terminal());

        promise.fulfill(2);
        assert!(matches!(zipped.block(), Err(TaskError::Abandoned)));
    }

    #[test]
    fn test_zip_reports_left_error_when_both_fail() {
        let left = Deferred::<u32>::failed(TaskError::Panicked("left".into()));
        let right = Deferred::<u32>::failed(TaskError::Panicked("right".into()));
        match left.zip(&right, |a, b| a + b).block() {
            Err(TaskError::Panicked(message)) => assert_eq!(message, "left"),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_dropped_promise_abandons() {
        let (promise, deferred) = Deferred::<u32>::promise();
        drop(promise);
        assert!(matches!(deferred.block(), Err(TaskError::Abandoned)));
    }

    #[test]
    fn test_schedule_on_after_launch_keeps_running() {
        let deferred = Deferred::from_fn(|| 3u32);
        deferred.start();
        let rebound = deferred.schedule_on(Arc::new(ImmediateExecutor));
        assert_eq!(rebound.block().unwrap(), 3);
    }

    #[test]
    fn test_subscribe_delivers_outcome() {
        let seen = Arc::new(Mutex::new(None));
        let slot = Arc::clone(&seen);
        Deferred::from_fn(|| frac("2/3"))
            .schedule_on(Arc::new(ImmediateExecutor))
            .subscribe(move |outcome| *slot.lock() = Some(outcome.unwrap()));
        assert_eq!(seen.lock().clone(), Some(frac("2/3")));
    }

    #[test]
    fn test_multiple_continuations_on_one_value() {
        let base = Deferred::from_fn(|| frac("6/8"));
        let reduced = base.map(|f| f.reduce());
        let doubled = base.map(|f| f.multiply(&Fraction::from_integer(2)));
        assert_eq!(reduced.block().unwrap(), frac("3/4"));
        assert_eq!(doubled.block().unwrap(), frac("12/8"));
    }
}
