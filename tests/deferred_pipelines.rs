// ============================================================================
// Deferred Pipeline Integration Tests
// Scheduler contexts, zip barriers, and failure capture across threads
// ============================================================================

use crossbeam::channel;
use deferred_fractions::prelude::*;
use parking_lot::Mutex;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

fn frac(s: &str) -> Fraction {
    s.parse().unwrap()
}

fn current_thread_name() -> String {
    thread::current().name().unwrap_or("unnamed").to_string()
}

#[test]
fn test_zip_pending_while_one_side_is_delayed() {
    let pool: Arc<dyn Executor> = Arc::new(
        SchedulerConfig::new()
            .with_parallel_name("zip-delay")
            .with_parallelism(2)
            .build_parallel()
            .unwrap(),
    );
    let (release, gate) = channel::bounded::<()>(1);

    let a = Deferred::from_fn(|| frac("1/2")).schedule_on(Arc::clone(&pool));
    let b = Deferred::from_fn(move || {
        gate.recv().unwrap();
        frac("1/3")
    })
    .schedule_on(Arc::clone(&pool));

    let sum = a.zip(&b, |x, y| x.add(&y));
    sum.start();

    // A finishes while B is parked on the gate.
    assert_eq!(a.clone().block().unwrap(), frac("1/2"));
    thread::sleep(Duration::from_millis(50));
    assert!(!b.is_terminal());
    assert!(!sum.is_terminal());
    assert_eq!(sum.state(), DeferredState::Scheduled);

    release.send(()).unwrap();
    let sum = sum.block().unwrap();
    assert_eq!(sum.numerator().to_string(), "5");
    assert_eq!(sum.denominator().to_string(), "6");
}

#[test]
fn test_failing_work_returns_none_promptly() {
    let started = Instant::now();
    let deferred = Schedulers::submit(&Schedulers::parallel(), || "three/4".parse::<Fraction>());
    assert!(deferred.block_and_get().is_none());
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[test]
fn test_failure_detail_is_available_through_block() {
    let deferred = Schedulers::submit(&Schedulers::single(), || "1/0".parse::<Fraction>());
    let error = deferred.block().unwrap_err();
    assert_eq!(
        error.downcast_ref::<FractionError>(),
        Some(&FractionError::ZeroDenominator)
    );
}

#[test]
fn test_panicking_work_is_captured() {
    let deferred: Deferred<Fraction> =
        Deferred::from_fn(|| panic!("worker exploded")).schedule_on(Schedulers::parallel());
    let observed = deferred.map(|f| f.reduce());

    assert!(observed.clone().block_and_get().is_none());
    assert!(observed.block().unwrap_err().is_panic());
}

#[test]
fn test_single_context_preserves_submission_order() {
    let single: Arc<dyn Executor> = Arc::new(
        SchedulerConfig::new()
            .with_single_name("ordered-stage")
            .build_single()
            .unwrap(),
    );
    let order = Arc::new(Mutex::new(Vec::new()));

    let pending: Vec<Deferred<()>> = (0..64)
        .map(|i| {
            let order = Arc::clone(&order);
            let deferred = Deferred::from_fn(move || {
                order.lock().push((i, current_thread_name()));
            })
            .schedule_on(Arc::clone(&single));
            deferred.start();
            deferred
        })
        .collect();

    for deferred in pending {
        assert_eq!(deferred.block_and_get(), Some(()));
    }

    let order = order.lock();
    let indices: Vec<usize> = order.iter().map(|(i, _)| *i).collect();
    assert_eq!(indices, (0..64).collect::<Vec<_>>());
    assert!(order.iter().all(|(_, name)| name == "ordered-stage-1"));
}

#[test]
fn test_map_runs_on_delivering_thread() {
    let name = Deferred::from_fn(|| frac("6/8"))
        .schedule_on(Schedulers::single())
        .map(|f| (f.reduce(), current_thread_name()))
        .block()
        .unwrap();
    assert_eq!(name.0, frac("3/4"));
    assert_eq!(name.1, "single-1");
}

#[test]
fn test_schedule_on_rebinds_before_launch() {
    let deferred = Deferred::from_fn(current_thread_name)
        .schedule_on(Schedulers::parallel())
        .schedule_on(Schedulers::single());
    assert_eq!(deferred.state(), DeferredState::Pending);
    assert_eq!(deferred.block().unwrap(), "single-1");
}

#[test]
fn test_unbound_work_runs_on_caller() {
    let caller = current_thread_name();
    let ran_on = Deferred::from_fn(current_thread_name).block().unwrap();
    assert_eq!(ran_on, caller);
}

#[test]
fn test_many_zips_do_not_mix_values() {
    let pairs: Vec<(i64, Deferred<(i64, i64)>)> = (1..=32)
        .map(|i| {
            let left = Deferred::from_fn(move || i).schedule_on(Schedulers::parallel());
            let right = Deferred::from_fn(move || i * 100).schedule_on(Schedulers::parallel());
            (i, left.zip(&right, |a, b| (a, b)))
        })
        .collect();

    for (i, zipped) in pairs {
        assert_eq!(zipped.block().unwrap(), (i, i * 100));
    }
}

#[test]
fn test_then_synchronizes_pipeline_completion() {
    let sink = Arc::new(MemorySink::new());
    let diagnostics = Diagnostics::with_sink(Options::new(), sink.clone());

    let done = Deferred::from_work(|| "7/2".parse::<Fraction>())
        .schedule_on(Schedulers::single())
        .map(|f| f.to_mixed_string())
        .on_success(move |mixed| diagnostics.print(mixed))
        .then();

    assert_eq!(done.block_and_get(), Some(()));
    assert_eq!(sink.lines(), vec!["[single-1] 3 1/2".to_string()]);
}

#[test]
fn test_subscribe_callback_on_worker() {
    let (sender, receiver) = channel::bounded(1);
    Schedulers::submit(&Schedulers::parallel(), || "2/4".parse::<Fraction>()).subscribe(
        move |outcome| {
            sender
                .send((outcome.map(|f| f.reduce()), current_thread_name()))
                .unwrap();
        },
    );

    let (outcome, _thread) = receiver.recv_timeout(Duration::from_secs(10)).unwrap();
    assert_eq!(outcome.unwrap(), frac("1/2"));
}

#[cfg(feature = "async")]
#[tokio::test]
async fn test_into_async() {
    let half = Deferred::from_fn(|| frac("1/2")).schedule_on(Schedulers::parallel());
    let third = Deferred::from_fn(|| frac("1/3")).schedule_on(Schedulers::parallel());
    let sum = half.zip(&third, |a, b| a.add(&b)).into_async().await.unwrap();
    assert_eq!(sum, frac("5/6"));

    let failed = Deferred::from_work(|| "1/0".parse::<Fraction>()).into_async().await;
    assert!(failed.is_err());
}
