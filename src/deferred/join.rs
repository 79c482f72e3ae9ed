// ============================================================================
// Join
// Barrier that combines the outcomes of two deferred values
// ============================================================================

use super::errors::TaskError;
use super::state::{Completion, Outcome};
use super::guard;
use parking_lot::Mutex;
use std::sync::Arc;

struct JoinSlots<A, B, F> {
    left: Option<Outcome<A>>,
    right: Option<Outcome<B>>,
    combiner: Option<F>,
}

/// Completes `target` after both sides have delivered their outcomes.
///
/// Each `zip` call owns its own join, so values from unrelated zips never
/// meet in one combiner.
pub(crate) struct Join<A, B, R, F> {
    slots: Mutex<JoinSlots<A, B, F>>,
    target: Arc<Completion<R>>,
}

impl<A, B, R, F> Join<A, B, R, F>
where
    A: Send + 'static,
    B: Send + 'static,
    R: Clone + Send + 'static,
    F: FnOnce(A, B) -> R + Send + 'static,
{
    pub(crate) fn new(target: Arc<Completion<R>>, combiner: F) -> Arc<Self> {
        Arc::new(Self {
            slots: Mutex::new(JoinSlots {
                left: None,
                right: None,
                combiner: Some(combiner),
            }),
            target,
        })
    }

    pub(crate) fn deliver_left(&self, outcome: Outcome<A>) {
        let ready = {
            let mut slots = self.slots.lock();
            slots.left = Some(outcome);
            Self::take_ready(&mut slots)
        };
        self.finish(ready);
    }

    pub(crate) fn deliver_right(&self, outcome: Outcome<B>) {
        let ready = {
            let mut slots = self.slots.lock();
            slots.right = Some(outcome);
            Self::take_ready(&mut slots)
        };
        self.finish(ready);
    }

    fn take_ready(slots: &mut JoinSlots<A, B, F>) -> Option<(Outcome<A>, Outcome<B>, F)> {
        if slots.left.is_none() || slots.right.is_none() {
            return None;
        }
        match (slots.left.take(), slots.right.take(), slots.combiner.take()) {
            (Some(left), Some(right), Some(combiner)) => Some((left, right, combiner)),
            _ => None,
        }
    }

    fn finish(&self, ready: Option<(Outcome<A>, Outcome<B>, F)>) {
        let Some((left, right, combiner)) = ready else {
            return;
        };

        // Left error wins when both sides failed.
        let outcome = match (left, right) {
            (Ok(a), Ok(b)) => guard(move || combiner(a, b)),
            (Err(error), _) | (_, Err(error)) => Err::<R, TaskError>(error),
        };
        self.target.complete(outcome);
    }
}
