// ============================================================================
// Launcher
// Root work of a deferred chain plus the execution context it is bound to
// ============================================================================

use crate::interfaces::{Executor, Job};
use parking_lot::Mutex;
use std::sync::Arc;

enum LaunchSlot {
    Idle {
        job: Job,
        executor: Option<Arc<dyn Executor>>,
    },
    Launched,
}

/// Launches a root unit of work at most once.
pub(crate) struct Launcher {
    slot: Mutex<LaunchSlot>,
}

impl Launcher {
    pub(crate) fn new(job: Job) -> Arc<Self> {
        Arc::new(Self {
            slot: Mutex::new(LaunchSlot::Idle {
                job,
                executor: None,
            }),
        })
    }

    /// Bind (or rebind) the execution context.
    ///
    /// Returns `false` when the work has already been launched.
    pub(crate) fn bind(&self, context: Arc<dyn Executor>) -> bool {
        match &mut *self.slot.lock() {
            LaunchSlot::Idle { executor, .. } => {
                *executor = Some(context);
                true
            }
            LaunchSlot::Launched => false,
        }
    }

    /// Dispatch the work onto the bound context, or run it inline when unbound.
    pub(crate) fn launch(&self) {
        let previous = std::mem::replace(&mut *self.slot.lock(), LaunchSlot::Launched);
        let LaunchSlot::Idle { job, executor } = previous else {
            return;
        };

        match executor {
            Some(executor) => {
                tracing::trace!(context = executor.name(), "dispatching deferred work");
                executor.execute(job);
            }
            None => {
                tracing::trace!("running unbound deferred work inline");
                job();
            }
        }
    }

    pub(crate) fn is_launched(&self) -> bool {
        matches!(&*self.slot.lock(), LaunchSlot::Launched)
    }
}
