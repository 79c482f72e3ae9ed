// ============================================================================
// Task Errors
// Failure states carried by deferred values
// ============================================================================

use std::any::Any;
use std::error::Error as StdError;
use std::sync::Arc;
use thiserror::Error;

/// Why a deferred value failed.
///
/// Cloneable so that every continuation attached to the same deferred value
/// receives its own copy.
#[derive(Debug, Clone, Error)]
pub enum TaskError {
    /// The unit of work (or a fallible continuation) returned an error
    #[error("unit of work failed: {0}")]
    Failed(Arc<dyn StdError + Send + Sync>),

    /// The unit of work or a continuation panicked
    #[error("unit of work panicked: {0}")]
    Panicked(String),

    /// A promise was dropped without being completed
    #[error("promise dropped before completion")]
    Abandoned,
}

impl TaskError {
    /// Wrap an error returned by a unit of work.
    pub fn failed<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        TaskError::Failed(Arc::new(error))
    }

    pub(crate) fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        TaskError::Panicked(panic_message(payload.as_ref()))
    }

    /// Borrow the underlying error if it is of type `E`.
    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        match self {
            TaskError::Failed(error) => error.downcast_ref::<E>(),
            _ => None,
        }
    }

    #[inline]
    pub fn is_panic(&self) -> bool {
        matches!(self, TaskError::Panicked(_))
    }
}

/// Best-effort text of a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
