// ============================================================================
// Scheduler Errors
// ============================================================================

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchedulerError {
    /// The OS refused to start a worker thread
    #[error("failed to spawn worker thread {name:?}: {source}")]
    Spawn {
        name: String,
        #[source]
        source: io::Error,
    },

    /// Configuration rejected by `SchedulerConfig::validate`
    #[error("invalid scheduler configuration: {0}")]
    InvalidConfig(String),
}
