// ============================================================================
// Scheduler Configuration
// Names and sizing of the execution contexts
// ============================================================================

use crate::scheduler::{SchedulerError, SingleThreadExecutor, ThreadPoolExecutor};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for building executors.
///
/// `Schedulers::single()` and `Schedulers::parallel()` use the default
/// configuration; build your own executors from a custom one when tests or
/// embedders need isolated contexts.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SchedulerConfig {
    /// Thread-name prefix of the single worker
    pub single_name: String,

    /// Thread-name prefix of the pool workers
    pub parallel_name: String,

    /// Pool size. None means one worker per available hardware thread
    pub parallelism: Option<usize>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            single_name: "single".to_string(),
            parallel_name: "parallel".to_string(),
            parallelism: None,
        }
    }
}

impl SchedulerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: Set pool size
    pub fn with_parallelism(mut self, threads: usize) -> Self {
        self.parallelism = Some(threads);
        self
    }

    /// Builder method: Set single worker name prefix
    pub fn with_single_name(mut self, name: impl Into<String>) -> Self {
        self.single_name = name.into();
        self
    }

    /// Builder method: Set pool worker name prefix
    pub fn with_parallel_name(mut self, name: impl Into<String>) -> Self {
        self.parallel_name = name.into();
        self
    }

    /// Pool size after applying the hardware default.
    pub fn effective_parallelism(&self) -> usize {
        self.parallelism.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(1)
        })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.single_name.is_empty() {
            return Err("Single executor name cannot be empty".to_string());
        }

        if self.parallel_name.is_empty() {
            return Err("Parallel executor name cannot be empty".to_string());
        }

        if self.parallelism == Some(0) {
            return Err("Parallelism must be at least 1".to_string());
        }

        Ok(())
    }

    pub fn build_single(&self) -> Result<SingleThreadExecutor, SchedulerError> {
        self.validate().map_err(SchedulerError::InvalidConfig)?;
        SingleThreadExecutor::new(self.single_name.clone())
    }

    pub fn build_parallel(&self) -> Result<ThreadPoolExecutor, SchedulerError> {
        self.validate().map_err(SchedulerError::InvalidConfig)?;
        ThreadPoolExecutor::new(self.parallel_name.clone(), self.effective_parallelism())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SchedulerConfig::default();
        assert_eq!(config.single_name, "single");
        assert_eq!(config.parallel_name, "parallel");
        assert!(config.effective_parallelism() >= 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = SchedulerConfig::new()
            .with_parallelism(3)
            .with_single_name("stage")
            .with_parallel_name("crunch");
        assert_eq!(config.effective_parallelism(), 3);

        let pool = config.build_parallel().unwrap();
        assert_eq!(pool.threads(), 3);
        pool.shutdown();
    }

    #[test]
    fn test_validation() {
        assert!(SchedulerConfig::new().with_parallelism(0).validate().is_err());
        assert!(SchedulerConfig::new().with_single_name("").validate().is_err());
        assert!(matches!(
            SchedulerConfig::new().with_parallel_name("").build_parallel(),
            Err(SchedulerError::InvalidConfig(_))
        ));
    }
}
