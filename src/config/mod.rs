// ============================================================================
// Config Module
// Run options, debug printing, and executor configuration
// ============================================================================

mod diagnostics;
mod options;
mod scheduler;

pub use diagnostics::Diagnostics;
pub use options::{Options, OptionsError};
pub use scheduler::SchedulerConfig;
