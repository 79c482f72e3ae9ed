// ============================================================================
// Interfaces Module
// Contains all trait definitions and contracts
// ============================================================================

mod diagnostic_sink;
mod executor;

pub use diagnostic_sink::{ConsoleSink, DiagnosticSink, MemorySink, NoOpSink, TracingSink};
pub use executor::{Executor, ImmediateExecutor, Job};
