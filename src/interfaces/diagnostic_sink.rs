// ============================================================================
// Diagnostic Sink Interface
// Defines where diagnostic lines produced by pipelines end up
// ============================================================================

use parking_lot::Mutex;

/// Receives diagnostic lines tagged with the emitting thread's name.
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, thread: &str, message: &str);
}

/// Drops everything
pub struct NoOpSink;

impl DiagnosticSink for NoOpSink {
    fn emit(&self, _thread: &str, _message: &str) {}
}

/// Forwards lines to `tracing` at info level.
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, thread: &str, message: &str) {
        tracing::info!(target: "deferred_fractions::diagnostics", "[{}] {}", thread, message);
    }
}

/// Writes `[thread] message` to stdout.
pub struct ConsoleSink;

impl DiagnosticSink for ConsoleSink {
    fn emit(&self, thread: &str, message: &str) {
        println!("[{}] {}", thread, message);
    }
}

/// Keeps lines in memory, formatted as `[thread] message`.
#[derive(Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.lock().iter().any(|line| line.contains(needle))
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&self, thread: &str, message: &str) {
        self.lines.lock().push(format!("[{}] {}", thread, message));
    }
}
