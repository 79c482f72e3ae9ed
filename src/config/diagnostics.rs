// ============================================================================
// Diagnostics
// Debug printing gated by Options, with the emitting thread's name
// ============================================================================

use super::options::Options;
use crate::interfaces::{DiagnosticSink, TracingSink};
use std::sync::Arc;
use std::thread;

/// Debug-print facade handed to pipelines.
///
/// Cheap to clone; every clone shares the same options and sink.
#[derive(Clone)]
pub struct Diagnostics {
    options: Arc<Options>,
    sink: Arc<dyn DiagnosticSink>,
}

impl Diagnostics {
    /// Emit through `tracing`.
    pub fn new(options: Options) -> Self {
        Self::with_sink(options, Arc::new(TracingSink))
    }

    pub fn with_sink(options: Options, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            options: Arc::new(options),
            sink,
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Emit `message` when diagnostics are enabled.
    pub fn debug(&self, message: impl AsRef<str>) {
        if self.options.diagnostics_enabled() {
            self.print(message);
        }
    }

    /// Emit `message` when diagnostics are enabled and `tag` is active.
    pub fn debug_tagged(&self, tag: &str, message: impl AsRef<str>) {
        if self.options.diagnostics_enabled() && self.options.has_tag(tag) {
            self.print(message);
        }
    }

    /// Emit `message` unconditionally.
    pub fn print(&self, message: impl AsRef<str>) {
        let current = thread::current();
        self.sink
            .emit(current.name().unwrap_or("unnamed"), message.as_ref());
    }
}

impl std::fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Diagnostics")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
