// ============================================================================
// Pipeline Report
// Text gathered across pipeline stages and printed once
// ============================================================================

use crate::config::Diagnostics;
use parking_lot::Mutex;
use std::sync::Arc;

/// Text accumulated across the stages of one pipeline, printed in one go.
#[derive(Clone)]
pub(crate) struct Report {
    text: Arc<Mutex<String>>,
}

impl Report {
    pub(crate) fn new(driver: &str) -> Self {
        Self {
            text: Arc::new(Mutex::new(format!(">> Calling {}()\n", driver))),
        }
    }

    pub(crate) fn append(&self, line: impl AsRef<str>) {
        self.text.lock().push_str(line.as_ref());
    }

    pub(crate) fn display(&self, diagnostics: &Diagnostics) {
        let text = self.text.lock().clone();
        diagnostics.print(text);
    }
}
