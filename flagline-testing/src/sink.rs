// Recording diagnostic sink for testing

use flagline_client::{Diagnostic, DiagnosticSink};
use parking_lot::Mutex;
use std::sync::Arc;

/// Sink that keeps every diagnostic it receives.
///
/// Clones share the same record, so one handle can go into a client while
/// the test keeps another.
#[derive(Clone, Default)]
pub struct RecordingSink {
    entries: Arc<Mutex<Vec<Diagnostic>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries.lock().clone()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl DiagnosticSink for RecordingSink {
    fn report(&self, diagnostic: &Diagnostic) {
        self.entries.lock().push(diagnostic.clone());
    }
}
