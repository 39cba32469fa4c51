//! Failure reporting.

use crate::{EvaluationError, FlagOperation};

/// One failed flag check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub operation: FlagOperation,
    pub feature_key: String,
    pub error: EvaluationError,
}

impl Diagnostic {
    pub fn new(
        operation: FlagOperation,
        feature_key: impl Into<String>,
        error: EvaluationError,
    ) -> Self {
        Self {
            operation,
            feature_key: feature_key.into(),
            error,
        }
    }
}

/// Receives a report for every failed check.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: &Diagnostic);
}

/// Default sink: one `tracing` error event per failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: &Diagnostic) {
        tracing::error!(
            operation = %diagnostic.operation,
            feature_key = %diagnostic.feature_key,
            error = %diagnostic.error,
            "Feature flag check failed"
        );
    }
}

/// Sink that drops every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSink;

impl DiagnosticSink for SilentSink {
    fn report(&self, _diagnostic: &Diagnostic) {}
}

impl<F> DiagnosticSink for F
where
    F: Fn(&Diagnostic) + Send + Sync,
{
    fn report(&self, diagnostic: &Diagnostic) {
        self(diagnostic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_closure_sink() {
        let seen = Mutex::new(Vec::new());
        let sink = |d: &Diagnostic| seen.lock().unwrap().push(d.feature_key.clone());

        sink.report(&Diagnostic::new(
            FlagOperation::IsOn,
            "new-checkout",
            EvaluationError::other("offline"),
        ));

        assert_eq!(*seen.lock().unwrap(), vec!["new-checkout".to_string()]);
    }

    #[test]
    fn test_tracing_sink_does_not_panic_without_subscriber() {
        TracingSink.report(&Diagnostic::new(
            FlagOperation::IsOnForValue,
            "beta-tier",
            EvaluationError::Unauthorized("no access".to_string()),
        ));
        SilentSink.report(&Diagnostic::new(
            FlagOperation::IsOnForDate,
            "promo",
            EvaluationError::other("x"),
        ));
    }
}
