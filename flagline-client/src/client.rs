//! Flag client.

use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::{
    AbsentPolicy, CheckDate, ComparisonValue, DateCheck, DateInput, Diagnostic, DiagnosticSink,
    FlagCheck, FlagClientConfig, FlagEvaluator, FlagOperation, KeyCheck, Result, SilentSink,
    TracingSink, ValueCheck,
};

/// Uniform, non-failing front end over a [`FlagEvaluator`].
///
/// Every check is a single round trip with no retry, no cache and no local
/// timeout. Errors are reported to the diagnostic sink and surface as
/// [`FlagCheck::Failed`]; they are never returned as `Err`.
#[derive(Clone)]
pub struct FlagClient {
    evaluator: Arc<dyn FlagEvaluator>,
    sink: Arc<dyn DiagnosticSink>,
    policy: AbsentPolicy,
}

impl FlagClient {
    /// Create a client with the default policy and the tracing sink.
    pub fn new(evaluator: impl FlagEvaluator + 'static) -> Self {
        Self::builder(evaluator).build()
    }

    /// Create a client from configuration.
    pub fn with_config(evaluator: impl FlagEvaluator + 'static, config: &FlagClientConfig) -> Self {
        Self::builder(evaluator).config(config).build()
    }

    pub fn builder(evaluator: impl FlagEvaluator + 'static) -> FlagClientBuilder {
        FlagClientBuilder::new(Arc::new(evaluator))
    }

    /// Build from an evaluator that is already shared.
    pub fn from_shared(evaluator: Arc<dyn FlagEvaluator>) -> FlagClientBuilder {
        FlagClientBuilder::new(evaluator)
    }

    pub fn policy(&self) -> AbsentPolicy {
        self.policy
    }

    /// Check whether a feature is on.
    pub async fn is_feature_on(&self, key: impl Into<String>) -> FlagCheck {
        let request = KeyCheck::new(key);
        debug!(operation = "isOn", feature_key = %request.feature_key, "Checking feature flag");

        let answer = self.evaluator.is_on(&request).await;
        self.settle(FlagOperation::IsOn, &request.feature_key, answer)
    }

    /// Check whether a feature is on at a given date.
    ///
    /// The date is canonicalized first; input that names no real instant is
    /// sent as [`CheckDate::Invalid`].
    pub async fn is_feature_on_for_date(
        &self,
        key: impl Into<String>,
        date: impl Into<DateInput>,
    ) -> FlagCheck {
        let request = DateCheck::new(key, CheckDate::from_input(date));
        debug!(
            operation = "isOnForDate",
            feature_key = %request.feature_key,
            date = %request.date_to_check,
            "Checking feature flag"
        );

        let answer = self.evaluator.is_on_for_date(&request).await;
        self.settle(FlagOperation::IsOnForDate, &request.feature_key, answer)
    }

    /// Check whether a feature is on for a comparison value.
    pub async fn is_feature_on_for_value(
        &self,
        key: impl Into<String>,
        value: impl Into<ComparisonValue>,
    ) -> FlagCheck {
        let request = ValueCheck::new(key, value.into());
        debug!(
            operation = "isOnForValue",
            feature_key = %request.feature_key,
            value = %request.value_to_check,
            "Checking feature flag"
        );

        let answer = self.evaluator.is_on_for_value(&request).await;
        self.settle(FlagOperation::IsOnForValue, &request.feature_key, answer)
    }

    fn settle(
        &self,
        operation: FlagOperation,
        key: &str,
        answer: Result<Option<bool>>,
    ) -> FlagCheck {
        settle(self.policy, self.sink.as_ref(), operation, key, answer)
    }
}

/// Turn an evaluator answer into a [`FlagCheck`], reporting a failure once.
pub(crate) fn settle(
    policy: AbsentPolicy,
    sink: &dyn DiagnosticSink,
    operation: FlagOperation,
    key: &str,
    answer: Result<Option<bool>>,
) -> FlagCheck {
    match answer {
        Ok(Some(on)) => FlagCheck::Evaluated(on),
        Ok(None) => {
            debug!(
                %operation,
                feature_key = key,
                policy = policy.as_str(),
                "No answer from evaluator, applying absent policy"
            );
            FlagCheck::from_answer(None, policy)
        }
        Err(error) => {
            sink.report(&Diagnostic::new(operation, key, error.clone()));
            FlagCheck::Failed(error)
        }
    }
}

impl fmt::Debug for FlagClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlagClient")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

/// Builder for [`FlagClient`].
pub struct FlagClientBuilder {
    evaluator: Arc<dyn FlagEvaluator>,
    sink: Arc<dyn DiagnosticSink>,
    policy: AbsentPolicy,
}

impl FlagClientBuilder {
    fn new(evaluator: Arc<dyn FlagEvaluator>) -> Self {
        Self {
            evaluator,
            sink: Arc::new(TracingSink),
            policy: AbsentPolicy::default(),
        }
    }

    /// Set the policy for absent answers.
    pub fn absent_policy(mut self, policy: AbsentPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the diagnostic sink.
    pub fn sink(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    /// Set a diagnostic sink that is shared elsewhere.
    pub fn shared_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Apply configuration. Disabling failure reports replaces the sink.
    pub fn config(mut self, config: &FlagClientConfig) -> Self {
        self.policy = config.absent_policy;
        if !config.report_failures {
            self.sink = Arc::new(SilentSink);
        }
        self
    }

    pub fn build(self) -> FlagClient {
        FlagClient {
            evaluator: self.evaluator,
            sink: self.sink,
            policy: self.policy,
        }
    }
}
