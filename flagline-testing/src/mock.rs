// Mock evaluator for testing

use flagline_client::{
    async_trait, DateCheck, EvaluationError, FlagEvaluator, FlagOperation, KeyCheck, Result,
    ValueCheck,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// A request received by [`MockEvaluator`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    IsOn(KeyCheck),
    IsOnForDate(DateCheck),
    IsOnForValue(ValueCheck),
}

impl RecordedCall {
    pub fn operation(&self) -> FlagOperation {
        match self {
            Self::IsOn(_) => FlagOperation::IsOn,
            Self::IsOnForDate(_) => FlagOperation::IsOnForDate,
            Self::IsOnForValue(_) => FlagOperation::IsOnForValue,
        }
    }

    pub fn feature_key(&self) -> &str {
        match self {
            Self::IsOn(r) => &r.feature_key,
            Self::IsOnForDate(r) => &r.feature_key,
            Self::IsOnForValue(r) => &r.feature_key,
        }
    }
}

type Answer = Result<Option<bool>>;

/// Scripted evaluator that records every request.
///
/// Answers are looked up by flag key, falling back to a default answer
/// (absent, unless changed).
#[derive(Clone)]
pub struct MockEvaluator {
    answers: Arc<Mutex<HashMap<String, Answer>>>,
    default_answer: Arc<Mutex<Answer>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    latency: Option<Duration>,
}

impl MockEvaluator {
    pub fn new() -> Self {
        Self {
            answers: Arc::new(Mutex::new(HashMap::new())),
            default_answer: Arc::new(Mutex::new(Ok(None))),
            calls: Arc::new(Mutex::new(Vec::new())),
            latency: None,
        }
    }

    /// Answer every key with `answer` unless scripted otherwise.
    pub fn answering(answer: Option<bool>) -> Self {
        Self::new().with_default(Ok(answer))
    }

    /// Fail every key with `error` unless scripted otherwise.
    pub fn failing(error: EvaluationError) -> Self {
        Self::new().with_default(Err(error))
    }

    pub fn with_default(self, answer: Answer) -> Self {
        *self.default_answer.lock() = answer;
        self
    }

    /// Script the answer for one key.
    pub fn with_flag(self, key: impl Into<String>, answer: Option<bool>) -> Self {
        self.answers.lock().insert(key.into(), Ok(answer));
        self
    }

    /// Script a failure for one key.
    pub fn with_failure(self, key: impl Into<String>, error: EvaluationError) -> Self {
        self.answers.lock().insert(key.into(), Err(error));
        self
    }

    /// Delay every answer.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    pub fn last_call(&self) -> Option<RecordedCall> {
        self.calls.lock().last().cloned()
    }

    pub fn was_called(&self, operation: FlagOperation) -> bool {
        self.calls.lock().iter().any(|c| c.operation() == operation)
    }

    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    async fn answer(&self, call: RecordedCall) -> Answer {
        let answer = self
            .answers
            .lock()
            .get(call.feature_key())
            .cloned()
            .unwrap_or_else(|| self.default_answer.lock().clone());
        self.calls.lock().push(call);

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        answer
    }
}

impl Default for MockEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FlagEvaluator for MockEvaluator {
    async fn is_on(&self, request: &KeyCheck) -> Result<Option<bool>> {
        self.answer(RecordedCall::IsOn(request.clone())).await
    }

    async fn is_on_for_date(&self, request: &DateCheck) -> Result<Option<bool>> {
        self.answer(RecordedCall::IsOnForDate(request.clone())).await
    }

    async fn is_on_for_value(&self, request: &ValueCheck) -> Result<Option<bool>> {
        self.answer(RecordedCall::IsOnForValue(request.clone())).await
    }
}
