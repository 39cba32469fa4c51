//! Feature flag client for Flagline
//!
//! Thin, defensive calling convention over a remote feature-flag evaluation
//! service. Three checks are offered (by key, by key and date, by key and
//! comparison value); each is one round trip to a [`FlagEvaluator`].
//!
//! # Features
//!
//! - **Explicit outcomes** - [`FlagCheck`] separates explicit answers, policy
//!   defaults and failed checks
//! - **Named absent policy** - [`AbsentPolicy::FailOpen`] by default
//! - **No propagation** - failures go to a [`DiagnosticSink`] and never bubble up
//! - **Swappable transport** - anything implementing [`FlagEvaluator`]
//!
//! # Quick Start
//!
//! ```no_run
//! use flagline_client::*;
//!
//! # async fn run(evaluator: impl FlagEvaluator + 'static) {
//! let client = FlagClient::new(evaluator);
//!
//! if client.is_feature_on("new-checkout").await.is_enabled() {
//!     // Show new checkout
//! }
//!
//! // Unknown flags fail open
//! let check = client.is_feature_on("unknown-flag").await;
//! assert_eq!(check.value(), Some(true));
//! # }
//! ```
//!
//! # Scoped Checks
//!
//! ```no_run
//! use flagline_client::*;
//!
//! # async fn run(client: FlagClient) {
//! // Dates may be text, epoch milliseconds or chrono values
//! let promo = client.is_feature_on_for_date("promo", "2024-01-01").await;
//!
//! // Values are forwarded untouched
//! let tier = client.is_feature_on_for_value("beta-tier", 42).await;
//!
//! if tier.is_failed() {
//!     // Already reported to the diagnostic sink
//! }
//! # let _ = promo;
//! # }
//! ```

pub mod client;
pub mod config;
pub mod date;
pub mod diagnostics;
pub mod error;
pub mod evaluator;
pub mod outcome;
pub mod value;

pub use client::{FlagClient, FlagClientBuilder};
pub use config::FlagClientConfig;
pub use date::{CheckDate, DateInput};
pub use diagnostics::{Diagnostic, DiagnosticSink, SilentSink, TracingSink};
pub use error::{ConfigError, EvaluationError, Result};
pub use evaluator::{DateCheck, FlagEvaluator, FlagOperation, KeyCheck, ValueCheck};
pub use outcome::{AbsentPolicy, FlagCheck};
pub use value::ComparisonValue;

// Re-export for evaluator implementations
pub use async_trait::async_trait;

/// Check a feature by key with the default policy and the tracing sink.
pub async fn is_feature_on<E>(evaluator: &E, key: impl Into<String>) -> Option<bool>
where
    E: FlagEvaluator + ?Sized,
{
    let request = KeyCheck::new(key);
    let answer = evaluator.is_on(&request).await;
    settle_default(FlagOperation::IsOn, &request.feature_key, answer)
}

/// Check a feature by key and date with the default policy and the tracing sink.
pub async fn is_feature_on_for_date<E>(
    evaluator: &E,
    key: impl Into<String>,
    date: impl Into<DateInput>,
) -> Option<bool>
where
    E: FlagEvaluator + ?Sized,
{
    let request = DateCheck::new(key, CheckDate::from_input(date));
    let answer = evaluator.is_on_for_date(&request).await;
    settle_default(FlagOperation::IsOnForDate, &request.feature_key, answer)
}

/// Check a feature by key and value with the default policy and the tracing sink.
pub async fn is_feature_on_for_value<E>(
    evaluator: &E,
    key: impl Into<String>,
    value: impl Into<ComparisonValue>,
) -> Option<bool>
where
    E: FlagEvaluator + ?Sized,
{
    let request = ValueCheck::new(key, value.into());
    let answer = evaluator.is_on_for_value(&request).await;
    settle_default(FlagOperation::IsOnForValue, &request.feature_key, answer)
}

fn settle_default(
    operation: FlagOperation,
    key: &str,
    answer: Result<Option<bool>>,
) -> Option<bool> {
    client::settle(AbsentPolicy::default(), &TracingSink, operation, key, answer).value()
}

/// Prelude for common imports.
pub mod prelude {
    pub use crate::client::{FlagClient, FlagClientBuilder};
    pub use crate::config::FlagClientConfig;
    pub use crate::date::{CheckDate, DateInput};
    pub use crate::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
    pub use crate::error::EvaluationError;
    pub use crate::evaluator::{DateCheck, FlagEvaluator, KeyCheck, ValueCheck};
    pub use crate::outcome::{AbsentPolicy, FlagCheck};
    pub use crate::value::ComparisonValue;
}
