//! Remote evaluation capability.
//!
//! [`FlagEvaluator`] is the seam between [`FlagClient`](crate::FlagClient) and
//! whatever actually answers flag checks: an HTTP endpoint, a host bridge, or a
//! scripted stub in tests. Each method is one request/response round trip and
//! yields `Ok(None)` when the service gives no definite answer.

use crate::{CheckDate, ComparisonValue, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// The three remote checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlagOperation {
    #[serde(rename = "isOn")]
    IsOn,
    #[serde(rename = "isOnForDate")]
    IsOnForDate,
    #[serde(rename = "isOnForValue")]
    IsOnForValue,
}

impl FlagOperation {
    /// Remote method name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IsOn => "isOn",
            Self::IsOnForDate => "isOnForDate",
            Self::IsOnForValue => "isOnForValue",
        }
    }
}

impl fmt::Display for FlagOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request for a plain check by key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyCheck {
    pub feature_key: String,
}

impl KeyCheck {
    pub fn new(feature_key: impl Into<String>) -> Self {
        Self {
            feature_key: feature_key.into(),
        }
    }
}

/// Request for a check by key and date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateCheck {
    pub feature_key: String,
    pub date_to_check: CheckDate,
}

impl DateCheck {
    pub fn new(feature_key: impl Into<String>, date_to_check: CheckDate) -> Self {
        Self {
            feature_key: feature_key.into(),
            date_to_check,
        }
    }
}

/// Request for a check by key and comparison value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueCheck {
    pub feature_key: String,
    pub value_to_check: ComparisonValue,
}

impl ValueCheck {
    pub fn new(feature_key: impl Into<String>, value_to_check: ComparisonValue) -> Self {
        Self {
            feature_key: feature_key.into(),
            value_to_check,
        }
    }
}

/// Capability to evaluate flags remotely.
#[async_trait]
pub trait FlagEvaluator: Send + Sync {
    /// Evaluate a flag by key.
    async fn is_on(&self, request: &KeyCheck) -> Result<Option<bool>>;

    /// Evaluate a flag by key against a date.
    async fn is_on_for_date(&self, request: &DateCheck) -> Result<Option<bool>>;

    /// Evaluate a flag by key against a comparison value.
    async fn is_on_for_value(&self, request: &ValueCheck) -> Result<Option<bool>>;
}

#[async_trait]
impl<T: FlagEvaluator + ?Sized> FlagEvaluator for Arc<T> {
    async fn is_on(&self, request: &KeyCheck) -> Result<Option<bool>> {
        (**self).is_on(request).await
    }

    async fn is_on_for_date(&self, request: &DateCheck) -> Result<Option<bool>> {
        (**self).is_on_for_date(request).await
    }

    async fn is_on_for_value(&self, request: &ValueCheck) -> Result<Option<bool>> {
        (**self).is_on_for_value(request).await
    }
}

#[async_trait]
impl<T: FlagEvaluator + ?Sized> FlagEvaluator for Box<T> {
    async fn is_on(&self, request: &KeyCheck) -> Result<Option<bool>> {
        (**self).is_on(request).await
    }

    async fn is_on_for_date(&self, request: &DateCheck) -> Result<Option<bool>> {
        (**self).is_on_for_date(request).await
    }

    async fn is_on_for_value(&self, request: &ValueCheck) -> Result<Option<bool>> {
        (**self).is_on_for_value(request).await
    }
}
