//! Check outcomes and the policy for absent answers.

use crate::EvaluationError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// What to do when the service answers without a definite result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbsentPolicy {
    /// Treat the feature as enabled.
    #[default]
    FailOpen,
    /// Treat the feature as disabled.
    FailClosed,
}

impl AbsentPolicy {
    /// Value used in place of an absent answer.
    pub fn resolve(&self) -> bool {
        match self {
            Self::FailOpen => true,
            Self::FailClosed => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FailOpen => "fail_open",
            Self::FailClosed => "fail_closed",
        }
    }
}

impl FromStr for AbsentPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "fail_open" | "open" | "enabled" | "on" => Ok(Self::FailOpen),
            "fail_closed" | "closed" | "disabled" | "off" => Ok(Self::FailClosed),
            other => Err(format!("unknown absent policy: {}", other)),
        }
    }
}

/// Result of one flag check.
///
/// Keeps "the flag is off", "the service had no answer" and "the check
/// failed" apart. [`value`](Self::value) collapses it to `Option<bool>`,
/// with `None` meaning the check failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagCheck {
    /// The service answered explicitly.
    Evaluated(bool),
    /// The service had no answer; the absent policy supplied this value.
    Defaulted(bool),
    /// The check failed and has been reported.
    Failed(EvaluationError),
}

impl FlagCheck {
    /// Apply `policy` to an evaluator answer.
    pub fn from_answer(answer: Option<bool>, policy: AbsentPolicy) -> Self {
        match answer {
            Some(on) => Self::Evaluated(on),
            None => Self::Defaulted(policy.resolve()),
        }
    }

    /// Flag state, or `None` if the check failed.
    pub fn value(&self) -> Option<bool> {
        match self {
            Self::Evaluated(on) | Self::Defaulted(on) => Some(*on),
            Self::Failed(_) => None,
        }
    }

    /// Truthiness of the check; a failed check counts as disabled.
    pub fn is_enabled(&self) -> bool {
        self.value().unwrap_or(false)
    }

    pub fn is_defaulted(&self) -> bool {
        matches!(self, Self::Defaulted(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn error(&self) -> Option<&EvaluationError> {
        match self {
            Self::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// Turn a failed check back into an error.
    pub fn into_result(self) -> crate::Result<bool> {
        match self {
            Self::Evaluated(on) | Self::Defaulted(on) => Ok(on),
            Self::Failed(e) => Err(e),
        }
    }
}

impl From<FlagCheck> for Option<bool> {
    fn from(check: FlagCheck) -> Self {
        check.value()
    }
}
