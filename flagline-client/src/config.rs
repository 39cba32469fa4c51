//! Client configuration.
//!
//! Loaded from TOML or from `FLAGLINE_*` environment variables; anything not
//! set keeps its default.

use crate::{AbsentPolicy, ConfigError};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Environment variable holding the absent policy.
pub const ENV_ABSENT_POLICY: &str = "FLAGLINE_ABSENT_POLICY";

/// Environment variable toggling failure reports.
pub const ENV_REPORT_FAILURES: &str = "FLAGLINE_REPORT_FAILURES";

/// Configuration for [`FlagClient`](crate::FlagClient).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlagClientConfig {
    /// Policy applied when the service has no answer.
    pub absent_policy: AbsentPolicy,
    /// Whether failed checks are sent to the diagnostic sink.
    pub report_failures: bool,
}

impl Default for FlagClientConfig {
    fn default() -> Self {
        Self {
            absent_policy: AbsentPolicy::FailOpen,
            report_failures: true,
        }
    }
}

impl FlagClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_absent_policy(mut self, policy: AbsentPolicy) -> Self {
        self.absent_policy = policy;
        self
    }

    pub fn with_report_failures(mut self, enabled: bool) -> Self {
        self.report_failures = enabled;
        self
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::ParseError(format!("TOML parse error: {}", e)))
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::LoadError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load a `.env` file (if present) and then read the environment.
    pub fn from_dotenv() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_ABSENT_POLICY) {
            config.absent_policy = raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_ABSENT_POLICY.to_string(),
                value: raw.clone(),
            })?;
        }

        if let Some(raw) = lookup(ENV_REPORT_FAILURES) {
            config.report_failures = parse_bool(&raw).ok_or_else(|| ConfigError::InvalidValue {
                key: ENV_REPORT_FAILURES.to_string(),
                value: raw.clone(),
            })?;
        }

        Ok(config)
    }
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = FlagClientConfig::default();
        assert_eq!(config.absent_policy, AbsentPolicy::FailOpen);
        assert!(config.report_failures);
    }

    #[test]
    fn test_from_toml() {
        let config = FlagClientConfig::from_toml_str(
            r#"
            absent_policy = "fail_closed"
            "#,
        )
        .unwrap();
        assert_eq!(config.absent_policy, AbsentPolicy::FailClosed);
        assert!(config.report_failures);

        assert!(FlagClientConfig::from_toml_str("absent_policy = 3").is_err());
    }

    #[test]
    fn test_from_vars() {
        let config = FlagClientConfig::from_vars(vars(&[
            (ENV_ABSENT_POLICY, "fail-closed"),
            (ENV_REPORT_FAILURES, "0"),
        ]))
        .unwrap();
        assert_eq!(config.absent_policy, AbsentPolicy::FailClosed);
        assert!(!config.report_failures);

        let config = FlagClientConfig::from_vars(vars(&[])).unwrap();
        assert_eq!(config, FlagClientConfig::default());
    }

    #[test]
    fn test_from_vars_rejects_garbage() {
        let err =
            FlagClientConfig::from_vars(vars(&[(ENV_ABSENT_POLICY, "maybe")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));

        let err =
            FlagClientConfig::from_vars(vars(&[(ENV_REPORT_FAILURES, "perhaps")])).unwrap_err();
        assert!(err.to_string().contains(ENV_REPORT_FAILURES));
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let path = std::env::temp_dir().join("flagline-missing-config.toml");
        let err = FlagClientConfig::from_file(&path).unwrap_err();

        match err {
            ConfigError::LoadError(message) => {
                assert!(message.contains("flagline-missing-config.toml"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }
}
