//! HTTP evaluator configuration.

use crate::{HttpEvaluatorError, Result};
use std::env;
use std::time::Duration;

/// Environment variable holding the evaluation service base URL.
pub const ENV_BASE_URL: &str = "FLAGLINE_HTTP_BASE_URL";

/// Environment variable holding the request timeout in milliseconds.
pub const ENV_TIMEOUT_MS: &str = "FLAGLINE_HTTP_TIMEOUT_MS";

/// Environment variable holding a bearer token.
pub const ENV_TOKEN: &str = "FLAGLINE_HTTP_TOKEN";

/// Paths of the three check endpoints, relative to the base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointPaths {
    pub is_on: String,
    pub is_on_for_date: String,
    pub is_on_for_value: String,
}

impl Default for EndpointPaths {
    fn default() -> Self {
        Self {
            is_on: "isOn".to_string(),
            is_on_for_date: "isOnForDate".to_string(),
            is_on_for_value: "isOnForValue".to_string(),
        }
    }
}

/// HTTP evaluator configuration.
#[derive(Clone)]
pub struct HttpEvaluatorConfig {
    /// Base URL of the evaluation service.
    pub base_url: String,
    /// Endpoint paths.
    pub paths: EndpointPaths,
    /// Request timeout.
    pub timeout: Duration,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Default headers for all requests.
    pub default_headers: Vec<(String, String)>,
    /// Bearer token sent with every request.
    pub bearer_token: Option<String>,
    /// User agent string.
    pub user_agent: String,
}

impl Default for HttpEvaluatorConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/".to_string(),
            paths: EndpointPaths::default(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            default_headers: Vec::new(),
            bearer_token: None,
            user_agent: format!("flagline-http/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

// Keeps the token out of logs.
impl std::fmt::Debug for HttpEvaluatorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpEvaluatorConfig")
            .field("base_url", &self.base_url)
            .field("paths", &self.paths)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("default_headers", &self.default_headers)
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "<redacted>"))
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl HttpEvaluatorConfig {
    /// Create a new configuration builder.
    pub fn builder(base_url: impl Into<String>) -> HttpEvaluatorConfigBuilder {
        HttpEvaluatorConfigBuilder {
            config: HttpEvaluatorConfig {
                base_url: base_url.into(),
                ..Default::default()
            },
        }
    }

    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// The base URL is required; the timeout and token are optional.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(ENV_BASE_URL)
            .ok_or_else(|| HttpEvaluatorError::Build(format!("{} is not set", ENV_BASE_URL)))?;
        let mut builder = Self::builder(base_url);

        if let Some(raw) = lookup(ENV_TIMEOUT_MS) {
            let millis: u64 = raw.trim().parse().map_err(|_| {
                HttpEvaluatorError::Build(format!(
                    "{} must be milliseconds, got {:?}",
                    ENV_TIMEOUT_MS, raw
                ))
            })?;
            builder = builder.timeout(Duration::from_millis(millis));
        }

        if let Some(token) = lookup(ENV_TOKEN).filter(|t| !t.is_empty()) {
            builder = builder.bearer_token(token);
        }

        Ok(builder.build())
    }
}

/// Builder for HTTP evaluator configuration.
#[derive(Debug)]
pub struct HttpEvaluatorConfigBuilder {
    config: HttpEvaluatorConfig,
}

impl HttpEvaluatorConfigBuilder {
    /// Set the path of the check-by-key endpoint.
    pub fn is_on_path(mut self, path: impl Into<String>) -> Self {
        self.config.paths.is_on = path.into();
        self
    }

    /// Set the path of the check-by-key-and-date endpoint.
    pub fn is_on_for_date_path(mut self, path: impl Into<String>) -> Self {
        self.config.paths.is_on_for_date = path.into();
        self
    }

    /// Set the path of the check-by-key-and-value endpoint.
    pub fn is_on_for_value_path(mut self, path: impl Into<String>) -> Self {
        self.config.paths.is_on_for_value = path.into();
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Add a default header for all requests.
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.push((name.into(), value.into()));
        self
    }

    /// Send a bearer token with every request.
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.config.bearer_token = Some(token.into());
        self
    }

    /// Set the user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Build the configuration.
    pub fn build(self) -> HttpEvaluatorConfig {
        self.config
    }
}
