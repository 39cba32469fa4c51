//! HTTP flag evaluator.

use flagline_client::{
    async_trait, DateCheck, EvaluationError, FlagEvaluator, FlagOperation, KeyCheck, ValueCheck,
};
use http::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;
use url::Url;

use crate::{FlagResponse, HttpEvaluatorConfig, HttpEvaluatorError, Result};

/// Resolved endpoint URLs.
#[derive(Debug, Clone)]
struct Endpoints {
    is_on: Url,
    is_on_for_date: Url,
    is_on_for_value: Url,
}

impl Endpoints {
    fn resolve(config: &HttpEvaluatorConfig) -> Result<Self> {
        let mut base = config.base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base = Url::parse(&base)
            .map_err(|e| HttpEvaluatorError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;

        let join = |path: &str| {
            base.join(path.trim_start_matches('/'))
                .map_err(|e| HttpEvaluatorError::InvalidUrl(format!("{}: {}", path, e)))
        };

        Ok(Self {
            is_on: join(&config.paths.is_on)?,
            is_on_for_date: join(&config.paths.is_on_for_date)?,
            is_on_for_value: join(&config.paths.is_on_for_value)?,
        })
    }

    fn for_operation(&self, operation: FlagOperation) -> &Url {
        match operation {
            FlagOperation::IsOn => &self.is_on,
            FlagOperation::IsOnForDate => &self.is_on_for_date,
            FlagOperation::IsOnForValue => &self.is_on_for_value,
        }
    }
}

/// Evaluates flags by POSTing JSON to an evaluation service.
///
/// One request per check; no retry, no circuit breaker.
#[derive(Clone)]
pub struct HttpEvaluator {
    inner: reqwest::Client,
    config: Arc<HttpEvaluatorConfig>,
    endpoints: Arc<Endpoints>,
}

impl HttpEvaluator {
    /// Create a new HTTP evaluator with the given configuration.
    pub fn new(config: HttpEvaluatorConfig) -> Result<Self> {
        let endpoints = Endpoints::resolve(&config)?;

        let mut headers = HeaderMap::new();
        for (name, value) in &config.default_headers {
            let name = HeaderName::try_from(name.as_str())
                .map_err(|e| HttpEvaluatorError::Build(format!("header {}: {}", name, e)))?;
            let value = HeaderValue::try_from(value.as_str())
                .map_err(|e| HttpEvaluatorError::Build(format!("header {}: {}", name, e)))?;
            headers.insert(name, value);
        }

        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .build()
            .map_err(|e| HttpEvaluatorError::Build(e.to_string()))?;

        Ok(Self {
            inner,
            config: Arc::new(config),
            endpoints: Arc::new(endpoints),
        })
    }

    /// Create an evaluator from `FLAGLINE_HTTP_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(HttpEvaluatorConfig::from_env()?)
    }

    /// Get the evaluator configuration.
    pub fn config(&self) -> &HttpEvaluatorConfig {
        &self.config
    }

    /// Get the URL used for an operation.
    pub fn endpoint(&self, operation: FlagOperation) -> &Url {
        self.endpoints.for_operation(operation)
    }

    /// Send one check and read the flag result.
    pub async fn check<T: Serialize + ?Sized>(
        &self,
        operation: FlagOperation,
        body: &T,
    ) -> Result<Option<bool>> {
        let url = self.endpoint(operation).clone();
        debug!(%operation, %url, "Sending flag check");

        let mut request = self.inner.post(url).json(body);
        if let Some(token) = &self.config.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = FlagResponse::from_reqwest(request.send().await?).await?;
        debug!(%operation, status = %response.status(), "Flag check answered");

        response.error_for_status()?.flag_result()
    }

    async fn evaluate<T: Serialize + ?Sized>(
        &self,
        operation: FlagOperation,
        body: &T,
    ) -> std::result::Result<Option<bool>, EvaluationError> {
        self.check(operation, body)
            .await
            .map_err(|e| e.into_evaluation_error(self.config.timeout))
    }
}

impl std::fmt::Debug for HttpEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpEvaluator")
            .field("config", &self.config)
            .field("endpoints", &self.endpoints)
            .finish()
    }
}

#[async_trait]
impl FlagEvaluator for HttpEvaluator {
    async fn is_on(&self, request: &KeyCheck) -> flagline_client::Result<Option<bool>> {
        self.evaluate(FlagOperation::IsOn, request).await
    }

    async fn is_on_for_date(&self, request: &DateCheck) -> flagline_client::Result<Option<bool>> {
        self.evaluate(FlagOperation::IsOnForDate, request).await
    }

    async fn is_on_for_value(&self, request: &ValueCheck) -> flagline_client::Result<Option<bool>> {
        self.evaluate(FlagOperation::IsOnForValue, request).await
    }
}
