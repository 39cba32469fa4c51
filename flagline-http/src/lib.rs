//! # Flagline HTTP Evaluator
//!
//! A [`FlagEvaluator`](flagline_client::FlagEvaluator) that talks JSON over
//! HTTP to a feature-flag evaluation service.
//!
//! Each check is a single `POST` to its own endpoint:
//!
//! | Check | Default path | Body |
//! |---|---|---|
//! | by key | `isOn` | `{"featureKey": ...}` |
//! | by key and date | `isOnForDate` | `{"featureKey": ..., "dateToCheck": ...}` |
//! | by key and value | `isOnForValue` | `{"featureKey": ..., "valueToCheck": ...}` |
//!
//! The service answers `true`, `false` or `null`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use flagline_client::FlagClient;
//! use flagline_http::{HttpEvaluator, HttpEvaluatorConfig};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = HttpEvaluatorConfig::builder("https://flags.example.com/api/")
//!         .timeout(Duration::from_secs(5))
//!         .bearer_token("token")
//!         .build();
//!
//!     let client = FlagClient::new(HttpEvaluator::new(config)?);
//!
//!     if client.is_feature_on("new-checkout").await.is_enabled() {
//!         println!("new checkout enabled");
//!     }
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod evaluator;
mod response;

pub use config::{
    EndpointPaths, HttpEvaluatorConfig, HttpEvaluatorConfigBuilder, ENV_BASE_URL, ENV_TIMEOUT_MS,
    ENV_TOKEN,
};
pub use error::{HttpEvaluatorError, Result};
pub use evaluator::HttpEvaluator;
pub use response::FlagResponse;

// Re-export common types
pub use http::StatusCode;
pub use url::Url;
