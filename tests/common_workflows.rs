//! Integration tests for common Flagline workflows.
//!
//! These tests go through the root crate's re-exports the way an application
//! would.

use flagline::prelude::*;
use flagline_testing::{MockEvaluator, RecordingSink};

// =============================================================================
// Gating a feature
// =============================================================================

#[tokio::test]
async fn test_gate_feature_on_flag() {
    let client = FlagClient::new(
        MockEvaluator::new()
            .with_flag("new-checkout", Some(true))
            .with_flag("dark-mode", Some(false)),
    );

    let mut shown = Vec::new();
    for feature in ["new-checkout", "dark-mode"] {
        if client.is_feature_on(feature).await.is_enabled() {
            shown.push(feature);
        }
    }

    assert_eq!(shown, vec!["new-checkout"]);
}

#[tokio::test]
async fn test_shared_client_across_tasks() {
    let mock = MockEvaluator::answering(Some(true));
    let client = FlagClient::new(mock.clone());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let client = client.clone();
            tokio::spawn(async move { client.is_feature_on(format!("flag-{}", i)).await })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap().value(), Some(true));
    }
    assert_eq!(mock.call_count(), 8);
}

// =============================================================================
// Telling failures apart
// =============================================================================

#[tokio::test]
async fn test_failed_check_can_be_propagated() {
    let sink = RecordingSink::new();
    let client = FlagClient::builder(MockEvaluator::failing(EvaluationError::Transport(
        "network unreachable".to_string(),
    )))
    .sink(sink.clone())
    .build();

    let result = client
        .is_feature_on_for_date("promo", "2024-01-01")
        .await
        .into_result();

    assert!(matches!(result, Err(EvaluationError::Transport(_))));
    assert_eq!(sink.len(), 1);
}

#[tokio::test]
async fn test_policy_from_config() {
    let config = FlagClientConfig::from_toml_str("absent_policy = \"fail_closed\"").unwrap();
    let client = FlagClient::with_config(MockEvaluator::answering(None), &config);

    let check = client.is_feature_on_for_value("beta-tier", "gold").await;
    assert_eq!(check, FlagCheck::Defaulted(false));
}

#[cfg(feature = "http")]
#[test]
fn test_http_evaluator_reexported() {
    let config = HttpEvaluatorConfig::builder("https://flags.example.com/api").build();
    let evaluator = HttpEvaluator::new(config).unwrap();
    let _client = FlagClient::new(evaluator);
}
