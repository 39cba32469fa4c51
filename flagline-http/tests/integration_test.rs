//! Integration tests for flagline-http

use flagline_client::{EvaluationError, FlagCheck, FlagClient, FlagEvaluator, KeyCheck};
use flagline_http::*;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn evaluator_for(server: &MockServer) -> HttpEvaluator {
    let config = HttpEvaluatorConfig::builder(server.uri())
        .timeout(Duration::from_secs(5))
        .build();
    HttpEvaluator::new(config).unwrap()
}

async fn answer(server: &MockServer, endpoint: &str, body: &str) {
    Mock::given(method("POST"))
        .and(path(endpoint))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_is_on_wire_shape() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/isOn"))
        .and(body_json(json!({ "featureKey": "new-checkout" })))
        .respond_with(ResponseTemplate::new(200).set_body_string("true"))
        .expect(1)
        .mount(&server)
        .await;

    let client = FlagClient::new(evaluator_for(&server));
    assert_eq!(
        client.is_feature_on("new-checkout").await,
        FlagCheck::Evaluated(true)
    );
}

#[tokio::test]
async fn test_date_wire_shape() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/isOnForDate"))
        .and(body_json(json!({
            "featureKey": "promo",
            "dateToCheck": "2024-01-01T00:00:00.000Z"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("false"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/isOnForDate"))
        .and(body_json(json!({ "featureKey": "promo", "dateToCheck": null })))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .expect(1)
        .mount(&server)
        .await;

    let client = FlagClient::new(evaluator_for(&server));
    assert_eq!(
        client
            .is_feature_on_for_date("promo", 1_704_067_200_000_i64)
            .await
            .value(),
        Some(false)
    );
    assert_eq!(
        client.is_feature_on_for_date("promo", "garbage").await,
        FlagCheck::Defaulted(true)
    );
}

#[tokio::test]
async fn test_value_wire_shape() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/isOnForValue"))
        .and(body_json(json!({ "featureKey": "beta-tier", "valueToCheck": 42 })))
        .respond_with(ResponseTemplate::new(200).set_body_string("true"))
        .expect(1)
        .mount(&server)
        .await;

    let client = FlagClient::new(evaluator_for(&server));
    assert_eq!(
        client.is_feature_on_for_value("beta-tier", 42).await.value(),
        Some(true)
    );
}

#[tokio::test]
async fn test_empty_body_is_absent() {
    let server = MockServer::start().await;
    answer(&server, "/isOn", "").await;

    let evaluator = evaluator_for(&server);
    assert_eq!(evaluator.is_on(&KeyCheck::new("x")).await, Ok(None));
}

#[tokio::test]
async fn test_bearer_token_and_default_headers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/isOn"))
        .and(header("authorization", "Bearer s3cret"))
        .and(header("x-tenant", "acme"))
        .respond_with(ResponseTemplate::new(200).set_body_string("true"))
        .expect(1)
        .mount(&server)
        .await;

    let config = HttpEvaluatorConfig::builder(server.uri())
        .bearer_token("s3cret")
        .default_header("X-Tenant", "acme")
        .build();
    let evaluator = HttpEvaluator::new(config).unwrap();

    assert_eq!(evaluator.is_on(&KeyCheck::new("x")).await, Ok(Some(true)));
}

#[tokio::test]
async fn test_unauthorized_maps_to_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/isOn"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Session expired"))
        .mount(&server)
        .await;

    let evaluator = evaluator_for(&server);
    assert_eq!(
        evaluator.is_on(&KeyCheck::new("x")).await,
        Err(EvaluationError::Unauthorized("Session expired".to_string()))
    );
}

#[tokio::test]
async fn test_server_error_is_failed_check() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/isOnForValue"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let client = FlagClient::new(evaluator_for(&server));
    let check = client.is_feature_on_for_value("beta-tier", 42).await;

    assert_eq!(check.value(), None);
    assert_eq!(check.error().and_then(|e| e.status_code()), Some(500));
}

#[tokio::test]
async fn test_unexpected_body_is_decode_error() {
    let server = MockServer::start().await;
    answer(&server, "/isOn", "{\"enabled\":true}").await;

    let evaluator = evaluator_for(&server);
    assert!(matches!(
        evaluator.is_on(&KeyCheck::new("x")).await,
        Err(EvaluationError::Decode(_))
    ));
}

#[tokio::test]
async fn test_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/isOn"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("true")
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let config = HttpEvaluatorConfig::builder(server.uri())
        .timeout(Duration::from_millis(100))
        .build();
    let evaluator = HttpEvaluator::new(config).unwrap();

    assert_eq!(
        evaluator.is_on(&KeyCheck::new("x")).await,
        Err(EvaluationError::Timeout(Duration::from_millis(100)))
    );
}

#[tokio::test]
async fn test_no_retry_on_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/isOn"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let client = FlagClient::new(evaluator_for(&server));
    assert!(client.is_feature_on("x").await.is_failed());
}

#[tokio::test]
async fn test_custom_paths() {
    let server = MockServer::start().await;
    answer(&server, "/flags/check", "false").await;

    let config = HttpEvaluatorConfig::builder(format!("{}/flags", server.uri()))
        .is_on_path("check")
        .build();
    let evaluator = HttpEvaluator::new(config).unwrap();

    assert_eq!(evaluator.is_on(&KeyCheck::new("x")).await, Ok(Some(false)));
}
