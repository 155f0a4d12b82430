// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! WaveSpeedClient against a fake upstream

use httpmock::MockServer;
use serde_json::json;
use std::time::Duration;
use wavespeed_relay::{
    config::RelayConfig,
    wavespeed::{PredictionBackend, PredictionError, PredictionStatus, WaveSpeedClient},
};

const MODEL_PATH: &str = "/api/v2/wavespeed-ai/flux-dev-ultra-fast";

fn client_for(server: &MockServer) -> WaveSpeedClient {
    let mut config = RelayConfig::default().with_api_key("test-key");
    config.api_url = server.url(MODEL_PATH);
    config.result_base_url = server.url("/api/v2");
    config.poll_timeout = Duration::from_millis(200);
    WaveSpeedClient::new(&config).unwrap()
}

#[tokio::test]
async fn test_create_prediction_sends_fixed_body_and_bearer() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method("POST")
                .path(MODEL_PATH)
                .header("authorization", "Bearer test-key")
                .json_body(json!({
                    "num_images": 1,
                    "num_inference_steps": 28,
                    "prompt": "a sunset over mountains",
                    "seed": -1,
                    "size": "1024*1024"
                }));
            then.status(200).json_body(json!({
                "code": 200,
                "message": "success",
                "data": {"id": "pred-abc", "status": "created", "outputs": []}
            }));
        })
        .await;

    let created = client_for(&server)
        .create_prediction("a sunset over mountains")
        .await
        .unwrap();
    mock.assert_async().await;
    assert_eq!(created.require_id().unwrap(), "pred-abc");
    assert_eq!(created.status, Some(PredictionStatus::Created));
}

#[tokio::test]
async fn test_create_without_data_has_no_id() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method("POST").path(MODEL_PATH);
            then.status(200).json_body(json!({"code": 200, "message": "ok"}));
        })
        .await;

    let created = client_for(&server).create_prediction("a cat").await.unwrap();
    assert!(matches!(
        created.require_id(),
        Err(PredictionError::MissingPredictionId)
    ));
}

#[tokio::test]
async fn test_fetch_result_parses_completed_prediction() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method("GET")
                .path("/api/v2/predictions/pred-abc/result")
                .header("authorization", "Bearer test-key");
            then.status(200).json_body(json!({
                "code": 200,
                "message": "success",
                "data": {
                    "id": "pred-abc",
                    "status": "completed",
                    "outputs": ["https://cdn.example.com/pred-abc.png"],
                    "error": "",
                    "created_at": "2025-03-01T10:00:00.000Z",
                    "timings": {"inference": 912}
                }
            }));
        })
        .await;

    let prediction = client_for(&server).fetch_result("pred-abc").await.unwrap();
    mock.assert_async().await;
    assert_eq!(prediction.status, Some(PredictionStatus::Completed));
    assert_eq!(
        prediction.first_output(),
        Some("https://cdn.example.com/pred-abc.png")
    );
    assert_eq!(prediction.inference_time_label(), "912ms");
}

#[tokio::test]
async fn test_error_status_uses_envelope_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method("POST").path(MODEL_PATH);
            then.status(400).json_body(json!({
                "code": 400,
                "message": "size must be WIDTH*HEIGHT"
            }));
        })
        .await;

    let err = client_for(&server)
        .create_prediction("a cat")
        .await
        .unwrap_err();
    match err {
        PredictionError::Api { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "size must be WIDTH*HEIGHT");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_error_status_with_plain_body() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method("GET").path("/api/v2/predictions/gone/result");
            then.status(502).body("Bad Gateway");
        })
        .await;

    let err = client_for(&server).fetch_result("gone").await.unwrap_err();
    match err {
        PredictionError::Api { status, message } => {
            assert_eq!(status, 502);
            assert_eq!(message, "Bad Gateway");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_slow_poll_is_transient() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method("GET").path("/api/v2/predictions/slow/result");
            then.status(200)
                .delay(Duration::from_secs(2))
                .json_body(json!({"data": {"id": "slow", "status": "processing"}}));
        })
        .await;

    let err = client_for(&server).fetch_result("slow").await.unwrap_err();
    assert!(err.is_transient(), "expected transient, got {:?}", err);
}

#[tokio::test]
async fn test_unreachable_upstream_is_transient() {
    let mut config = RelayConfig::default().with_api_key("test-key");
    config.result_base_url = "http://127.0.0.1:59999/api/v2".to_string();
    let client = WaveSpeedClient::new(&config).unwrap();

    let err = client.fetch_result("any").await.unwrap_err();
    assert!(err.is_transient(), "expected transient, got {:?}", err);
}

#[tokio::test]
async fn test_malformed_json_is_decode_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method("GET").path("/api/v2/predictions/bad/result");
            then.status(200)
                .header("content-type", "application/json")
                .body("{not json");
        })
        .await;

    let err = client_for(&server).fetch_result("bad").await.unwrap_err();
    assert!(
        matches!(err, PredictionError::Decode(_)),
        "expected decode error, got {:?}",
        err
    );
}
