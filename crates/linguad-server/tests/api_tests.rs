//! API integration tests
//!
//! Drives the router directly with `tower::ServiceExt::oneshot`, using mock
//! engines so no model weights are needed.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use linguad_core::{Error, LabelScore, Result};
use linguad_detect::{InferenceEngine, LanguageDetector};
use linguad_server::{routes, AppState};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::collections::BTreeMap;
use std::sync::Arc;
use tower::ServiceExt;

struct MockEngine {
    scores: Vec<LabelScore>,
}

#[async_trait]
impl InferenceEngine for MockEngine {
    async fn score(&self, _text: &str) -> Result<Vec<LabelScore>> {
        Ok(self.scores.clone())
    }

    fn id2label(&self) -> Option<&BTreeMap<usize, String>> {
        None
    }

    fn name(&self) -> &str {
        "mock"
    }
}

struct FailingEngine;

#[async_trait]
impl InferenceEngine for FailingEngine {
    async fn score(&self, _text: &str) -> Result<Vec<LabelScore>> {
        Err(Error::engine("model exploded"))
    }

    fn id2label(&self) -> Option<&BTreeMap<usize, String>> {
        None
    }

    fn name(&self) -> &str {
        "failing"
    }
}

fn test_handle() -> PrometheusHandle {
    PrometheusBuilder::new().build_recorder().handle()
}

fn test_app(engine: Arc<dyn InferenceEngine>, threshold: f32) -> axum::Router {
    let detector = LanguageDetector::new(engine, threshold);
    routes::create_router(AppState::with_detector(detector, test_handle()))
}

fn default_app() -> axum::Router {
    let engine = Arc::new(MockEngine {
        scores: vec![
            LabelScore::new("LABEL_11", 0.88),
            LabelScore::new("LABEL_14", 0.31),
            LabelScore::new("LABEL_17", 0.02),
        ],
    });
    test_app(engine, 0.5)
}

fn detect_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/detect")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health() {
    let response = default_app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");
}

#[tokio::test]
async fn test_languages_matches_detector_catalog() {
    let engine: Arc<dyn InferenceEngine> = Arc::new(MockEngine { scores: vec![] });
    let detector = LanguageDetector::new(engine.clone(), 0.5);
    let expected: Vec<String> = detector.languages().to_vec();

    let app = routes::create_router(AppState::with_detector(detector, test_handle()));
    let response = app
        .oneshot(
            Request::builder()
                .uri("/languages")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let returned: Vec<String> = serde_json::from_value(body).unwrap();
    assert_eq!(returned, expected);
    assert_eq!(returned.len(), 45);
}

#[tokio::test]
async fn test_detect_returns_filtered_scores() {
    let response = default_app()
        .oneshot(detect_request(r#"{"text": "hello there"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;

    let result = body["result"].as_object().unwrap();
    assert_eq!(result.len(), 1);
    assert!((result["English"].as_f64().unwrap() - 0.88).abs() < 1e-6);
}

#[tokio::test]
async fn test_detect_reports_time_in_milliseconds() {
    let response = default_app()
        .oneshot(detect_request(r#"{"text": "hello there"}"#))
        .await
        .unwrap();

    let body = body_json(response).await;
    assert!(body["time"].is_u64());
}

#[tokio::test]
async fn test_detect_empty_text_is_a_valid_request() {
    let response = default_app()
        .oneshot(detect_request(r#"{"text": ""}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["result"].is_object());
}

#[tokio::test]
async fn test_detect_engine_failure_returns_500_with_detail() {
    let app = test_app(Arc::new(FailingEngine), 0.5);
    let response = app
        .oneshot(detect_request(r#"{"text": "hello"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert!(body["detail"].as_str().unwrap().contains("model exploded"));
    assert!(body.get("result").is_none());
}

#[tokio::test]
async fn test_detect_unknown_label_returns_500() {
    let engine = Arc::new(MockEngine {
        scores: vec![LabelScore::new("LABEL_99", 0.95)],
    });
    let app = test_app(engine, 0.5);

    let response = app
        .oneshot(detect_request(r#"{"text": "hello"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert!(body["detail"].as_str().unwrap().contains("LABEL_99"));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let response = default_app()
        .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_metrics_endpoint_renders() {
    let response = default_app()
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
