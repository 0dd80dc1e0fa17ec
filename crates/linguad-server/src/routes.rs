//! HTTP routes and handlers

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/languages", get(languages))
        .route("/detect", post(detect))
        .fallback(fallback)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn metrics(State(state): State<AppState>) -> String {
    state.metrics_handle.render()
}

/// Detection request body
#[derive(Debug, Serialize, Deserialize)]
pub struct DetectRequest {
    pub text: String,
}

/// Detection response: per-language scores plus classify latency
#[derive(Debug, Serialize, Deserialize)]
pub struct DetectResponse {
    pub result: BTreeMap<String, f32>,
    /// Wall-clock duration of the classify call, in milliseconds
    pub time: u64,
}

async fn languages(State(state): State<AppState>) -> Json<Vec<String>> {
    metrics::counter!("linguad_requests_total", "route" => "/languages").increment(1);
    Json(state.detector.languages().to_vec())
}

async fn detect(
    State(state): State<AppState>,
    Json(req): Json<DetectRequest>,
) -> Result<Json<DetectResponse>, AppError> {
    metrics::counter!("linguad_requests_total", "route" => "/detect").increment(1);

    let start = Instant::now();
    let result = state.detector.classify(&req.text).await?;
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    metrics::histogram!("linguad_detect_latency_ms").record(elapsed_ms);

    debug!("detected {} languages in {:.1}ms", result.len(), elapsed_ms);

    Ok(Json(DetectResponse {
        result,
        time: elapsed_ms.round() as u64,
    }))
}

async fn fallback() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not found")
}

/// Error handling
///
/// Any detector error becomes a 500 carrying the error's display string;
/// classification either fully succeeds or the whole request fails.
pub struct AppError(linguad_core::Error);

impl From<linguad_core::Error> for AppError {
    fn from(err: linguad_core::Error) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        metrics::counter!("linguad_errors_total").increment(1);
        error!("classification failed: {}", self.0);

        let body = json!({ "detail": self.0.to_string() });
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
