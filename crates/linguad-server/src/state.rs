//! Application state shared across all requests

use anyhow::Result;
use linguad_detect::{BertEngine, LanguageDetector};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tracing::info;

use crate::config::ServerConfig;

/// Application state shared across all requests
///
/// The detector is constructed once at startup and read-only thereafter; the
/// threshold and language catalog never change for the process lifetime.
#[derive(Clone)]
pub struct AppState {
    /// The single shared language detector
    pub detector: Arc<LanguageDetector>,

    /// Prometheus metrics handle for rendering
    pub metrics_handle: PrometheusHandle,
}

impl AppState {
    /// Initialize application state from configuration.
    ///
    /// Loads the model, the only expensive operation in the process; it is
    /// not repeated per request.
    pub fn new(config: &ServerConfig, metrics_handle: PrometheusHandle) -> Result<Self> {
        info!("Loading model: {}", config.model_path);
        let engine = BertEngine::new(&config.model_path)?;
        let detector = LanguageDetector::new(Arc::new(engine), config.threshold);
        info!(
            "Detector ready: {} languages, threshold {}",
            detector.languages().len(),
            detector.threshold()
        );

        Ok(Self {
            detector: Arc::new(detector),
            metrics_handle,
        })
    }

    /// Build state around an existing detector (used by tests)
    pub fn with_detector(detector: LanguageDetector, metrics_handle: PrometheusHandle) -> Self {
        Self {
            detector: Arc::new(detector),
            metrics_handle,
        }
    }
}
