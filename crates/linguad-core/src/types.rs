//! Core types for linguad

use serde::{Deserialize, Serialize};

/// A single scored label produced by the inference engine.
///
/// The label is opaque to the caller; mapping it to a language name is the
/// detector's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    /// Raw class identifier from the model (e.g. "LABEL_11")
    pub label: String,

    /// Confidence score (0.0-1.0)
    pub score: f32,
}

impl LabelScore {
    /// Create a new scored label
    pub fn new(label: impl Into<String>, score: f32) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}
