//! Inference engine trait

use async_trait::async_trait;
use linguad_core::{LabelScore, Result};
use std::collections::BTreeMap;

/// Trait for inference engines producing scored labels
///
/// Implementations return the full score distribution over every label the
/// model supports; filtering and label mapping happen in the detector.
#[async_trait]
pub trait InferenceEngine: Send + Sync {
    /// Score the given text against every supported label
    async fn score(&self, text: &str) -> Result<Vec<LabelScore>>;

    /// Label metadata bundled with the model (`id2label`), if any
    fn id2label(&self) -> Option<&BTreeMap<usize, String>>;

    /// Get the engine name
    fn name(&self) -> &str;
}
