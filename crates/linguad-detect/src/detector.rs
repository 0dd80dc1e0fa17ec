//! Language detector wrapping an inference engine

use linguad_core::{Error, Result};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::engine::InferenceEngine;
use crate::labels;

/// How raw engine labels are resolved to language names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LabelMapping {
    /// Engine labels are `LABEL_{n}` placeholders resolved via the built-in
    /// table; a label that fails to resolve is a hard error
    BuiltinTable,
    /// Engine labels are language names already and are used directly, so an
    /// unknown label cannot occur
    Direct,
}

/// Language detector
///
/// Wraps an [`InferenceEngine`], resolves the language catalog once at
/// construction, and turns raw score distributions into per-language results
/// filtered by the configured threshold.
pub struct LanguageDetector {
    engine: Arc<dyn InferenceEngine>,
    threshold: f32,
    languages: Vec<String>,
    mapping: LabelMapping,
}

impl LanguageDetector {
    /// Create a detector over the given engine.
    ///
    /// Catalog resolution: when the engine's `id2label` metadata carries real
    /// language names, those names become the catalog (deduplicated,
    /// lexicographically ordered) and labels are used directly. When the
    /// metadata is absent or holds `LABEL_{n}` placeholders, the built-in
    /// table is used instead.
    pub fn new(engine: Arc<dyn InferenceEngine>, threshold: f32) -> Self {
        let (languages, mapping) = match engine.id2label() {
            Some(id2label) if !id2label.values().all(|l| labels::is_placeholder(l)) => {
                let mut names: Vec<String> = id2label.values().cloned().collect();
                names.sort_unstable();
                names.dedup();
                (names, LabelMapping::Direct)
            }
            _ => (
                labels::LANGUAGES.iter().map(|s| s.to_string()).collect(),
                LabelMapping::BuiltinTable,
            ),
        };

        tracing::debug!(
            "detector over engine '{}': {} languages, threshold {}",
            engine.name(),
            languages.len(),
            threshold
        );

        Self {
            engine,
            threshold,
            languages,
            mapping,
        }
    }

    /// Detect languages in the given text.
    ///
    /// Returns only the languages whose score is at or above the threshold.
    /// Classification either fully succeeds or fails as a whole; an engine
    /// label with no known language mapping is an error, never dropped.
    pub async fn classify(&self, text: &str) -> Result<BTreeMap<String, f32>> {
        let scores = self.engine.score(text).await?;

        let mut result = BTreeMap::new();
        for entry in scores {
            if entry.score < self.threshold {
                continue;
            }
            let language = match self.mapping {
                LabelMapping::Direct => entry.label,
                LabelMapping::BuiltinTable => labels::language_for_label(&entry.label)
                    .ok_or_else(|| Error::unknown_label(entry.label.clone()))?
                    .to_string(),
            };
            result.insert(language, entry.score);
        }
        Ok(result)
    }

    /// The resolved language catalog; stable for the process lifetime
    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    /// Minimum score for a language to appear in a detection result
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Name of the underlying engine
    pub fn engine_name(&self) -> &str {
        self.engine.name()
    }
}
