//! Linguad Detect
//!
//! Language identification on top of a pretrained multilingual BERT
//! sequence-classification model.
//!
//! The inference engine is an opaque collaborator behind the
//! [`InferenceEngine`] trait: given a text it returns a confidence score for
//! every label the model supports. [`LanguageDetector`] wraps an engine,
//! filters the distribution by a configured threshold, and maps raw labels to
//! language names.
//!
//! All inference runs on CPU; the model is loaded once at construction.

pub mod bert;
pub mod detector;
pub mod engine;
pub mod labels;

pub use bert::BertEngine;
pub use detector::LanguageDetector;
pub use engine::InferenceEngine;
