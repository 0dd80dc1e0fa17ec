//! Error types for linguad

/// Result type alias using linguad's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for linguad operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Inference engine errors (model loading, tokenization, forward pass)
    #[error("engine error: {0}")]
    Engine(String),

    /// The engine returned a label with no known language mapping
    #[error("label {label} is not in the list of languages")]
    UnknownLabel { label: String },

    /// Network/IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new engine error
    pub fn engine(msg: impl Into<String>) -> Self {
        Self::Engine(msg.into())
    }

    /// Create a new unknown-label error
    pub fn unknown_label(label: impl Into<String>) -> Self {
        Self::UnknownLabel {
            label: label.into(),
        }
    }
}
