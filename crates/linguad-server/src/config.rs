//! Server configuration

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

/// Service configuration, read once at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Model directory or Hugging Face repo id
    pub model_path: String,

    /// Minimum score for a language to appear in a detection result
    pub threshold: f32,
}

impl ServerConfig {
    /// Load configuration from file and CLI overrides.
    ///
    /// A missing or malformed file is fatal; the service does not start
    /// without a valid configuration.
    pub fn load(config_path: &str, cli: &Cli) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("failed to read config file {config_path}"))?;
        let mut config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config file {config_path}"))?;

        // Apply CLI overrides
        if let Some(model) = &cli.model {
            config.model_path = model.clone();
        }
        if let Some(threshold) = cli.threshold {
            config.threshold = threshold;
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.model_path.is_empty() {
            anyhow::bail!("model_path must not be empty");
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            anyhow::bail!("threshold must be within [0, 1], got {}", self.threshold);
        }
        Ok(())
    }
}
