//! Client configuration.

use leafline_stage::StageConfig;
use serde::{Deserialize, Serialize};

use crate::LeaflineError;

/// Top-level configuration for a client.
///
/// Missing fields take their defaults, so `{}` is a valid config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub stage: StageConfig,
}

impl ClientConfig {
    /// Parses and validates a JSON config.
    pub fn from_json(json: &str) -> Result<Self, LeaflineError> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.validated())
    }

    /// Clamp every nested config into range.
    pub fn validated(mut self) -> Self {
        self.stage = self.stage.validated();
        self
    }
}
