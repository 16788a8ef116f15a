//! Engine configuration, loadable from TOML.

use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Configuration for script generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScriptConfig {
    /// Generation attempts before giving up with an empty script.
    pub max_attempts: u32,

    /// Pause between attempts, in milliseconds.
    pub retry_delay_ms: u64,

    /// Speaker assigned to lines that have none.
    pub narrator_label: String,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retry_delay_ms: 0,
            narrator_label: "NARRATOR".to_string(),
        }
    }
}

impl ScriptConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: ScriptConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_attempts == 0 {
            return Err(ConfigError::Invalid(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        if self.narrator_label.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "narrator_label must not be blank".to_string(),
            ));
        }
        Ok(())
    }
}
