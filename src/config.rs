//! Configuration handling for the form demo

use crate::state::forms::{Required, SuccessDispatch};
use crate::state::FormVariant;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Delay before focus is moved after a failed submit (0 = immediately)
    pub focus_delay_ms: u64,
    /// Variant shown on startup
    pub variant: FormVariant,
    /// Whether success waits for the success handler
    pub success_dispatch: SuccessDispatch,
    /// Message used by required fields
    pub required_message: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            focus_delay_ms: 100,
            variant: FormVariant::default(),
            success_dispatch: SuccessDispatch::default(),
            required_message: Required::DEFAULT_MESSAGE.to_string(),
        }
    }
}

impl FormConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "a11y-form", "a11y-form")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: FormConfig = serde_json::from_str(&content)?;
                tracing::debug!(path = %path.display(), "loaded config");
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    pub fn focus_delay(&self) -> Duration {
        Duration::from_millis(self.focus_delay_ms)
    }
}
