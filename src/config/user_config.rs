//! User-level configuration for calcdeck
//!
//! Loaded from `~/.config/calcdeck/config.toml` (or the platform's config
//! directory). Only report generation settings live here.

use super::project_config::AiSettings;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct UserConfig {
    #[serde(default)]
    pub ai: AiSettings,
}

impl UserConfig {
    /// Load the user config, or defaults when there is none
    pub fn load() -> Self {
        match Self::user_config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        let parsed = std::fs::read_to_string(path)
            .map_err(anyhow::Error::from)
            .and_then(|content| toml::from_str::<UserConfig>(&content).map_err(Into::into));
        match parsed {
            Ok(config) => {
                debug!("Loaded user config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("Failed to load {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Get the user config file path
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("calcdeck").join("config.toml"))
    }

    /// Create the user config directory and an example config
    pub fn init_user_config() -> Result<PathBuf> {
        let config_path = Self::user_config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        if !config_path.exists() {
            std::fs::write(&config_path, USER_CONFIG_TEMPLATE)
                .with_context(|| format!("Failed to write {}", config_path.display()))?;
        }

        Ok(config_path)
    }
}

const USER_CONFIG_TEMPLATE: &str = r#"# calcdeck user configuration

[ai]
# Backend: "anthropic" (default), "openai", "deepinfra", "openrouter", "ollama"
# backend = "anthropic"

# API keys are read from the environment, e.g. ANTHROPIC_API_KEY

# model = "claude-3-5-haiku-latest"
# max_tokens = 1024
# temperature = 0.7
# timeout_secs = 120
"#;
