//! Project-level configuration support
//!
//! Loads per-project configuration from `calcdeck.toml` or
//! `.calcdeckrc.json` in the working directory.
//!
//! # Configuration Format
//!
//! ```toml
//! # calcdeck.toml
//!
//! [output]
//! format = "text"   # text | json
//! color = true
//!
//! [ai]
//! backend = "anthropic"
//! model = "claude-3-5-haiku-latest"
//! max_tokens = 1024
//! temperature = 0.7
//! timeout_secs = 120
//!
//! [calculators]
//! disabled = ["burnout-risk"]
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

pub const PROJECT_CONFIG_FILE: &str = "calcdeck.toml";
pub const PROJECT_CONFIG_JSON_FILE: &str = ".calcdeckrc.json";

/// Project-level configuration loaded from calcdeck.toml or similar
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub ai: AiSettings,

    #[serde(default)]
    pub calculators: CalculatorsConfig,
}

/// Presentation defaults
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Default output format (text, json)
    #[serde(default)]
    pub format: Option<String>,

    /// Colored terminal output
    #[serde(default)]
    pub color: Option<bool>,
}

/// Report generation settings
///
/// Shared by the project and user files. API keys never live here; they
/// come from the environment when a report is requested.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AiSettings {
    #[serde(default)]
    pub backend: Option<String>,

    #[serde(default)]
    pub model: Option<String>,

    #[serde(default)]
    pub max_tokens: Option<u32>,

    #[serde(default)]
    pub temperature: Option<f32>,

    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl AiSettings {
    /// Overlay `other` on top of these settings (other takes priority)
    pub fn merge(&mut self, other: &AiSettings) {
        if other.backend.is_some() {
            self.backend = other.backend.clone();
        }
        if other.model.is_some() {
            self.model = other.model.clone();
        }
        if other.max_tokens.is_some() {
            self.max_tokens = other.max_tokens;
        }
        if other.temperature.is_some() {
            self.temperature = other.temperature;
        }
        if other.timeout_secs.is_some() {
            self.timeout_secs = other.timeout_secs;
        }
    }
}

/// Calculator availability
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CalculatorsConfig {
    /// Calculator ids hidden from list and eval
    #[serde(default)]
    pub disabled: Vec<String>,
}

/// Load project configuration from `dir`
///
/// Tries `calcdeck.toml`, then `.calcdeckrc.json`. A file that cannot be
/// read or parsed is logged and skipped, so this always returns a config.
pub fn load_project_config(dir: &Path) -> ProjectConfig {
    // Try TOML first (preferred format)
    let toml_path = dir.join(PROJECT_CONFIG_FILE);
    if toml_path.exists() {
        match load_toml_config(&toml_path) {
            Ok(config) => {
                debug!("Loaded project config from {}", toml_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", toml_path.display(), e);
            }
        }
    }

    let json_path = dir.join(PROJECT_CONFIG_JSON_FILE);
    if json_path.exists() {
        match load_json_config(&json_path) {
            Ok(config) => {
                debug!("Loaded project config from {}", json_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", json_path.display(), e);
            }
        }
    }

    debug!("No project config found, using defaults");
    ProjectConfig::default()
}

fn load_toml_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: ProjectConfig = toml::from_str(&content)?;
    Ok(config)
}

fn load_json_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: ProjectConfig = serde_json::from_str(&content)?;
    Ok(config)
}
