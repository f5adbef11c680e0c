//! Configuration module for calcdeck
//!
//! This module handles:
//! - Project-level configuration (calcdeck.toml)
//! - User-level configuration (~/.config/calcdeck/config.toml)
//! - Resolving the report client settings from both
//!
//! Precedence, lowest first: built-in defaults, user file, project file,
//! command-line flags.

mod project_config;
mod user_config;

pub use project_config::{
    load_project_config, AiSettings, CalculatorsConfig, OutputConfig, ProjectConfig,
    PROJECT_CONFIG_FILE, PROJECT_CONFIG_JSON_FILE,
};
pub use user_config::UserConfig;

use crate::ai::{AiConfig, LlmBackend};
use anyhow::Result;

/// Build the AI client config from user and project settings
///
/// `backend_override` comes from the command line and wins over both files.
pub fn resolve_ai_config(
    user: &AiSettings,
    project: &AiSettings,
    backend_override: Option<LlmBackend>,
) -> Result<AiConfig> {
    let mut settings = user.clone();
    settings.merge(project);

    let defaults = AiConfig::default();
    let backend = match (backend_override, settings.backend.as_deref()) {
        (Some(backend), _) => backend,
        (None, Some(name)) => name.parse::<LlmBackend>().map_err(anyhow::Error::msg)?,
        (None, None) => defaults.backend,
    };

    Ok(AiConfig {
        backend,
        model: settings.model,
        max_tokens: settings.max_tokens.unwrap_or(defaults.max_tokens),
        temperature: settings.temperature.unwrap_or(defaults.temperature),
        timeout_secs: settings.timeout_secs.unwrap_or(defaults.timeout_secs),
    })
}
