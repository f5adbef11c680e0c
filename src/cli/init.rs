//! Init command - write an example calcdeck.toml

use anyhow::{bail, Context, Result};
use calcdeck::config::{UserConfig, PROJECT_CONFIG_FILE};
use console::style;
use std::path::Path;

const PROJECT_CONFIG_TEMPLATE: &str = r#"# calcdeck project configuration

[output]
# Output format: "text" or "json"
format = "text"
color = true

[ai]
# Report backend for `calcdeck quiz`: anthropic, openai, deepinfra, openrouter, ollama
# API keys are read from the environment, e.g. ANTHROPIC_API_KEY
# backend = "anthropic"
# model = "claude-3-5-haiku-latest"
# timeout_secs = 120

[calculators]
# Hide calculators from list/describe/eval
disabled = []
"#;

pub fn run(dir: &Path, force: bool, user: bool) -> Result<()> {
    let config_path = dir.join(PROJECT_CONFIG_FILE);
    if config_path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
    }
    std::fs::write(&config_path, PROJECT_CONFIG_TEMPLATE)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!(
        "{} Created {}",
        style("✓").green(),
        style(config_path.display()).cyan()
    );

    if user {
        let user_path = UserConfig::init_user_config()?;
        println!(
            "{} User config at {}",
            style("✓").green(),
            style(user_path.display()).cyan()
        );
    }
    Ok(())
}
