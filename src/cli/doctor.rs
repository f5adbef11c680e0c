//! Doctor command - check configuration and report backends

use super::Context;
use anyhow::Result;
use calcdeck::ai::{AiClient, LlmBackend};
use calcdeck::config::{UserConfig, PROJECT_CONFIG_FILE, PROJECT_CONFIG_JSON_FILE};
use calcdeck::calculators::Registry;
use console::style;

pub fn run(ctx: &Context) -> Result<()> {
    println!("{}\n", style("calcdeck doctor").bold());

    let project_files: Vec<&str> = [PROJECT_CONFIG_FILE, PROJECT_CONFIG_JSON_FILE]
        .into_iter()
        .filter(|f| ctx.dir.join(f).exists())
        .collect();
    if project_files.is_empty() {
        println!("{} Project config: none (run `calcdeck init`)", style("○").dim());
    } else {
        println!("{} Project config: {}", style("✓").green(), project_files.join(", "));
    }

    match UserConfig::user_config_path() {
        Some(path) if path.exists() => {
            println!("{} User config: {}", style("✓").green(), path.display())
        }
        Some(path) => println!("{} User config: none at {}", style("○").dim(), path.display()),
        None => println!("{} User config: no config directory", style("○").dim()),
    }

    let mut configured = Vec::new();
    for backend in LlmBackend::ALL {
        let Some(var) = backend.api_key_var() else {
            continue;
        };
        if std::env::var(var).is_ok() {
            configured.push(backend.display_name());
        }
    }
    if AiClient::ollama_available() {
        configured.push(LlmBackend::Ollama.display_name());
    }
    if configured.is_empty() {
        println!("{} Report backends: none configured", style("○").dim());
        println!("  Set ANTHROPIC_API_KEY (or another backend's key) for written quiz reports");
    } else {
        println!("{} Report backends: {}", style("✓").green(), configured.join(", "));
    }

    let all = Registry::builtin();
    let enabled = ctx.registry();
    println!(
        "{} Calculators: {} enabled of {}",
        style("✓").green(),
        enabled.len(),
        all.len()
    );
    let unknown: Vec<&String> = ctx
        .config
        .calculators
        .disabled
        .iter()
        .filter(|id| all.get(id).is_none())
        .collect();
    if !unknown.is_empty() {
        println!(
            "{} Unknown ids in [calculators] disabled: {}",
            style("⚠").yellow(),
            unknown.iter().map(|s| s.as_str()).collect::<Vec<_>>().join(", ")
        );
    }

    Ok(())
}
