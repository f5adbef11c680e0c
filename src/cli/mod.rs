//! CLI command definitions and handlers

mod convert;
mod describe;
mod doctor;
mod eval;
mod init;
mod list;
mod quiz;

use anyhow::{Context as _, Result};
use calcdeck::calculators::Registry;
use calcdeck::config::{load_project_config, ProjectConfig};
use calcdeck::reporters::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Returned after validation errors have been printed; maps to exit code 2
#[derive(Error, Debug)]
#[error("{count} invalid input(s)")]
pub struct InvalidInput {
    pub count: usize,
}

/// calcdeck - finance, health and unit calculators
#[derive(Parser, Debug)]
#[command(name = "calcdeck")]
#[command(
    version,
    about = "Finance, health, sports and unit-conversion calculators with validated inputs",
    long_about = "calcdeck runs single-purpose calculators from the command line. Every input \
is checked before anything is computed and all problems are reported at once. Results are \
interpreted against fixed bands where the calculator defines them.\n\n\
Rounding happens only for display; --format json also carries the unrounded values.",
    after_help = "\
Examples:
  calcdeck list                                            List all calculators
  calcdeck describe straight-line-depreciation             Show inputs and rules
  calcdeck eval inflation -i amount=100 -i annual_rate=3 -i years=10
  calcdeck eval net-present-value --json '{\"discount_rate\": 8, \"initial_investment\": 1000, \"cash_flows\": [400, 400, 400]}'
  calcdeck convert 1000 mg g                               Unit conversion
  calcdeck quiz                                            Money-habits quiz with AI report"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Output format: text, json (default from calcdeck.toml, else text)
    #[arg(long, short = 'f', global = true, env = "CALCDECK_FORMAT", value_parser = ["text", "json"])]
    pub format: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List available calculators
    #[command(after_help = "\
Examples:
  calcdeck list                    Every calculator, grouped by category
  calcdeck list --category health  Health and fitness only
  calcdeck list --format json      JSON for scripting")]
    List {
        /// Only show one category: finance, health, sports, units
        #[arg(long, short = 'c')]
        category: Option<String>,
    },

    /// Show a calculator's inputs, rules and interpretation bands
    Describe {
        /// Calculator id (any spelling: StraightLineDepreciation, straight_line_depreciation)
        id: String,
    },

    /// Run a calculator
    #[command(after_help = "\
Examples:
  calcdeck eval straight-line-depreciation -i cost=100000 -i salvage_value=10000 -i useful_life=10
  calcdeck eval golf-handicap -i scores=90,85,95,88 -i course_rating=72 -i slope_rating=130
  calcdeck eval bmr --json '{\"weight_kg\": 70, \"height_cm\": 175, \"age\": 30, \"sex\": \"male\"}'

Exit status is 2 when any input is invalid; every problem is listed.")]
    Eval {
        /// Calculator id
        id: String,

        /// Input as KEY=VALUE (repeatable)
        #[arg(long = "input", short = 'i', value_name = "KEY=VALUE")]
        inputs: Vec<String>,

        /// Inputs as a JSON object (merged before -i values)
        #[arg(long, value_name = "OBJECT")]
        json: Option<String>,
    },

    /// Convert a value between units (mass, volume, length, temperature)
    #[command(after_help = "\
Examples:
  calcdeck convert 1000 mg g
  calcdeck convert 3 cup ml
  calcdeck convert -- -40 c f")]
    Convert {
        /// Value to convert
        #[arg(allow_hyphen_values = true)]
        value: f64,

        /// Unit to convert from (symbol or name, e.g. lb, pound)
        from: String,

        /// Unit to convert to
        to: String,
    },

    /// Take the money-habits quiz and get a written report
    #[command(after_help = "\
Examples:
  calcdeck quiz                              Interactive
  calcdeck quiz --answers 4,3,3,2,4,1        Non-interactive, options are 1-based
  calcdeck quiz --answers 1,1,1,1,1,1 --offline   Skip the AI report

The report uses ANTHROPIC_API_KEY (or the chosen backend's key) when it is set.
Without one a standard report is shown.")]
    Quiz {
        /// Comma-separated option numbers, one per question
        #[arg(long, value_name = "LIST")]
        answers: Option<String>,

        /// AI backend: anthropic, openai, deepinfra, openrouter, ollama
        #[arg(long)]
        backend: Option<String>,

        /// Never call the AI service
        #[arg(long)]
        offline: bool,
    },

    /// Create a calcdeck.toml with example settings
    Init {
        /// Overwrite an existing calcdeck.toml
        #[arg(long)]
        force: bool,

        /// Also create the user config in the platform config directory
        #[arg(long)]
        user: bool,
    },

    /// Check configuration and AI backend setup
    Doctor,
}

/// Per-invocation settings shared by the commands
pub(crate) struct Context {
    pub dir: PathBuf,
    pub config: ProjectConfig,
    pub format: OutputFormat,
}

impl Context {
    fn load(format_flag: Option<&str>) -> Result<Self> {
        let dir = std::env::current_dir().context("Cannot read the current directory")?;
        let config = load_project_config(&dir);
        let format = match format_flag.or(config.output.format.as_deref()) {
            Some(f) => OutputFormat::from_str(f)?,
            None => OutputFormat::default(),
        };
        Ok(Self {
            dir,
            config,
            format,
        })
    }

    /// Built-in calculators minus those disabled in calcdeck.toml
    pub fn registry(&self) -> Registry {
        Registry::builtin().without(&self.config.calculators.disabled)
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let ctx = Context::load(cli.format.as_deref())?;

    if cli.no_color || ctx.config.output.color == Some(false) {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    match cli.command {
        Commands::List { category } => list::run(&ctx, category.as_deref()),
        Commands::Describe { id } => describe::run(&ctx, &id),
        Commands::Eval { id, inputs, json } => eval::run(&ctx, &id, &inputs, json.as_deref()),
        Commands::Convert { value, from, to } => convert::run(&ctx, value, &from, &to),
        Commands::Quiz {
            answers,
            backend,
            offline,
        } => quiz::run(&ctx, answers.as_deref(), backend.as_deref(), offline),
        Commands::Init { force, user } => init::run(&ctx.dir, force, user),
        Commands::Doctor => doctor::run(&ctx),
    }
}
