//! Output reporters for calcdeck
//!
//! Supports two output formats:
//! - `text` - Terminal output with colors
//! - `json` - Machine-readable JSON
//!
//! Rounding for display happens here and nowhere else.

mod format;
mod json;
mod text;

pub use format::{format_number, format_value, humanize};

use crate::calculators::units::Unit;
use crate::calculators::{Calculator, Evaluation};
use crate::quiz::{QuizOutcome, Report};
use crate::schema::ValidationError;
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!("Unknown format '{}'. Valid formats: text, json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Anything the CLI prints
pub enum Document<'a> {
    Evaluation {
        calculator: &'a dyn Calculator,
        evaluation: &'a Evaluation,
    },
    Invalid {
        calculator: &'a dyn Calculator,
        errors: &'a [ValidationError],
    },
    Catalog {
        calculators: Vec<&'a dyn Calculator>,
    },
    Describe {
        calculator: &'a dyn Calculator,
    },
    Conversion {
        value: f64,
        from: &'a Unit,
        to: &'a Unit,
        converted: f64,
    },
    Quiz {
        outcome: &'a QuizOutcome,
        report: &'a Report,
    },
}

/// Render a document in the specified format
pub fn report(doc: &Document, format: &str) -> Result<String> {
    let fmt = OutputFormat::from_str(format)?;
    report_with_format(doc, fmt)
}

/// Render a document using an OutputFormat enum
pub fn report_with_format(doc: &Document, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => text::render(doc),
        OutputFormat::Json => json::render(doc),
    }
}
