//! Eval command - validate, compute and interpret

use super::{Context, InvalidInput};
use anyhow::{anyhow, Result};
use calcdeck::calculators::{run_calculator, RunError};
use calcdeck::models::RawInput;
use calcdeck::reporters::{report_with_format, Document};
use tracing::debug;

/// Collect raw input from `--json` and `-i key=value` (the latter wins)
fn gather_input(pairs: &[String], json: Option<&str>) -> Result<RawInput> {
    let mut raw = match json {
        Some(text) => RawInput::from_json(text).map_err(anyhow::Error::msg)?,
        None => RawInput::new(),
    };
    raw.merge(RawInput::from_pairs(pairs).map_err(anyhow::Error::msg)?);
    Ok(raw)
}

pub fn run(ctx: &Context, id: &str, pairs: &[String], json: Option<&str>) -> Result<()> {
    let registry = ctx.registry();
    let calculator = registry
        .get(id)
        .ok_or_else(|| RunError::UnknownCalculator(id.to_string()))?;
    let raw = gather_input(pairs, json)?;
    debug!("Running {} with {} input(s)", calculator.id(), raw.len());

    match run_calculator(calculator.as_ref(), &raw) {
        Ok(evaluation) => {
            let doc = Document::Evaluation {
                calculator: calculator.as_ref(),
                evaluation: &evaluation,
            };
            print!("{}", report_with_format(&doc, ctx.format)?);
            Ok(())
        }
        Err(RunError::Invalid(errors)) => {
            let doc = Document::Invalid {
                calculator: calculator.as_ref(),
                errors: &errors,
            };
            print!("{}", report_with_format(&doc, ctx.format)?);
            Err(InvalidInput {
                count: errors.len(),
            }
            .into())
        }
        Err(e) => Err(anyhow!(e).context(format!("{} failed", calculator.id()))),
    }
}
