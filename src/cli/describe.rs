//! Describe command - inputs, rules and bands of one calculator

use super::Context;
use anyhow::Result;
use calcdeck::calculators::RunError;
use calcdeck::reporters::{report_with_format, Document};

pub fn run(ctx: &Context, id: &str) -> Result<()> {
    let registry = ctx.registry();
    let calculator = registry
        .get(id)
        .ok_or_else(|| RunError::UnknownCalculator(id.to_string()))?;

    print!(
        "{}",
        report_with_format(
            &Document::Describe {
                calculator: calculator.as_ref()
            },
            ctx.format
        )?
    );
    Ok(())
}
