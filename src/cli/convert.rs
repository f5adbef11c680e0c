//! Convert command - direct unit conversion

use super::Context;
use anyhow::Result;
use calcdeck::calculators::units::{convert, Unit};
use calcdeck::reporters::{report_with_format, Document};

pub fn run(ctx: &Context, value: f64, from: &str, to: &str) -> Result<()> {
    let from = Unit::parse(from)?;
    let to = Unit::parse(to)?;
    let converted = convert(value, from, to)?;

    let doc = Document::Conversion {
        value,
        from,
        to,
        converted,
    };
    print!("{}", report_with_format(&doc, ctx.format)?);
    Ok(())
}
