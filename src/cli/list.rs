//! List command - show the calculator catalog

use super::Context;
use anyhow::Result;
use calcdeck::calculators::{Calculator, Category};
use calcdeck::reporters::{report_with_format, Document};

pub fn run(ctx: &Context, category: Option<&str>) -> Result<()> {
    let registry = ctx.registry();
    let calculators: Vec<&dyn Calculator> = match category {
        Some(name) => {
            let category = name.parse::<Category>().map_err(anyhow::Error::msg)?;
            registry.by_category(category).into_iter().map(|c| c.as_ref()).collect()
        }
        None => registry.iter().map(|c| c.as_ref()).collect(),
    };

    print!("{}", report_with_format(&Document::Catalog { calculators }, ctx.format)?);
    Ok(())
}
