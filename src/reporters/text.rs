//! Text (terminal) reporter with colors and formatting

use super::format::{format_number, format_value, humanize};
use super::Document;
use crate::calculators::{Calculator, Evaluation};
use crate::models::Table;
use crate::quiz::{QuizOutcome, Report};
use crate::schema::ValidationError;
use crate::calculators::units::Unit;
use anyhow::Result;
use console::style;
use std::fmt::Write;

const RULE: &str = "──────────────────────────────────────";

/// Render a document as formatted terminal output
pub fn render(doc: &Document) -> Result<String> {
    let mut out = String::new();
    match doc {
        Document::Evaluation {
            calculator,
            evaluation,
        } => render_evaluation(&mut out, *calculator, evaluation)?,
        Document::Invalid { calculator, errors } => render_invalid(&mut out, *calculator, errors)?,
        Document::Catalog { calculators } => render_catalog(&mut out, calculators)?,
        Document::Describe { calculator } => render_describe(&mut out, *calculator)?,
        Document::Conversion {
            value,
            from,
            to,
            converted,
        } => render_conversion(&mut out, *value, from, to, *converted)?,
        Document::Quiz { outcome, report } => render_quiz(&mut out, outcome, report)?,
    }
    Ok(out)
}

fn header(out: &mut String, title: &str) -> std::fmt::Result {
    writeln!(out, "\n{}", style(title).bold())?;
    writeln!(out, "{}", style(RULE).dim())
}

fn render_evaluation(
    out: &mut String,
    calculator: &dyn Calculator,
    evaluation: &Evaluation,
) -> std::fmt::Result {
    header(out, calculator.name())?;

    let width = evaluation
        .result
        .outputs
        .iter()
        .map(|o| humanize(&o.key).chars().count())
        .max()
        .unwrap_or(0);
    for output in &evaluation.result.outputs {
        writeln!(
            out,
            "  {:<width$}  {}",
            humanize(&output.key),
            style(format_value(&output.value, output.kind)).bold(),
            width = width
        )?;
    }

    for table in &evaluation.result.tables {
        writeln!(out)?;
        render_table(out, table)?;
    }

    if !evaluation.interpretations.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", style("INTERPRETATION").bold())?;
        for interpretation in &evaluation.interpretations {
            let label = if interpretation.determined {
                style(interpretation.label.as_str()).green().bold()
            } else {
                style(interpretation.label.as_str()).yellow().bold()
            };
            writeln!(out, "  {}: {}", humanize(&interpretation.metric), label)?;
            for rec in &interpretation.recommendations {
                writeln!(out, "    {} {}", style("-").dim(), rec)?;
            }
        }
    }
    Ok(())
}

fn render_table(out: &mut String, table: &Table) -> std::fmt::Result {
    writeln!(out, "{}", style(table.name.to_uppercase()).bold())?;

    let cells: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .zip(&table.columns)
                .map(|(v, c)| format_number(*v, c.kind))
                .collect()
        })
        .collect();
    let widths: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            cells
                .iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(humanize(&c.key).chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let head: Vec<String> = table
        .columns
        .iter()
        .zip(&widths)
        .map(|(c, w)| format!("{:>w$}", humanize(&c.key), w = w))
        .collect();
    writeln!(out, "  {}", style(head.join("  ")).dim())?;
    for row in &cells {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:>w$}", cell, w = w))
            .collect();
        writeln!(out, "  {}", line.join("  "))?;
    }
    Ok(())
}

fn render_invalid(
    out: &mut String,
    calculator: &dyn Calculator,
    errors: &[ValidationError],
) -> std::fmt::Result {
    writeln!(
        out,
        "\n{} {} ({} {})",
        style("Invalid input for").red().bold(),
        style(calculator.id()).bold(),
        errors.len(),
        if errors.len() == 1 { "error" } else { "errors" }
    )?;
    for error in errors {
        writeln!(
            out,
            "  {} {} {}",
            style("✗").red(),
            style(&error.field).bold(),
            error.kind
        )?;
    }
    writeln!(
        out,
        "\n{}",
        style(format!("Run `calcdeck describe {}` to see every input.", calculator.id())).dim()
    )
}

fn render_catalog(out: &mut String, calculators: &[&dyn Calculator]) -> std::fmt::Result {
    let width = calculators.iter().map(|c| c.id().len()).max().unwrap_or(0);
    let mut current = None;
    for calculator in calculators {
        if current != Some(calculator.category()) {
            current = Some(calculator.category());
            writeln!(
                out,
                "\n{}",
                style(calculator.category().to_string().to_uppercase()).bold()
            )?;
        }
        writeln!(
            out,
            "  {:<width$}  {}",
            style(calculator.id()).cyan(),
            style(calculator.description()).dim(),
            width = width
        )?;
    }
    writeln!(out, "\n{} calculators", calculators.len())
}

fn render_describe(out: &mut String, calculator: &dyn Calculator) -> std::fmt::Result {
    header(out, calculator.name())?;
    writeln!(out, "{}", calculator.description())?;
    writeln!(
        out,
        "{} {}   {} {}",
        style("id:").dim(),
        calculator.id(),
        style("category:").dim(),
        calculator.category()
    )?;

    let schema = calculator.schema();
    writeln!(out, "\n{}", style("INPUTS").bold())?;
    for field in &schema.fields {
        let presence = match (&field.default, field.required) {
            (Some(default), _) => format!("default {}", default),
            (None, true) => "required".to_string(),
            (None, false) => "optional".to_string(),
        };
        writeln!(
            out,
            "  {}  {}  {}",
            style(field.name).cyan(),
            field.kind.describe(),
            style(format!("({})", presence)).dim()
        )?;
        if !field.help.is_empty() {
            writeln!(out, "      {}", style(field.help).dim())?;
        }
    }

    let rules = schema.rules();
    if !rules.is_empty() {
        writeln!(out, "\n{}", style("RULES").bold())?;
        for rule in rules {
            writeln!(out, "  - {}", rule)?;
        }
    }

    let bands = calculator.bands();
    if !bands.is_empty() {
        writeln!(out, "\n{}", style("BANDS").bold())?;
        for set in bands {
            writeln!(out, "  {}", humanize(set.metric))?;
            for band in set.bands {
                let threshold = if band.min.is_finite() {
                    format!(">= {}", band.min)
                } else {
                    "otherwise".to_string()
                };
                writeln!(out, "    {:<12} {}", threshold, band.label)?;
            }
        }
    }

    let example_field = schema.fields.first().map(|f| f.name).unwrap_or("field");
    let example = format!("Example: calcdeck eval {} -i {}=...", calculator.id(), example_field);
    writeln!(out, "\n{}", style(example).dim())
}

fn render_conversion(
    out: &mut String,
    value: f64,
    from: &Unit,
    to: &Unit,
    converted: f64,
) -> std::fmt::Result {
    writeln!(
        out,
        "{} {} = {} {}",
        value,
        from.symbol,
        style(format!("{:.3}", converted)).bold(),
        to.symbol
    )
}

fn render_quiz(out: &mut String, outcome: &QuizOutcome, report: &Report) -> std::fmt::Result {
    header(out, "Money Habits Quiz")?;
    writeln!(
        out,
        "Score: {}  Category: {}",
        style(format!("{}/{}", outcome.score, outcome.max_score)).bold(),
        style(&outcome.category).green().bold()
    )?;
    for rec in &outcome.recommendations {
        writeln!(out, "  {} {}", style("-").dim(), rec)?;
    }

    writeln!(out, "\n{}", style("REPORT").bold())?;
    writeln!(out, "{}", report.body.trim_end())?;
    if !report.generated {
        writeln!(
            out,
            "\n{}",
            style("(standard report shown; run `calcdeck doctor` to check AI setup)").dim()
        )?;
    }
    Ok(())
}
