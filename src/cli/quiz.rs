//! Quiz command - money-habits quiz with a written report

use super::Context;
use anyhow::{bail, Context as _, Result};
use calcdeck::ai::{EnvReportService, LlmBackend};
use calcdeck::config::{resolve_ai_config, UserConfig};
use calcdeck::quiz::{generate_report, OfflineReportService, QuizSession, ReportService};
use calcdeck::reporters::{report_with_format, Document, OutputFormat};
use console::{style, Term};
use std::io::BufRead;

/// Parse `--answers 4,3,2` into 0-based option indices
fn parse_answers(list: &str) -> Result<Vec<usize>> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| match s.parse::<usize>() {
            Ok(n) if n >= 1 => Ok(n - 1),
            _ => bail!("'{}' is not an option number (options start at 1)", s),
        })
        .collect()
}

/// Ask each pending question on stderr and read option numbers from stdin
fn ask_interactively(session: &mut QuizSession) -> Result<()> {
    let term = Term::stderr();
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    while let Some(question) = session.current_question() {
        let (answered, total) = session.progress();
        term.write_line(&format!(
            "\n{} {}",
            style(format!("[{}/{}]", answered + 1, total)).dim(),
            style(question.prompt).bold()
        ))?;
        for (i, option) in question.options.iter().enumerate() {
            term.write_line(&format!("  {}. {}", i + 1, option))?;
        }
        term.write_str("> ")?;

        let line = match lines.next() {
            Some(line) => line.context("Failed to read answer")?,
            None => bail!("Input ended before the quiz was complete"),
        };
        match line.trim().parse::<usize>() {
            Ok(n) if n >= 1 => {
                if let Err(e) = session.answer(n - 1) {
                    term.write_line(&format!("{} {}", style("✗").red(), e))?;
                }
            }
            _ => term.write_line(&format!(
                "{} Enter a number from 1 to {}",
                style("✗").red(),
                question.options.len()
            ))?,
        }
    }
    Ok(())
}

pub fn run(ctx: &Context, answers: Option<&str>, backend: Option<&str>, offline: bool) -> Result<()> {
    let mut session = QuizSession::new();
    session.start()?;

    match answers {
        Some(list) => {
            for option in parse_answers(list)? {
                session.answer(option)?;
            }
        }
        None => ask_interactively(&mut session)?,
    }
    let outcome = session.finish()?;

    let service: Box<dyn ReportService> = if offline {
        Box::new(OfflineReportService)
    } else {
        let backend = backend
            .map(|b| b.parse::<LlmBackend>().map_err(anyhow::Error::msg))
            .transpose()?;
        let config = resolve_ai_config(&UserConfig::load().ai, &ctx.config.ai, backend)?;
        Box::new(EnvReportService::new(config))
    };

    if ctx.format == OutputFormat::Text && !offline {
        Term::stderr().write_line(&format!("\n{}", style("Writing your report...").dim()))?;
    }
    let report = generate_report(&outcome, service.as_ref());

    let doc = Document::Quiz {
        outcome: &outcome,
        report: &report,
    };
    print!("{}", report_with_format(&doc, ctx.format)?);
    Ok(())
}
