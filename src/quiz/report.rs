//! Quiz report generation
//!
//! The report service is called once per finished quiz. Any failure,
//! including a missing API key, yields [`FALLBACK_REPORT`]; there is no
//! retry and no partial text.

use super::session::QuizOutcome;
use crate::ai::{AiError, AiResult, PromptTemplate, ReportPromptBuilder};
use serde::Serialize;
use tracing::{info, warn};

/// Shown whenever a generated report is unavailable
pub const FALLBACK_REPORT: &str = "We couldn't generate your personalized report right now. \
Your category and score above still reflect your answers: use the recommendations \
listed with your category as a starting point, and take the quiz again later for \
a full written report.";

/// Suggested report length passed to the model
const REPORT_WORD_LIMIT: u32 = 300;

/// Something that turns a prompt into report text
pub trait ReportService {
    fn generate_report(&self, system: &str, prompt: &str) -> AiResult<String>;
}

/// Never calls out; every report is the fallback
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineReportService;

impl ReportService for OfflineReportService {
    fn generate_report(&self, _system: &str, _prompt: &str) -> AiResult<String> {
        Err(AiError::Disabled)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub body: String,
    /// false when `body` is the fallback text
    pub generated: bool,
}

impl Report {
    pub fn fallback() -> Self {
        Self {
            body: FALLBACK_REPORT.to_string(),
            generated: false,
        }
    }
}

/// Ask `service` for a report on `outcome`, falling back on any error
pub fn generate_report(outcome: &QuizOutcome, service: &dyn ReportService) -> Report {
    let prompt = ReportPromptBuilder::new(outcome)
        .word_limit(REPORT_WORD_LIMIT)
        .build();

    match request_report(service, &prompt) {
        Ok(body) => {
            info!("Generated report ({} chars)", body.len());
            Report {
                body,
                generated: true,
            }
        }
        Err(AiError::Disabled) => Report::fallback(),
        Err(e) => {
            warn!("Report generation failed, using fallback: {}", e);
            Report::fallback()
        }
    }
}

fn request_report(service: &dyn ReportService, prompt: &str) -> AiResult<String> {
    let body = service.generate_report(PromptTemplate::report_system_prompt(), prompt)?;
    if body.trim().is_empty() {
        return Err(AiError::ParseError("empty report".to_string()));
    }
    Ok(body)
}
