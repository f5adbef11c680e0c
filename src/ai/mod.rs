//! AI-written quiz reports
//!
//! Sends the quiz outcome to an LLM backend and returns the text it writes.
//! Uses BYOK (bring your own key): API keys are read from environment
//! variables when a report is requested, never at startup.
//!
//! # Environment Variables
//!
//! - `ANTHROPIC_API_KEY`: Required for the Anthropic backend (default)
//! - `OPENAI_API_KEY`: Required for the OpenAI backend
//! - `DEEPINFRA_API_KEY`, `OPENROUTER_API_KEY`: OpenAI-compatible hosts
//! - `OLLAMA_MODEL`: Optional model override for a local Ollama server
//!
//! # Example
//!
//! ```rust,no_run
//! use calcdeck::ai::{AiConfig, EnvReportService};
//! use calcdeck::quiz::{generate_report, QuizSession};
//!
//! let mut session = QuizSession::new();
//! session.start().unwrap();
//! while session.current_question().is_some() {
//!     session.answer(0).unwrap();
//! }
//! let outcome = session.finish().unwrap();
//! let report = generate_report(&outcome, &EnvReportService::new(AiConfig::default()));
//! println!("{}", report.body);
//! ```

mod client;
mod prompts;

pub use client::{AiClient, AiConfig, EnvReportService, LlmBackend};
pub use prompts::{PromptTemplate, ReportPromptBuilder};

use thiserror::Error;

/// Errors that can occur in the AI module
#[derive(Error, Debug)]
pub enum AiError {
    #[error("Missing API key: {env_var} not set. Get your key at {signup_url}")]
    MissingApiKey { env_var: String, signup_url: String },

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    #[error("Report generation disabled")]
    Disabled,
}

pub type AiResult<T> = Result<T, AiError>;
