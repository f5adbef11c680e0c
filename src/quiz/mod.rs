//! Money-habits quiz
//!
//! A fixed question bank walked through by a [`QuizSession`]. The finished
//! outcome is placed in a score category and can be turned into a written
//! report by any [`ReportService`].

mod questions;
mod report;
mod session;

pub use questions::{Question, MONEY_HABITS};
pub use report::{generate_report, OfflineReportService, Report, ReportService, FALLBACK_REPORT};
pub use session::{
    AnsweredQuestion, QuizError, QuizOutcome, QuizSession, QuizState, CATEGORY_BANDS,
};
