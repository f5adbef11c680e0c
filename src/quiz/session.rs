//! Quiz session state machine
//!
//! ```text
//! Start ──start()──▶ InProgress ──answer() × n──▶ InProgress ──finish()──▶ Finished
//! ```
//!
//! Transitions only move forward; answers cannot be changed.

use super::questions::{Question, MONEY_HABITS};
use crate::interpret::{interpret_value, Band, BandSet};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

pub const CATEGORY_BANDS: BandSet = BandSet::new(
    "score",
    &[
        Band::new(
            19.0,
            "Strategic Saver",
            &["Keep automating savings and review long-term goals once a year."],
        ),
        Band::new(
            13.0,
            "Balanced Planner",
            &["Build the emergency fund to three months of expenses before raising spending."],
        ),
        Band::floor(
            "Spontaneous Spender",
            &["Start with a simple monthly budget and a small automatic transfer to savings."],
        ),
    ],
);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    #[error("the quiz has not been started")]
    NotStarted,

    #[error("the quiz has already been started")]
    AlreadyStarted,

    #[error("the quiz is already finished")]
    AlreadyFinished,

    #[error("every question has been answered; finish the quiz")]
    NoQuestionPending,

    #[error("option {index} does not exist; choose 1 to {count}")]
    InvalidOption { index: usize, count: usize },

    #[error("only {answered} of {total} questions answered")]
    Incomplete { answered: usize, total: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizState {
    Start,
    InProgress,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnsweredQuestion {
    pub question: String,
    pub answer: String,
    pub score: u32,
}

/// Result of a finished quiz
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizOutcome {
    pub score: u32,
    pub max_score: u32,
    pub category: String,
    pub recommendations: Vec<String>,
    pub answers: Vec<AnsweredQuestion>,
}

pub struct QuizSession {
    questions: &'static [Question],
    answers: Vec<usize>,
    state: QuizState,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizSession {
    /// Session over the money-habits question bank
    pub fn new() -> Self {
        Self::with_questions(MONEY_HABITS)
    }

    pub fn with_questions(questions: &'static [Question]) -> Self {
        Self {
            questions,
            answers: Vec::with_capacity(questions.len()),
            state: QuizState::Start,
        }
    }

    pub fn state(&self) -> QuizState {
        self.state
    }

    pub fn questions(&self) -> &'static [Question] {
        self.questions
    }

    /// (answered, total)
    pub fn progress(&self) -> (usize, usize) {
        (self.answers.len(), self.questions.len())
    }

    pub fn start(&mut self) -> Result<(), QuizError> {
        match self.state {
            QuizState::Start => {
                self.state = QuizState::InProgress;
                Ok(())
            }
            QuizState::InProgress => Err(QuizError::AlreadyStarted),
            QuizState::Finished => Err(QuizError::AlreadyFinished),
        }
    }

    /// The next unanswered question, if the quiz is running
    pub fn current_question(&self) -> Option<&'static Question> {
        match self.state {
            QuizState::InProgress => self.questions.get(self.answers.len()),
            _ => None,
        }
    }

    /// Answer the current question with a 0-based option index
    pub fn answer(&mut self, option: usize) -> Result<(), QuizError> {
        match self.state {
            QuizState::Start => return Err(QuizError::NotStarted),
            QuizState::Finished => return Err(QuizError::AlreadyFinished),
            QuizState::InProgress => {}
        }
        let question = self
            .current_question()
            .ok_or(QuizError::NoQuestionPending)?;
        if option >= question.options.len() {
            return Err(QuizError::InvalidOption {
                index: option + 1,
                count: question.options.len(),
            });
        }
        self.answers.push(option);
        Ok(())
    }

    pub fn finish(&mut self) -> Result<QuizOutcome, QuizError> {
        match self.state {
            QuizState::Start => return Err(QuizError::NotStarted),
            QuizState::Finished => return Err(QuizError::AlreadyFinished),
            QuizState::InProgress => {}
        }
        let (answered, total) = self.progress();
        if answered < total {
            return Err(QuizError::Incomplete { answered, total });
        }
        self.state = QuizState::Finished;

        let answers: Vec<AnsweredQuestion> = self
            .questions
            .iter()
            .zip(&self.answers)
            .map(|(q, &i)| AnsweredQuestion {
                question: q.prompt.to_string(),
                answer: q.options[i].to_string(),
                score: q.score(i).unwrap_or(0),
            })
            .collect();
        let score = answers.iter().map(|a| a.score).sum();
        let max_score = self.questions.iter().map(Question::max_score).sum();
        let category = interpret_value(score as f64, &CATEGORY_BANDS);
        debug!("Quiz finished: {}/{} ({})", score, max_score, category.label);

        Ok(QuizOutcome {
            score,
            max_score,
            category: category.label,
            recommendations: category.recommendations,
            answers,
        })
    }
}
