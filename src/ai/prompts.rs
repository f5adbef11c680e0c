//! Prompt templates for quiz reports

use crate::quiz::QuizOutcome;

/// System prompts
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for the money-habits report
    pub fn report_system_prompt() -> &'static str {
        "You are a friendly personal finance coach. You write short, encouraging \
         reports about a person's money habits based on their quiz answers. \
         Be specific to the answers given, avoid jargon, and do not recommend \
         specific financial products. Write plain prose in two to four short \
         paragraphs with no headings or lists."
    }
}

/// Builds the user prompt from a finished quiz
pub struct ReportPromptBuilder<'a> {
    outcome: &'a QuizOutcome,
    word_limit: Option<u32>,
}

impl<'a> ReportPromptBuilder<'a> {
    pub fn new(outcome: &'a QuizOutcome) -> Self {
        Self {
            outcome,
            word_limit: None,
        }
    }

    pub fn word_limit(mut self, words: u32) -> Self {
        self.word_limit = Some(words);
        self
    }

    pub fn build(self) -> String {
        let answers = self
            .outcome
            .answers
            .iter()
            .enumerate()
            .map(|(i, a)| format!("{}. {}\n   Answer: {}", i + 1, a.question, a.answer))
            .collect::<Vec<_>>()
            .join("\n");

        let limit = self
            .word_limit
            .map(|w| format!("\nKeep the report under {} words.", w))
            .unwrap_or_default();

        format!(
            r#"## Quiz Result

Category: {category}
Score: {score} out of {max_score}

## Answers

{answers}

## Task

Write a personal money-habits report for someone in the "{category}" category.
Explain what their answers say about how they handle money, name one strength,
and suggest two practical next steps.{limit}"#,
            category = self.outcome.category,
            score = self.outcome.score,
            max_score = self.outcome.max_score,
            answers = answers,
            limit = limit,
        )
    }
}
