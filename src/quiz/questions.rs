//! Money-habits question bank
//!
//! Options are listed from least to most deliberate; an option's score is
//! its position, 1 through 4.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    pub prompt: &'static str,
    pub options: &'static [&'static str],
}

impl Question {
    /// Score of the option at `index` (0-based)
    pub fn score(&self, index: usize) -> Option<u32> {
        (index < self.options.len()).then(|| index as u32 + 1)
    }

    pub fn max_score(&self) -> u32 {
        self.options.len() as u32
    }
}

pub const MONEY_HABITS: &[Question] = &[
    Question {
        prompt: "When your paycheck arrives, what happens first?",
        options: &[
            "I spend until it runs out",
            "I pay bills and spend the rest",
            "I pay bills and save whatever is left",
            "I move a set amount to savings before anything else",
        ],
    },
    Question {
        prompt: "How do you keep track of your spending?",
        options: &[
            "I don't track it",
            "I check my balance now and then",
            "I review my statements every month",
            "I follow a written budget",
        ],
    },
    Question {
        prompt: "You see something you want that wasn't planned. What do you do?",
        options: &[
            "Buy it right away",
            "Buy it if I can afford it this month",
            "Wait a few days and decide",
            "Add it to a savings goal",
        ],
    },
    Question {
        prompt: "How many months of expenses could your savings cover?",
        options: &[
            "None",
            "Less than one",
            "One to three",
            "More than three",
        ],
    },
    Question {
        prompt: "How do you handle credit card balances?",
        options: &[
            "I often pay only the minimum",
            "I carry a balance some months",
            "I usually pay in full",
            "I always pay in full, or don't use credit",
        ],
    },
    Question {
        prompt: "How often do you think about long-term goals like retirement?",
        options: &[
            "Never",
            "Rarely",
            "A few times a year",
            "I contribute to them regularly",
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_question_has_four_options() {
        for q in MONEY_HABITS {
            assert_eq!(q.options.len(), 4, "{}", q.prompt);
        }
    }

    #[test]
    fn test_score() {
        let q = &MONEY_HABITS[0];
        assert_eq!(q.score(0), Some(1));
        assert_eq!(q.score(3), Some(4));
        assert_eq!(q.score(4), None);
    }
}
