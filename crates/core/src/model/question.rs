use serde::Deserialize;
use thiserror::Error;

use crate::model::ids::QuestionId;

/// Fewest options a multiple-choice question may offer.
pub const MIN_OPTIONS: usize = 2;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question {id} has no text")]
    EmptyPrompt { id: QuestionId },

    #[error("question {id} needs at least {MIN_OPTIONS} options, got {count}")]
    TooFewOptions { id: QuestionId, count: usize },

    #[error("question {id} has an empty option at position {index}")]
    EmptyOption { id: QuestionId, index: usize },

    #[error("question {id} marks option {correct} as correct but only has {count} options")]
    CorrectAnswerOutOfRange {
        id: QuestionId,
        correct: usize,
        count: usize,
    },
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A single immutable multiple-choice question.
///
/// `correct_answer` always indexes into `options`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "QuestionRecord")]
pub struct Question {
    id: QuestionId,
    prompt: String,
    options: Vec<String>,
    correct_answer: usize,
    explanation: Option<String>,
}

impl Question {
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt or any option is blank, fewer than
    /// `MIN_OPTIONS` options are given, or `correct_answer` is out of range.
    pub fn new(
        id: QuestionId,
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_answer: usize,
        explanation: Option<String>,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt { id });
        }
        if options.len() < MIN_OPTIONS {
            return Err(QuestionError::TooFewOptions {
                id,
                count: options.len(),
            });
        }
        if let Some(index) = options.iter().position(|option| option.trim().is_empty()) {
            return Err(QuestionError::EmptyOption { id, index });
        }
        if correct_answer >= options.len() {
            return Err(QuestionError::CorrectAnswerOutOfRange {
                id,
                correct: correct_answer,
                count: options.len(),
            });
        }
        let explanation = explanation.filter(|text| !text.trim().is_empty());

        Ok(Self {
            id,
            prompt,
            options,
            correct_answer,
            explanation,
        })
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn option(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn correct_answer(&self) -> usize {
        self.correct_answer
    }

    /// Text of the correct option.
    #[must_use]
    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_answer]
    }

    #[must_use]
    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    #[must_use]
    pub fn is_correct(&self, option: usize) -> bool {
        option == self.correct_answer
    }
}

/// Wire shape of a question in a JSON bank.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionRecord {
    id: u64,
    question: String,
    options: Vec<String>,
    correct_answer: usize,
    #[serde(default)]
    explanation: Option<String>,
}

impl TryFrom<QuestionRecord> for Question {
    type Error = QuestionError;

    fn try_from(record: QuestionRecord) -> Result<Self, Self::Error> {
        Question::new(
            QuestionId::new(record.id),
            record.question,
            record.options,
            record.correct_answer,
            record.explanation,
        )
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
