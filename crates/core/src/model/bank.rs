use std::collections::HashSet;
use std::sync::Arc;

use thiserror::Error;

use crate::model::ids::QuestionId;
use crate::model::question::Question;

const BUNDLED_BANK: &str = include_str!("../../data/questions.json");

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuestionBankError {
    #[error("question bank is empty")]
    Empty,

    #[error("question id {0} appears more than once")]
    DuplicateId(QuestionId),

    #[error("invalid question bank: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Ordered, read-only set of questions shared by every session in the process.
///
/// Cloning is cheap; all clones share the same questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Arc<[Question]>,
}

impl QuestionBank {
    /// # Errors
    ///
    /// Returns `QuestionBankError::Empty` for an empty list and
    /// `QuestionBankError::DuplicateId` when two questions share an id.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuestionBankError> {
        if questions.is_empty() {
            return Err(QuestionBankError::Empty);
        }
        let mut seen = HashSet::with_capacity(questions.len());
        for question in &questions {
            if !seen.insert(question.id()) {
                return Err(QuestionBankError::DuplicateId(question.id()));
            }
        }
        Ok(Self {
            questions: questions.into(),
        })
    }

    /// Parse a JSON array of question records.
    ///
    /// # Errors
    ///
    /// Returns `QuestionBankError::Parse` for malformed JSON or an invalid question,
    /// plus the errors of [`QuestionBank::new`].
    pub fn from_json_str(json: &str) -> Result<Self, QuestionBankError> {
        let questions: Vec<Question> = serde_json::from_str(json)?;
        Self::new(questions)
    }

    /// The question set compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns `QuestionBankError` if the bundled data is invalid.
    pub fn bundled() -> Result<Self, QuestionBankError> {
        Self::from_json_str(BUNDLED_BANK)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    /// Correct option index of every question, in bank order.
    pub fn correct_answers(&self) -> impl Iterator<Item = usize> + '_ {
        self.questions.iter().map(Question::correct_answer)
    }
}
