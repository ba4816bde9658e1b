use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{QuestionBank, QuizDuration, QuizMode};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("a session needs at least one question")]
    Empty,

    #[error("question index {index} is out of range for {count} questions")]
    QuestionOutOfRange { index: usize, count: usize },

    #[error("option {option} is out of range for question {question} ({count} options)")]
    OptionOutOfRange {
        question: usize,
        option: usize,
        count: usize,
    },

    #[error("session already finished")]
    Finished,
}

//
// ─── QUESTION STATUS ───────────────────────────────────────────────────────────
//

/// Palette classification of a question.
///
/// An answer wins over a review mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionStatus {
    Answered,
    Marked,
    Unanswered,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Mutable state of a single quiz attempt.
///
/// `answers` and `marked` always have one slot per question, and `question_index`
/// always points at an existing question. Once finished, a session rejects
/// further mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    mode: QuizMode,
    duration: QuizDuration,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
    question_index: usize,
    option_counts: Vec<usize>,
    answers: Vec<Option<usize>>,
    marked: Vec<bool>,
}

impl Session {
    /// Start a fresh session over every question in `bank`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if the bank has no questions.
    pub fn start(
        bank: &QuestionBank,
        mode: QuizMode,
        duration: QuizDuration,
        started_at: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        let option_counts: Vec<usize> = bank.iter().map(|q| q.option_count()).collect();
        Self::with_option_counts(option_counts, mode, duration, started_at)
    }

    /// Start a session from the option count of each question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if `option_counts` is empty.
    pub fn with_option_counts(
        option_counts: Vec<usize>,
        mode: QuizMode,
        duration: QuizDuration,
        started_at: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        if option_counts.is_empty() {
            return Err(SessionError::Empty);
        }
        let count = option_counts.len();
        Ok(Self {
            mode,
            duration,
            started_at,
            finished_at: None,
            question_index: 0,
            option_counts,
            answers: vec![None; count],
            marked: vec![false; count],
        })
    }

    #[must_use]
    pub fn mode(&self) -> QuizMode {
        self.mode
    }

    #[must_use]
    pub fn duration(&self) -> QuizDuration {
        self.duration
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn question_index(&self) -> usize {
        self.question_index
    }

    #[must_use]
    pub fn is_first(&self) -> bool {
        self.question_index == 0
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.question_index + 1 == self.question_count()
    }

    #[must_use]
    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    #[must_use]
    pub fn marked(&self) -> &[bool] {
        &self.marked
    }

    /// Recorded option for `question`, if any.
    #[must_use]
    pub fn answer(&self, question: usize) -> Option<usize> {
        self.answers.get(question).copied().flatten()
    }

    #[must_use]
    pub fn current_answer(&self) -> Option<usize> {
        self.answer(self.question_index)
    }

    #[must_use]
    pub fn is_answered(&self, question: usize) -> bool {
        self.answer(question).is_some()
    }

    #[must_use]
    pub fn is_marked(&self, question: usize) -> bool {
        self.marked.get(question).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|answer| answer.is_some()).count()
    }

    #[must_use]
    pub fn marked_count(&self) -> usize {
        self.marked.iter().filter(|marked| **marked).count()
    }

    #[must_use]
    pub fn status(&self, question: usize) -> Option<QuestionStatus> {
        if question >= self.question_count() {
            return None;
        }
        Some(if self.is_answered(question) {
            QuestionStatus::Answered
        } else if self.is_marked(question) {
            QuestionStatus::Marked
        } else {
            QuestionStatus::Unanswered
        })
    }

    /// Status of every question, in order.
    pub fn statuses(&self) -> impl Iterator<Item = QuestionStatus> + '_ {
        (0..self.question_count()).filter_map(|question| self.status(question))
    }

    /// Record `option` for `question`, replacing any previous answer.
    ///
    /// Mode policy (locking practice answers) lives with the caller.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Finished`, `SessionError::QuestionOutOfRange`, or
    /// `SessionError::OptionOutOfRange`.
    pub fn record_answer(&mut self, question: usize, option: usize) -> Result<(), SessionError> {
        self.ensure_active()?;
        let count = self.option_count(question)?;
        if option >= count {
            return Err(SessionError::OptionOutOfRange {
                question,
                option,
                count,
            });
        }
        self.answers[question] = Some(option);
        Ok(())
    }

    /// Flip the review flag of `question` and return the new value.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Finished` or `SessionError::QuestionOutOfRange`.
    pub fn toggle_mark(&mut self, question: usize) -> Result<bool, SessionError> {
        self.ensure_active()?;
        self.ensure_question(question)?;
        let flag = &mut self.marked[question];
        *flag = !*flag;
        Ok(*flag)
    }

    /// # Errors
    ///
    /// Returns `SessionError::Finished` or `SessionError::QuestionOutOfRange`.
    pub fn set_question_index(&mut self, index: usize) -> Result<(), SessionError> {
        self.ensure_active()?;
        self.ensure_question(index)?;
        self.question_index = index;
        Ok(())
    }

    /// Mark the session finished. Returns `false` if it already was.
    pub fn finish(&mut self, at: DateTime<Utc>) -> bool {
        if self.is_finished() {
            return false;
        }
        self.finished_at = Some(at);
        true
    }

    fn option_count(&self, question: usize) -> Result<usize, SessionError> {
        self.option_counts
            .get(question)
            .copied()
            .ok_or(SessionError::QuestionOutOfRange {
                index: question,
                count: self.question_count(),
            })
    }

    fn ensure_question(&self, question: usize) -> Result<(), SessionError> {
        self.option_count(question).map(|_| ())
    }

    fn ensure_active(&self) -> Result<(), SessionError> {
        if self.is_finished() {
            return Err(SessionError::Finished);
        }
        Ok(())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
