use crate::model::{QuestionBank, Session};

/// Lowest percentage that earns the top feedback tier.
pub const EXCELLENT_THRESHOLD: u32 = 80;
/// Lowest percentage that earns the middle feedback tier.
pub const GOOD_THRESHOLD: u32 = 50;

/// Feedback band for a final percentage. Lower bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedbackTier {
    Excellent,
    Good,
    KeepStudying,
}

impl FeedbackTier {
    #[must_use]
    pub fn from_percentage(percentage: u32) -> Self {
        if percentage >= EXCELLENT_THRESHOLD {
            FeedbackTier::Excellent
        } else if percentage >= GOOD_THRESHOLD {
            FeedbackTier::Good
        } else {
            FeedbackTier::KeepStudying
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            FeedbackTier::Excellent => {
                "Excellent performance! You have a deep understanding of the material."
            }
            FeedbackTier::Good => {
                "Good job! You know the basics well, but there's room for improvement in specific areas."
            }
            FeedbackTier::KeepStudying => {
                "Keep studying! The topic is complex. Try the Practice mode for better insights."
            }
        }
    }
}

/// Final tally of a quiz attempt.
///
/// `incorrect` always equals `total - correct`, i.e. wrong answers plus unanswered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub total: u32,
    pub correct: u32,
    pub incorrect: u32,
    pub unanswered: u32,
    pub percentage: u32,
}

impl Score {
    /// Score `answers` against the correct option of each question.
    ///
    /// Extra entries on either side are ignored; a missing answer counts as wrong.
    #[must_use]
    pub fn from_answers(
        correct_answers: impl IntoIterator<Item = usize>,
        answers: &[Option<usize>],
    ) -> Self {
        let total = saturating_u32(answers.len());
        let correct = correct_answers
            .into_iter()
            .zip(answers)
            .filter(|(correct, answer)| **answer == Some(*correct))
            .count();
        let unanswered = answers.iter().filter(|answer| answer.is_none()).count();
        let correct = saturating_u32(correct);

        Self {
            total,
            correct,
            incorrect: total - correct,
            unanswered: saturating_u32(unanswered),
            percentage: percentage(correct, total),
        }
    }

    #[must_use]
    pub fn for_session(bank: &QuestionBank, session: &Session) -> Self {
        Self::from_answers(bank.correct_answers(), session.answers())
    }

    #[must_use]
    pub fn tier(&self) -> FeedbackTier {
        FeedbackTier::from_percentage(self.percentage)
    }

    /// Answers given that did not match the correct option.
    #[must_use]
    pub fn wrong(&self) -> u32 {
        self.incorrect - self.unanswered
    }
}

/// `round(100 * correct / total)` with halves rounded up. Zero when `total` is zero.
#[must_use]
pub fn percentage(correct: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let correct = u64::from(correct);
    let total = u64::from(total);
    let rounded = (200 * correct + total) / (2 * total);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

fn saturating_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
