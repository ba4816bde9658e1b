use std::fmt;

/// How a quiz session treats answers while it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuizMode {
    /// Answers stay hidden until the end and can be changed freely.
    Exam,
    /// Answers are revealed and locked as soon as they are given.
    Practice,
}

impl QuizMode {
    pub const ALL: [QuizMode; 2] = [QuizMode::Exam, QuizMode::Practice];

    /// Whether correctness is shown right after an answer is recorded.
    #[must_use]
    pub fn reveals_answers(self) -> bool {
        matches!(self, QuizMode::Practice)
    }

    /// Whether the first answer to a question is final.
    #[must_use]
    pub fn locks_answers(self) -> bool {
        matches!(self, QuizMode::Practice)
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            QuizMode::Exam => "Exam Mode",
            QuizMode::Practice => "Practice Mode",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            QuizMode::Exam => "Fixed time, full results at the end",
            QuizMode::Practice => "AI explanations after every answer",
        }
    }
}

impl fmt::Display for QuizMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizMode::Exam => f.write_str("exam"),
            QuizMode::Practice => f.write_str("practice"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_practice_reveals_and_locks() {
        assert!(!QuizMode::Exam.reveals_answers());
        assert!(!QuizMode::Exam.locks_answers());
        assert!(QuizMode::Practice.reveals_answers());
        assert!(QuizMode::Practice.locks_answers());
    }
}
