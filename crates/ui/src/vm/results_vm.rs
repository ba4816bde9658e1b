use quiz_core::scoring::FeedbackTier;
use services::QuizFlow;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultsVm {
    pub percentage: u32,
    pub correct: u32,
    pub incorrect: u32,
    pub unanswered: u32,
    pub marked: usize,
    pub total: u32,
    pub tier: FeedbackTier,
}

impl ResultsVm {
    #[must_use]
    pub fn headline(&self) -> String {
        format!("You scored {} out of {}", self.correct, self.total)
    }

    #[must_use]
    pub fn feedback(&self) -> &'static str {
        self.tier.message()
    }

    #[must_use]
    pub fn tier_class(&self) -> &'static str {
        match self.tier {
            FeedbackTier::Excellent => "feedback feedback--excellent",
            FeedbackTier::Good => "feedback feedback--good",
            FeedbackTier::KeepStudying => "feedback feedback--study",
        }
    }
}

/// `None` until the quiz has finished.
#[must_use]
pub fn map_results(flow: &QuizFlow) -> Option<ResultsVm> {
    let score = flow.score()?;
    let marked = flow.session().map_or(0, |session| session.marked_count());
    Some(ResultsVm {
        percentage: score.percentage,
        correct: score.correct,
        incorrect: score.incorrect,
        unanswered: score.unanswered,
        marked,
        total: score.total,
        tier: score.tier(),
    })
}
