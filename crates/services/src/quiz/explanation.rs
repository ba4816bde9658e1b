use crate::explanation_service::ExplanationProvider;

/// Identity of one explanation fetch.
///
/// A reply is only applied while the slot still waits on the same ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExplanationTicket {
    question: usize,
    request: u64,
}

impl ExplanationTicket {
    pub(crate) fn new(question: usize, request: u64) -> Self {
        Self { question, request }
    }

    /// Question index the fetch was issued for.
    #[must_use]
    pub fn question(&self) -> usize {
        self.question
    }
}

/// Explanation state of the question on screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ExplanationSlot {
    /// Nothing requested for the current question.
    #[default]
    Empty,
    /// A fetch is in flight.
    Loading(ExplanationTicket),
    /// Text arrived for `question`.
    Ready { question: usize, text: String },
}

impl ExplanationSlot {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, ExplanationSlot::Loading(_))
    }

    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            ExplanationSlot::Ready { text, .. } => Some(text),
            _ => None,
        }
    }
}

/// Everything needed to run a fetch away from the quiz state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplanationRequest {
    pub ticket: ExplanationTicket,
    pub question: String,
    pub correct_answer: String,
}

impl ExplanationRequest {
    /// Run the fetch. The provider never fails, so neither does this.
    pub async fn resolve(self, provider: &dyn ExplanationProvider) -> ExplanationReply {
        let text = provider.explain(&self.question, &self.correct_answer).await;
        ExplanationReply {
            ticket: self.ticket,
            text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplanationReply {
    pub ticket: ExplanationTicket,
    pub text: String,
}
