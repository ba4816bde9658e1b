mod controller;
mod explanation;
mod flow;

// Public API of the quiz subsystem.
pub use crate::error::QuizError;
pub use controller::{QuizController, QuizSnapshot};
pub use explanation::{ExplanationReply, ExplanationRequest, ExplanationSlot, ExplanationTicket};
pub use flow::{QuizFlow, SelectOutcome};
