use chrono::{DateTime, Utc};
use quiz_core::model::{Question, QuestionBank, QuizMode, Session, SessionError, ViewState};
use quiz_core::scoring::Score;
use quiz_core::timer::TimerTick;

use crate::Clock;
use crate::error::QuizError;

use super::controller::{QuizController, QuizSnapshot};
use super::explanation::{ExplanationReply, ExplanationRequest, ExplanationSlot, ExplanationTicket};

/// What happened when an option was chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The answer was stored; nothing else to do.
    Recorded,
    /// The question was already answered in practice mode; nothing changed.
    Ignored,
    /// The answer was stored and an explanation should be fetched.
    Explain(ExplanationRequest),
}

/// Answering and navigation rules for the quiz screen.
///
/// Wraps the controller with the mode-specific answer policy and owns the
/// explanation slot, which never lives in the session itself.
#[derive(Debug)]
pub struct QuizFlow {
    controller: QuizController,
    explanation: ExplanationSlot,
    next_request: u64,
}

impl QuizFlow {
    #[must_use]
    pub fn new(bank: QuestionBank, clock: Clock) -> Self {
        Self::from_controller(QuizController::new(bank, clock))
    }

    #[must_use]
    pub fn from_controller(controller: QuizController) -> Self {
        Self {
            controller,
            explanation: ExplanationSlot::Empty,
            next_request: 0,
        }
    }

    #[must_use]
    pub fn controller(&self) -> &QuizController {
        &self.controller
    }

    pub fn clock_mut(&mut self) -> &mut Clock {
        self.controller.clock_mut()
    }

    #[must_use]
    pub fn view(&self) -> ViewState {
        self.controller.view()
    }

    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.controller.session()
    }

    #[must_use]
    pub fn snapshot(&self) -> QuizSnapshot<'_> {
        self.controller.snapshot()
    }

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        self.controller.bank()
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.controller.current_question()
    }

    #[must_use]
    pub fn remaining_secs(&self) -> Option<u32> {
        self.controller.remaining_secs()
    }

    #[must_use]
    pub fn score(&self) -> Option<Score> {
        self.controller.score()
    }

    #[must_use]
    pub fn explanation(&self) -> &ExplanationSlot {
        &self.explanation
    }

    /// # Errors
    ///
    /// See [`QuizController::start_quiz`].
    pub fn start(&mut self, mode: QuizMode, minutes: i64) -> Result<(), QuizError> {
        self.controller.start_quiz(mode, minutes)?;
        self.explanation = ExplanationSlot::Empty;
        Ok(())
    }

    /// Choose `option` for the question on screen.
    ///
    /// Exam answers can be changed freely. A practice answer is final: later
    /// choices are ignored, and the first one asks for an explanation.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` outside the quiz screen or for an out-of-range option.
    pub fn select_option(&mut self, option: usize) -> Result<SelectOutcome, QuizError> {
        let (question, mode, answered) = {
            let session = self.quiz_session()?;
            let question = session.question_index();
            (question, session.mode(), session.is_answered(question))
        };

        if mode.locks_answers() && answered {
            log::debug!("ignoring new choice for locked question {question}");
            return Ok(SelectOutcome::Ignored);
        }

        self.controller.record_answer(question, option)?;
        if !mode.reveals_answers() {
            return Ok(SelectOutcome::Recorded);
        }

        let count = self.controller.bank().len();
        let current = self
            .controller
            .bank()
            .get(question)
            .ok_or(SessionError::QuestionOutOfRange {
                index: question,
                count,
            })?;
        let ticket = ExplanationTicket::new(question, self.next_request);
        let request = ExplanationRequest {
            ticket,
            question: current.prompt().to_string(),
            correct_answer: current.correct_option().to_string(),
        };
        self.next_request += 1;
        self.explanation = ExplanationSlot::Loading(ticket);
        Ok(SelectOutcome::Explain(request))
    }

    /// Apply a finished fetch. Returns `false` when the reply is stale: the user
    /// moved on, the quiz ended, or a newer fetch replaced it.
    pub fn apply_explanation(&mut self, reply: ExplanationReply) -> bool {
        let current = match self.quiz_session() {
            Ok(session) => session.question_index(),
            Err(_) => {
                log::debug!("discarding explanation after the quiz ended");
                return false;
            }
        };

        let fresh = matches!(
            &self.explanation,
            ExplanationSlot::Loading(ticket)
                if *ticket == reply.ticket && ticket.question() == current
        );
        if !fresh {
            log::debug!(
                "discarding stale explanation for question {}",
                reply.ticket.question()
            );
            return false;
        }

        self.explanation = ExplanationSlot::Ready {
            question: current,
            text: reply.text,
        };
        true
    }

    /// Go to the next question, or finish on the last one.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` outside the quiz screen.
    pub fn next(&mut self) -> Result<(), QuizError> {
        let (index, is_last) = {
            let session = self.quiz_session()?;
            (session.question_index(), session.is_last())
        };
        self.explanation = ExplanationSlot::Empty;
        if is_last {
            self.controller.finish()
        } else {
            self.controller.set_question_index(index + 1)
        }
    }

    /// Go to the previous question. Does nothing on the first one.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` outside the quiz screen.
    pub fn previous(&mut self) -> Result<(), QuizError> {
        let index = self.quiz_session()?.question_index();
        self.explanation = ExplanationSlot::Empty;
        if index == 0 {
            return Ok(());
        }
        self.controller.set_question_index(index - 1)
    }

    /// Jump straight to `index` from the palette.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` outside the quiz screen or for an out-of-range index.
    pub fn jump_to(&mut self, index: usize) -> Result<(), QuizError> {
        self.controller.set_question_index(index)?;
        self.explanation = ExplanationSlot::Empty;
        Ok(())
    }

    /// Flip the review flag of the question on screen.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` outside the quiz screen.
    pub fn toggle_mark(&mut self) -> Result<bool, QuizError> {
        let index = self.quiz_session()?.question_index();
        self.controller.toggle_mark(index)
    }

    /// # Errors
    ///
    /// Returns `QuizError::NoSession` on the setup screen.
    pub fn finish(&mut self) -> Result<(), QuizError> {
        self.controller.finish()?;
        self.explanation = ExplanationSlot::Empty;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.controller.reset();
        self.explanation = ExplanationSlot::Empty;
    }

    pub fn tick(&mut self) -> TimerTick {
        let tick = self.controller.tick();
        self.after_tick(tick)
    }

    pub fn tick_at(&mut self, now: DateTime<Utc>) -> TimerTick {
        let tick = self.controller.tick_at(now);
        self.after_tick(tick)
    }

    fn after_tick(&mut self, tick: TimerTick) -> TimerTick {
        if tick == TimerTick::Expired {
            self.explanation = ExplanationSlot::Empty;
        }
        tick
    }

    fn quiz_session(&self) -> Result<&Session, QuizError> {
        match (self.controller.view(), self.controller.session()) {
            (ViewState::Quiz, Some(session)) => Ok(session),
            (_, None) => Err(QuizError::NoSession),
            (view, Some(_)) => Err(QuizError::WrongView(view)),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::time::fixed_clock;

    fn flow(mode: QuizMode) -> QuizFlow {
        let mut flow = QuizFlow::new(QuestionBank::bundled().unwrap(), fixed_clock());
        flow.start(mode, 10).unwrap();
        flow
    }

    fn expect_request(outcome: SelectOutcome) -> ExplanationRequest {
        match outcome {
            SelectOutcome::Explain(request) => request,
            other => panic!("expected an explanation request, got {other:?}"),
        }
    }

    fn reply(request: &ExplanationRequest, text: &str) -> ExplanationReply {
        ExplanationReply {
            ticket: request.ticket,
            text: text.to_string(),
        }
    }

    #[test]
    fn exam_answers_can_change() {
        let mut flow = flow(QuizMode::Exam);
        assert_eq!(flow.select_option(1).unwrap(), SelectOutcome::Recorded);
        assert_eq!(flow.select_option(3).unwrap(), SelectOutcome::Recorded);
        assert_eq!(flow.session().unwrap().answer(0), Some(3));
        assert_eq!(flow.explanation(), &ExplanationSlot::Empty);
    }

    #[test]
    fn practice_answer_is_locked() {
        let mut flow = flow(QuizMode::Practice);
        let request = expect_request(flow.select_option(2).unwrap());
        assert_eq!(request.ticket.question(), 0);
        assert!(flow.explanation().is_loading());

        assert_eq!(flow.select_option(0).unwrap(), SelectOutcome::Ignored);
        assert_eq!(flow.session().unwrap().answer(0), Some(2));
        assert!(flow.explanation().is_loading());
    }

    #[test]
    fn practice_request_carries_correct_option_text() {
        let mut flow = flow(QuizMode::Practice);
        let question = flow.current_question().unwrap().clone();
        let request = expect_request(flow.select_option(0).unwrap());
        assert_eq!(request.question, question.prompt());
        assert_eq!(request.correct_answer, question.correct_option());
    }

    #[test]
    fn reply_fills_the_slot_for_the_current_question() {
        let mut flow = flow(QuizMode::Practice);
        let request = expect_request(flow.select_option(1).unwrap());
        assert!(flow.apply_explanation(reply(&request, "Because.")));
        assert_eq!(
            flow.explanation(),
            &ExplanationSlot::Ready {
                question: 0,
                text: "Because.".into()
            }
        );
    }

    #[test]
    fn stale_reply_after_jump_is_discarded() {
        let mut flow = flow(QuizMode::Practice);
        flow.jump_to(2).unwrap();
        let request = expect_request(flow.select_option(0).unwrap());
        flow.jump_to(5).unwrap();

        assert!(!flow.apply_explanation(reply(&request, "late")));
        assert_eq!(flow.explanation(), &ExplanationSlot::Empty);
        assert_eq!(flow.session().unwrap().question_index(), 5);
    }

    #[test]
    fn stale_reply_after_returning_is_discarded() {
        let mut flow = flow(QuizMode::Practice);
        let request = expect_request(flow.select_option(0).unwrap());
        flow.next().unwrap();
        flow.previous().unwrap();
        assert!(!flow.apply_explanation(reply(&request, "late")));
        assert_eq!(flow.explanation(), &ExplanationSlot::Empty);
    }

    #[test]
    fn reply_after_finish_is_discarded() {
        let mut flow = flow(QuizMode::Practice);
        let request = expect_request(flow.select_option(0).unwrap());
        flow.finish().unwrap();
        assert!(!flow.apply_explanation(reply(&request, "late")));
        assert_eq!(flow.view(), ViewState::Results);
    }

    #[test]
    fn next_on_last_question_finishes() {
        let mut flow = flow(QuizMode::Exam);
        let last = flow.bank().len() - 1;
        flow.jump_to(last).unwrap();
        flow.next().unwrap();
        assert_eq!(flow.view(), ViewState::Results);
        let session = flow.session().unwrap();
        assert!(session.is_finished());
        assert_eq!(session.question_index(), last);
    }

    #[test]
    fn previous_on_first_question_is_noop() {
        let mut flow = flow(QuizMode::Exam);
        flow.previous().unwrap();
        assert_eq!(flow.session().unwrap().question_index(), 0);
        assert_eq!(flow.view(), ViewState::Quiz);
    }

    #[test]
    fn navigation_clears_the_slot() {
        let mut flow = flow(QuizMode::Practice);
        let request = expect_request(flow.select_option(0).unwrap());
        flow.apply_explanation(reply(&request, "text"));
        flow.next().unwrap();
        assert_eq!(flow.explanation(), &ExplanationSlot::Empty);
        assert_eq!(flow.session().unwrap().question_index(), 1);
    }

    #[test]
    fn mark_toggles_current_question() {
        let mut flow = flow(QuizMode::Exam);
        flow.jump_to(3).unwrap();
        assert!(flow.toggle_mark().unwrap());
        assert!(flow.session().unwrap().is_marked(3));
        assert!(!flow.toggle_mark().unwrap());
        assert!(!flow.session().unwrap().is_marked(3));
    }

    #[test]
    fn invalid_jump_keeps_position_and_slot() {
        let mut flow = flow(QuizMode::Practice);
        expect_request(flow.select_option(0).unwrap());
        let count = flow.bank().len();
        assert!(flow.jump_to(count).is_err());
        assert_eq!(flow.session().unwrap().question_index(), 0);
        assert!(flow.explanation().is_loading());
    }

    #[test]
    fn timeout_clears_pending_explanation() {
        let mut flow = QuizFlow::new(QuestionBank::bundled().unwrap(), fixed_clock());
        flow.start(QuizMode::Practice, 1).unwrap();
        let request = expect_request(flow.select_option(0).unwrap());
        flow.clock_mut().advance_secs(60);
        assert_eq!(flow.tick(), TimerTick::Expired);
        assert_eq!(flow.explanation(), &ExplanationSlot::Empty);
        assert!(!flow.apply_explanation(reply(&request, "late")));
    }
}
