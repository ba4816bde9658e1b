use std::fmt;

use chrono::{DateTime, Utc};
use quiz_core::model::{Question, QuestionBank, QuizDuration, QuizMode, Session, ViewState};
use quiz_core::scoring::Score;
use quiz_core::timer::{QuizTimer, TimerTick};

use crate::Clock;
use crate::error::QuizError;

/// Read-only view of the controller for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSnapshot<'a> {
    pub view: ViewState,
    pub session: Option<&'a Session>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FinishReason {
    Manual,
    TimeUp,
}

impl fmt::Display for FinishReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FinishReason::Manual => f.write_str("manual"),
            FinishReason::TimeUp => f.write_str("time up"),
        }
    }
}

//
// ─── CONTROLLER ────────────────────────────────────────────────────────────────
//

/// Owns the active screen, the live session and its countdown.
///
/// A session exists exactly when the screen is `Quiz` or `Results`, and a
/// countdown runs only while the screen is `Quiz`.
pub struct QuizController {
    bank: QuestionBank,
    clock: Clock,
    view: ViewState,
    session: Option<Session>,
    timer: Option<QuizTimer>,
}

impl QuizController {
    #[must_use]
    pub fn new(bank: QuestionBank, clock: Clock) -> Self {
        Self {
            bank,
            clock,
            view: ViewState::Setup,
            session: None,
            timer: None,
        }
    }

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Mutable access to the clock, for stepping a manual clock.
    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    #[must_use]
    pub fn view(&self) -> ViewState {
        self.view
    }

    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn snapshot(&self) -> QuizSnapshot<'_> {
        QuizSnapshot {
            view: self.view,
            session: self.session.as_ref(),
        }
    }

    /// Seconds left on the countdown, while the quiz screen is active.
    #[must_use]
    pub fn remaining_secs(&self) -> Option<u32> {
        self.timer.as_ref().map(QuizTimer::remaining_secs)
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        let session = self.session.as_ref()?;
        self.bank.get(session.question_index())
    }

    /// Score of the live session, available once it has finished.
    #[must_use]
    pub fn score(&self) -> Option<Score> {
        self.session
            .as_ref()
            .filter(|session| session.is_finished())
            .map(|session| Score::for_session(&self.bank, session))
    }

    /// Start a fresh session and switch to the quiz screen.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::WrongView` outside the setup screen and
    /// `QuizError::Duration` for an invalid duration.
    pub fn start_quiz(&mut self, mode: QuizMode, minutes: i64) -> Result<&Session, QuizError> {
        if self.view != ViewState::Setup {
            return Err(QuizError::WrongView(self.view));
        }
        let duration = QuizDuration::from_minutes(minutes)?;
        let started_at = self.clock.now();
        let session = Session::start(&self.bank, mode, duration, started_at)?;

        log::info!(
            "starting {mode} quiz: {} questions, {} minutes",
            session.question_count(),
            duration.minutes()
        );
        self.timer = Some(QuizTimer::start(started_at, duration));
        self.view = ViewState::Quiz;
        Ok(self.session.insert(session))
    }

    /// # Errors
    ///
    /// Returns `QuizError` outside the quiz screen or for out-of-range indices.
    pub fn record_answer(&mut self, question: usize, option: usize) -> Result<(), QuizError> {
        self.active_session_mut()?.record_answer(question, option)?;
        log::debug!("recorded option {option} for question {question}");
        Ok(())
    }

    /// Flip the review flag and return its new value.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` outside the quiz screen or for an out-of-range index.
    pub fn toggle_mark(&mut self, question: usize) -> Result<bool, QuizError> {
        let marked = self.active_session_mut()?.toggle_mark(question)?;
        log::debug!("question {question} marked for review: {marked}");
        Ok(marked)
    }

    /// # Errors
    ///
    /// Returns `QuizError` outside the quiz screen or for an out-of-range index.
    pub fn set_question_index(&mut self, index: usize) -> Result<(), QuizError> {
        self.active_session_mut()?.set_question_index(index)?;
        Ok(())
    }

    /// Finish the session and show results. Repeated calls change nothing.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoSession` on the setup screen.
    pub fn finish(&mut self) -> Result<(), QuizError> {
        let now = self.clock.now();
        self.complete(now, FinishReason::Manual)
    }

    /// Drop the session and return to setup.
    pub fn reset(&mut self) {
        if self.session.take().is_some() {
            log::info!("quiz reset");
        }
        self.timer = None;
        self.view = ViewState::Setup;
    }

    /// Advance the countdown using the controller's clock.
    pub fn tick(&mut self) -> TimerTick {
        let now = self.clock.now();
        self.tick_at(now)
    }

    /// Advance the countdown to `now`, finishing the session when it runs out.
    pub fn tick_at(&mut self, now: DateTime<Utc>) -> TimerTick {
        let Some(timer) = self.timer.as_mut() else {
            return TimerTick::Stopped;
        };
        let tick = timer.tick(now);
        if tick == TimerTick::Expired {
            // The timer only exists on the quiz screen, so a session is present.
            let _ = self.complete(now, FinishReason::TimeUp);
        }
        tick
    }

    fn complete(&mut self, at: DateTime<Utc>, reason: FinishReason) -> Result<(), QuizError> {
        let session = self.session.as_mut().ok_or(QuizError::NoSession)?;
        if session.finish(at) {
            let answered = session.answered_count();
            let total = session.question_count();
            log::info!("quiz finished ({reason}): {answered}/{total} answered");
        }
        self.timer = None;
        self.view = ViewState::Results;
        Ok(())
    }

    fn active_session_mut(&mut self) -> Result<&mut Session, QuizError> {
        match (self.view, self.session.as_mut()) {
            (ViewState::Quiz, Some(session)) => Ok(session),
            (_, None) => Err(QuizError::NoSession),
            (view, Some(_)) => Err(QuizError::WrongView(view)),
        }
    }
}

impl fmt::Debug for QuizController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizController")
            .field("questions", &self.bank.len())
            .field("view", &self.view)
            .field("session", &self.session)
            .field("remaining_secs", &self.remaining_secs())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use quiz_core::model::SessionError;
    use quiz_core::time::{fixed_clock, fixed_now};

    fn controller() -> QuizController {
        QuizController::new(QuestionBank::bundled().unwrap(), fixed_clock())
    }

    fn started(mode: QuizMode, minutes: i64) -> QuizController {
        let mut controller = controller();
        controller.start_quiz(mode, minutes).unwrap();
        controller
    }

    #[test]
    fn starts_in_setup_without_session() {
        let controller = controller();
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.view, ViewState::Setup);
        assert!(snapshot.session.is_none());
        assert_eq!(controller.remaining_secs(), None);
    }

    #[test]
    fn start_creates_fresh_session() {
        let controller = started(QuizMode::Exam, 33);
        let session = controller.session().unwrap();
        assert_eq!(controller.view(), ViewState::Quiz);
        assert_eq!(session.question_count(), controller.bank().len());
        assert_eq!(session.started_at(), fixed_now());
        assert_eq!(session.duration().minutes(), 33);
        assert_eq!(controller.remaining_secs(), Some(33 * 60));
    }

    #[test]
    fn invalid_duration_keeps_setup() {
        let mut controller = controller();
        let err = controller.start_quiz(QuizMode::Exam, 0).unwrap_err();
        assert!(matches!(err, QuizError::Duration(_)));
        assert_eq!(controller.view(), ViewState::Setup);
        assert!(controller.session().is_none());
    }

    #[test]
    fn start_is_only_allowed_from_setup() {
        let mut controller = started(QuizMode::Exam, 10);
        assert_eq!(
            controller.start_quiz(QuizMode::Practice, 10).unwrap_err(),
            QuizError::WrongView(ViewState::Quiz)
        );
    }

    #[test]
    fn operations_need_a_session() {
        let mut controller = controller();
        assert_eq!(controller.record_answer(0, 0), Err(QuizError::NoSession));
        assert_eq!(controller.toggle_mark(0), Err(QuizError::NoSession));
        assert_eq!(controller.set_question_index(0), Err(QuizError::NoSession));
        assert_eq!(controller.finish(), Err(QuizError::NoSession));
    }

    #[test]
    fn out_of_range_index_is_reported() {
        let mut controller = started(QuizMode::Exam, 10);
        let count = controller.bank().len();
        assert_eq!(
            controller.set_question_index(count),
            Err(QuizError::Session(SessionError::QuestionOutOfRange {
                index: count,
                count
            }))
        );
        assert_eq!(controller.session().unwrap().question_index(), 0);
    }

    #[test]
    fn finish_is_idempotent() {
        let mut controller = started(QuizMode::Exam, 10);
        controller.record_answer(0, 1).unwrap();
        controller.finish().unwrap();
        let first = controller.session().cloned();
        controller.clock_mut().advance_secs(30);
        controller.finish().unwrap();

        assert_eq!(controller.view(), ViewState::Results);
        assert_eq!(controller.session().cloned(), first);
        assert_eq!(controller.remaining_secs(), None);
        assert_eq!(
            controller.record_answer(0, 0),
            Err(QuizError::WrongView(ViewState::Results))
        );
    }

    #[test]
    fn reset_discards_session() {
        let mut controller = started(QuizMode::Practice, 10);
        controller.record_answer(0, 0).unwrap();
        controller.toggle_mark(1).unwrap();
        controller.reset();
        assert_eq!(controller.view(), ViewState::Setup);
        assert!(controller.session().is_none());

        controller.start_quiz(QuizMode::Exam, 5).unwrap();
        let session = controller.session().unwrap();
        assert_eq!(session.answered_count(), 0);
        assert_eq!(session.marked_count(), 0);
        assert_eq!(session.mode(), QuizMode::Exam);
    }

    #[test]
    fn timer_forces_results_after_deadline() {
        let mut controller = started(QuizMode::Exam, 1);
        for _ in 0..59 {
            controller.clock_mut().advance_secs(1);
            assert!(matches!(controller.tick(), TimerTick::Running { .. }));
        }
        controller.clock_mut().advance_secs(1);
        assert_eq!(controller.tick(), TimerTick::Expired);

        let session = controller.session().unwrap();
        assert!(session.is_finished());
        assert_eq!(session.finished_at(), Some(fixed_now() + Duration::seconds(60)));
        assert_eq!(controller.view(), ViewState::Results);

        controller.clock_mut().advance_secs(1);
        assert_eq!(controller.tick(), TimerTick::Stopped);
    }

    #[test]
    fn no_tick_after_manual_finish() {
        let mut controller = started(QuizMode::Exam, 1);
        controller.finish().unwrap();
        assert_eq!(
            controller.tick_at(fixed_now() + Duration::seconds(120)),
            TimerTick::Stopped
        );
        assert_eq!(controller.session().unwrap().finished_at(), Some(fixed_now()));
    }

    #[test]
    fn score_is_available_after_finish() {
        let mut controller = started(QuizMode::Exam, 10);
        let correct = controller.bank().get(0).unwrap().correct_answer();
        controller.record_answer(0, correct).unwrap();
        assert!(controller.score().is_none());

        controller.finish().unwrap();
        let score = controller.score().unwrap();
        assert_eq!(score.correct, 1);
        assert_eq!(score.total, u32::try_from(controller.bank().len()).unwrap());
    }
}
