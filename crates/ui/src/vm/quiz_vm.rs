use quiz_core::model::{Question, QuestionStatus, QuizMode, Session};
use services::{ExplanationSlot, NOT_AVAILABLE_FALLBACK, QuizFlow};

use super::time_fmt::TimerLabelVm;

/// `A`, `B`, `C`, ... for option positions; `?` past `Z`.
#[must_use]
pub fn option_letter(index: usize) -> char {
    u8::try_from(index)
        .ok()
        .filter(|index| *index < 26)
        .map_or('?', |index| char::from(b'A' + index))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionTone {
    Idle,
    Selected,
    Correct,
    Incorrect,
}

impl OptionTone {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            OptionTone::Idle => "option",
            OptionTone::Selected => "option option--selected",
            OptionTone::Correct => "option option--correct",
            OptionTone::Incorrect => "option option--incorrect",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub index: usize,
    pub letter: char,
    pub text: String,
    pub tone: OptionTone,
    pub disabled: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaletteItemVm {
    pub index: usize,
    pub status: QuestionStatus,
    pub current: bool,
}

impl PaletteItemVm {
    #[must_use]
    pub fn number(&self) -> usize {
        self.index + 1
    }

    #[must_use]
    pub fn class(&self) -> String {
        let status = match self.status {
            QuestionStatus::Answered => "answered",
            QuestionStatus::Marked => "marked",
            QuestionStatus::Unanswered => "unanswered",
        };
        if self.current {
            format!("palette__item palette__item--{status} palette__item--current")
        } else {
            format!("palette__item palette__item--{status}")
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExplanationVm {
    Loading,
    Text(String),
}

/// Everything the quiz screen renders for the question on screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizScreenVm {
    pub mode: QuizMode,
    pub timer: TimerLabelVm,
    pub question_number: usize,
    pub question_count: usize,
    pub answered_count: usize,
    pub progress_percent: usize,
    pub prompt: String,
    pub marked: bool,
    pub options: Vec<OptionVm>,
    pub explanation: Option<ExplanationVm>,
    pub palette: Vec<PaletteItemVm>,
    pub is_first: bool,
    pub is_last: bool,
}

impl QuizScreenVm {
    #[must_use]
    pub fn next_label(&self) -> &'static str {
        if self.is_last { "Finish" } else { "Next" }
    }

    #[must_use]
    pub fn mark_label(&self) -> &'static str {
        if self.marked { "Unmark" } else { "Mark for review" }
    }

    #[must_use]
    pub fn progress_style(&self) -> String {
        format!("width: {}%", self.progress_percent)
    }
}

/// `None` unless a quiz is on screen.
#[must_use]
pub fn map_quiz_screen(flow: &QuizFlow) -> Option<QuizScreenVm> {
    let session = flow.session().filter(|session| !session.is_finished())?;
    let question = flow.current_question()?;
    let index = session.question_index();
    let count = session.question_count();
    let chosen = session.answer(index);
    let mode = session.mode();

    Some(QuizScreenVm {
        mode,
        timer: TimerLabelVm::from_remaining(flow.remaining_secs().unwrap_or(0)),
        question_number: index + 1,
        question_count: count,
        answered_count: session.answered_count(),
        progress_percent: (index + 1) * 100 / count.max(1),
        prompt: question.prompt().to_string(),
        marked: session.is_marked(index),
        options: map_options(question, mode, chosen),
        explanation: map_explanation(question, mode, chosen, index, flow.explanation()),
        palette: map_palette(session),
        is_first: session.is_first(),
        is_last: session.is_last(),
    })
}

fn map_options(question: &Question, mode: QuizMode, chosen: Option<usize>) -> Vec<OptionVm> {
    let revealed = mode.reveals_answers() && chosen.is_some();
    question
        .options()
        .iter()
        .enumerate()
        .map(|(index, text)| {
            let picked = chosen == Some(index);
            let tone = if revealed {
                if question.is_correct(index) {
                    OptionTone::Correct
                } else if picked {
                    OptionTone::Incorrect
                } else {
                    OptionTone::Idle
                }
            } else if picked {
                OptionTone::Selected
            } else {
                OptionTone::Idle
            };
            OptionVm {
                index,
                letter: option_letter(index),
                text: text.clone(),
                tone,
                disabled: revealed,
            }
        })
        .collect()
}

fn map_explanation(
    question: &Question,
    mode: QuizMode,
    chosen: Option<usize>,
    index: usize,
    slot: &ExplanationSlot,
) -> Option<ExplanationVm> {
    if !mode.reveals_answers() || chosen.is_none() {
        return None;
    }
    let explanation = match slot {
        ExplanationSlot::Loading(ticket) if ticket.question() == index => ExplanationVm::Loading,
        ExplanationSlot::Ready {
            question: ready_for,
            text,
        } if *ready_for == index => ExplanationVm::Text(text.clone()),
        _ => ExplanationVm::Text(
            question
                .explanation()
                .unwrap_or(NOT_AVAILABLE_FALLBACK)
                .to_string(),
        ),
    };
    Some(explanation)
}

fn map_palette(session: &Session) -> Vec<PaletteItemVm> {
    let current = session.question_index();
    session
        .statuses()
        .enumerate()
        .map(|(index, status)| PaletteItemVm {
            index,
            status,
            current: index == current,
        })
        .collect()
}
