use dioxus::prelude::*;
use quiz_core::model::ViewState;
use services::QuizFlow;

use crate::context::AppContext;

use super::{QuizView, ResultsView, SetupView};

/// Owns the window's quiz flow and shows the screen for its current view.
#[component]
pub fn QuizRoot() -> Element {
    let ctx = use_context::<AppContext>();
    let flow = use_signal(|| ctx.new_flow());
    rsx! { QuizScreens { flow } }
}

#[component]
pub fn QuizScreens(flow: Signal<QuizFlow>) -> Element {
    let view = flow.read().view();
    match view {
        ViewState::Setup => rsx! { SetupView { flow } },
        ViewState::Quiz => rsx! { QuizView { flow } },
        ViewState::Results => rsx! { ResultsView { flow } },
    }
}
