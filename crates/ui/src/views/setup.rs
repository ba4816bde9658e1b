use dioxus::prelude::*;
use quiz_core::model::{QuizDuration, QuizMode};
use services::QuizFlow;

use crate::context::AppContext;
use crate::vm::{map_mode_cards, parse_minutes};

#[component]
pub fn SetupView(flow: Signal<QuizFlow>) -> Element {
    let ctx = use_context::<AppContext>();
    let mut flow = flow;
    let config = ctx.config();
    let default_minutes = config.default_duration.minutes();

    let mut selected = use_signal(|| None::<QuizMode>);
    let mut minutes = use_signal(move || default_minutes.to_string());
    let mut error = use_signal(|| None::<String>);

    let title = config.title.clone();
    let question_count = ctx.question_bank().len();
    let cards = map_mode_cards(selected());
    let can_start = selected().is_some();
    let min_minutes = QuizDuration::MIN_MINUTES;
    let max_minutes = QuizDuration::MAX_MINUTES;

    let on_start = move |_| {
        let Some(mode) = selected() else {
            return;
        };
        let result = match parse_minutes(&minutes.read()) {
            Ok(value) => flow.write().start(mode, value).map_err(|err| err.to_string()),
            Err(err) => Err(err.to_string()),
        };
        match result {
            Ok(()) => error.set(None),
            Err(message) => {
                log::debug!("quiz not started: {message}");
                error.set(Some(message));
            }
        }
    };

    rsx! {
        section { class: "setup",
            h1 { class: "setup__title", "{title}" }
            p { class: "setup__subtitle", "{question_count} Questions" }

            div { class: "mode-cards",
                {cards.into_iter().map(|card| {
                    let mode = card.mode;
                    let card_title = card.title;
                    let description = card.description;
                    rsx! {
                        button {
                            key: "{mode}",
                            class: card.class(),
                            r#type: "button",
                            onclick: move |_| selected.set(Some(mode)),
                            h2 { class: "mode-card__title", "{card_title}" }
                            p { class: "mode-card__description", "{description}" }
                        }
                    }
                })}
            }

            label { class: "setup__duration",
                span { "Duration (minutes)" }
                input {
                    r#type: "number",
                    min: "{min_minutes}",
                    max: "{max_minutes}",
                    value: "{minutes}",
                    oninput: move |evt| minutes.set(evt.value()),
                }
            }

            if let Some(message) = error() {
                p { class: "setup__error", "{message}" }
            }

            button {
                class: "btn btn--primary",
                r#type: "button",
                disabled: !can_start,
                onclick: on_start,
                "Start Quiz"
            }
        }
    }
}
