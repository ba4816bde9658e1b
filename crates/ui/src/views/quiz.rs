use std::sync::Arc;
use std::time::Duration;

#[cfg(test)]
use std::{cell::RefCell, rc::Rc};

use dioxus::prelude::*;
use quiz_core::timer::TimerTick;
use services::{QuizError, QuizFlow, SelectOutcome};
use tokio::time::MissedTickBehavior;

use crate::context::AppContext;
use crate::vm::{ExplanationVm, map_quiz_screen};

#[component]
pub fn QuizView(flow: Signal<QuizFlow>) -> Element {
    let ctx = use_context::<AppContext>();
    let mut flow = flow;

    // Dropped with the view, so finishing or resetting stops the countdown.
    use_future(move || async move {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        interval.tick().await;
        loop {
            interval.tick().await;
            let tick = flow.write().tick();
            if !matches!(tick, TimerTick::Running { .. }) {
                log::debug!("countdown ended: {tick:?}");
                break;
            }
        }
    });

    let explanations = ctx.explanations();
    let on_select = use_callback(move |option: usize| {
        let outcome = flow.write().select_option(option);
        match outcome {
            Ok(SelectOutcome::Explain(request)) => {
                let provider = Arc::clone(&explanations);
                spawn(async move {
                    let reply = request.resolve(provider.as_ref()).await;
                    flow.write().apply_explanation(reply);
                });
            }
            Ok(SelectOutcome::Recorded | SelectOutcome::Ignored) => {}
            Err(err) => report("select", &err),
        }
    });
    let on_jump = use_callback(move |index: usize| {
        if let Err(err) = flow.write().jump_to(index) {
            report("jump", &err);
        }
    });

    #[cfg(test)]
    {
        if let Some(handles) = try_consume_context::<QuizTestHandles>() {
            handles.register(on_select);
        }
    }

    let Some(vm) = map_quiz_screen(&flow.read()) else {
        return rsx! {
            p { class: "quiz__empty", "No quiz in progress." }
        };
    };

    let mode_label = vm.mode.label();
    let timer_class = vm.timer.class();
    let timer_text = vm.timer.text.clone();
    let progress_style = vm.progress_style();
    let question_number = vm.question_number;
    let question_count = vm.question_count;
    let answered_count = vm.answered_count;
    let prompt = vm.prompt.clone();
    let mark_label = vm.mark_label();
    let mark_class = if vm.marked {
        "btn btn--mark btn--mark-active"
    } else {
        "btn btn--mark"
    };
    let next_label = vm.next_label();

    let explanation_panel = match vm.explanation.clone() {
        None => rsx! {},
        Some(ExplanationVm::Loading) => rsx! {
            div { class: "explanation explanation--loading",
                h3 { "Explanation" }
                p { "Analyzing..." }
            }
        },
        Some(ExplanationVm::Text(text)) => rsx! {
            div { class: "explanation",
                h3 { "Explanation" }
                p { "{text}" }
            }
        },
    };

    rsx! {
        section { class: "quiz",
            header { class: "quiz__header",
                span { class: "quiz__mode", "{mode_label}" }
                span { class: "quiz__count", "Answered {answered_count} of {question_count}" }
                span { class: timer_class, "{timer_text}" }
                button {
                    class: "btn btn--ghost",
                    r#type: "button",
                    onclick: move |_| report_failure("finish", flow.write().finish()),
                    "Submit"
                }
            }

            div { class: "progress",
                div { class: "progress__bar", style: progress_style }
            }

            nav { class: "palette",
                {vm.palette.iter().map(|item| {
                    let index = item.index;
                    let number = item.number();
                    rsx! {
                        button {
                            key: "{index}",
                            class: item.class(),
                            r#type: "button",
                            onclick: move |_| on_jump.call(index),
                            "{number}"
                        }
                    }
                })}
            }

            article { class: "question",
                div { class: "question__header",
                    h2 { class: "question__prompt",
                        span { class: "question__number", "Q{question_number}. " }
                        "{prompt}"
                    }
                    button {
                        class: mark_class,
                        r#type: "button",
                        onclick: move |_| report_failure("mark", flow.write().toggle_mark()),
                        "{mark_label}"
                    }
                }

                div { class: "options",
                    {vm.options.iter().map(|option| {
                        let index = option.index;
                        let letter = option.letter;
                        let text = option.text.clone();
                        rsx! {
                            button {
                                key: "{index}",
                                class: option.tone.class(),
                                r#type: "button",
                                disabled: option.disabled,
                                onclick: move |_| on_select.call(index),
                                span { class: "option__letter", "{letter}" }
                                span { class: "option__text", "{text}" }
                            }
                        }
                    })}
                }

                {explanation_panel}
            }

            footer { class: "quiz__nav",
                button {
                    class: "btn",
                    r#type: "button",
                    disabled: vm.is_first,
                    onclick: move |_| report_failure("previous", flow.write().previous()),
                    "Previous"
                }
                button {
                    class: "btn btn--primary",
                    r#type: "button",
                    onclick: move |_| report_failure("next", flow.write().next()),
                    "{next_label}"
                }
            }
        }
    }
}

fn report(action: &str, err: &QuizError) {
    log::warn!("quiz {action} failed: {err}");
}

fn report_failure<T>(action: &str, result: Result<T, QuizError>) {
    if let Err(err) = result {
        report(action, &err);
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    select: Rc<RefCell<Option<Callback<usize>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(&self, select: Callback<usize>) {
        *self.select.borrow_mut() = Some(select);
    }

    pub(crate) fn select(&self) -> Callback<usize> {
        (*self.select.borrow()).expect("quiz select registered")
    }
}
