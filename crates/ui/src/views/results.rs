use dioxus::prelude::*;
use services::QuizFlow;

use crate::vm::map_results;

#[component]
pub fn ResultsView(flow: Signal<QuizFlow>) -> Element {
    let mut flow = flow;
    let Some(vm) = map_results(&flow.read()) else {
        return rsx! {
            p { class: "results__empty", "No results yet." }
        };
    };

    let percentage = vm.percentage;
    let headline = vm.headline();
    let correct = vm.correct;
    let incorrect = vm.incorrect;
    let unanswered = vm.unanswered;
    let marked = vm.marked;
    let feedback = vm.feedback();
    let tier_class = vm.tier_class();

    rsx! {
        section { class: "results",
            h1 { class: "results__title", "Quiz Completed" }
            div { class: "results__percentage", "{percentage}%" }
            p { class: "results__headline", "{headline}" }

            div { class: "results__tiles",
                div { class: "tile tile--correct",
                    span { class: "tile__value", "{correct}" }
                    span { class: "tile__label", "Correct" }
                }
                div { class: "tile tile--incorrect",
                    span { class: "tile__value", "{incorrect}" }
                    span { class: "tile__label", "Incorrect" }
                }
            }

            ul { class: "results__details",
                li { "Unanswered: {unanswered}" }
                li { "Marked for review: {marked}" }
            }

            p { class: tier_class, "{feedback}" }

            button {
                class: "btn btn--primary",
                r#type: "button",
                onclick: move |_| flow.write().reset(),
                "Back to Setup"
            }
        }
    }
}
