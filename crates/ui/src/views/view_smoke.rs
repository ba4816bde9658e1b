use quiz_core::model::QuizMode;
use services::QuizFlow;

use super::test_harness::{STUB_EXPLANATION, ViewKind, setup_view_harness};

fn start_exam(flow: &mut QuizFlow) {
    flow.start(QuizMode::Exam, 5).unwrap();
}

fn start_practice(flow: &mut QuizFlow) {
    flow.start(QuizMode::Practice, 5).unwrap();
}

fn practice_wrong_answer(flow: &mut QuizFlow) {
    start_practice(flow);
    flow.select_option(0).unwrap();
}

fn exam_on_last_question(flow: &mut QuizFlow) {
    start_exam(flow);
    flow.jump_to(2).unwrap();
}

fn exam_one_correct_then_finished(flow: &mut QuizFlow) {
    start_exam(flow);
    flow.select_option(1).unwrap();
    flow.toggle_mark().unwrap();
    flow.finish().unwrap();
}

#[tokio::test(flavor = "current_thread")]
async fn setup_view_smoke_renders_modes() {
    let mut harness = setup_view_harness(ViewKind::Root);
    harness.rebuild();
    let html = harness.render();

    for expected in ["Test Quiz", "3 Questions", "Exam Mode", "Practice Mode", "Start Quiz"] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }
    assert!(html.contains("value=\"50\""), "duration not prefilled in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn exam_view_smoke_renders_first_question() {
    let mut harness = setup_view_harness(ViewKind::Prepared(start_exam));
    harness.rebuild();
    let html = harness.render();

    for expected in [
        "Exam Mode",
        "5:00",
        "Q1. ",
        "Which planet is the largest?",
        "Jupiter",
        "Previous",
        "Next",
        "Mark for review",
        "width: 33%",
    ] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }
    assert!(!html.contains("Explanation"), "exam leaked an explanation: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn last_question_offers_finish() {
    let mut harness = setup_view_harness(ViewKind::Prepared(exam_on_last_question));
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Q3. "), "missing Q3 in {html}");
    assert!(html.contains("Finish"), "missing Finish in {html}");
    assert!(html.contains("palette__item--current"), "missing current marker in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn practice_answer_shows_loading_and_reveals_options() {
    let mut harness = setup_view_harness(ViewKind::Prepared(practice_wrong_answer));
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Analyzing..."), "missing loading text in {html}");
    assert!(html.contains("option--incorrect"), "missing wrong choice in {html}");
    assert!(html.contains("option--correct"), "missing correct option in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn practice_selection_fetches_explanation() {
    let mut harness = setup_view_harness(ViewKind::Prepared(start_practice));
    harness.rebuild();
    assert!(!harness.render().contains("Explanation"));

    harness.select(1);
    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();

    assert!(html.contains(STUB_EXPLANATION), "missing fetched text in {html}");
    assert!(!html.contains("Analyzing..."), "still loading in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_smoke_renders_score() {
    let mut harness = setup_view_harness(ViewKind::Prepared(exam_one_correct_then_finished));
    harness.rebuild();
    let html = harness.render();

    for expected in [
        "33%",
        "You scored 1 out of 3",
        "Unanswered: 2",
        "Marked for review: 1",
        "Keep studying!",
        "Back to Setup",
    ] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }
}
