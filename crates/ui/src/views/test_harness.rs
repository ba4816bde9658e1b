use std::sync::Arc;

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use quiz_core::model::QuestionBank;
use quiz_core::time::fixed_clock;
use services::{Clock, ExplanationProvider, QuizConfig, QuizFlow};

use crate::context::{AppContext, UiApp, build_app_context};
use crate::views::{QuizRoot, QuizScreens, QuizTestHandles};

pub const STUB_EXPLANATION: &str = "Stub explanation from the tutor.";

pub const TEST_BANK: &str = r#"[
    {"id": 1, "question": "Which planet is the largest?", "options": ["Mars", "Jupiter", "Venus", "Earth"],
     "correctAnswer": 1, "explanation": "Jupiter is the largest planet in the Solar System."},
    {"id": 2, "question": "What is the closest star to Earth?", "options": ["Sirius", "Sun", "Vega", "Altair"],
     "correctAnswer": 1},
    {"id": 3, "question": "Which ocean is the largest?", "options": ["Atlantic", "Indian", "Pacific", "Arctic"],
     "correctAnswer": 2}
]"#;

struct StubProvider;

#[async_trait]
impl ExplanationProvider for StubProvider {
    async fn explain(&self, _question: &str, _correct_answer: &str) -> String {
        STUB_EXPLANATION.to_string()
    }
}

struct TestApp {
    config: Arc<QuizConfig>,
    bank: QuestionBank,
    explanations: Arc<dyn ExplanationProvider>,
}

impl UiApp for TestApp {
    fn config(&self) -> Arc<QuizConfig> {
        Arc::clone(&self.config)
    }

    fn question_bank(&self) -> QuestionBank {
        self.bank.clone()
    }

    fn explanations(&self) -> Arc<dyn ExplanationProvider> {
        Arc::clone(&self.explanations)
    }

    fn clock(&self) -> Clock {
        fixed_clock()
    }
}

/// Which screen the harness mounts.
#[derive(Clone, Copy)]
pub enum ViewKind {
    /// The real root, starting on setup.
    Root,
    /// A flow prepared by the given function before the first render.
    Prepared(fn(&mut QuizFlow)),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    handles: QuizTestHandles,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewHarnessRoot(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.handles.clone());
    match props.view {
        ViewKind::Root => rsx! { QuizRoot {} },
        ViewKind::Prepared(prepare) => rsx! { PreparedRoot { prepare } },
    }
}

#[component]
fn PreparedRoot(prepare: fn(&mut QuizFlow)) -> Element {
    let ctx = use_context::<AppContext>();
    let flow = use_signal(|| {
        let mut flow = ctx.new_flow();
        prepare(&mut flow);
        flow
    });
    rsx! { QuizScreens { flow } }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub handles: QuizTestHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }

    /// Click option `index` on the quiz screen.
    pub fn select(&self, index: usize) {
        let select = self.handles.select();
        self.dom.in_runtime(|| select.call(index));
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind) -> ViewHarness {
    let app = Arc::new(TestApp {
        config: Arc::new(QuizConfig::default().with_title("Test Quiz")),
        bank: QuestionBank::from_json_str(TEST_BANK).expect("test bank"),
        explanations: Arc::new(StubProvider),
    });
    let handles = QuizTestHandles::default();

    let dom = VirtualDom::new_with_props(
        ViewHarnessRoot,
        ViewHarnessProps {
            app,
            view,
            handles: handles.clone(),
        },
    );

    ViewHarness { dom, handles }
}
