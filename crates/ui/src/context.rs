use std::sync::Arc;

use quiz_core::model::QuestionBank;
use services::{Clock, ExplanationProvider, QuizConfig, QuizFlow};

pub trait UiApp: Send + Sync {
    fn config(&self) -> Arc<QuizConfig>;
    fn question_bank(&self) -> QuestionBank;
    fn explanations(&self) -> Arc<dyn ExplanationProvider>;
    fn clock(&self) -> Clock;
}

#[derive(Clone)]
pub struct AppContext {
    config: Arc<QuizConfig>,
    bank: QuestionBank,
    explanations: Arc<dyn ExplanationProvider>,
    clock: Clock,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            config: app.config(),
            bank: app.question_bank(),
            explanations: app.explanations(),
            clock: app.clock(),
        }
    }

    #[must_use]
    pub fn config(&self) -> Arc<QuizConfig> {
        Arc::clone(&self.config)
    }

    #[must_use]
    pub fn question_bank(&self) -> &QuestionBank {
        &self.bank
    }

    #[must_use]
    pub fn explanations(&self) -> Arc<dyn ExplanationProvider> {
        Arc::clone(&self.explanations)
    }

    /// A flow on the setup screen. Each window owns exactly one.
    #[must_use]
    pub fn new_flow(&self) -> QuizFlow {
        QuizFlow::new(self.bank.clone(), self.clock)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
