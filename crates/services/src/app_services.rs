use std::path::Path;
use std::sync::Arc;

use quiz_core::model::QuestionBank;

use crate::config::QuizConfig;
use crate::error::AppServicesError;
use crate::explanation_service::{ExplanationProvider, ExplanationService};
use crate::quiz::QuizFlow;
use crate::Clock;

/// Assembles the question bank, explanation provider and config for the app.
#[derive(Clone)]
pub struct AppServices {
    config: Arc<QuizConfig>,
    bank: QuestionBank,
    explanations: Arc<dyn ExplanationProvider>,
    clock: Clock,
}

impl AppServices {
    #[must_use]
    pub fn new(
        config: QuizConfig,
        bank: QuestionBank,
        explanations: Arc<dyn ExplanationProvider>,
        clock: Clock,
    ) -> Self {
        Self {
            config: Arc::new(config),
            bank,
            explanations,
            clock,
        }
    }

    /// Load the question bank named by `config` and wire the remote explanation
    /// service from the environment.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the question bank cannot be read or is invalid.
    pub fn from_config(config: QuizConfig, clock: Clock) -> Result<Self, AppServicesError> {
        let bank = load_question_bank(config.questions_path.as_deref())?;
        let explanations = ExplanationService::from_env();
        if !explanations.enabled() {
            log::info!("QUIZ_AI_API_KEY not set; practice mode uses bundled explanations");
        }
        log::info!("loaded {} questions", bank.len());
        Ok(Self::new(config, bank, Arc::new(explanations), clock))
    }

    #[must_use]
    pub fn config(&self) -> Arc<QuizConfig> {
        Arc::clone(&self.config)
    }

    #[must_use]
    pub fn question_bank(&self) -> QuestionBank {
        self.bank.clone()
    }

    #[must_use]
    pub fn explanations(&self) -> Arc<dyn ExplanationProvider> {
        Arc::clone(&self.explanations)
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// A quiz flow on the setup screen, sharing this app's question bank.
    #[must_use]
    pub fn new_flow(&self) -> QuizFlow {
        QuizFlow::new(self.bank.clone(), self.clock)
    }
}

/// Read a JSON question bank from `path`, or use the bundled one.
///
/// # Errors
///
/// Returns `AppServicesError::ReadQuestionBank` for I/O failures and
/// `AppServicesError::QuestionBank` for invalid content.
pub fn load_question_bank(path: Option<&Path>) -> Result<QuestionBank, AppServicesError> {
    let Some(path) = path else {
        return Ok(QuestionBank::bundled()?);
    };
    let json = std::fs::read_to_string(path).map_err(|source| {
        AppServicesError::ReadQuestionBank {
            path: path.to_path_buf(),
            source,
        }
    })?;
    Ok(QuestionBank::from_json_str(&json)?)
}
