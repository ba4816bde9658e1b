use std::env;
use std::path::PathBuf;

use quiz_core::model::QuizDuration;

use crate::error::ConfigError;

pub const DEFAULT_TITLE: &str = "Geography Quiz";

/// App-level quiz settings.
///
/// The default duration only prefills the setup screen; each session still
/// fixes its own duration at start.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizConfig {
    pub title: String,
    pub default_duration: QuizDuration,
    pub questions_path: Option<PathBuf>,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            default_duration: QuizDuration::default(),
            questions_path: None,
        }
    }
}

impl QuizConfig {
    /// Read `QUIZ_TITLE`, `QUIZ_DURATION_MINUTES` and `QUIZ_QUESTIONS_PATH`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `QUIZ_DURATION_MINUTES` is not a valid duration.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(title) = non_blank_var("QUIZ_TITLE") {
            config.title = title;
        }
        if let Some(raw) = non_blank_var("QUIZ_DURATION_MINUTES") {
            config.default_duration = parse_duration("QUIZ_DURATION_MINUTES", &raw)?;
        }
        config.questions_path = non_blank_var("QUIZ_QUESTIONS_PATH").map(PathBuf::from);

        Ok(config)
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_default_duration(mut self, duration: QuizDuration) -> Self {
        self.default_duration = duration;
        self
    }

    #[must_use]
    pub fn with_questions_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.questions_path = Some(path.into());
        self
    }
}

/// Parse a minute count into a validated duration.
///
/// # Errors
///
/// Returns `ConfigError::NotANumber` or `ConfigError::Duration`.
pub fn parse_duration(var: &'static str, raw: &str) -> Result<QuizDuration, ConfigError> {
    let minutes: i64 = raw.trim().parse().map_err(|_| ConfigError::NotANumber {
        var,
        raw: raw.to_string(),
    })?;
    Ok(QuizDuration::from_minutes(minutes)?)
}

pub(crate) fn non_blank_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}
