//! Shared error types for the services crate.

use std::path::PathBuf;

use thiserror::Error;

use quiz_core::model::{DurationError, QuestionBankError, SessionError, ViewState};

/// Errors emitted by `QuizController` and `QuizFlow`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("no quiz session is active")]
    NoSession,
    #[error("not available on the {0} screen")]
    WrongView(ViewState),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Duration(#[from] DurationError),
}

/// Errors from the remote explanation endpoint.
///
/// These never leave `ExplanationService::explain`; they are logged and replaced
/// by a fallback string.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExplanationError {
    #[error("explanations are not configured")]
    Disabled,
    #[error("explanation endpoint returned an empty response")]
    EmptyResponse,
    #[error("explanation request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors while reading configuration from the environment.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("{var} must be a whole number, got {raw:?}")]
    NotANumber { var: &'static str, raw: String },
    #[error("invalid default duration: {0}")]
    Duration(#[from] DurationError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    QuestionBank(#[from] QuestionBankError),
    #[error("could not read question bank {path}: {source}")]
    ReadQuestionBank {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
