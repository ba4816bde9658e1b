use thiserror::Error;

use crate::model::{DurationError, QuestionBankError, QuestionError, SessionError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    QuestionBank(#[from] QuestionBankError),
    #[error(transparent)]
    Duration(#[from] DurationError),
    #[error(transparent)]
    Session(#[from] SessionError),
}
