//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::QuestionError;
use storage::repository::StorageError;

/// Errors emitted by the quiz session engine.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("a session needs at least one question, got a request for {requested}")]
    InvalidQuestionCount { requested: usize },

    #[error("no active session")]
    NotActive,

    #[error("session already validated")]
    Validated,

    #[error("question index {index} is out of range")]
    QuestionOutOfRange { index: usize },

    #[error(transparent)]
    Question(#[from] QuestionError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
