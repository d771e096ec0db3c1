//! Store error types.

use quizgrade_core::ValidationError;
use thiserror::Error;

/// Errors raised by the stores themselves.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No quiz with this id.
    #[error("quiz not found: {0}")]
    QuizNotFound(String),

    /// No attempt with this id.
    #[error("attempt not found: {0}")]
    AttemptNotFound(String),

    /// The quiz definition breaks one or more rules.
    #[error("invalid quiz: {}", join_errors(.0))]
    InvalidQuiz(Vec<ValidationError>),

    /// Scored attempts are immutable.
    #[error("attempt {0} is already scored")]
    AttemptAlreadyScored(String),

    /// Reading or writing a snapshot failed.
    #[error("snapshot error at {path}: {message}")]
    Snapshot { path: String, message: String },
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
