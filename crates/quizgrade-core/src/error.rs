//! Submission error types.
//!
//! Callers match on [`SubmissionError`] to tell rejected input apart from
//! store failures without inspecting message text.

use thiserror::Error;

/// A single rule violation, naming the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Path of the field that failed (e.g. `answers[2].textAnswer`).
    pub field: String,
    /// What is wrong with it.
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Returned when completing an attempt that is already scored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("attempt {attempt_id} is already scored")]
pub struct AlreadyScoredError {
    pub attempt_id: String,
}

/// Errors that can occur while submitting answers for grading.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// The submission is malformed. Nothing was written.
    #[error("invalid submission: {0}")]
    Validation(#[from] ValidationError),

    /// The quiz does not exist. Nothing was written.
    #[error("quiz not found: {quiz_id}")]
    NotFound { quiz_id: String },

    /// A store operation failed. Records written before the failure are kept.
    #[error("submission failed: {0:#}")]
    Persistence(#[source] anyhow::Error),
}

impl SubmissionError {
    /// Returns `true` if the caller sent a request that can never succeed as-is.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            SubmissionError::Validation(_) | SubmissionError::NotFound { .. }
        )
    }
}
