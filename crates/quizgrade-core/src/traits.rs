//! Store traits the submission engine depends on.
//!
//! These async traits are implemented by the `quizgrade-store` crate. Absence
//! is reported as `Ok(None)`; `Err` always means the store itself failed.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Attempt, Question, Quiz, SubmittedAnswer};

// ---------------------------------------------------------------------------
// Quiz Store
// ---------------------------------------------------------------------------

/// Read access to quiz definitions.
#[async_trait]
pub trait QuizStore: Send + Sync {
    /// Fetch a quiz with its questions and their options.
    async fn find_quiz_by_id(&self, id: &str) -> anyhow::Result<Option<Quiz>>;

    /// Fetch a single question with its options.
    async fn find_question_by_id(&self, id: &str) -> anyhow::Result<Option<Question>>;
}

// ---------------------------------------------------------------------------
// Attempt Store
// ---------------------------------------------------------------------------

/// Write access to attempts and their answer records.
#[async_trait]
pub trait AttemptStore: Send + Sync {
    /// Create an empty, unscored attempt and return its id.
    async fn create_attempt(&self, quiz_id: &str) -> anyhow::Result<String>;

    /// Store one raw answer under an attempt and return the record's id.
    ///
    /// The answer is kept even if its question does not exist.
    async fn create_answer_record(
        &self,
        attempt_id: &str,
        answer: &SubmittedAnswer,
    ) -> anyhow::Result<String>;

    /// Attach the final score and per-question results, marking the attempt
    /// scored. Returns the attempt with each answer joined to its question.
    async fn update_attempt(
        &self,
        attempt_id: &str,
        update: &AttemptUpdate,
    ) -> anyhow::Result<Attempt>;
}

/// The one mutation an attempt receives after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptUpdate {
    /// Final percentage in [0, 100].
    pub score: f64,
    pub completed_at: DateTime<Utc>,
    /// `(answer record id, fractional score)` for every answer that matched
    /// a question.
    pub question_scores: Vec<(String, f64)>,
}
