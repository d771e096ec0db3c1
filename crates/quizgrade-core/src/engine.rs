//! Submission orchestrator.
//!
//! Turns a submission into a scored attempt: validate, resolve the quiz,
//! create the attempt, store every raw answer, grade, then record the score.

use std::sync::Arc;

use chrono::Utc;
use futures::stream::{self, StreamExt, TryStreamExt};

use crate::error::{SubmissionError, ValidationError};
use crate::grading::grade_submission;
use crate::model::{Attempt, Submission};
use crate::traits::{AttemptStore, AttemptUpdate, QuizStore};
use crate::validation::validate_submission;

/// What to do with answers whose question is not part of the quiz.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownQuestionPolicy {
    /// Store the answer but leave it out of the score.
    #[default]
    Skip,
    /// Reject the whole submission before anything is written.
    Reject,
}

/// Configuration for the submission engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub unknown_questions: UnknownQuestionPolicy,
    /// Maximum answer records written concurrently.
    pub max_concurrent_writes: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            unknown_questions: UnknownQuestionPolicy::Skip,
            max_concurrent_writes: 8,
        }
    }
}

/// The submission engine.
pub struct SubmissionEngine {
    quizzes: Arc<dyn QuizStore>,
    attempts: Arc<dyn AttemptStore>,
    config: EngineConfig,
}

impl SubmissionEngine {
    pub fn new(
        quizzes: Arc<dyn QuizStore>,
        attempts: Arc<dyn AttemptStore>,
        config: EngineConfig,
    ) -> Self {
        Self {
            quizzes,
            attempts,
            config,
        }
    }

    /// Grade a submission and persist it as a new attempt.
    ///
    /// Validation and quiz lookup failures happen before anything is
    /// written. After the attempt exists, a store failure leaves the records
    /// written so far in place.
    pub async fn submit(&self, submission: &Submission) -> Result<Attempt, SubmissionError> {
        validate_submission(submission)?;

        let quiz = self
            .quizzes
            .find_quiz_by_id(&submission.quiz_id)
            .await
            .map_err(SubmissionError::Persistence)?
            .ok_or_else(|| SubmissionError::NotFound {
                quiz_id: submission.quiz_id.clone(),
            })?;

        if self.config.unknown_questions == UnknownQuestionPolicy::Reject {
            if let Some(i) = submission
                .answers
                .iter()
                .position(|a| quiz.question(&a.question_id).is_none())
            {
                return Err(ValidationError::new(
                    format!("answers[{i}].questionId"),
                    format!(
                        "question {} is not part of quiz {}",
                        submission.answers[i].question_id, quiz.id
                    ),
                )
                .into());
            }
        }

        let attempt_id = self
            .attempts
            .create_attempt(&quiz.id)
            .await
            .map_err(SubmissionError::Persistence)?;
        tracing::debug!(
            "created attempt {attempt_id} for quiz {} with {} answer(s)",
            quiz.id,
            submission.answers.len()
        );

        // Record ids come back in submission order.
        let attempts = &self.attempts;
        let attempt_ref = attempt_id.as_str();
        let writes: Vec<_> = submission
            .answers
            .iter()
            .map(|answer| attempts.create_answer_record(attempt_ref, answer))
            .collect();
        let record_ids: Vec<String> = stream::iter(writes)
            .buffered(self.config.max_concurrent_writes.max(1))
            .try_collect()
            .await
            .map_err(SubmissionError::Persistence)?;

        let grade = grade_submission(&quiz, &submission.answers);
        for (answer, score) in submission.answers.iter().zip(&grade.per_answer) {
            if score.is_none() {
                tracing::warn!(
                    "attempt {attempt_id}: question {} is not part of quiz {}, not scored",
                    answer.question_id,
                    quiz.id
                );
            }
        }

        let question_scores = record_ids
            .into_iter()
            .zip(grade.per_answer.iter().copied())
            .filter_map(|(record_id, score)| score.map(|s| (record_id, s)))
            .collect();

        let attempt = self
            .attempts
            .update_attempt(
                &attempt_id,
                &AttemptUpdate {
                    score: grade.final_score,
                    completed_at: Utc::now(),
                    question_scores,
                },
            )
            .await
            .map_err(SubmissionError::Persistence)?;

        tracing::info!(
            "attempt {} on quiz {} scored {:.1}% ({:.2}/{} questions)",
            attempt.id,
            quiz.id,
            grade.final_score,
            grade.total_score,
            grade.total_questions
        );

        Ok(attempt)
    }
}
