//! In-memory quiz and attempt store with JSON snapshots.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use quizgrade_core::model::{
    AnswerRecord, Attempt, AttemptStatus, NewQuiz, Question, QuestionOption, Quiz, QuizUpdate,
    SubmittedAnswer,
};
use quizgrade_core::traits::{AttemptStore, AttemptUpdate, QuizStore};
use quizgrade_core::validation::{validate_new_quiz, validate_quiz_update};

use crate::error::StoreError;

/// Everything the store holds, as written to a snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreState {
    #[serde(default)]
    quizzes: BTreeMap<String, Quiz>,
    #[serde(default)]
    attempts: BTreeMap<String, Attempt>,
}

/// A store that keeps quizzes and attempts in memory.
///
/// Implements both [`QuizStore`] and [`AttemptStore`], so one instance can
/// back a `SubmissionEngine` on both sides.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<StoreState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a snapshot, or start empty if the file does not exist yet.
    pub async fn open(path: &Path) -> Result<Self, StoreError> {
        let exists = tokio::fs::try_exists(path)
            .await
            .map_err(|e| snapshot_error(path, e))?;
        if exists {
            Self::load_snapshot(path).await
        } else {
            tracing::debug!("no snapshot at {}, starting empty", path.display());
            Ok(Self::new())
        }
    }

    /// Load a store from a JSON snapshot.
    pub async fn load_snapshot(path: &Path) -> Result<Self, StoreError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| snapshot_error(path, e))?;
        let state: StoreState =
            serde_json::from_str(&content).map_err(|e| snapshot_error(path, e))?;
        tracing::debug!(
            "loaded {} quiz(zes) and {} attempt(s) from {}",
            state.quizzes.len(),
            state.attempts.len(),
            path.display()
        );
        Ok(Self {
            state: RwLock::new(state),
        })
    }

    /// Write the whole store to `path` as pretty JSON.
    pub async fn save_snapshot(&self, path: &Path) -> Result<(), StoreError> {
        let json = {
            let state = self.state.read().await;
            serde_json::to_string_pretty(&*state).map_err(|e| snapshot_error(path, e))?
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| snapshot_error(path, e))?;
        }
        tokio::fs::write(path, json)
            .await
            .map_err(|e| snapshot_error(path, e))
    }

    // -----------------------------------------------------------------------
    // Quiz CRUD
    // -----------------------------------------------------------------------

    /// Validate a quiz definition and store it with fresh ids.
    pub async fn create_quiz(&self, new_quiz: NewQuiz) -> Result<Quiz, StoreError> {
        let errors = validate_new_quiz(&new_quiz);
        if !errors.is_empty() {
            return Err(StoreError::InvalidQuiz(errors));
        }

        let now = Utc::now();
        let quiz_id = new_id();
        let mut questions: Vec<Question> = new_quiz
            .questions
            .into_iter()
            .map(|q| {
                let question_id = new_id();
                let mut options: Vec<QuestionOption> = q
                    .options
                    .into_iter()
                    .map(|o| QuestionOption {
                        id: new_id(),
                        text: o.text,
                        is_correct: o.is_correct,
                        order: o.order,
                        question_id: question_id.clone(),
                    })
                    .collect();
                options.sort_by_key(|o| o.order);
                Question {
                    id: question_id,
                    quiz_id: quiz_id.clone(),
                    text: q.text,
                    question_type: q.question_type,
                    order: q.order,
                    required: q.required,
                    options,
                }
            })
            .collect();
        questions.sort_by_key(|q| q.order);

        let quiz = Quiz {
            id: quiz_id,
            title: new_quiz.title,
            description: new_quiz.description,
            questions,
            created_at: now,
            updated_at: now,
        };

        self.state
            .write()
            .await
            .quizzes
            .insert(quiz.id.clone(), quiz.clone());
        tracing::info!(
            "created quiz {} ({} questions)",
            quiz.id,
            quiz.questions.len()
        );
        Ok(quiz)
    }

    /// All quizzes, newest first.
    pub async fn list_quizzes(&self) -> Vec<Quiz> {
        let mut quizzes: Vec<Quiz> = self.state.read().await.quizzes.values().cloned().collect();
        quizzes.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.title.cmp(&b.title))
        });
        quizzes
    }

    pub async fn get_quiz(&self, id: &str) -> Option<Quiz> {
        self.state.read().await.quizzes.get(id).cloned()
    }

    /// Change a quiz's title and/or description.
    pub async fn update_quiz(&self, id: &str, update: QuizUpdate) -> Result<Quiz, StoreError> {
        let errors = validate_quiz_update(&update);
        if !errors.is_empty() {
            return Err(StoreError::InvalidQuiz(errors));
        }

        let mut state = self.state.write().await;
        let quiz = state
            .quizzes
            .get_mut(id)
            .ok_or_else(|| StoreError::QuizNotFound(id.to_string()))?;
        if let Some(title) = update.title {
            quiz.title = title;
        }
        if let Some(description) = update.description {
            quiz.description = Some(description);
        }
        quiz.updated_at = Utc::now();
        Ok(quiz.clone())
    }

    /// Delete a quiz with its questions and options. Recorded attempts keep
    /// their raw answers.
    pub async fn delete_quiz(&self, id: &str) -> Result<(), StoreError> {
        let removed = self.state.write().await.quizzes.remove(id);
        match removed {
            Some(quiz) => {
                tracing::info!("deleted quiz {} ({})", quiz.id, quiz.title);
                Ok(())
            }
            None => Err(StoreError::QuizNotFound(id.to_string())),
        }
    }

    // -----------------------------------------------------------------------
    // Attempt queries
    // -----------------------------------------------------------------------

    pub async fn get_attempt(&self, id: &str) -> Option<Attempt> {
        self.state.read().await.attempts.get(id).cloned()
    }

    /// Attempts recorded against a quiz, oldest first.
    pub async fn list_attempts(&self, quiz_id: &str) -> Vec<Attempt> {
        let mut attempts: Vec<Attempt> = self
            .state
            .read()
            .await
            .attempts
            .values()
            .filter(|a| a.quiz_id == quiz_id)
            .cloned()
            .collect();
        attempts.sort_by_key(|a| a.created_at);
        attempts
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn snapshot_error(path: &Path, err: impl std::fmt::Display) -> StoreError {
    StoreError::Snapshot {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}

#[async_trait]
impl QuizStore for MemoryStore {
    async fn find_quiz_by_id(&self, id: &str) -> anyhow::Result<Option<Quiz>> {
        Ok(self.get_quiz(id).await)
    }

    async fn find_question_by_id(&self, id: &str) -> anyhow::Result<Option<Question>> {
        let state = self.state.read().await;
        Ok(state
            .quizzes
            .values()
            .flat_map(|quiz| &quiz.questions)
            .find(|q| q.id == id)
            .cloned())
    }
}

#[async_trait]
impl AttemptStore for MemoryStore {
    async fn create_attempt(&self, quiz_id: &str) -> anyhow::Result<String> {
        let attempt = Attempt::new(new_id(), quiz_id, Utc::now());
        let id = attempt.id.clone();
        self.state
            .write()
            .await
            .attempts
            .insert(id.clone(), attempt);
        Ok(id)
    }

    async fn create_answer_record(
        &self,
        attempt_id: &str,
        answer: &SubmittedAnswer,
    ) -> anyhow::Result<String> {
        let mut state = self.state.write().await;
        let attempt = state
            .attempts
            .get_mut(attempt_id)
            .ok_or_else(|| StoreError::AttemptNotFound(attempt_id.to_string()))?;
        if attempt.status == AttemptStatus::Scored {
            return Err(StoreError::AttemptAlreadyScored(attempt_id.to_string()).into());
        }

        let record = AnswerRecord {
            id: new_id(),
            attempt_id: attempt_id.to_string(),
            question_id: answer.question_id.clone(),
            text_answer: answer.text_answer.clone(),
            boolean_answer: answer.boolean_answer,
            selected_options: answer.selected_options.clone().unwrap_or_default(),
            score: None,
            question: None,
        };
        let id = record.id.clone();
        attempt.answers.push(record);
        Ok(id)
    }

    async fn update_attempt(
        &self,
        attempt_id: &str,
        update: &AttemptUpdate,
    ) -> anyhow::Result<Attempt> {
        let mut guard = self.state.write().await;
        let StoreState { quizzes, attempts } = &mut *guard;

        let attempt = attempts
            .get_mut(attempt_id)
            .ok_or_else(|| StoreError::AttemptNotFound(attempt_id.to_string()))?;
        if attempt.status == AttemptStatus::Scored {
            return Err(StoreError::AttemptAlreadyScored(attempt_id.to_string()).into());
        }

        let scores: HashMap<&str, f64> = update
            .question_scores
            .iter()
            .map(|(id, score)| (id.as_str(), *score))
            .collect();
        let quiz = quizzes.get(&attempt.quiz_id);

        for record in &mut attempt.answers {
            record.score = scores.get(record.id.as_str()).copied();
            record.question = quiz.and_then(|q| q.question(&record.question_id)).cloned();
        }

        attempt
            .complete(update.score, update.completed_at)
            .map_err(|e| StoreError::AttemptAlreadyScored(e.attempt_id))?;
        Ok(attempt.clone())
    }
}
