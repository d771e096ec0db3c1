//! Core data model types for quizgrade.
//!
//! Quizzes own their questions and questions own their options. Attempts
//! reference quizzes and questions by id only, so deleting a quiz never
//! rewrites an attempt that was already recorded.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AlreadyScoredError;

/// Maximum number of questions in a quiz.
pub const MAX_QUESTIONS: usize = 50;
/// Maximum number of options on a question.
pub const MAX_OPTIONS: usize = 10;
/// Maximum length of a question's text, in characters.
pub const MAX_QUESTION_TEXT: usize = 1000;
/// Maximum length of an option's text, in characters.
pub const MAX_OPTION_TEXT: usize = 500;
/// Maximum length of a quiz title, in characters.
pub const MAX_TITLE: usize = 200;
/// Maximum length of a quiz description, in characters.
pub const MAX_DESCRIPTION: usize = 1000;
/// Maximum length of a free-text answer, in characters.
pub const MAX_TEXT_ANSWER: usize = 1000;
/// Maximum number of options a single answer may select.
pub const MAX_SELECTED_OPTIONS: usize = 10;

/// The closed set of question semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QuestionType {
    /// True/false, answered with `booleanAnswer`.
    Boolean,
    /// Free text, answered with `textAnswer`.
    Input,
    /// Multi-select, answered with `selectedOptions`.
    Checkbox,
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionType::Boolean => write!(f, "BOOLEAN"),
            QuestionType::Input => write!(f, "INPUT"),
            QuestionType::Checkbox => write!(f, "CHECKBOX"),
        }
    }
}

impl FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "boolean" | "bool" => Ok(QuestionType::Boolean),
            "input" | "text" => Ok(QuestionType::Input),
            "checkbox" => Ok(QuestionType::Checkbox),
            other => Err(format!("unknown question type: {other}")),
        }
    }
}

/// A candidate answer, or the reference answer of an INPUT question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOption {
    pub id: String,
    pub text: String,
    pub is_correct: bool,
    pub order: u32,
    /// Owning question.
    pub question_id: String,
}

/// A single prompt within a quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    /// Owning quiz.
    pub quiz_id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub order: u32,
    #[serde(default = "default_true")]
    pub required: bool,
    #[serde(default)]
    pub options: Vec<QuestionOption>,
}

impl Question {
    /// Options flagged as correct, in declaration order.
    pub fn correct_options(&self) -> impl Iterator<Item = &QuestionOption> {
        self.options.iter().filter(|o| o.is_correct)
    }
}

/// A named, ordered collection of questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub questions: Vec<Question>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Quiz {
    /// Look up one of this quiz's questions by id.
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }
}

// ---------------------------------------------------------------------------
// Authoring types
// ---------------------------------------------------------------------------

/// A quiz as written by its creator, before a store assigns ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuiz {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub questions: Vec<NewQuestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuestion {
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub order: u32,
    #[serde(default = "default_true")]
    pub required: bool,
    #[serde(default)]
    pub options: Vec<NewOption>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOption {
    pub text: String,
    #[serde(default)]
    pub is_correct: bool,
    pub order: u32,
}

/// Partial update of a quiz's header fields. Questions are not editable here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Submissions
// ---------------------------------------------------------------------------

/// The wire request a respondent sends to have a quiz graded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub quiz_id: String,
    pub answers: Vec<SubmittedAnswer>,
}

/// One answer. Which field is read depends on the question's type; the
/// others are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedAnswer {
    pub question_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boolean_answer: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_options: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Attempts
// ---------------------------------------------------------------------------

/// Lifecycle of an attempt. `Created` is the only transient state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttemptStatus {
    Created,
    Scored,
}

/// A stored answer, kept exactly as submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub id: String,
    pub attempt_id: String,
    pub question_id: String,
    #[serde(default)]
    pub text_answer: Option<String>,
    #[serde(default)]
    pub boolean_answer: Option<bool>,
    #[serde(default)]
    pub selected_options: Vec<String>,
    /// Fractional score in [0, 1]; `None` if the answer matched no question.
    #[serde(default)]
    pub score: Option<f64>,
    /// The question as it was when the attempt was scored, if it still existed.
    #[serde(default)]
    pub question: Option<Question>,
}

/// One respondent's submission against a quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attempt {
    pub id: String,
    pub quiz_id: String,
    #[serde(default)]
    pub answers: Vec<AnswerRecord>,
    /// Final percentage in [0, 100], set once scored.
    #[serde(default)]
    pub score: Option<f64>,
    pub status: AttemptStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Attempt {
    /// A fresh, unscored attempt.
    pub fn new(id: impl Into<String>, quiz_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            quiz_id: quiz_id.into(),
            answers: Vec::new(),
            score: None,
            status: AttemptStatus::Created,
            created_at: now,
            completed_at: None,
        }
    }

    /// Move from `Created` to `Scored`. Scored attempts are immutable.
    pub fn complete(
        &mut self,
        score: f64,
        completed_at: DateTime<Utc>,
    ) -> Result<(), AlreadyScoredError> {
        if self.status == AttemptStatus::Scored {
            return Err(AlreadyScoredError {
                attempt_id: self.id.clone(),
            });
        }
        self.score = Some(score);
        self.completed_at = Some(completed_at);
        self.status = AttemptStatus::Scored;
        Ok(())
    }
}

/// Coarse feedback band for a final percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Perfect,
    Great,
    Good,
    NeedsReview,
}

impl ScoreBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 100.0 {
            ScoreBand::Perfect
        } else if score >= 80.0 {
            ScoreBand::Great
        } else if score >= 60.0 {
            ScoreBand::Good
        } else {
            ScoreBand::NeedsReview
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ScoreBand::Perfect => "Perfect! Every answer was correct.",
            ScoreBand::Great => "Great job! You got most questions right.",
            ScoreBand::Good => "Good effort! You got many questions right.",
            ScoreBand::NeedsReview => "Consider reviewing the quiz and trying again.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_type_wire_names() {
        assert_eq!(
            serde_json::to_string(&QuestionType::Checkbox).unwrap(),
            "\"CHECKBOX\""
        );
        let parsed: QuestionType = serde_json::from_str("\"BOOLEAN\"").unwrap();
        assert_eq!(parsed, QuestionType::Boolean);
        assert_eq!(
            "input".parse::<QuestionType>().unwrap(),
            QuestionType::Input
        );
        assert!("essay".parse::<QuestionType>().is_err());
    }

    #[test]
    fn submitted_answer_uses_camel_case() {
        let json = r#"{"questionId":"q1","selectedOptions":["a","b"]}"#;
        let answer: SubmittedAnswer = serde_json::from_str(json).unwrap();
        assert_eq!(answer.question_id, "q1");
        assert_eq!(
            answer.selected_options,
            Some(vec!["a".to_string(), "b".to_string()])
        );
        assert!(answer.text_answer.is_none());
        assert!(answer.boolean_answer.is_none());
    }

    #[test]
    fn question_type_field_is_named_type() {
        let json = r#"{
            "id": "q1", "quizId": "z", "text": "Capital?", "type": "INPUT", "order": 1
        }"#;
        let question: Question = serde_json::from_str(json).unwrap();
        assert_eq!(question.question_type, QuestionType::Input);
        assert!(question.required);
        assert!(question.options.is_empty());
    }

    #[test]
    fn attempt_completes_once() {
        let now = Utc::now();
        let mut attempt = Attempt::new("a1", "quiz", now);
        assert_eq!(attempt.status, AttemptStatus::Created);

        attempt.complete(75.0, now).unwrap();
        assert_eq!(attempt.status, AttemptStatus::Scored);
        assert_eq!(attempt.score, Some(75.0));
        assert_eq!(attempt.completed_at, Some(now));

        let err = attempt.complete(100.0, now).unwrap_err();
        assert_eq!(err.attempt_id, "a1");
        assert_eq!(err.to_string(), "attempt a1 is already scored");
        assert_eq!(attempt.score, Some(75.0));
    }

    #[test]
    fn score_bands() {
        assert_eq!(ScoreBand::from_score(100.0), ScoreBand::Perfect);
        assert_eq!(ScoreBand::from_score(80.0), ScoreBand::Great);
        assert_eq!(ScoreBand::from_score(75.0), ScoreBand::Good);
        assert_eq!(ScoreBand::from_score(59.9), ScoreBand::NeedsReview);
        assert_eq!(ScoreBand::from_score(0.0), ScoreBand::NeedsReview);
    }
}
