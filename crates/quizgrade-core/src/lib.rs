//! quizgrade-core: Quiz model, grading rules, and the submission engine.
//!
//! This crate defines the data model, the per-question grading rules, the
//! store traits, and the orchestrator that turns a submission into a scored
//! attempt.

pub mod engine;
pub mod error;
pub mod grading;
pub mod model;
pub mod parser;
pub mod traits;
pub mod validation;

pub use engine::{EngineConfig, SubmissionEngine, UnknownQuestionPolicy};
pub use error::{AlreadyScoredError, SubmissionError, ValidationError};
pub use grading::{grade_question, grade_submission, Grade};
