//! TOML quiz parser and JSON submission decoding.
//!
//! Loads quiz definitions from TOML files and directories.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::ValidationError;
use crate::model::{NewOption, NewQuestion, NewQuiz, QuestionType, Submission};

/// Intermediate TOML structure for parsing quiz files.
#[derive(Debug, Deserialize)]
struct TomlQuizFile {
    quiz: TomlQuizHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlQuizHeader {
    title: String,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    text: String,
    #[serde(rename = "type")]
    question_type: String,
    #[serde(default)]
    order: Option<u32>,
    #[serde(default = "default_true")]
    required: bool,
    #[serde(default)]
    options: Vec<TomlOption>,
    /// Shorthand for an INPUT question's single reference answer.
    #[serde(default)]
    answer: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TomlOption {
    text: String,
    #[serde(default)]
    correct: bool,
    #[serde(default)]
    order: Option<u32>,
}

fn default_true() -> bool {
    true
}

/// Parse a single TOML file into a `NewQuiz`.
pub fn parse_quiz_file(path: &Path) -> Result<NewQuiz> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read quiz file: {}", path.display()))?;

    parse_quiz_str(&content, path)
}

/// Parse a TOML string into a `NewQuiz`.
///
/// Questions and options without an explicit `order` are numbered by their
/// position, starting at 1.
pub fn parse_quiz_str(content: &str, source_path: &Path) -> Result<NewQuiz> {
    let parsed: TomlQuizFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .enumerate()
        .map(|(i, q)| {
            let question_type: QuestionType = q
                .question_type
                .parse()
                .map_err(|e: String| anyhow::anyhow!("question {}: {}", i + 1, e))?;

            let mut options: Vec<NewOption> = q
                .options
                .into_iter()
                .enumerate()
                .map(|(j, o)| NewOption {
                    text: o.text,
                    is_correct: o.correct,
                    order: o.order.unwrap_or(j as u32 + 1),
                })
                .collect();

            if let Some(answer) = q.answer {
                anyhow::ensure!(
                    question_type == QuestionType::Input,
                    "question {}: `answer` is only valid on INPUT questions",
                    i + 1
                );
                options.push(NewOption {
                    text: answer,
                    is_correct: true,
                    order: options.len() as u32 + 1,
                });
            }

            Ok(NewQuestion {
                text: q.text,
                question_type,
                order: q.order.unwrap_or(i as u32 + 1),
                required: q.required,
                options,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(NewQuiz {
        title: parsed.quiz.title,
        description: parsed.quiz.description,
        questions,
    })
}

/// Quizzes found under a path, with the files that failed to parse.
#[derive(Debug, Default)]
pub struct QuizLoad {
    pub quizzes: Vec<NewQuiz>,
    pub failures: Vec<(PathBuf, anyhow::Error)>,
}

/// Recursively load all `.toml` quiz files from a directory.
///
/// A file that fails to parse does not stop the walk; it is recorded in
/// [`QuizLoad::failures`].
pub fn load_quiz_directory(dir: &Path) -> Result<QuizLoad> {
    let mut load = QuizLoad::default();
    walk_quiz_directory(dir, &mut load)?;
    Ok(load)
}

fn walk_quiz_directory(dir: &Path, load: &mut QuizLoad) -> Result<()> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            walk_quiz_directory(&path, load)?;
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_quiz_file(&path) {
                Ok(quiz) => load.quizzes.push(quiz),
                Err(e) => {
                    tracing::warn!("failed to parse {}: {:#}", path.display(), e);
                    load.failures.push((path, e));
                }
            }
        }
    }

    Ok(())
}

/// Load a single file or every quiz under a directory.
///
/// A single file that fails to parse is an error.
pub fn load_quizzes(path: &Path) -> Result<QuizLoad> {
    if path.is_dir() {
        load_quiz_directory(path)
    } else {
        Ok(QuizLoad {
            quizzes: vec![parse_quiz_file(path)?],
            failures: Vec::new(),
        })
    }
}

/// Decode a submission from its JSON wire form.
///
/// Shape errors (wrong types, `answers` not an array, missing fields) are
/// reported as a validation failure on `body`.
pub fn parse_submission_str(json: &str) -> Result<Submission, ValidationError> {
    serde_json::from_str(json).map_err(|e| ValidationError::new("body", e.to_string()))
}
