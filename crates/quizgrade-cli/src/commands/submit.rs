//! The `quizgrade submit` command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::ValueEnum;
use comfy_table::{Cell, Table};

use quizgrade_core::engine::SubmissionEngine;
use quizgrade_core::model::{AnswerRecord, Attempt, ScoreBand};
use quizgrade_core::parser::parse_submission_str;

use super::{open_store, save_store};

/// How a graded attempt is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Review table with the final score
    Text,
    /// The scored attempt as JSON
    Json,
}

pub async fn execute(
    answers_path: PathBuf,
    format: OutputFormat,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let content = std::fs::read_to_string(&answers_path)
        .with_context(|| format!("failed to read answers: {}", answers_path.display()))?;
    let submission = parse_submission_str(&content)?;

    let (config, store) = open_store(config_path).await?;
    let store = Arc::new(store);
    let engine = SubmissionEngine::new(store.clone(), store.clone(), config.engine_config());

    // Save even on failure: a created attempt stays on record.
    let outcome = engine.submit(&submission).await;
    save_store(&config, &store).await?;
    let attempt = outcome?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&attempt)?),
        OutputFormat::Text => print_review(&attempt),
    }

    Ok(())
}

fn print_review(attempt: &Attempt) {
    let mut table = Table::new();
    table.set_header(vec!["#", "Question", "Type", "Answer", "Score"]);

    for (i, record) in attempt.answers.iter().enumerate() {
        let (text, kind) = match &record.question {
            Some(q) => (q.text.clone(), q.question_type.to_string()),
            None => (format!("(unknown question {})", record.question_id), "-".into()),
        };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(text),
            Cell::new(kind),
            Cell::new(describe_answer(record)),
            Cell::new(
                record
                    .score
                    .map(|s| format!("{:.0}%", s * 100.0))
                    .unwrap_or_else(|| "not scored".into()),
            ),
        ]);
    }

    println!("{table}");

    let score = attempt.score.unwrap_or(0.0);
    println!("Score: {score:.1}%");
    println!("{}", ScoreBand::from_score(score).message());
    println!("Attempt: {}", attempt.id);
}

/// Render the raw answer, naming selected options by their text when known.
fn describe_answer(record: &AnswerRecord) -> String {
    if let Some(value) = record.boolean_answer {
        return value.to_string();
    }
    if !record.selected_options.is_empty() {
        let names: Vec<String> = record
            .selected_options
            .iter()
            .map(|id| {
                record
                    .question
                    .as_ref()
                    .and_then(|q| q.options.iter().find(|o| &o.id == id))
                    .map(|o| o.text.clone())
                    .unwrap_or_else(|| id.clone())
            })
            .collect();
        return names.join(", ");
    }
    record.text_answer.clone().unwrap_or_default()
}
