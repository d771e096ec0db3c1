//! The `quizgrade attempts` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use super::open_store;

pub async fn execute(quiz_id: String, config_path: Option<PathBuf>) -> Result<()> {
    let (_, store) = open_store(config_path).await?;
    let attempts = store.list_attempts(&quiz_id).await;

    if attempts.is_empty() {
        println!("No attempts recorded for quiz {quiz_id}.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Attempt", "Answers", "Score", "Status", "Completed"]);

    for attempt in &attempts {
        table.add_row(vec![
            Cell::new(&attempt.id),
            Cell::new(attempt.answers.len()),
            Cell::new(
                attempt
                    .score
                    .map(|s| format!("{s:.1}%"))
                    .unwrap_or_else(|| "-".into()),
            ),
            Cell::new(format!("{:?}", attempt.status).to_lowercase()),
            Cell::new(
                attempt
                    .completed_at
                    .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| "-".into()),
            ),
        ]);
    }

    println!("{table}");
    Ok(())
}
