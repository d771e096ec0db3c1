//! The `quizgrade list` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use super::open_store;

pub async fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let (_, store) = open_store(config_path).await?;
    let quizzes = store.list_quizzes().await;

    if quizzes.is_empty() {
        println!("No quizzes stored. Run `quizgrade import --quiz <file>` to add one.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Id", "Title", "Questions", "Attempts", "Updated"]);

    for quiz in &quizzes {
        let attempts = store.list_attempts(&quiz.id).await.len();
        table.add_row(vec![
            Cell::new(&quiz.id),
            Cell::new(&quiz.title),
            Cell::new(quiz.questions.len()),
            Cell::new(attempts),
            Cell::new(quiz.updated_at.format("%Y-%m-%d %H:%M")),
        ]);
    }

    println!("{table}");
    Ok(())
}
