//! The `quizgrade import` command.

use std::path::PathBuf;

use anyhow::Result;

use quizgrade_core::parser::load_quizzes;

use super::{open_store, save_store};

pub async fn execute(quiz_path: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let load = load_quizzes(&quiz_path)?;
    if let Some((path, e)) = load.failures.first() {
        anyhow::bail!(
            "failed to parse {}: {e:#} ({} file(s) failed, nothing imported)",
            path.display(),
            load.failures.len()
        );
    }

    let quizzes = load.quizzes;
    anyhow::ensure!(
        !quizzes.is_empty(),
        "no quizzes found in {}",
        quiz_path.display()
    );

    let (config, store) = open_store(config_path).await?;

    for new_quiz in quizzes {
        let title = new_quiz.title.clone();
        let quiz = store
            .create_quiz(new_quiz)
            .await
            .map_err(|e| anyhow::anyhow!("{title}: {e}"))?;
        println!(
            "Imported quiz {}: {} ({} questions)",
            quiz.id,
            quiz.title,
            quiz.questions.len()
        );
    }

    save_store(&config, &store).await?;
    eprintln!("Saved to: {}", config.data_file.display());

    Ok(())
}
