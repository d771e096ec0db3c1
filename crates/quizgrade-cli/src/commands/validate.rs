//! The `quizgrade validate` command.

use std::path::PathBuf;

use anyhow::Result;

use quizgrade_core::parser::load_quizzes;
use quizgrade_core::validation::validate_new_quiz;

pub fn execute(quiz_path: PathBuf) -> Result<()> {
    let load = load_quizzes(&quiz_path)?;

    let mut total_errors = load.failures.len();

    for (path, e) in &load.failures {
        println!("File: {}", path.display());
        println!("  ERROR: {e:#}");
    }

    for quiz in &load.quizzes {
        println!("Quiz: {} ({} questions)", quiz.title, quiz.questions.len());

        let errors = validate_new_quiz(quiz);
        for e in &errors {
            println!("  ERROR: {e}");
        }
        total_errors += errors.len();
    }

    anyhow::ensure!(total_errors == 0, "{total_errors} error(s) found");
    anyhow::ensure!(
        !load.quizzes.is_empty(),
        "no quizzes found in {}",
        quiz_path.display()
    );
    println!("All quizzes valid.");

    Ok(())
}
