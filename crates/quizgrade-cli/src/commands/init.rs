//! The `quizgrade init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create quizgrade.toml
    if std::path::Path::new("quizgrade.toml").exists() {
        println!("quizgrade.toml already exists, skipping.");
    } else {
        std::fs::write("quizgrade.toml", SAMPLE_CONFIG)?;
        println!("Created quizgrade.toml");
    }

    // Create example quiz
    std::fs::create_dir_all("quizzes")?;
    let example_path = std::path::Path::new("quizzes/example.toml");
    if example_path.exists() {
        println!("quizzes/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_QUIZ)?;
        println!("Created quizzes/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: quizgrade validate --quiz quizzes/example.toml");
    println!("  2. Run: quizgrade import --quiz quizzes/example.toml");
    println!("  3. Write an answers JSON file and run: quizgrade submit --answers answers.json");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizgrade configuration

data_file = "quizgrade-data.json"
strict_question_ids = false
max_concurrent_writes = 8
"#;

const EXAMPLE_QUIZ: &str = include_str!("../../quizzes/example.toml");
