//! quizgrade CLI: author quizzes and grade submissions from the command line.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "quizgrade", version, about = "Quiz authoring and automatic grading")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate quiz definition TOML files
    Validate {
        /// Path to a quiz file or directory
        #[arg(long)]
        quiz: PathBuf,
    },

    /// Import quiz definitions into the data file
    Import {
        /// Path to a quiz file or directory
        #[arg(long)]
        quiz: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List stored quizzes
    List {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Delete a quiz with its questions
    Delete {
        /// Quiz id
        #[arg(long)]
        id: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Grade a submission and record the attempt
    Submit {
        /// JSON file with `quizId` and `answers`
        #[arg(long)]
        answers: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = commands::submit::OutputFormat::Text)]
        format: commands::submit::OutputFormat,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List recorded attempts for a quiz
    Attempts {
        /// Quiz id
        #[arg(long)]
        quiz_id: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and example quiz
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizgrade_core=info".parse().unwrap())
                .add_directive("quizgrade_store=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { quiz } => commands::validate::execute(quiz),
        Commands::Import { quiz, config } => commands::import::execute(quiz, config).await,
        Commands::List { config } => commands::list::execute(config).await,
        Commands::Delete { id, config } => commands::delete::execute(id, config).await,
        Commands::Submit {
            answers,
            format,
            config,
        } => commands::submit::execute(answers, format, config).await,
        Commands::Attempts { quiz_id, config } => {
            commands::attempts::execute(quiz_id, config).await
        }
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
