//! Subcommand implementations.

use std::path::PathBuf;

use anyhow::{Context, Result};

use quizgrade_store::{load_config_from, MemoryStore, QuizgradeConfig};

pub mod attempts;
pub mod delete;
pub mod import;
pub mod init;
pub mod list;
pub mod submit;
pub mod validate;

/// Load config and open the store it points at.
pub(crate) async fn open_store(
    config_path: Option<PathBuf>,
) -> Result<(QuizgradeConfig, MemoryStore)> {
    let config = load_config_from(config_path.as_deref())?;
    tracing::debug!("using data file {}", config.data_file.display());
    let store = MemoryStore::open(&config.data_file)
        .await
        .with_context(|| format!("failed to open data file {}", config.data_file.display()))?;
    Ok((config, store))
}

/// Persist the store back to the configured data file.
pub(crate) async fn save_store(config: &QuizgradeConfig, store: &MemoryStore) -> Result<()> {
    store
        .save_snapshot(&config.data_file)
        .await
        .with_context(|| format!("failed to save data file {}", config.data_file.display()))
}
