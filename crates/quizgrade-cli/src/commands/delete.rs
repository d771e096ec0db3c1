//! The `quizgrade delete` command.

use std::path::PathBuf;

use anyhow::Result;

use super::{open_store, save_store};

pub async fn execute(id: String, config_path: Option<PathBuf>) -> Result<()> {
    let (config, store) = open_store(config_path).await?;
    store.delete_quiz(&id).await?;
    save_store(&config, &store).await?;
    println!("Deleted quiz {id}");
    Ok(())
}
