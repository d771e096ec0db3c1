//! quizgrade configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quizgrade_core::engine::{EngineConfig, UnknownQuestionPolicy};

/// Top-level quizgrade configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizgradeConfig {
    /// JSON snapshot holding quizzes and attempts.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    /// Reject submissions that answer questions outside the quiz.
    #[serde(default)]
    pub strict_question_ids: bool,
    /// Max answer records written concurrently per submission.
    #[serde(default = "default_max_concurrent_writes")]
    pub max_concurrent_writes: usize,
}

fn default_data_file() -> PathBuf {
    PathBuf::from("./quizgrade-data.json")
}
fn default_max_concurrent_writes() -> usize {
    8
}

impl Default for QuizgradeConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            strict_question_ids: false,
            max_concurrent_writes: default_max_concurrent_writes(),
        }
    }
}

impl QuizgradeConfig {
    /// Engine settings derived from this config.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            unknown_questions: if self.strict_question_ids {
                UnknownQuestionPolicy::Reject
            } else {
                UnknownQuestionPolicy::Skip
            },
            max_concurrent_writes: self.max_concurrent_writes.max(1),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizgrade.toml` in the current directory
/// 2. `~/.config/quizgrade/config.toml`
///
/// Environment variable overrides: `QUIZGRADE_DATA_FILE`, `QUIZGRADE_STRICT`.
pub fn load_config() -> Result<QuizgradeConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizgradeConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizgrade.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let config = match &config_path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<QuizgradeConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizgradeConfig::default(),
    };

    Ok(apply_overrides(
        config,
        config_path.as_deref(),
        std::env::var("QUIZGRADE_DATA_FILE").ok(),
        std::env::var("QUIZGRADE_STRICT").ok(),
    ))
}

/// Apply env var overrides and resolve the data file path.
///
/// A relative `data_file` from the config file is relative to that file's
/// directory. A relative `QUIZGRADE_DATA_FILE` is relative to the working
/// directory.
fn apply_overrides(
    mut config: QuizgradeConfig,
    config_path: Option<&Path>,
    data_file_env: Option<String>,
    strict_env: Option<String>,
) -> QuizgradeConfig {
    if let Some(strict) = strict_env {
        config.strict_question_ids = matches!(strict.as_str(), "1" | "true" | "yes");
    }

    match data_file_env {
        Some(data_file) => config.data_file = PathBuf::from(data_file),
        None => {
            config.data_file =
                PathBuf::from(resolve_env_vars(&config.data_file.to_string_lossy()));
            if config.data_file.is_relative() {
                if let Some(dir) = config_path.and_then(Path::parent) {
                    if !dir.as_os_str().is_empty() {
                        config.data_file = dir.join(&config.data_file);
                    }
                }
            }
        }
    }

    config
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizgrade"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_QUIZGRADE_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_QUIZGRADE_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_QUIZGRADE_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        std::env::remove_var("_QUIZGRADE_TEST_VAR");
    }

    #[test]
    fn default_config() {
        let config = QuizgradeConfig::default();
        assert_eq!(config.data_file, PathBuf::from("./quizgrade-data.json"));
        assert!(!config.strict_question_ids);
        assert_eq!(config.max_concurrent_writes, 8);
        assert_eq!(
            config.engine_config().unknown_questions,
            UnknownQuestionPolicy::Skip
        );
    }

    #[test]
    fn parse_config() {
        let toml_str = r#"
data_file = "/var/lib/quizgrade/data.json"
strict_question_ids = true
max_concurrent_writes = 0
"#;
        let config: QuizgradeConfig = toml::from_str(toml_str).unwrap();
        assert!(config.strict_question_ids);
        let engine = config.engine_config();
        assert_eq!(engine.unknown_questions, UnknownQuestionPolicy::Reject);
        assert_eq!(engine.max_concurrent_writes, 1);
    }

    #[test]
    fn relative_data_file_follows_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quizgrade.toml");
        std::fs::write(&path, "data_file = \"data/store.json\"\n").unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.data_file, dir.path().join("data/store.json"));
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        assert!(load_config_from(Some(Path::new("/no/such/quizgrade.toml"))).is_err());
    }

    #[test]
    fn data_file_env_override_is_not_rebased() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quizgrade.toml");
        let file_config = QuizgradeConfig {
            data_file: PathBuf::from("data/store.json"),
            ..Default::default()
        };

        let config = apply_overrides(
            file_config.clone(),
            Some(&path),
            Some("local.json".into()),
            None,
        );
        assert_eq!(config.data_file, PathBuf::from("local.json"));

        let config = apply_overrides(file_config, Some(&path), None, Some("yes".into()));
        assert_eq!(config.data_file, dir.path().join("data/store.json"));
        assert!(config.strict_question_ids);
    }
}
