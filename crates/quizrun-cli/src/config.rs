//! Configuration file loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level quizrun configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Problem file to load.
    #[serde(default = "default_file")]
    pub file: PathBuf,
    /// Time limit for the whole quiz; 0 disables it.
    #[serde(default)]
    pub timeout_secs: u64,
    /// Shuffle the problems before asking.
    #[serde(default)]
    pub shuffle: bool,
    /// Seed for the shuffle.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Directory for JSON reports.
    #[serde(default)]
    pub report_dir: Option<PathBuf>,
}

fn default_file() -> PathBuf {
    PathBuf::from("problems.csv")
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            file: default_file(),
            timeout_secs: 0,
            shuffle: false,
            seed: None,
            report_dir: None,
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `quizrun.toml` in the current directory
/// 2. `~/.config/quizrun/config.toml`
///
/// Environment variable overrides: `QUIZRUN_FILE`, `QUIZRUN_TIMEOUT`.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizrun.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<QuizConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    Ok(config)
}

/// Apply `QUIZRUN_*` overrides, reading variables through `lookup`.
fn apply_env_overrides(
    config: &mut QuizConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    if let Some(file) = lookup("QUIZRUN_FILE") {
        config.file = PathBuf::from(file);
    }
    if let Some(timeout) = lookup("QUIZRUN_TIMEOUT") {
        config.timeout_secs = timeout
            .trim()
            .parse()
            .with_context(|| format!("invalid QUIZRUN_TIMEOUT value: '{timeout}'"))?;
    }
    Ok(())
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizrun"))
}
