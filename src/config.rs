use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::normalize::Script;

const YANDEX_SPELLER_URL: &str = "https://speller.yandex.net/services/spellservice.json/checkTexts";

/// Read-only backend configuration for a single run; every oracle takes it
/// by reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub vocabulary_path: Option<PathBuf>,
    pub cache_path: Option<PathBuf>,

    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    #[serde(default = "default_min_word_length")]
    pub min_word_length: usize,

    #[serde(default)]
    pub script: Option<Script>,

    #[serde(default)]
    pub exclude: Vec<String>,

    #[serde(default)]
    pub process_hidden: bool,

    /// Extraction worker threads; 0 picks the rayon default.
    #[serde(default)]
    pub jobs: usize,

    #[serde(default = "default_speller_url")]
    pub speller_url: String,

    #[serde(default = "default_remote_timeout")]
    pub remote_timeout_secs: u64,
}

fn default_chunk_size() -> usize {
    50
}

fn default_min_word_length() -> usize {
    3
}

fn default_speller_url() -> String {
    YANDEX_SPELLER_URL.to_string()
}

fn default_remote_timeout() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vocabulary_path: None,
            cache_path: None,
            chunk_size: default_chunk_size(),
            min_word_length: default_min_word_length(),
            script: None,
            exclude: Vec::new(),
            process_hidden: false,
            jobs: 0,
            speller_url: default_speller_url(),
            remote_timeout_secs: default_remote_timeout(),
        }
    }
}

/// Command-line values that take precedence over any config file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub vocabulary_path: Option<PathBuf>,
    pub cache_path: Option<PathBuf>,
    pub chunk_size: Option<usize>,
    pub min_word_length: Option<usize>,
    pub script: Option<Script>,
    pub exclude: Vec<String>,
    pub process_hidden: bool,
    pub jobs: Option<usize>,
}

impl Config {
    /// Load configuration with priority: CLI args > local config > global config > defaults
    pub fn load(overrides: Overrides) -> Result<Self> {
        let mut config = Self::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                config = config.merge(Self::from_file(&global_path)?);
            }
        }

        let local_path = PathBuf::from(".typoscan.toml");
        if local_path.exists() {
            config = config.merge(Self::from_file(&local_path)?);
        }

        if let Some(path) = overrides.vocabulary_path {
            config.vocabulary_path = Some(path);
        }
        if let Some(path) = overrides.cache_path {
            config.cache_path = Some(path);
        }
        if let Some(size) = overrides.chunk_size {
            config.chunk_size = size;
        }
        if let Some(length) = overrides.min_word_length {
            config.min_word_length = length;
        }
        if let Some(script) = overrides.script {
            config.script = Some(script);
        }
        if !overrides.exclude.is_empty() {
            config.exclude.extend(overrides.exclude);
        }
        if overrides.process_hidden {
            config.process_hidden = true;
        }
        if let Some(jobs) = overrides.jobs {
            config.jobs = jobs;
        }

        if config.cache_path.is_none() {
            config.cache_path = Self::default_cache_path();
        }

        if config.chunk_size == 0 {
            anyhow::bail!("chunk size must be greater than zero");
        }

        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn merge(mut self, other: Self) -> Self {
        if other.vocabulary_path.is_some() {
            self.vocabulary_path = other.vocabulary_path;
        }
        if other.cache_path.is_some() {
            self.cache_path = other.cache_path;
        }
        if other.chunk_size != default_chunk_size() {
            self.chunk_size = other.chunk_size;
        }
        if other.min_word_length != default_min_word_length() {
            self.min_word_length = other.min_word_length;
        }
        if other.script.is_some() {
            self.script = other.script;
        }
        if !other.exclude.is_empty() {
            self.exclude = other.exclude;
        }
        if other.process_hidden {
            self.process_hidden = true;
        }
        if other.jobs != 0 {
            self.jobs = other.jobs;
        }
        if other.speller_url != default_speller_url() {
            self.speller_url = other.speller_url;
        }
        if other.remote_timeout_secs != default_remote_timeout() {
            self.remote_timeout_secs = other.remote_timeout_secs;
        }
        self
    }

    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "typoscan").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn default_cache_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "typoscan").map(|dirs| dirs.cache_dir().join("resolved.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.chunk_size, 50);
        assert_eq!(config.min_word_length, 3);
        assert!(config.script.is_none());
        assert!(!config.process_hidden);
    }

    #[test]
    fn merge_prefers_non_default_values() {
        let base = Config::default();
        let other = Config {
            chunk_size: 10,
            vocabulary_path: Some(PathBuf::from("vocab.txt")),
            ..Default::default()
        };

        let merged = base.merge(other);
        assert_eq!(merged.chunk_size, 10);
        assert_eq!(merged.vocabulary_path, Some(PathBuf::from("vocab.txt")));
        assert_eq!(merged.min_word_length, 3);
    }

    #[test]
    fn parses_toml_config() {
        let config: Config = toml::from_str(
            r#"
            vocabulary_path = "words.txt"
            chunk_size = 25
            script = "cyrillic"
            "#,
        )
        .unwrap();
        assert_eq!(config.vocabulary_path, Some(PathBuf::from("words.txt")));
        assert_eq!(config.chunk_size, 25);
        assert_eq!(config.script, Some(Script::Cyrillic));
    }
}
