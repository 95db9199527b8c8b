use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::{fs, io};

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::debug;

use super::{Oracle, Partition};
use crate::error::{Error, Result};
use crate::TypoFinding;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Correct,
    Typo,
}

/// Persisted classification outcome for one normalized word.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CacheEntry {
    pub status: Verdict,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// Word-keyed store of previously resolved classifications.
///
/// Backed by a single JSON document on disk and a concurrent map in memory.
/// A missing or unconfigured file behaves as an all-miss store; concurrent
/// writes to the same key are last-write-wins.
pub struct CacheStore {
    path: Option<PathBuf>,
    entries: DashMap<String, CacheEntry>,
}

impl CacheStore {
    pub fn open(path: Option<&Path>) -> Result<Self> {
        let entries = DashMap::new();
        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(path).map_err(|source| Error::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                let loaded: HashMap<String, CacheEntry> =
                    serde_json::from_str(&content).map_err(|source| Error::CacheStore {
                        path: path.to_path_buf(),
                        source,
                    })?;
                for (word, entry) in loaded {
                    entries.insert(word, entry);
                }
            }
        }
        debug!(entries = entries.len(), "cache store opened");
        Ok(Self {
            path: path.map(Path::to_path_buf),
            entries,
        })
    }

    pub fn get(&self, word: &str) -> Option<CacheEntry> {
        self.entries.get(word).map(|entry| entry.value().clone())
    }

    pub fn insert(&self, word: &str, entry: CacheEntry) {
        self.entries.insert(word.to_string(), entry);
    }

    /// Write the store back to disk via a sibling temp file and rename.
    pub fn flush(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let io_err = |source: io::Error| Error::Io {
            path: path.clone(),
            source,
        };

        let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
        if let Some(dir) = dir {
            fs::create_dir_all(dir).map_err(io_err)?;
        }

        let snapshot: HashMap<String, CacheEntry> = self
            .entries
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();

        let mut file =
            NamedTempFile::new_in(dir.unwrap_or_else(|| Path::new("."))).map_err(io_err)?;
        serde_json::to_writer_pretty(&mut file, &snapshot).map_err(|source| Error::CacheStore {
            path: path.clone(),
            source,
        })?;
        file.persist(path)
            .map_err(|persist_error| Error::Io {
                path: path.clone(),
                source: persist_error.error,
            })?;
        Ok(())
    }
}

/// Read-only lookup stage over the persistent store; writes happen only
/// through the remote oracle.
pub struct CacheOracle {
    store: Arc<CacheStore>,
}

impl CacheOracle {
    pub fn new(store: Arc<CacheStore>) -> Self {
        Self { store }
    }
}

impl Oracle for CacheOracle {
    fn name(&self) -> &'static str {
        "cache"
    }

    fn classify(&self, words: &[String]) -> Result<Partition> {
        let mut partition = Partition::default();
        for word in words {
            match self.store.get(word) {
                Some(entry) => match entry.status {
                    Verdict::Correct => partition.sure_correct.push(word.clone()),
                    Verdict::Typo => partition.sure_with_typo_info.push(TypoFinding {
                        original: word.clone(),
                        possible_options: entry.suggestions,
                    }),
                },
                None => partition.unknown.push(word.clone()),
            }
        }
        Ok(partition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn correct() -> CacheEntry {
        CacheEntry {
            status: Verdict::Correct,
            suggestions: Vec::new(),
        }
    }

    fn typo(suggestions: &[&str]) -> CacheEntry {
        CacheEntry {
            status: Verdict::Typo,
            suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn unconfigured_store_misses_everything() {
        let store = CacheStore::open(None).unwrap();
        assert_eq!(store.get("слово"), None);
        store.flush().unwrap();
    }

    #[test]
    fn missing_file_is_an_all_miss_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::open(Some(&dir.path().join("resolved.json"))).unwrap();
        assert_eq!(store.get("слово"), None);
    }

    #[test]
    fn entries_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resolved.json");

        let store = CacheStore::open(Some(&path)).unwrap();
        store.insert("превед", typo(&["привет"]));
        store.insert("привет", correct());
        store.flush().unwrap();

        let reopened = CacheStore::open(Some(&path)).unwrap();
        assert_eq!(reopened.get("превед"), Some(typo(&["привет"])));
        assert_eq!(reopened.get("привет"), Some(correct()));
    }

    #[test]
    fn malformed_store_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resolved.json");
        fs::write(&path, "not json at all").unwrap();
        assert!(matches!(
            CacheStore::open(Some(&path)),
            Err(Error::CacheStore { .. })
        ));
    }

    #[test]
    fn oracle_partitions_by_cached_verdict() {
        let store = Arc::new(CacheStore::open(None).unwrap());
        store.insert("привет", correct());
        store.insert("превет", typo(&["привет"]));
        let oracle = CacheOracle::new(store);

        let words: Vec<String> = ["привет", "превет", "неизвестное"]
            .iter()
            .map(|w| w.to_string())
            .collect();
        let partition = oracle.classify(&words).unwrap();

        assert_eq!(partition.sure_correct, vec!["привет"]);
        assert_eq!(
            partition.sure_with_typo_info,
            vec![TypoFinding {
                original: "превет".into(),
                possible_options: vec!["привет".into()],
            }]
        );
        assert_eq!(partition.unknown, vec!["неизвестное"]);
    }
}
