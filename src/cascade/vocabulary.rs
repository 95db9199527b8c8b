use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::debug;

use super::{Oracle, Partition};
use crate::config::Config;
use crate::error::{Error, Result};

/// Exact-match lookup against the user-maintained allow-list.
///
/// Only ever confirms words; it never produces typo findings.
pub struct VocabularyOracle {
    entries: HashSet<String>,
}

impl VocabularyOracle {
    pub fn load(config: &Config) -> Result<Self> {
        let entries = match &config.vocabulary_path {
            // A missing vocabulary is an empty one, not an error.
            Some(path) if path.exists() => read_entries(path)?,
            _ => HashSet::new(),
        };
        debug!(entries = entries.len(), "vocabulary loaded");
        Ok(Self { entries })
    }
}

fn read_entries(path: &Path) -> Result<HashSet<String>> {
    let content = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_lowercase)
        .collect())
}

impl Oracle for VocabularyOracle {
    fn name(&self) -> &'static str {
        "vocabulary"
    }

    fn classify(&self, words: &[String]) -> Result<Partition> {
        let mut partition = Partition::default();
        for word in words {
            if self.entries.contains(&word.to_lowercase()) {
                partition.sure_correct.push(word.clone());
            } else {
                partition.unknown.push(word.clone());
            }
        }
        Ok(partition)
    }
}

/// Rewrite the vocabulary file with entries sorted within each section.
///
/// Sections start at `#` header lines; headers stay on top of their section,
/// entries below them are sorted case-sensitively, sections are separated by
/// a single blank line with none after the last. Idempotent.
pub fn reorder(path: &Path) -> Result<()> {
    let content = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut sections: Vec<Vec<&str>> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with('#') && !current.is_empty() {
            sections.push(std::mem::take(&mut current));
        }
        current.push(line);
    }
    if !current.is_empty() {
        sections.push(current);
    }

    let mut output = String::new();
    for (index, section) in sections.iter().enumerate() {
        for header in section.iter().filter(|line| line.starts_with('#')) {
            output.push_str(header);
            output.push('\n');
        }
        let mut entries: Vec<&&str> = section.iter().filter(|line| !line.starts_with('#')).collect();
        entries.sort();
        for entry in entries {
            output.push_str(entry);
            output.push('\n');
        }
        if index + 1 < sections.len() {
            output.push('\n');
        }
    }

    fs::write(path, output).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}
