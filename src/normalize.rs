use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Target alphabet for optional candidate filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Script {
    Latin,
    Cyrillic,
}

impl Script {
    fn matches(self, word: &str) -> bool {
        match self {
            Script::Latin => word.chars().all(|c| c.is_ascii_lowercase() || c == '-'),
            Script::Cyrillic => word.chars().all(|c| matches!(c, 'а'..='я' | 'ё' | '-')),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    /// Tokens shorter than this are dropped.
    pub min_word_length: usize,
    /// When set, only tokens entirely in this alphabet survive.
    pub script: Option<Script>,
    /// Treat `_` and `-` as token separators rather than word-internal characters.
    pub split_identifiers: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            min_word_length: 3,
            script: None,
            split_identifiers: true,
        }
    }
}

/// Turn raw extracted strings into a deduplicated set of candidate words.
pub fn normalize<I, S>(raw: I, options: &NormalizeOptions) -> HashSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut candidates = HashSet::new();
    for text in raw {
        for token in tokenize(text.as_ref(), options.split_identifiers) {
            let token = token.to_lowercase();
            let token = token.trim_matches(|c| c == '-' || c == '_');
            if token.chars().count() < options.min_word_length {
                continue;
            }
            if let Some(script) = options.script {
                if !script.matches(token) {
                    continue;
                }
            }
            candidates.insert(token.to_string());
        }
    }
    candidates
}

fn tokenize(text: &str, split_identifiers: bool) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    for grapheme in text.graphemes(true) {
        let ch = grapheme.chars().next().unwrap_or(' ');
        let joins = ch.is_alphabetic() || (!split_identifiers && (ch == '-' || ch == '_'));
        if joins {
            current.push_str(grapheme);
        } else if !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}
